//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (database)
//!
//! # Auth
//! POST /api/auth/register               - Register + verification email
//! GET  /api/auth/verify-email?token=    - Consume verification token
//! POST /api/auth/password-reset/request - Send reset link (always 200)
//! POST /api/auth/password-reset/confirm - Consume token, set password
//!
//! # Sessions
//! POST   /api/sessions                  - Login
//! DELETE /api/sessions                  - Logout
//! GET    /api/sessions/current          - Current user
//!
//! # Catalog
//! GET/POST        /api/categories       - List / create (category:create)
//! GET/PUT/DELETE  /api/categories/{id}
//! GET/POST        /api/products         - List / create (product:create)
//! GET/PUT/DELETE  /api/products/{id}
//!
//! # Cart & checkout
//! GET    /api/cart                      - Priced cart
//! POST   /api/cart/items                - Add line
//! PUT    /api/cart/items/{product_id}   - Set quantity
//! DELETE /api/cart/items/{product_id}   - Remove line
//! POST   /api/checkout                  - Cart -> paid order
//!
//! # Orders
//! GET   /api/orders                     - Own orders (all with order:read)
//! GET   /api/orders/{id}                - Order with lines
//! GET   /api/orders/{id}/transactions   - Payment transactions
//! PATCH /api/orders/{id}                - Status transition (order:update)
//!
//! # Account
//! GET/POST       /api/addresses         - Address book
//! PUT/DELETE     /api/addresses/{id}
//! GET/POST       /api/payment-methods   - Cards (mirrored from provider)
//! DELETE         /api/payment-methods/{id}
//! GET            /api/subscriptions
//! DELETE         /api/subscriptions/{id}
//!
//! # Users (user:* permissions)
//! GET/POST       /api/users
//! GET/PUT/DELETE /api/users/{id}
//!
//! # Contact & chatbot
//! POST /api/contact-messages            - Submit (public)
//! GET  /api/contact-messages            - List (contact:read)
//! GET  /api/contact-messages/{id}
//! POST /api/contact-messages/{id}/respond - (contact:respond)
//! POST /api/contact-messages/{id}/close
//! POST /api/chatbot/messages            - Keyword bot (public)
//!
//! # Content & dashboard
//! GET/POST       /api/hero-carousel     - Slides (mutations hero-carousel:*)
//! PUT/DELETE     /api/hero-carousel/{id}
//! GET/PUT        /api/main-message      - Banner (PUT main-message:update)
//! GET            /api/dashboard         - Aggregates (dashboard:read)
//! ```

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod chatbot;
pub mod checkout;
pub mod contact;
pub mod content;
pub mod dashboard;
pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod sessions;
pub mod subscriptions;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/verify-email", get(auth::verify_email))
        .route("/password-reset/request", post(auth::request_password_reset))
        .route("/password-reset/confirm", post(auth::confirm_password_reset))
}

/// Create the session routes router.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(sessions::login).delete(sessions::logout))
        .route("/current", get(sessions::current))
}

/// Create the catalog routes router (categories + products).
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the cart and checkout routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/cart/items", post(cart::add_item))
        .route(
            "/cart/items/{product_id}",
            put(cart::update_item).delete(cart::remove_item),
        )
        .route("/checkout", post(checkout::checkout))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list))
        .route("/{id}", get(orders::get).patch(orders::update_status))
        .route("/{id}/transactions", get(orders::transactions))
}

/// Create the account routes router (addresses, payment methods, subscriptions).
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/addresses", get(addresses::list).post(addresses::create))
        .route(
            "/addresses/{id}",
            put(addresses::update).delete(addresses::delete),
        )
        .route(
            "/payment-methods",
            get(payment_methods::list).post(payment_methods::create),
        )
        .route("/payment-methods/{id}", delete(payment_methods::delete))
        .route("/subscriptions", get(subscriptions::list))
        .route("/subscriptions/{id}", delete(subscriptions::cancel))
}

/// Create the user administration routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{id}",
            get(users::get).put(users::update).delete(users::delete),
        )
}

/// Create the contact and chatbot routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contact-messages",
            get(contact::list).post(contact::submit),
        )
        .route("/contact-messages/{id}", get(contact::get))
        .route("/contact-messages/{id}/respond", post(contact::respond))
        .route("/contact-messages/{id}/close", post(contact::close))
        .route("/chatbot/messages", post(chatbot::message))
}

/// Create the content and dashboard routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/hero-carousel",
            get(content::list_slides).post(content::create_slide),
        )
        .route(
            "/hero-carousel/{id}",
            put(content::update_slide).delete(content::delete_slide),
        )
        .route(
            "/main-message",
            get(content::get_main_message).put(content::set_main_message),
        )
        .route("/dashboard", get(dashboard::show))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new().nest(
        "/api",
        Router::new()
            .nest("/auth", auth_routes())
            .nest("/sessions", session_routes())
            .nest("/orders", order_routes())
            .nest("/users", user_routes())
            .merge(catalog_routes())
            .merge(cart_routes())
            .merge(account_routes())
            .merge(contact_routes())
            .merge(content_routes()),
    )
}
