//! Database operations for the CYNA `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Authentication and roles
//! - `auth_tokens` - Hashed email-verification / password-reset tokens
//! - `categories`, `products` - Catalog
//! - `orders`, `ordered_products`, `transactions` - Checkout results
//! - `contact_messages` - Contact form / support inbox
//! - `hero_carousel_slides`, `main_messages` - Marketing content
//! - `addresses`, `payment_methods`, `subscriptions` - Account data
//! - `tower_sessions` - Session store (created by the session layer)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p cyna-cli -- migrate
//! ```

pub mod addresses;
pub mod categories;
pub mod contact_messages;
pub mod content;
pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod subscriptions;
pub mod tokens;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use addresses::AddressRepository;
pub use categories::CategoryRepository;
pub use contact_messages::ContactMessageRepository;
pub use content::ContentRepository;
pub use orders::OrderRepository;
pub use payment_methods::PaymentMethodRepository;
pub use products::ProductRepository;
pub use subscriptions::SubscriptionRepository;
pub use tokens::TokenRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning unique violations into [`Self::Conflict`].
    pub(crate) fn from_sqlx(e: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict_message.to_owned());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Parse a stored currency code, mapping bad data to [`RepositoryError::DataCorruption`].
pub(crate) fn parse_currency(code: &str) -> Result<cyna_core::CurrencyCode, RepositoryError> {
    code.parse()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid currency in database: {e}")))
}
