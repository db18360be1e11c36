//! Middleware and request extractors.

pub mod auth;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, require_permission};
pub use session::create_session_layer;
