//! User domain types.

use chrono::{DateTime, Utc};

use cyna_core::{Email, Role, UserId};

/// A CYNA user (domain type).
///
/// Covers both storefront clients and back-office staff; the [`Role`]
/// decides which routes a user may mutate.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Role/permission level.
    pub role: Role,
    /// Whether the email has been verified.
    pub email_verified: bool,
    /// Customer ID at the payment provider, once one exists.
    pub provider_customer_id: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
