//! Role and permission model.
//!
//! Mutating routes are gated by a permission of the form
//! `<resource>:<action>` (e.g. `contact:respond`, `hero-carousel:create`).
//! Each [`Role`] maps to a fixed permission set; the check itself lives in
//! the server's auth extractors.

use serde::{Deserialize, Serialize};

/// User role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Storefront customer. No back-office permissions.
    #[default]
    Client,
    /// Handles contact messages and order lookups.
    Support,
    /// Full access to store management features.
    Admin,
    /// Full access including user and role management.
    SuperAdmin,
}

impl Role {
    /// Whether this role carries the given permission.
    #[must_use]
    pub const fn has_permission(self, permission: Permission) -> bool {
        use Permission as P;

        match self {
            Self::SuperAdmin => true,
            Self::Admin => !matches!(
                permission,
                P::UserCreate | P::UserUpdate | P::UserDelete
            ),
            Self::Support => matches!(
                permission,
                P::ContactRead | P::ContactRespond | P::OrderRead | P::DashboardRead
            ),
            Self::Client => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Support => write!(f, "support"),
            Self::Admin => write!(f, "admin"),
            Self::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "support" => Ok(Self::Support),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Error returned when a permission string does not parse.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown permission: {0}")]
pub struct PermissionParseError(pub String);

/// A gate on a mutating (or privileged read) route.
///
/// The wire form is `<resource>:<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Permission {
    CategoryCreate,
    CategoryUpdate,
    CategoryDelete,
    ProductCreate,
    ProductUpdate,
    ProductDelete,
    OrderRead,
    OrderUpdate,
    UserRead,
    UserCreate,
    UserUpdate,
    UserDelete,
    ContactRead,
    ContactRespond,
    HeroCarouselCreate,
    HeroCarouselUpdate,
    HeroCarouselDelete,
    MainMessageUpdate,
    DashboardRead,
}

impl Permission {
    /// The `<resource>:<action>` string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CategoryCreate => "category:create",
            Self::CategoryUpdate => "category:update",
            Self::CategoryDelete => "category:delete",
            Self::ProductCreate => "product:create",
            Self::ProductUpdate => "product:update",
            Self::ProductDelete => "product:delete",
            Self::OrderRead => "order:read",
            Self::OrderUpdate => "order:update",
            Self::UserRead => "user:read",
            Self::UserCreate => "user:create",
            Self::UserUpdate => "user:update",
            Self::UserDelete => "user:delete",
            Self::ContactRead => "contact:read",
            Self::ContactRespond => "contact:respond",
            Self::HeroCarouselCreate => "hero-carousel:create",
            Self::HeroCarouselUpdate => "hero-carousel:update",
            Self::HeroCarouselDelete => "hero-carousel:delete",
            Self::MainMessageUpdate => "main-message:update",
            Self::DashboardRead => "dashboard:read",
        }
    }

    /// All permissions, in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CategoryCreate,
            Self::CategoryUpdate,
            Self::CategoryDelete,
            Self::ProductCreate,
            Self::ProductUpdate,
            Self::ProductDelete,
            Self::OrderRead,
            Self::OrderUpdate,
            Self::UserRead,
            Self::UserCreate,
            Self::UserUpdate,
            Self::UserDelete,
            Self::ContactRead,
            Self::ContactRespond,
            Self::HeroCarouselCreate,
            Self::HeroCarouselUpdate,
            Self::HeroCarouselDelete,
            Self::MainMessageUpdate,
            Self::DashboardRead,
        ]
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PermissionParseError(s.to_owned()))
    }
}

impl TryFrom<String> for Permission {
    type Error = PermissionParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Permission> for String {
    fn from(p: Permission) -> Self {
        p.as_str().to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_string_round_trip() {
        for p in Permission::all() {
            let parsed: Permission = p.as_str().parse().unwrap();
            assert_eq!(parsed, *p);
        }
    }

    #[test]
    fn test_permission_unknown_string() {
        assert!("orders:read".parse::<Permission>().is_err());
        assert!("".parse::<Permission>().is_err());
    }

    #[test]
    fn test_super_admin_has_everything() {
        for p in Permission::all() {
            assert!(Role::SuperAdmin.has_permission(*p), "{p}");
        }
    }

    #[test]
    fn test_admin_cannot_manage_users() {
        assert!(!Role::Admin.has_permission(Permission::UserCreate));
        assert!(!Role::Admin.has_permission(Permission::UserUpdate));
        assert!(!Role::Admin.has_permission(Permission::UserDelete));
        assert!(Role::Admin.has_permission(Permission::UserRead));
        assert!(Role::Admin.has_permission(Permission::HeroCarouselCreate));
        assert!(Role::Admin.has_permission(Permission::ContactRespond));
    }

    #[test]
    fn test_support_scope() {
        assert!(Role::Support.has_permission(Permission::ContactRespond));
        assert!(Role::Support.has_permission(Permission::OrderRead));
        assert!(!Role::Support.has_permission(Permission::OrderUpdate));
        assert!(!Role::Support.has_permission(Permission::ProductCreate));
    }

    #[test]
    fn test_client_has_nothing() {
        for p in Permission::all() {
            assert!(!Role::Client.has_permission(*p), "{p}");
        }
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("super_admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert!("root".parse::<Role>().is_err());
    }
}
