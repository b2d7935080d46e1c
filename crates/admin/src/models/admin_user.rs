//! Admin user domain types.

use chrono::{DateTime, Utc};

use restwell_core::{AdminUserId, Email};

// Re-export AdminRole from core for convenience
pub use restwell_core::AdminRole;

/// An admin user (domain type).
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An admin user together with the stored password hash.
///
/// Only the login flow sees this type; the hash never leaves the auth service.
#[derive(Clone)]
pub struct AdminLogin {
    pub user: AdminUser,
    pub password_hash: String,
}

impl std::fmt::Debug for AdminLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminLogin")
            .field("user", &self.user)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}
