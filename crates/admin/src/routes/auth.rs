//! Authentication route handlers for admin.
//!
//! JSON login/logout for the dashboard. The session cookie carries the
//! logged-in admin between requests.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::AdminUserRepository;
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAdminAuth, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::AdminAuthService;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response carrying the current admin.
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub success: bool,
    pub admin: CurrentAdmin,
}

/// Response for actions with no payload.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub success: bool,
}

/// Verify credentials and start a session.
///
/// POST /api/auth/login
#[instrument(skip_all, fields(email = %body.email))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AdminResponse>, AppError> {
    let user = AdminAuthService::new(state.pool())
        .login(&body.email, &body.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Admin login failed"))?;

    let admin = CurrentAdmin::from(&user);
    set_current_admin(&session, &admin)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store session: {e}")))?;

    set_sentry_user(admin.id.get(), Some(admin.email.as_str()));
    tracing::info!(admin_user_id = %admin.id, role = %admin.role, "Admin logged in");

    Ok(Json(AdminResponse {
        success: true,
        admin,
    }))
}

/// End the session.
///
/// POST /api/auth/logout
async fn logout(session: Session) -> Json<OkResponse> {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!(error = %e, "Failed to clear admin session");
    }
    clear_sentry_user();
    Json(OkResponse { success: true })
}

/// Return the logged-in admin, re-read from the database.
///
/// GET /api/auth/me
async fn me(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<AdminResponse>, AppError> {
    let Some(user) = AdminUserRepository::new(state.pool()).get_by_id(admin.id).await? else {
        // Account deleted while the session was live.
        if let Err(e) = clear_current_admin(&session).await {
            tracing::warn!(error = %e, "Failed to clear stale admin session");
        }
        return Err(AppError::Unauthorized("admin account no longer exists".to_string()));
    };

    Ok(Json(AdminResponse {
        success: true,
        admin: CurrentAdmin::from(&user),
    }))
}
