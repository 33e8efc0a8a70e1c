//! Role-based access control (RBAC) extractors.
//!
//! Extractors run before the request body is read, so a rejected caller
//! never reaches a mutation.

use atividades_core::error::CoreError;
use atividades_core::roles::ROLE_ADMIN;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     // admin is guaranteed to carry the admin role here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            tracing::warn!(
                usuario_id = user.usuario_id,
                role = %user.role,
                path = %parts.uri.path(),
                "Admin route denied"
            );
            return Err(AppError::Core(CoreError::Forbidden(
                "Acesso negado. Apenas administradores.".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
