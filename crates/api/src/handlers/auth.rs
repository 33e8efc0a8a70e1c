//! Handlers for the `/auth` resource (login, me, check).

use atividades_core::error::CoreError;
use atividades_core::types::DbId;
use atividades_db::models::usuario::UsuarioResponse;
use atividades_db::repositories::UsuarioRepo;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Same message for unknown login and wrong password.
const INVALID_CREDENTIALS: &str = "Credenciais inválidas";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: Option<String>,
    pub senha: Option<String>,
    /// Remember-me: request the long-lived token. `null` counts as `false`.
    #[serde(default)]
    pub lembrar: Option<bool>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: UsuarioResponse,
    /// Token lifetime in seconds; `null` when tokens do not expire.
    pub expires_in: Option<i64>,
}

/// Response of `GET /auth/check`.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub valid: bool,
    pub usuario_id: DbId,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with login + senha. Returns a signed token and the usuario.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (login, senha) = match (input.login.as_deref(), input.senha.as_deref()) {
        (Some(l), Some(s)) if !l.trim().is_empty() && !s.is_empty() => (l.trim(), s),
        _ => return Err(AppError::validation("Login e senha são obrigatórios")),
    };

    // 1. Find usuario by login.
    let Some(usuario) = UsuarioRepo::find_by_login(&state.pool, login).await? else {
        tracing::warn!(login, "Login failed: unknown login");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    };

    // 2. Verify password.
    if !verify_password(senha, &usuario.senha_hash)? {
        tracing::warn!(usuario_id = usuario.id, "Login failed: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    // 3. Check the account is active.
    if !usuario.ativo {
        tracing::warn!(usuario_id = usuario.id, "Login failed: inactive account");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Usuário inativo".into(),
        )));
    }

    // 4. Issue the token.
    let lembrar = input.lembrar.unwrap_or(false);
    let token = generate_token(usuario.id, &usuario.role, lembrar, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let expires_in = state.config.jwt.expiry.lifetime_secs(lembrar);

    tracing::info!(usuario_id = usuario.id, lembrar, "Login succeeded");
    Ok(Json(LoginResponse {
        token,
        usuario: usuario.into(),
        expires_in,
    }))
}

/// GET /api/auth/me
///
/// The usuario behind the bearer token. 404 if it has since been deleted.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UsuarioResponse>> {
    let usuario = UsuarioRepo::find_by_id(&state.pool, auth_user.usuario_id)
        .await?
        .ok_or(AppError::not_found("Usuário", auth_user.usuario_id))?;
    Ok(Json(usuario.into()))
}

/// GET /api/auth/check
///
/// Validates the bearer token only; the database is not consulted.
pub async fn check(auth_user: AuthUser) -> Json<CheckResponse> {
    Json(CheckResponse {
        valid: true,
        usuario_id: auth_user.usuario_id,
        role: auth_user.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lembrar_null_or_missing_is_false() {
        for body in [
            r#"{"login": "ana", "senha": "x", "lembrar": null}"#,
            r#"{"login": "ana", "senha": "x"}"#,
        ] {
            let req: LoginRequest = serde_json::from_str(body).unwrap();
            assert!(!req.lembrar.unwrap_or(false), "{body}");
        }
        let req: LoginRequest =
            serde_json::from_str(r#"{"login": "ana", "senha": "x", "lembrar": true}"#).unwrap();
        assert_eq!(req.lembrar, Some(true));
    }
}
