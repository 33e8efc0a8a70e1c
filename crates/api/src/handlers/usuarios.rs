//! Handlers for the `/usuarios` resource (admin only).
//!
//! Every handler takes [`RequireAdmin`], which rejects non-admin callers
//! before the body is parsed.

use atividades_core::error::CoreError;
use atividades_core::roles::{validate_role, DEFAULT_ROLE};
use atividades_core::types::DbId;
use atividades_db::models::usuario::{CreateUsuario, UpdateUsuario, UsuarioResponse};
use atividades_db::repositories::UsuarioRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{Listing, MessageResponse};
use crate::state::AppState;

/// Page size used when `per_page` is not given.
const DEFAULT_PER_PAGE: i64 = 5;

const DUPLICATE_LOGIN: &str = "Login já existe";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /usuarios`.
#[derive(Debug, Deserialize)]
pub struct CreateUsuarioRequest {
    pub nome: Option<String>,
    pub login: Option<String>,
    pub senha: Option<String>,
    pub role: Option<String>,
    pub ativo: Option<bool>,
}

/// Request body for `PUT /usuarios/{id}`.
///
/// An empty `senha` leaves the password unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateUsuarioRequest {
    pub nome: Option<String>,
    pub login: Option<String>,
    pub senha: Option<String>,
    pub role: Option<String>,
    pub ativo: Option<bool>,
}

fn required(value: Option<&str>, message: &str) -> AppResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::validation(message)),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/usuarios
///
/// Newest first; supports `page`/`per_page`.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Listing<UsuarioResponse>>> {
    let page = params.page_request(DEFAULT_PER_PAGE);
    let usuarios = UsuarioRepo::list(&state.pool, page).await?;
    let total = match page {
        Some(_) => UsuarioRepo::count(&state.pool).await?,
        None => usuarios.len() as i64,
    };
    let items = usuarios.into_iter().map(UsuarioResponse::from).collect();
    Ok(Json(Listing::new(items, page, total)))
}

/// GET /api/usuarios/{id}
pub async fn get_by_id(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UsuarioResponse>> {
    let usuario = UsuarioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Usuário", id))?;
    Ok(Json(usuario.into()))
}

/// POST /api/usuarios
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateUsuarioRequest>,
) -> AppResult<(StatusCode, Json<UsuarioResponse>)> {
    let nome = required(body.nome.as_deref(), "Nome é obrigatório")?;
    let login = required(body.login.as_deref(), "Login é obrigatório")?;
    let senha = match body.senha.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => return Err(AppError::validation("Senha é obrigatória")),
    };
    let role = body.role.unwrap_or_else(|| DEFAULT_ROLE.to_string());
    validate_role(&role).map_err(AppError::validation)?;

    let mut tx = state.pool.begin().await?;
    if UsuarioRepo::find_by_login(&mut *tx, &login).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(DUPLICATE_LOGIN.into())));
    }
    let input = CreateUsuario {
        nome,
        login,
        senha_hash: hash_password(senha)?,
        role,
        ativo: body.ativo.unwrap_or(true),
    };
    let usuario = UsuarioRepo::create(&mut *tx, &input).await?;
    tx.commit().await?;

    tracing::info!(
        usuario_id = usuario.id,
        login = %usuario.login,
        role = %usuario.role,
        created_by = admin.usuario_id,
        "Usuario created"
    );
    Ok((StatusCode::CREATED, Json(usuario.into())))
}

/// PUT /api/usuarios/{id}
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<UpdateUsuarioRequest>,
) -> AppResult<Json<UsuarioResponse>> {
    let nome = body
        .nome
        .as_deref()
        .map(|n| required(Some(n), "Nome é obrigatório"))
        .transpose()?;
    let login = body
        .login
        .as_deref()
        .map(|l| required(Some(l), "Login é obrigatório"))
        .transpose()?;
    if let Some(role) = &body.role {
        validate_role(role).map_err(AppError::validation)?;
    }
    let senha_hash = match body.senha.as_deref() {
        Some(s) if !s.is_empty() => Some(hash_password(s)?),
        _ => None,
    };

    let mut tx = state.pool.begin().await?;
    if UsuarioRepo::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(AppError::not_found("Usuário", id));
    }
    if let Some(login) = &login {
        if let Some(other) = UsuarioRepo::find_by_login(&mut *tx, login).await? {
            if other.id != id {
                return Err(AppError::Core(CoreError::Conflict(DUPLICATE_LOGIN.into())));
            }
        }
    }
    let input = UpdateUsuario {
        nome,
        login,
        senha_hash,
        role: body.role,
        ativo: body.ativo,
    };
    let usuario = UsuarioRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or(AppError::not_found("Usuário", id))?;
    tx.commit().await?;

    tracing::info!(
        usuario_id = id,
        password_changed = input.senha_hash.is_some(),
        updated_by = admin.usuario_id,
        "Usuario updated"
    );
    Ok(Json(usuario.into()))
}

/// DELETE /api/usuarios/{id}
///
/// An admin cannot delete their own account (400).
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if id == admin.usuario_id {
        return Err(AppError::validation(
            "Não é possível deletar seu próprio usuário",
        ));
    }

    let mut tx = state.pool.begin().await?;
    if !UsuarioRepo::delete(&mut *tx, id).await? {
        return Err(AppError::not_found("Usuário", id));
    }
    tx.commit().await?;

    tracing::info!(usuario_id = id, deleted_by = admin.usuario_id, "Usuario deleted");
    Ok(Json(MessageResponse::new("Usuário deletado com sucesso")))
}
