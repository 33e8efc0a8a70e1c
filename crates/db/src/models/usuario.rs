//! Usuario (system account) model and DTOs.

use atividades_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `usuarios` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UsuarioResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: DbId,
    pub nome: String,
    pub login: String,
    pub senha_hash: String,
    pub role: String,
    pub ativo: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe usuario representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UsuarioResponse {
    pub id: DbId,
    pub nome: String,
    pub login: String,
    pub role: String,
    pub ativo: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Usuario> for UsuarioResponse {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            nome: u.nome,
            login: u.login,
            role: u.role,
            ativo: u.ativo,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// DTO for creating a usuario. `senha_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUsuario {
    pub nome: String,
    pub login: String,
    pub senha_hash: String,
    pub role: String,
    pub ativo: bool,
}

/// DTO for updating a usuario. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateUsuario {
    pub nome: Option<String>,
    pub login: Option<String>,
    pub senha_hash: Option<String>,
    pub role: Option<String>,
    pub ativo: Option<bool>,
}
