//! Squad model, DTOs and response shape.

use atividades_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `squads` table.
#[derive(Debug, Clone, FromRow)]
pub struct Squad {
    pub id: DbId,
    pub nome: String,
    pub descricao: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A squad row with its association counts.
#[derive(Debug, Clone, FromRow)]
pub struct SquadSummary {
    pub id: DbId,
    pub nome: String,
    pub descricao: Option<String>,
    pub total_projetos: i64,
    pub total_atividades: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a squad.
#[derive(Debug, Clone)]
pub struct CreateSquad {
    pub nome: String,
    pub descricao: String,
}

/// DTO for a partial squad update.
#[derive(Debug, Clone, Default)]
pub struct UpdateSquad {
    pub nome: Option<String>,
    pub descricao: Option<Option<String>>,
}

/// Canonical JSON shape of a squad.
#[derive(Debug, Clone, Serialize)]
pub struct SquadResponse {
    pub id: DbId,
    pub nome: String,
    pub descricao: Option<String>,
    pub total_projetos: i64,
    pub total_atividades: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SquadSummary> for SquadResponse {
    fn from(s: SquadSummary) -> Self {
        Self {
            id: s.id,
            nome: s.nome,
            descricao: s.descricao,
            total_projetos: s.total_projetos,
            total_atividades: s.total_atividades,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
