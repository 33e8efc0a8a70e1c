//! Atividade (activity) model, DTOs and response shapes.

use atividades_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::projeto::NamedRef;

/// A row from the `atividades` table.
#[derive(Debug, Clone, FromRow)]
pub struct Atividade {
    pub id: DbId,
    pub titulo: String,
    pub descricao: Option<String>,
    pub prazo: Option<NaiveDate>,
    pub prioridade: String,
    pub status: String,
    pub projeto_id: DbId,
    pub squad_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An atividade joined with the names of its projeto and squad.
#[derive(Debug, Clone, FromRow)]
pub struct AtividadeDetail {
    pub id: DbId,
    pub titulo: String,
    pub descricao: Option<String>,
    pub prazo: Option<NaiveDate>,
    pub prioridade: String,
    pub status: String,
    pub projeto_id: DbId,
    pub projeto_nome: String,
    pub squad_id: DbId,
    pub squad_nome: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Exact-match filters for the atividade listing.
#[derive(Debug, Clone, Default)]
pub struct AtividadeFilters {
    pub projeto_id: Option<DbId>,
    pub squad_id: Option<DbId>,
    pub status: Option<String>,
    pub prioridade: Option<String>,
}

/// DTO for creating an atividade. Enumerated values are validated upstream.
#[derive(Debug, Clone)]
pub struct CreateAtividade {
    pub titulo: String,
    pub descricao: String,
    pub prazo: Option<NaiveDate>,
    pub prioridade: String,
    pub status: String,
    pub projeto_id: DbId,
    pub squad_id: DbId,
}

/// DTO for a partial atividade update.
#[derive(Debug, Clone, Default)]
pub struct UpdateAtividade {
    pub titulo: Option<String>,
    pub descricao: Option<Option<String>>,
    pub prazo: Option<Option<NaiveDate>>,
    pub prioridade: Option<String>,
    pub status: Option<String>,
    pub projeto_id: Option<DbId>,
    pub squad_id: Option<DbId>,
}

/// Aggregate counts over all atividades.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct AtividadeStats {
    pub total: i64,
    pub pendente: i64,
    pub em_andamento: i64,
    pub concluida: i64,
    pub baixa: i64,
    pub media: i64,
    pub alta: i64,
}

/// Canonical JSON shape of an atividade.
#[derive(Debug, Clone, Serialize)]
pub struct AtividadeResponse {
    pub id: DbId,
    pub titulo: String,
    pub descricao: Option<String>,
    pub prazo: Option<NaiveDate>,
    pub prioridade: String,
    pub status: String,
    pub projeto: NamedRef,
    pub squad: NamedRef,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<AtividadeDetail> for AtividadeResponse {
    fn from(a: AtividadeDetail) -> Self {
        Self {
            id: a.id,
            titulo: a.titulo,
            descricao: a.descricao,
            prazo: a.prazo,
            prioridade: a.prioridade,
            status: a.status,
            projeto: NamedRef {
                id: a.projeto_id,
                nome: a.projeto_nome,
            },
            squad: NamedRef {
                id: a.squad_id,
                nome: a.squad_nome,
            },
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// `GET /atividades/estatisticas` payload.
#[derive(Debug, Clone, Serialize)]
pub struct EstatisticasResponse {
    pub total: i64,
    pub por_status: PorStatus,
    pub por_prioridade: PorPrioridade,
}

#[derive(Debug, Clone, Serialize)]
pub struct PorStatus {
    pub pendente: i64,
    pub em_andamento: i64,
    pub concluida: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PorPrioridade {
    pub baixa: i64,
    pub media: i64,
    pub alta: i64,
}

impl From<AtividadeStats> for EstatisticasResponse {
    fn from(s: AtividadeStats) -> Self {
        Self {
            total: s.total,
            por_status: PorStatus {
                pendente: s.pendente,
                em_andamento: s.em_andamento,
                concluida: s.concluida,
            },
            por_prioridade: PorPrioridade {
                baixa: s.baixa,
                media: s.media,
                alta: s.alta,
            },
        }
    }
}
