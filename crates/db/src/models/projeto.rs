//! Projeto (evaluation project) model, DTOs and response shape.

use atividades_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `projetos` table.
#[derive(Debug, Clone, FromRow)]
pub struct Projeto {
    pub id: DbId,
    pub subprograma: Option<String>,
    pub nome: String,
    pub ordem_producao: Option<String>,
    pub data_aplicacao: Option<NaiveDate>,
    pub data_termino: Option<NaiveDate>,
    pub etapas: Option<String>,
    pub disciplinas: Option<String>,
    pub tipos_processamento: Option<String>,
    pub observacao: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Compact `{id, nome}` reference used when embedding squads in a projeto
/// and projetos in a squad listing.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct NamedRef {
    pub id: DbId,
    pub nome: String,
}

/// A squad associated with a projeto, keyed by the owning projeto.
#[derive(Debug, Clone, FromRow)]
pub struct ProjetoSquad {
    pub projeto_id: DbId,
    pub id: DbId,
    pub nome: String,
}

/// A projeto with its associations resolved.
#[derive(Debug, Clone)]
pub struct ProjetoDetail {
    pub projeto: Projeto,
    pub squads: Vec<NamedRef>,
    pub total_atividades: i64,
}

/// Case-insensitive substring filters for the projeto listing.
///
/// Each field holds the raw search term; blank terms are ignored.
#[derive(Debug, Clone, Default)]
pub struct ProjetoFilters {
    pub subprograma: Option<String>,
    pub nome: Option<String>,
    pub ordem_producao: Option<String>,
    pub disciplinas: Option<String>,
    pub tipos_processamento: Option<String>,
}

/// DTO for creating a projeto. Text fields default to empty strings upstream.
#[derive(Debug, Clone)]
pub struct CreateProjeto {
    pub subprograma: String,
    pub nome: String,
    pub ordem_producao: String,
    pub data_aplicacao: Option<NaiveDate>,
    pub data_termino: Option<NaiveDate>,
    pub etapas: String,
    pub disciplinas: String,
    pub tipos_processamento: String,
    pub observacao: String,
    /// Squads to associate. Ids that do not exist are skipped.
    pub squad_ids: Vec<DbId>,
}

/// DTO for a partial projeto update.
///
/// For nullable columns the outer `Option` says whether the field was sent
/// and the inner one carries the new value (`None` clears it).
#[derive(Debug, Clone, Default)]
pub struct UpdateProjeto {
    pub subprograma: Option<Option<String>>,
    pub nome: Option<String>,
    pub ordem_producao: Option<Option<String>>,
    pub data_aplicacao: Option<Option<NaiveDate>>,
    pub data_termino: Option<Option<NaiveDate>>,
    pub etapas: Option<Option<String>>,
    pub disciplinas: Option<Option<String>>,
    pub tipos_processamento: Option<Option<String>>,
    pub observacao: Option<Option<String>>,
    /// When present, replaces the whole association set.
    pub squad_ids: Option<Vec<DbId>>,
}

/// Canonical JSON shape of a projeto.
#[derive(Debug, Clone, Serialize)]
pub struct ProjetoResponse {
    pub id: DbId,
    pub subprograma: Option<String>,
    pub nome: String,
    pub ordem_producao: Option<String>,
    pub data_aplicacao: Option<NaiveDate>,
    pub data_termino: Option<NaiveDate>,
    pub etapas: Option<String>,
    pub disciplinas: Option<String>,
    pub tipos_processamento: Option<String>,
    pub observacao: Option<String>,
    pub squads: Vec<NamedRef>,
    pub total_atividades: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjetoDetail> for ProjetoResponse {
    fn from(detail: ProjetoDetail) -> Self {
        let ProjetoDetail {
            projeto,
            squads,
            total_atividades,
        } = detail;
        Self {
            id: projeto.id,
            subprograma: projeto.subprograma,
            nome: projeto.nome,
            ordem_producao: projeto.ordem_producao,
            data_aplicacao: projeto.data_aplicacao,
            data_termino: projeto.data_termino,
            etapas: projeto.etapas,
            disciplinas: projeto.disciplinas,
            tipos_processamento: projeto.tipos_processamento,
            observacao: projeto.observacao,
            squads,
            total_atividades,
            created_at: projeto.created_at,
            updated_at: projeto.updated_at,
        }
    }
}
