//! Handlers for the `/atividades` resource.

use atividades_core::atividade::{
    validate_prioridade, validate_status, DEFAULT_PRIORIDADE, DEFAULT_STATUS,
};
use atividades_core::dates::parse_optional_date;
use atividades_core::ids::{parse_id, IdValue};
use atividades_core::pagination::PageRequest;
use atividades_core::types::DbId;
use atividades_db::models::atividade::{
    AtividadeFilters, AtividadeResponse, CreateAtividade, EstatisticasResponse, UpdateAtividade,
};
use atividades_db::repositories::{AtividadeRepo, ProjetoRepo, SquadRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::{non_blank, parse_id_filter, AtividadeListParams};
use crate::response::{Listing, MessageResponse};
use crate::state::AppState;

/// Page size used when `per_page` is not given.
const DEFAULT_PER_PAGE: i64 = 10;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /atividades`.
#[derive(Debug, Deserialize)]
pub struct CreateAtividadeRequest {
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub prazo: Option<String>,
    pub prioridade: Option<String>,
    pub status: Option<String>,
    pub projeto_id: Option<IdValue>,
    pub squad_id: Option<IdValue>,
}

/// Request body for `PUT /atividades/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateAtividadeRequest {
    pub titulo: Option<String>,
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub descricao: Option<Option<String>>,
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub prazo: Option<Option<String>>,
    pub prioridade: Option<String>,
    pub status: Option<String>,
    pub projeto_id: Option<IdValue>,
    pub squad_id: Option<IdValue>,
}

impl CreateAtividadeRequest {
    fn into_input(self) -> AppResult<CreateAtividade> {
        let titulo = required_titulo(self.titulo.as_deref())?;
        let projeto_id = parse_id("projeto_id", self.projeto_id)?
            .ok_or_else(|| AppError::validation("projeto_id é obrigatório"))?;
        let squad_id = parse_id("squad_id", self.squad_id)?
            .ok_or_else(|| AppError::validation("squad_id é obrigatório"))?;

        let prioridade = self
            .prioridade
            .unwrap_or_else(|| DEFAULT_PRIORIDADE.to_string());
        validate_prioridade(&prioridade).map_err(AppError::validation)?;
        let status = self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
        validate_status(&status).map_err(AppError::validation)?;

        Ok(CreateAtividade {
            prazo: parse_optional_date("prazo", self.prazo.as_deref())?,
            titulo,
            descricao: self.descricao.unwrap_or_default(),
            prioridade,
            status,
            projeto_id,
            squad_id,
        })
    }
}

impl UpdateAtividadeRequest {
    fn into_input(self) -> AppResult<UpdateAtividade> {
        let titulo = self
            .titulo
            .as_deref()
            .map(|t| required_titulo(Some(t)))
            .transpose()?;
        if let Some(prioridade) = &self.prioridade {
            validate_prioridade(prioridade).map_err(AppError::validation)?;
        }
        if let Some(status) = &self.status {
            validate_status(status).map_err(AppError::validation)?;
        }

        Ok(UpdateAtividade {
            prazo: self
                .prazo
                .map(|p| parse_optional_date("prazo", p.as_deref()))
                .transpose()?,
            titulo,
            descricao: self.descricao,
            prioridade: self.prioridade,
            status: self.status,
            projeto_id: parse_id("projeto_id", self.projeto_id)?,
            squad_id: parse_id("squad_id", self.squad_id)?,
        })
    }
}

fn required_titulo(titulo: Option<&str>) -> AppResult<String> {
    match titulo.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(AppError::validation("Título é obrigatório")),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/atividades
///
/// Exact-match filters `projeto_id`, `squad_id`, `status`, `prioridade`;
/// supports `page`/`per_page`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<AtividadeListParams>,
) -> AppResult<Json<Listing<AtividadeResponse>>> {
    let filters = AtividadeFilters {
        projeto_id: parse_id_filter(params.projeto_id.as_deref()),
        squad_id: parse_id_filter(params.squad_id.as_deref()),
        status: non_blank(params.status.as_deref()),
        prioridade: non_blank(params.prioridade.as_deref()),
    };
    let page = PageRequest::from_params(
        params.page.as_deref(),
        params.per_page.as_deref(),
        DEFAULT_PER_PAGE,
    );

    let atividades = AtividadeRepo::list(&state.pool, &filters, page).await?;
    let total = match page {
        Some(_) => AtividadeRepo::count(&state.pool, &filters).await?,
        None => atividades.len() as i64,
    };
    let items = atividades.into_iter().map(AtividadeResponse::from).collect();
    Ok(Json(Listing::new(items, page, total)))
}

/// GET /api/atividades/estatisticas
pub async fn estatisticas(State(state): State<AppState>) -> AppResult<Json<EstatisticasResponse>> {
    let stats = AtividadeRepo::stats(&state.pool).await?;
    Ok(Json(stats.into()))
}

/// GET /api/atividades/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<AtividadeResponse>> {
    let atividade = AtividadeRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Atividade", id))?;
    Ok(Json(atividade.into()))
}

/// POST /api/atividades
///
/// Field validation (400) runs before the referenced projeto and squad are
/// checked (404).
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateAtividadeRequest>,
) -> AppResult<(StatusCode, Json<AtividadeResponse>)> {
    let input = body.into_input()?;

    let mut tx = state.pool.begin().await?;
    ensure_references(&mut tx, Some(input.projeto_id), Some(input.squad_id)).await?;
    let atividade = AtividadeRepo::create(&mut *tx, &input).await?;
    let detail = AtividadeRepo::find_detail_by_id(&mut *tx, atividade.id)
        .await?
        .ok_or(AppError::not_found("Atividade", atividade.id))?;
    tx.commit().await?;

    tracing::info!(
        atividade_id = detail.id,
        projeto_id = detail.projeto_id,
        squad_id = detail.squad_id,
        "Atividade created"
    );
    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// PUT /api/atividades/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<UpdateAtividadeRequest>,
) -> AppResult<Json<AtividadeResponse>> {
    let input = body.into_input()?;

    let mut tx = state.pool.begin().await?;
    if AtividadeRepo::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(AppError::not_found("Atividade", id));
    }
    ensure_references(&mut tx, input.projeto_id, input.squad_id).await?;
    AtividadeRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or(AppError::not_found("Atividade", id))?;
    let detail = AtividadeRepo::find_detail_by_id(&mut *tx, id)
        .await?
        .ok_or(AppError::not_found("Atividade", id))?;
    tx.commit().await?;

    tracing::info!(atividade_id = id, "Atividade updated");
    Ok(Json(detail.into()))
}

/// DELETE /api/atividades/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let mut tx = state.pool.begin().await?;
    if !AtividadeRepo::delete(&mut *tx, id).await? {
        return Err(AppError::not_found("Atividade", id));
    }
    tx.commit().await?;

    tracing::info!(atividade_id = id, "Atividade deleted");
    Ok(Json(MessageResponse::new("Atividade deletada com sucesso")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fail with 404 if a referenced projeto or squad does not exist.
async fn ensure_references(
    conn: &mut PgConnection,
    projeto_id: Option<DbId>,
    squad_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(projeto_id) = projeto_id {
        if !ProjetoRepo::exists(&mut *conn, projeto_id).await? {
            return Err(AppError::not_found("Projeto", projeto_id));
        }
    }
    if let Some(squad_id) = squad_id {
        if !SquadRepo::exists(&mut *conn, squad_id).await? {
            return Err(AppError::not_found("Squad", squad_id));
        }
    }
    Ok(())
}
