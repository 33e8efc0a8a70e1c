//! Handlers for the `/projetos` resource.

use atividades_core::dates::parse_optional_date;
use atividades_core::pagination::PageRequest;
use atividades_core::types::DbId;
use atividades_db::models::atividade::AtividadeResponse;
use atividades_db::models::projeto::{
    CreateProjeto, Projeto, ProjetoFilters, ProjetoResponse, UpdateProjeto,
};
use atividades_db::repositories::{AtividadeRepo, ProjetoRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::ProjetoListParams;
use crate::response::{Listing, MessageResponse};
use crate::state::AppState;

/// Page size used when `per_page` is not given.
const DEFAULT_PER_PAGE: i64 = 5;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /projetos`.
#[derive(Debug, Deserialize)]
pub struct CreateProjetoRequest {
    pub subprograma: Option<String>,
    pub nome: Option<String>,
    pub ordem_producao: Option<String>,
    pub data_aplicacao: Option<String>,
    pub data_termino: Option<String>,
    pub etapas: Option<String>,
    pub disciplinas: Option<String>,
    pub tipos_processamento: Option<String>,
    pub observacao: Option<String>,
    pub squad_ids: Option<Vec<DbId>>,
}

/// Request body for `PUT /projetos/{id}`. Absent keys are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateProjetoRequest {
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub subprograma: Option<Option<String>>,
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub ordem_producao: Option<Option<String>>,
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub data_aplicacao: Option<Option<String>>,
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub data_termino: Option<Option<String>>,
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub etapas: Option<Option<String>>,
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub disciplinas: Option<Option<String>>,
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub tipos_processamento: Option<Option<String>>,
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub observacao: Option<Option<String>>,
    pub squad_ids: Option<Vec<DbId>>,
}

impl CreateProjetoRequest {
    fn into_input(self) -> AppResult<CreateProjeto> {
        let nome = required_nome(self.nome.as_deref())?;
        Ok(CreateProjeto {
            data_aplicacao: parse_optional_date("data_aplicacao", self.data_aplicacao.as_deref())?,
            data_termino: parse_optional_date("data_termino", self.data_termino.as_deref())?,
            subprograma: self.subprograma.unwrap_or_default(),
            nome,
            ordem_producao: self.ordem_producao.unwrap_or_default(),
            etapas: self.etapas.unwrap_or_default(),
            disciplinas: self.disciplinas.unwrap_or_default(),
            tipos_processamento: self.tipos_processamento.unwrap_or_default(),
            observacao: self.observacao.unwrap_or_default(),
            squad_ids: self.squad_ids.unwrap_or_default(),
        })
    }
}

impl UpdateProjetoRequest {
    fn into_input(self) -> AppResult<UpdateProjeto> {
        let nome = self
            .nome
            .as_deref()
            .map(|n| required_nome(Some(n)))
            .transpose()?;
        Ok(UpdateProjeto {
            data_aplicacao: self
                .data_aplicacao
                .map(|d| parse_optional_date("data_aplicacao", d.as_deref()))
                .transpose()?,
            data_termino: self
                .data_termino
                .map(|d| parse_optional_date("data_termino", d.as_deref()))
                .transpose()?,
            subprograma: self.subprograma,
            nome,
            ordem_producao: self.ordem_producao,
            etapas: self.etapas,
            disciplinas: self.disciplinas,
            tipos_processamento: self.tipos_processamento,
            observacao: self.observacao,
            squad_ids: self.squad_ids,
        })
    }
}

fn required_nome(nome: Option<&str>) -> AppResult<String> {
    match nome.map(str::trim) {
        Some(n) if !n.is_empty() => Ok(n.to_string()),
        _ => Err(AppError::validation("Nome é obrigatório")),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projetos
///
/// Newest first. Supports `search_*` substring filters and `page`/`per_page`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjetoListParams>,
) -> AppResult<Json<Listing<ProjetoResponse>>> {
    let filters = ProjetoFilters {
        subprograma: params.search_subprograma,
        nome: params.search_nome,
        ordem_producao: params.search_ordem_producao,
        disciplinas: params.search_disciplinas,
        tipos_processamento: params.search_tipos_processamento,
    };
    let page = PageRequest::from_params(
        params.page.as_deref(),
        params.per_page.as_deref(),
        DEFAULT_PER_PAGE,
    );

    let projetos = ProjetoRepo::list(&state.pool, &filters, page).await?;
    let total = match page {
        Some(_) => ProjetoRepo::count(&state.pool, &filters).await?,
        None => projetos.len() as i64,
    };
    let items = ProjetoRepo::with_details(&state.pool, projetos)
        .await?
        .into_iter()
        .map(ProjetoResponse::from)
        .collect();

    Ok(Json(Listing::new(items, page, total)))
}

/// GET /api/projetos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjetoResponse>> {
    let detail = ProjetoRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Projeto", id))?;
    Ok(Json(detail.into()))
}

/// POST /api/projetos
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateProjetoRequest>,
) -> AppResult<(StatusCode, Json<ProjetoResponse>)> {
    let input = body.into_input()?;

    let mut tx = state.pool.begin().await?;
    let projeto = ProjetoRepo::create(&mut tx, &input).await?;
    tx.commit().await?;

    tracing::info!(projeto_id = projeto.id, nome = %projeto.nome, "Projeto created");
    Ok((StatusCode::CREATED, Json(to_response(&state, projeto).await?)))
}

/// PUT /api/projetos/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<UpdateProjetoRequest>,
) -> AppResult<Json<ProjetoResponse>> {
    let input = body.into_input()?;

    let mut tx = state.pool.begin().await?;
    let projeto = ProjetoRepo::update(&mut tx, id, &input)
        .await?
        .ok_or(AppError::not_found("Projeto", id))?;
    tx.commit().await?;

    tracing::info!(
        projeto_id = id,
        squads_replaced = input.squad_ids.is_some(),
        "Projeto updated"
    );
    Ok(Json(to_response(&state, projeto).await?))
}

/// DELETE /api/projetos/{id}
///
/// Cascades to the projeto's atividades and squad associations.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let mut tx = state.pool.begin().await?;
    if !ProjetoRepo::delete(&mut *tx, id).await? {
        return Err(AppError::not_found("Projeto", id));
    }
    tx.commit().await?;

    tracing::info!(projeto_id = id, "Projeto deleted");
    Ok(Json(MessageResponse::new("Projeto deletado com sucesso")))
}

/// GET /api/projetos/{id}/atividades
pub async fn list_atividades(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<AtividadeResponse>>> {
    if !ProjetoRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Projeto", id));
    }
    let atividades = AtividadeRepo::list_by_projeto(&state.pool, id).await?;
    Ok(Json(atividades.into_iter().map(Into::into).collect()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve associations for a freshly written projeto.
async fn to_response(state: &AppState, projeto: Projeto) -> AppResult<ProjetoResponse> {
    let id = projeto.id;
    ProjetoRepo::with_details(&state.pool, vec![projeto])
        .await?
        .pop()
        .map(ProjetoResponse::from)
        .ok_or_else(|| AppError::InternalError(format!("Projeto {id} vanished after write")))
}
