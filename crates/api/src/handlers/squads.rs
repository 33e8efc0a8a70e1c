//! Handlers for the `/squads` resource.

use atividades_core::error::CoreError;
use atividades_core::types::DbId;
use atividades_db::models::atividade::AtividadeResponse;
use atividades_db::models::projeto::NamedRef;
use atividades_db::models::squad::{CreateSquad, SquadResponse, UpdateSquad};
use atividades_db::repositories::{AtividadeRepo, ProjetoRepo, SquadRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::PageParams;
use crate::response::{Listing, MessageResponse};
use crate::state::AppState;

/// Page size used when `per_page` is not given.
const DEFAULT_PER_PAGE: i64 = 10;

const DUPLICATE_NOME: &str = "Já existe uma squad com esse nome";

/// Request body for `POST /squads`.
#[derive(Debug, Deserialize)]
pub struct CreateSquadRequest {
    pub nome: Option<String>,
    pub descricao: Option<String>,
}

/// Request body for `PUT /squads/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateSquadRequest {
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "atividades_core::patch::present")]
    pub descricao: Option<Option<String>>,
}

fn required_nome(nome: Option<&str>) -> AppResult<String> {
    match nome.map(str::trim) {
        Some(n) if !n.is_empty() => Ok(n.to_string()),
        _ => Err(AppError::validation("Nome é obrigatório")),
    }
}

/// GET /api/squads
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Listing<SquadResponse>>> {
    let page = params.page_request(DEFAULT_PER_PAGE);
    let squads = SquadRepo::list(&state.pool, page).await?;
    let total = match page {
        Some(_) => SquadRepo::count(&state.pool).await?,
        None => squads.len() as i64,
    };
    let items = squads.into_iter().map(SquadResponse::from).collect();
    Ok(Json(Listing::new(items, page, total)))
}

/// GET /api/squads/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SquadResponse>> {
    let squad = SquadRepo::find_summary_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Squad", id))?;
    Ok(Json(squad.into()))
}

/// POST /api/squads
pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateSquadRequest>,
) -> AppResult<(StatusCode, Json<SquadResponse>)> {
    let input = CreateSquad {
        nome: required_nome(body.nome.as_deref())?,
        descricao: body.descricao.unwrap_or_default(),
    };

    let mut tx = state.pool.begin().await?;
    if SquadRepo::find_by_nome(&mut *tx, &input.nome).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(DUPLICATE_NOME.into())));
    }
    let squad = SquadRepo::create(&mut *tx, &input).await?;
    tx.commit().await?;

    tracing::info!(squad_id = squad.id, nome = %squad.nome, "Squad created");
    let summary = SquadRepo::find_summary_by_id(&state.pool, squad.id)
        .await?
        .ok_or(AppError::not_found("Squad", squad.id))?;
    Ok((StatusCode::CREATED, Json(summary.into())))
}

/// PUT /api/squads/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(body): AppJson<UpdateSquadRequest>,
) -> AppResult<Json<SquadResponse>> {
    let nome = body
        .nome
        .as_deref()
        .map(|n| required_nome(Some(n)))
        .transpose()?;
    let input = UpdateSquad {
        nome,
        descricao: body.descricao,
    };

    let mut tx = state.pool.begin().await?;
    if SquadRepo::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(AppError::not_found("Squad", id));
    }
    if let Some(nome) = &input.nome {
        if let Some(other) = SquadRepo::find_by_nome(&mut *tx, nome).await? {
            if other.id != id {
                return Err(AppError::Core(CoreError::Conflict(DUPLICATE_NOME.into())));
            }
        }
    }
    SquadRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or(AppError::not_found("Squad", id))?;
    tx.commit().await?;

    tracing::info!(squad_id = id, "Squad updated");
    let summary = SquadRepo::find_summary_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Squad", id))?;
    Ok(Json(summary.into()))
}

/// DELETE /api/squads/{id}
///
/// Refused with 400 while any atividade references the squad.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let mut tx = state.pool.begin().await?;
    if SquadRepo::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(AppError::not_found("Squad", id));
    }
    let atividades = SquadRepo::count_atividades(&mut *tx, id).await?;
    if atividades > 0 {
        tracing::info!(squad_id = id, atividades, "Squad delete refused");
        return Err(AppError::validation(
            "Não é possível deletar squad com atividades associadas",
        ));
    }
    SquadRepo::delete(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(squad_id = id, "Squad deleted");
    Ok(Json(MessageResponse::new("Squad deletada com sucesso")))
}

/// GET /api/squads/{id}/projetos
pub async fn list_projetos(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<NamedRef>>> {
    if !SquadRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Squad", id));
    }
    let projetos = ProjetoRepo::list_refs_by_squad(&state.pool, id).await?;
    Ok(Json(projetos))
}

/// GET /api/squads/{id}/atividades
pub async fn list_atividades(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<AtividadeResponse>>> {
    if !SquadRepo::exists(&state.pool, id).await? {
        return Err(AppError::not_found("Squad", id));
    }
    let atividades = AtividadeRepo::list_by_squad(&state.pool, id).await?;
    Ok(Json(atividades.into_iter().map(Into::into).collect()))
}
