//! Route definitions for the `/projetos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::projetos;
use crate::state::AppState;

/// Routes mounted at `/projetos`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// GET    /{id}/atividades    -> list_atividades
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projetos::list).post(projetos::create))
        .route(
            "/{id}",
            get(projetos::get_by_id)
                .put(projetos::update)
                .delete(projetos::delete),
        )
        .route("/{id}/atividades", get(projetos::list_atividades))
}
