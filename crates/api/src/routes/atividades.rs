//! Route definitions for the `/atividades` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::atividades;
use crate::state::AppState;

/// Routes mounted at `/atividades`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /estatisticas    -> estatisticas
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(atividades::list).post(atividades::create))
        .route("/estatisticas", get(atividades::estatisticas))
        .route(
            "/{id}",
            get(atividades::get_by_id)
                .put(atividades::update)
                .delete(atividades::delete),
        )
}
