//! Route definitions for the `/squads` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::squads;
use crate::state::AppState;

/// Routes mounted at `/squads`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// DELETE /{id}               -> delete
/// GET    /{id}/projetos      -> list_projetos
/// GET    /{id}/atividades    -> list_atividades
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(squads::list).post(squads::create))
        .route(
            "/{id}",
            get(squads::get_by_id)
                .put(squads::update)
                .delete(squads::delete),
        )
        .route("/{id}/projetos", get(squads::list_projetos))
        .route("/{id}/atividades", get(squads::list_atividades))
}
