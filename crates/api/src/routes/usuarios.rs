//! Route definitions for the `/usuarios` resource (admin only).

use axum::routing::get;
use axum::Router;

use crate::handlers::usuarios;
use crate::state::AppState;

/// Routes mounted at `/usuarios`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(usuarios::list).post(usuarios::create))
        .route(
            "/{id}",
            get(usuarios::get_by_id)
                .put(usuarios::update)
                .delete(usuarios::delete),
        )
}
