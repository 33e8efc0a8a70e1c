pub mod atividades;
pub mod auth;
pub mod health;
pub mod projetos;
pub mod squads;
pub mod usuarios;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/me                                         current usuario (requires auth)
/// /auth/check                                      token check (requires auth)
///
/// /projetos                                        list, create
/// /projetos/{id}                                   get, update, delete
/// /projetos/{id}/atividades                        atividades of the projeto
///
/// /squads                                          list, create
/// /squads/{id}                                     get, update, delete
/// /squads/{id}/projetos                            projetos of the squad ({id, nome})
/// /squads/{id}/atividades                          atividades of the squad
///
/// /atividades                                      list (filters), create
/// /atividades/estatisticas                         counts by status / prioridade
/// /atividades/{id}                                 get, update, delete
///
/// /usuarios                                        list, create (admin only)
/// /usuarios/{id}                                   get, update, delete (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projetos", projetos::router())
        .nest("/squads", squads::router())
        .nest("/atividades", atividades::router())
        .nest("/usuarios", usuarios::router())
}
