//! HTTP-level integration tests for the `/api/projetos` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_ok, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_projeto_returns_201_with_canonical_shape(pool: PgPool) {
    let squad = create_ok(&pool, "/api/squads", json!({"nome": "Alfa"})).await;

    let json = create_ok(
        &pool,
        "/api/projetos",
        json!({
            "nome": "SAEB 2025",
            "subprograma": "Ensino Fundamental",
            "data_aplicacao": "2025-10-20",
            "data_termino": "",
            "squad_ids": [squad["id"]]
        }),
    )
    .await;

    assert!(json["id"].is_number());
    assert_eq!(json["nome"], "SAEB 2025");
    assert_eq!(json["subprograma"], "Ensino Fundamental");
    assert_eq!(json["ordem_producao"], "");
    assert_eq!(json["data_aplicacao"], "2025-10-20");
    assert!(json["data_termino"].is_null());
    assert_eq!(json["squads"], json!([{"id": squad["id"], "nome": "Alfa"}]));
    assert_eq!(json["total_atividades"], 0);
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_after_create_round_trips(pool: PgPool) {
    let created = create_ok(
        &pool,
        "/api/projetos",
        json!({"nome": "Prova Paraná", "etapas": "5º ano", "observacao": "Piloto"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = get(common::build_test_app(pool), &format!("/api/projetos/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_projeto_without_nome_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/projetos", json!({"subprograma": "X"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Nome é obrigatório");

    let app = common::build_test_app(pool);
    let list = body_json(get(app, "/api/projetos").await).await;
    assert_eq!(list, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_projeto_with_bad_date_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/projetos",
        json!({"nome": "SAEB", "data_aplicacao": "20/10/2025"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/projetos", json!({"nome": 42})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_projeto_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/projetos/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Projeto não encontrado");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_projeto_is_partial(pool: PgPool) {
    let alfa = create_ok(&pool, "/api/squads", json!({"nome": "Alfa"})).await;
    let beta = create_ok(&pool, "/api/squads", json!({"nome": "Beta"})).await;
    let created = create_ok(
        &pool,
        "/api/projetos",
        json!({
            "nome": "SAEB",
            "disciplinas": "Matemática",
            "data_aplicacao": "2025-03-01",
            "squad_ids": [alfa["id"]]
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/projetos/{id}"),
        json!({"observacao": "Reaplicação", "data_aplicacao": null, "squad_ids": [beta["id"]]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["nome"], "SAEB");
    assert_eq!(json["disciplinas"], "Matemática");
    assert_eq!(json["observacao"], "Reaplicação");
    assert!(json["data_aplicacao"].is_null());
    assert_eq!(json["squads"], json!([{"id": beta["id"], "nome": "Beta"}]));

    // Omitting squad_ids keeps the association set.
    let app = common::build_test_app(pool);
    let json = body_json(
        put_json(app, &format!("/api/projetos/{id}"), json!({"nome": "SAEB 2"})).await,
    )
    .await;
    assert_eq!(json["nome"], "SAEB 2");
    assert_eq!(json["squads"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_projeto_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/projetos/999999", json!({"nome": "X"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_projeto_cascades_atividades(pool: PgPool) {
    let squad = create_ok(&pool, "/api/squads", json!({"nome": "Alfa"})).await;
    let projeto = create_ok(&pool, "/api/projetos", json!({"nome": "SAEB"})).await;
    let atividade = create_ok(
        &pool,
        "/api/atividades",
        json!({"titulo": "Revisão", "projeto_id": projeto["id"], "squad_id": squad["id"]}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/projetos/{}", projeto["id"])).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["message"].is_string());

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/atividades/{}", atividade["id"])).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/projetos/{}", projeto["id"])).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_projeto_atividades_nested_listing(pool: PgPool) {
    let squad = create_ok(&pool, "/api/squads", json!({"nome": "Alfa"})).await;
    let projeto = create_ok(&pool, "/api/projetos", json!({"nome": "SAEB"})).await;
    let outro = create_ok(&pool, "/api/projetos", json!({"nome": "Outro"})).await;
    for (titulo, p) in [("Um", &projeto), ("Dois", &projeto), ("Três", &outro)] {
        create_ok(
            &pool,
            "/api/atividades",
            json!({"titulo": titulo, "projeto_id": p["id"], "squad_id": squad["id"]}),
        )
        .await;
    }

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/projetos/{}/atividades", projeto["id"])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let titulos: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["titulo"].as_str().unwrap())
        .collect();
    assert_eq!(titulos, ["Um", "Dois"]);

    let app = common::build_test_app(pool.clone());
    let detail = body_json(get(app, &format!("/api/projetos/{}", projeto["id"])).await).await;
    assert_eq!(detail["total_atividades"], 2);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/projetos/999999/atividades").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_projetos_pagination(pool: PgPool) {
    for i in 1..=12 {
        create_ok(&pool, "/api/projetos", json!({"nome": format!("Projeto {i}")})).await;
    }

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/projetos?page=2&per_page=5").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 5);
    assert_eq!(json["pagination"]["page"], 2);
    assert_eq!(json["pagination"]["per_page"], 5);
    assert_eq!(json["pagination"]["total"], 12);
    assert_eq!(json["pagination"]["pages"], 3);
    assert_eq!(json["pagination"]["has_next"], true);
    assert_eq!(json["pagination"]["has_prev"], true);
    assert_eq!(json["pagination"]["next_page"], 3);
    assert_eq!(json["pagination"]["prev_page"], 1);
    // Newest first: page 2 starts at the 6th newest.
    assert_eq!(json["items"][0]["nome"], "Projeto 7");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/projetos").await).await;
    assert_eq!(json.as_array().unwrap().len(), 12);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/projetos?page=9").await).await;
    assert_eq!(json["items"], json!([]));
    assert_eq!(json["pagination"]["has_next"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_projetos_search_filters(pool: PgPool) {
    create_ok(
        &pool,
        "/api/projetos",
        json!({"nome": "SAEB", "subprograma": "Ensino Médio", "tipos_processamento": "Leitura óptica"}),
    )
    .await;
    create_ok(
        &pool,
        "/api/projetos",
        json!({"nome": "Prova Brasil", "subprograma": "Fundamental"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/projetos?search_nome=saeb").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["nome"], "SAEB");

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get(app, "/api/projetos?search_subprograma=fundamental&search_nome=prova").await,
    )
    .await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let json = body_json(
        get(app, "/api/projetos?search_tipos_processamento=inexistente&page=1").await,
    )
    .await;
    assert_eq!(json["pagination"]["total"], 0);
    assert_eq!(json["pagination"]["pages"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_squad_ids_are_ignored(pool: PgPool) {
    let squad = create_ok(&pool, "/api/squads", json!({"nome": "Alfa"})).await;
    let json = create_ok(
        &pool,
        "/api/projetos",
        json!({"nome": "SAEB", "squad_ids": [squad["id"], 999999]}),
    )
    .await;
    assert_eq!(json["squads"], json!([{"id": squad["id"], "nome": "Alfa"}]));

    let app = common::build_test_app(pool);
    let json = body_json(
        put_json(app, &format!("/api/projetos/{}", json["id"]), json!({"squad_ids": []})).await,
    )
    .await;
    assert_eq!(json["squads"], json!([]));
}
