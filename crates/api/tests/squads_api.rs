//! HTTP-level integration tests for the `/api/squads` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_ok, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_squad_returns_counts(pool: PgPool) {
    let json = create_ok(
        &pool,
        "/api/squads",
        json!({"nome": "Alfa", "descricao": "Correção"}),
    )
    .await;
    assert_eq!(json["nome"], "Alfa");
    assert_eq!(json["descricao"], "Correção");
    assert_eq!(json["total_projetos"], 0);
    assert_eq!(json["total_atividades"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_after_create_round_trips(pool: PgPool) {
    let created = create_ok(
        &pool,
        "/api/squads",
        json!({"nome": "Medidas", "descricao": "Squad de Medidas"}),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/squads/{}", created["id"])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;

    assert_eq!(fetched, created);
    for field in [
        "id",
        "nome",
        "descricao",
        "total_projetos",
        "total_atividades",
        "created_at",
        "updated_at",
    ] {
        assert!(!fetched[field].is_null(), "{field} missing");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_squad_nome_returns_400(pool: PgPool) {
    create_ok(&pool, "/api/squads", json!({"nome": "Alfa"})).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/squads", json!({"nome": "Alfa"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Já existe uma squad com esse nome");

    let app = common::build_test_app(pool);
    let list = body_json(get(app, "/api/squads").await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_squad_without_nome_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/squads", json!({"nome": "   "})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_squad_to_existing_nome_returns_400(pool: PgPool) {
    create_ok(&pool, "/api/squads", json!({"nome": "Alfa"})).await;
    let beta = create_ok(&pool, "/api/squads", json!({"nome": "Beta"})).await;
    let uri = format!("/api/squads/{}", beta["id"]);

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &uri, json!({"nome": "Alfa"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Keeping its own name is not a conflict.
    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &uri, json!({"nome": "Beta", "descricao": null})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["nome"], "Beta");
    assert!(json["descricao"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_squad_with_atividades_is_refused(pool: PgPool) {
    let squad = create_ok(&pool, "/api/squads", json!({"nome": "Alfa"})).await;
    let projeto = create_ok(&pool, "/api/projetos", json!({"nome": "SAEB"})).await;
    create_ok(
        &pool,
        "/api/atividades",
        json!({"titulo": "Revisão", "projeto_id": projeto["id"], "squad_id": squad["id"]}),
    )
    .await;
    let uri = format!("/api/squads/{}", squad["id"]);

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Não é possível deletar squad com atividades associadas"
    );

    let app = common::build_test_app(pool);
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_atividades"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_squad_removes_projeto_association(pool: PgPool) {
    let squad = create_ok(&pool, "/api/squads", json!({"nome": "Alfa"})).await;
    let projeto = create_ok(
        &pool,
        "/api/projetos",
        json!({"nome": "SAEB", "squad_ids": [squad["id"]]}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/squads/{}", squad["id"])).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Squad deletada com sucesso");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/projetos/{}", projeto["id"])).await).await;
    assert_eq!(json["squads"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_squad_projetos_and_atividades(pool: PgPool) {
    let squad = create_ok(&pool, "/api/squads", json!({"nome": "Alfa"})).await;
    let saeb = create_ok(
        &pool,
        "/api/projetos",
        json!({"nome": "SAEB", "squad_ids": [squad["id"]]}),
    )
    .await;
    create_ok(
        &pool,
        "/api/projetos",
        json!({"nome": "Avalia", "squad_ids": [squad["id"]]}),
    )
    .await;
    create_ok(&pool, "/api/projetos", json!({"nome": "Sem squad"})).await;
    create_ok(
        &pool,
        "/api/atividades",
        json!({"titulo": "Revisão", "projeto_id": saeb["id"], "squad_id": squad["id"]}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/squads/{}/projetos", squad["id"])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let nomes: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nome"].as_str().unwrap())
        .collect();
    assert_eq!(nomes, ["Avalia", "SAEB"]);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/squads/{}/atividades", squad["id"])).await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["squad"]["nome"], "Alfa");
    assert_eq!(json[0]["projeto"]["nome"], "SAEB");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/squads/{}", squad["id"])).await).await;
    assert_eq!(json["total_projetos"], 2);
    assert_eq!(json["total_atividades"], 1);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/squads/999999/projetos").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Squad não encontrada");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_squads_in_id_order_with_pagination(pool: PgPool) {
    for nome in ["Alfa", "Beta", "Gama"] {
        create_ok(&pool, "/api/squads", json!({"nome": nome})).await;
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/squads").await).await;
    let nomes: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["nome"].as_str().unwrap())
        .collect();
    assert_eq!(nomes, ["Alfa", "Beta", "Gama"]);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/squads?page=2&per_page=2").await).await;
    assert_eq!(json["items"][0]["nome"], "Gama");
    assert_eq!(json["pagination"]["total"], 3);
    assert_eq!(json["pagination"]["has_next"], false);
    assert_eq!(json["pagination"]["prev_page"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_nonexistent_squad_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/squads/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
