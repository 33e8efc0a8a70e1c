//! Integration tests for the sample-data seeding.

use atividades_db::models::squad::CreateSquad;
use atividades_db::repositories::{ProjetoRepo, SquadRepo};
use atividades_db::seed::{self, SeedSummary};
use chrono::NaiveDate;
use sqlx::PgPool;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_populate_fresh_database(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let summary = seed::populate(&mut tx, today()).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(
        summary,
        SeedSummary {
            squads: seed::SQUADS.len(),
            projetos: seed::PROJETOS.len(),
            atividades: seed::atividade_count(),
        }
    );
    assert_eq!(count(&pool, "squads").await, seed::SQUADS.len() as i64);
    assert_eq!(count(&pool, "projetos").await, seed::PROJETOS.len() as i64);
    assert_eq!(count(&pool, "atividades").await, seed::atividade_count() as i64);

    let first = ProjetoRepo::find_by_nome(&pool, seed::PROJETOS[0].nome)
        .await
        .unwrap()
        .expect("first projeto should exist");
    let detail = ProjetoRepo::find_detail_by_id(&pool, first.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.squads.len(), seed::SQUADS.len());
    assert_eq!(detail.total_atividades, seed::atividade_count() as i64);

    let prazo: Option<NaiveDate> = sqlx::query_scalar("SELECT DISTINCT prazo FROM atividades")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(prazo, NaiveDate::from_ymd_opt(2025, 10, 16));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_populate_twice_inserts_nothing_new(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    seed::populate(&mut conn, today()).await.unwrap();
    let second = seed::populate(&mut conn, today()).await.unwrap();

    assert_eq!(second, SeedSummary::default());
    assert_eq!(count(&pool, "squads").await, seed::SQUADS.len() as i64);
    assert_eq!(count(&pool, "atividades").await, seed::atividade_count() as i64);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_populate_keeps_existing_squad(pool: PgPool) {
    let existing = SquadRepo::create(
        &pool,
        &CreateSquad {
            nome: "Auditoria".to_string(),
            descricao: "Criada manualmente".to_string(),
        },
    )
    .await
    .unwrap();

    let mut tx = pool.begin().await.unwrap();
    let summary = seed::populate(&mut tx, today()).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(summary.squads, seed::SQUADS.len() - 1);
    let squad = SquadRepo::find_by_nome(&pool, "Auditoria").await.unwrap().unwrap();
    assert_eq!(squad.id, existing.id);
    assert_eq!(squad.descricao.as_deref(), Some("Criada manualmente"));
}
