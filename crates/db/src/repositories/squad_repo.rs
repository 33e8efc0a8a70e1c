//! Repository for the `squads` table.

use atividades_core::pagination::PageRequest;
use atividades_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::squad::{CreateSquad, Squad, SquadSummary, UpdateSquad};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nome, descricao, created_at, updated_at";

/// Squad columns plus association counts, for queries aliasing `squads` as `s`.
const SUMMARY_COLUMNS: &str = "s.id, s.nome, s.descricao, \
    (SELECT COUNT(*) FROM projeto_squads ps WHERE ps.squad_id = s.id) AS total_projetos, \
    (SELECT COUNT(*) FROM atividades a WHERE a.squad_id = s.id) AS total_atividades, \
    s.created_at, s.updated_at";

/// Provides CRUD operations for squads.
pub struct SquadRepo;

impl SquadRepo {
    /// Insert a new squad, returning the created row.
    ///
    /// Fails with a unique violation on `uq_squads_nome` if the name is taken.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateSquad,
    ) -> Result<Squad, sqlx::Error> {
        let query = format!(
            "INSERT INTO squads (nome, descricao)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Squad>(&query)
            .bind(&input.nome)
            .bind(&input.descricao)
            .fetch_one(executor)
            .await
    }

    /// Find a squad by its internal ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Squad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM squads WHERE id = $1");
        sqlx::query_as::<_, Squad>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a squad by exact name.
    pub async fn find_by_nome<'e, E: PgExecutor<'e>>(
        executor: E,
        nome: &str,
    ) -> Result<Option<Squad>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM squads WHERE nome = $1");
        sqlx::query_as::<_, Squad>(&query)
            .bind(nome)
            .fetch_optional(executor)
            .await
    }

    /// Whether a squad with the given ID exists.
    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM squads WHERE id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    /// Find a squad by ID together with its projeto and atividade counts.
    pub async fn find_summary_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SquadSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM squads s WHERE s.id = $1");
        sqlx::query_as::<_, SquadSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List squads with their counts, in creation order.
    ///
    /// Returns every squad when `page` is `None`, otherwise only that page.
    pub async fn list(
        pool: &PgPool,
        page: Option<PageRequest>,
    ) -> Result<Vec<SquadSummary>, sqlx::Error> {
        match page {
            Some(page) => {
                let query = format!(
                    "SELECT {SUMMARY_COLUMNS} FROM squads s ORDER BY s.id LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, SquadSummary>(&query)
                    .bind(page.limit())
                    .bind(page.offset())
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {SUMMARY_COLUMNS} FROM squads s ORDER BY s.id");
                sqlx::query_as::<_, SquadSummary>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Total number of squads.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM squads")
            .fetch_one(pool)
            .await
    }

    /// Update a squad. Only fields present in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        input: &UpdateSquad,
    ) -> Result<Option<Squad>, sqlx::Error> {
        let query = format!(
            "UPDATE squads SET
                nome = COALESCE($2, nome),
                descricao = CASE WHEN $3 THEN $4 ELSE descricao END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Squad>(&query)
            .bind(id)
            .bind(&input.nome)
            .bind(input.descricao.is_some())
            .bind(input.descricao.clone().flatten())
            .fetch_optional(executor)
            .await
    }

    /// Number of atividades that reference the squad.
    pub async fn count_atividades<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM atividades WHERE squad_id = $1")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// Delete a squad by ID. Returns `true` if a row was removed.
    ///
    /// Projeto associations cascade; referencing atividades make the delete
    /// fail with a foreign-key violation, so callers check
    /// [`count_atividades`](Self::count_atividades) first.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM squads WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
