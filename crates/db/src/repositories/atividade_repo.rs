//! Repository for the `atividades` table.

use atividades_core::pagination::PageRequest;
use atividades_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::atividade::{
    Atividade, AtividadeDetail, AtividadeFilters, AtividadeStats, CreateAtividade, UpdateAtividade,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, titulo, descricao, prazo, prioridade, status, projeto_id, squad_id, \
                       created_at, updated_at";

/// Atividade columns joined with projeto and squad names.
const DETAIL_SELECT: &str = "SELECT a.id, a.titulo, a.descricao, a.prazo, a.prioridade, a.status, \
        a.projeto_id, p.nome AS projeto_nome, a.squad_id, s.nome AS squad_nome, \
        a.created_at, a.updated_at \
     FROM atividades a \
     JOIN projetos p ON p.id = a.projeto_id \
     JOIN squads s ON s.id = a.squad_id";

/// Provides CRUD operations for atividades.
pub struct AtividadeRepo;

impl AtividadeRepo {
    /// Insert a new atividade, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateAtividade,
    ) -> Result<Atividade, sqlx::Error> {
        let query = format!(
            "INSERT INTO atividades
                (titulo, descricao, prazo, prioridade, status, projeto_id, squad_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Atividade>(&query)
            .bind(&input.titulo)
            .bind(&input.descricao)
            .bind(input.prazo)
            .bind(&input.prioridade)
            .bind(&input.status)
            .bind(input.projeto_id)
            .bind(input.squad_id)
            .fetch_one(executor)
            .await
    }

    /// Find an atividade by its internal ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Atividade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM atividades WHERE id = $1");
        sqlx::query_as::<_, Atividade>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an atividade by ID with its projeto and squad names.
    pub async fn find_detail_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<AtividadeDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE a.id = $1");
        sqlx::query_as::<_, AtividadeDetail>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Whether the projeto already has an atividade with this titulo for the squad.
    pub async fn exists_with_titulo<'e, E: PgExecutor<'e>>(
        executor: E,
        projeto_id: DbId,
        squad_id: DbId,
        titulo: &str,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM atividades
                 WHERE projeto_id = $1 AND squad_id = $2 AND titulo = $3
             )",
        )
        .bind(projeto_id)
        .bind(squad_id)
        .bind(titulo)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// List atividades matching `filters`, in creation order.
    ///
    /// Returns every match when `page` is `None`, otherwise only that page.
    pub async fn list(
        pool: &PgPool,
        filters: &AtividadeFilters,
        page: Option<PageRequest>,
    ) -> Result<Vec<AtividadeDetail>, sqlx::Error> {
        let (where_clause, next_idx) = build_filter(filters);
        let mut query = format!("{DETAIL_SELECT} {where_clause} ORDER BY a.id");
        if page.is_some() {
            query.push_str(&format!(" LIMIT ${next_idx} OFFSET ${}", next_idx + 1));
        }

        let mut q = sqlx::query_as::<_, AtividadeDetail>(&query);
        if let Some(projeto_id) = filters.projeto_id {
            q = q.bind(projeto_id);
        }
        if let Some(squad_id) = filters.squad_id {
            q = q.bind(squad_id);
        }
        if let Some(status) = &filters.status {
            q = q.bind(status);
        }
        if let Some(prioridade) = &filters.prioridade {
            q = q.bind(prioridade);
        }
        if let Some(page) = page {
            q = q.bind(page.limit()).bind(page.offset());
        }
        q.fetch_all(pool).await
    }

    /// Count atividades matching `filters`.
    pub async fn count(pool: &PgPool, filters: &AtividadeFilters) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = build_filter(filters);
        let query = format!("SELECT COUNT(*) FROM atividades a {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        if let Some(projeto_id) = filters.projeto_id {
            q = q.bind(projeto_id);
        }
        if let Some(squad_id) = filters.squad_id {
            q = q.bind(squad_id);
        }
        if let Some(status) = &filters.status {
            q = q.bind(status);
        }
        if let Some(prioridade) = &filters.prioridade {
            q = q.bind(prioridade);
        }
        q.fetch_one(pool).await
    }

    /// All atividades of a projeto, in creation order.
    pub async fn list_by_projeto(
        pool: &PgPool,
        projeto_id: DbId,
    ) -> Result<Vec<AtividadeDetail>, sqlx::Error> {
        let filters = AtividadeFilters {
            projeto_id: Some(projeto_id),
            ..Default::default()
        };
        Self::list(pool, &filters, None).await
    }

    /// All atividades of a squad, in creation order.
    pub async fn list_by_squad(
        pool: &PgPool,
        squad_id: DbId,
    ) -> Result<Vec<AtividadeDetail>, sqlx::Error> {
        let filters = AtividadeFilters {
            squad_id: Some(squad_id),
            ..Default::default()
        };
        Self::list(pool, &filters, None).await
    }

    /// Update an atividade. Only fields present in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        input: &UpdateAtividade,
    ) -> Result<Option<Atividade>, sqlx::Error> {
        let query = format!(
            "UPDATE atividades SET
                titulo = COALESCE($2, titulo),
                descricao = CASE WHEN $3 THEN $4 ELSE descricao END,
                prazo = CASE WHEN $5 THEN $6 ELSE prazo END,
                prioridade = COALESCE($7, prioridade),
                status = COALESCE($8, status),
                projeto_id = COALESCE($9, projeto_id),
                squad_id = COALESCE($10, squad_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Atividade>(&query)
            .bind(id)
            .bind(&input.titulo)
            .bind(input.descricao.is_some())
            .bind(input.descricao.clone().flatten())
            .bind(input.prazo.is_some())
            .bind(input.prazo.flatten())
            .bind(&input.prioridade)
            .bind(&input.status)
            .bind(input.projeto_id)
            .bind(input.squad_id)
            .fetch_optional(executor)
            .await
    }

    /// Delete an atividade by ID. Returns `true` if a row was removed.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM atividades WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total atividade count broken down by status and by prioridade.
    pub async fn stats(pool: &PgPool) -> Result<AtividadeStats, sqlx::Error> {
        sqlx::query_as::<_, AtividadeStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pendente') AS pendente,
                COUNT(*) FILTER (WHERE status = 'em_andamento') AS em_andamento,
                COUNT(*) FILTER (WHERE status = 'concluida') AS concluida,
                COUNT(*) FILTER (WHERE prioridade = 'baixa') AS baixa,
                COUNT(*) FILTER (WHERE prioridade = 'media') AS media,
                COUNT(*) FILTER (WHERE prioridade = 'alta') AS alta
             FROM atividades",
        )
        .fetch_one(pool)
        .await
    }
}

/// Build the `WHERE` clause for the listing filters.
///
/// Placeholders are numbered from `$1` in the order projeto_id, squad_id,
/// status, prioridade (skipping absent filters); callers must bind in that
/// order. Also returns the next free placeholder index.
fn build_filter(filters: &AtividadeFilters) -> (String, usize) {
    let mut conditions = Vec::new();
    let mut bind_idx = 1usize;

    if filters.projeto_id.is_some() {
        conditions.push(format!("a.projeto_id = ${bind_idx}"));
        bind_idx += 1;
    }
    if filters.squad_id.is_some() {
        conditions.push(format!("a.squad_id = ${bind_idx}"));
        bind_idx += 1;
    }
    if filters.status.is_some() {
        conditions.push(format!("a.status = ${bind_idx}"));
        bind_idx += 1;
    }
    if filters.prioridade.is_some() {
        conditions.push(format!("a.prioridade = ${bind_idx}"));
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, bind_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_starts_at_first_placeholder() {
        let (clause, next) = build_filter(&AtividadeFilters::default());
        assert!(clause.is_empty());
        assert_eq!(next, 1);
    }

    #[test]
    fn skipped_filters_do_not_consume_placeholders() {
        let filters = AtividadeFilters {
            squad_id: Some(3),
            prioridade: Some("alta".into()),
            ..Default::default()
        };
        let (clause, next) = build_filter(&filters);
        assert_eq!(clause, "WHERE a.squad_id = $1 AND a.prioridade = $2");
        assert_eq!(next, 3);
    }
}
