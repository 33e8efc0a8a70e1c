//! Repository for the `projetos` table and its `projeto_squads` associations.

use std::collections::HashMap;

use atividades_core::pagination::PageRequest;
use atividades_core::search::contains_pattern;
use atividades_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::projeto::{
    CreateProjeto, NamedRef, Projeto, ProjetoDetail, ProjetoFilters, ProjetoSquad, UpdateProjeto,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, subprograma, nome, ordem_producao, data_aplicacao, data_termino, \
                       etapas, disciplinas, tipos_processamento, observacao, created_at, updated_at";

/// Provides CRUD operations for projetos.
pub struct ProjetoRepo;

impl ProjetoRepo {
    /// Insert a new projeto and associate the requested squads.
    ///
    /// Both statements run on `conn`; pass an open transaction so they commit
    /// together.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateProjeto,
    ) -> Result<Projeto, sqlx::Error> {
        let query = format!(
            "INSERT INTO projetos
                (subprograma, nome, ordem_producao, data_aplicacao, data_termino,
                 etapas, disciplinas, tipos_processamento, observacao)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let projeto = sqlx::query_as::<_, Projeto>(&query)
            .bind(&input.subprograma)
            .bind(&input.nome)
            .bind(&input.ordem_producao)
            .bind(input.data_aplicacao)
            .bind(input.data_termino)
            .bind(&input.etapas)
            .bind(&input.disciplinas)
            .bind(&input.tipos_processamento)
            .bind(&input.observacao)
            .fetch_one(&mut *conn)
            .await?;

        if !input.squad_ids.is_empty() {
            Self::set_squads(conn, projeto.id, &input.squad_ids).await?;
        }

        Ok(projeto)
    }

    /// Find a projeto by its internal ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Projeto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projetos WHERE id = $1");
        sqlx::query_as::<_, Projeto>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find the oldest projeto with exactly this name.
    ///
    /// Projeto names are not unique; this is used to keep seeding idempotent.
    pub async fn find_by_nome<'e, E: PgExecutor<'e>>(
        executor: E,
        nome: &str,
    ) -> Result<Option<Projeto>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projetos WHERE nome = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, Projeto>(&query)
            .bind(nome)
            .fetch_optional(executor)
            .await
    }

    /// Whether a projeto with the given ID exists.
    pub async fn exists<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM projetos WHERE id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    /// List projetos matching `filters`, most recently created first.
    ///
    /// Returns every match when `page` is `None`, otherwise only that page.
    pub async fn list(
        pool: &PgPool,
        filters: &ProjetoFilters,
        page: Option<PageRequest>,
    ) -> Result<Vec<Projeto>, sqlx::Error> {
        let (where_clause, patterns) = build_filter(filters);
        let mut query = format!(
            "SELECT {COLUMNS} FROM projetos {where_clause} ORDER BY created_at DESC, id DESC"
        );
        if page.is_some() {
            let next = patterns.len() + 1;
            query.push_str(&format!(" LIMIT ${next} OFFSET ${}", next + 1));
        }

        let mut q = sqlx::query_as::<_, Projeto>(&query);
        for pattern in &patterns {
            q = q.bind(pattern);
        }
        if let Some(page) = page {
            q = q.bind(page.limit()).bind(page.offset());
        }
        q.fetch_all(pool).await
    }

    /// Count projetos matching `filters`.
    pub async fn count(pool: &PgPool, filters: &ProjetoFilters) -> Result<i64, sqlx::Error> {
        let (where_clause, patterns) = build_filter(filters);
        let query = format!("SELECT COUNT(*) FROM projetos {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for pattern in &patterns {
            q = q.bind(pattern);
        }
        q.fetch_one(pool).await
    }

    /// Update a projeto. Only fields present in `input` are applied.
    ///
    /// If `squad_ids` is present, replaces all squad associations on the same
    /// connection. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateProjeto,
    ) -> Result<Option<Projeto>, sqlx::Error> {
        let query = format!(
            "UPDATE projetos SET
                subprograma = CASE WHEN $2 THEN $3 ELSE subprograma END,
                nome = COALESCE($4, nome),
                ordem_producao = CASE WHEN $5 THEN $6 ELSE ordem_producao END,
                data_aplicacao = CASE WHEN $7 THEN $8 ELSE data_aplicacao END,
                data_termino = CASE WHEN $9 THEN $10 ELSE data_termino END,
                etapas = CASE WHEN $11 THEN $12 ELSE etapas END,
                disciplinas = CASE WHEN $13 THEN $14 ELSE disciplinas END,
                tipos_processamento = CASE WHEN $15 THEN $16 ELSE tipos_processamento END,
                observacao = CASE WHEN $17 THEN $18 ELSE observacao END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let projeto = sqlx::query_as::<_, Projeto>(&query)
            .bind(id)
            .bind(input.subprograma.is_some())
            .bind(input.subprograma.clone().flatten())
            .bind(&input.nome)
            .bind(input.ordem_producao.is_some())
            .bind(input.ordem_producao.clone().flatten())
            .bind(input.data_aplicacao.is_some())
            .bind(input.data_aplicacao.flatten())
            .bind(input.data_termino.is_some())
            .bind(input.data_termino.flatten())
            .bind(input.etapas.is_some())
            .bind(input.etapas.clone().flatten())
            .bind(input.disciplinas.is_some())
            .bind(input.disciplinas.clone().flatten())
            .bind(input.tipos_processamento.is_some())
            .bind(input.tipos_processamento.clone().flatten())
            .bind(input.observacao.is_some())
            .bind(input.observacao.clone().flatten())
            .fetch_optional(&mut *conn)
            .await?;

        if let (Some(projeto), Some(squad_ids)) = (&projeto, &input.squad_ids) {
            Self::set_squads(conn, projeto.id, squad_ids).await?;
        }

        Ok(projeto)
    }

    /// Delete a projeto by ID. Its atividades and squad associations are
    /// removed by `ON DELETE CASCADE`. Returns `true` if a row was removed.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projetos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Squad association helpers
    // -----------------------------------------------------------------------

    /// Replace all squad associations for a projeto.
    ///
    /// Deletes existing associations, then inserts the new set. Ids that do
    /// not reference an existing squad are skipped.
    pub async fn set_squads(
        conn: &mut PgConnection,
        projeto_id: DbId,
        squad_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM projeto_squads WHERE projeto_id = $1")
            .bind(projeto_id)
            .execute(&mut *conn)
            .await?;

        if squad_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO projeto_squads (projeto_id, squad_id)
             SELECT $1, s.id FROM squads s WHERE s.id = ANY($2)
             ON CONFLICT DO NOTHING",
        )
        .bind(projeto_id)
        .bind(squad_ids)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Squads associated with any of the given projetos, ordered by squad name.
    pub async fn squads_for(
        pool: &PgPool,
        projeto_ids: &[DbId],
    ) -> Result<Vec<ProjetoSquad>, sqlx::Error> {
        sqlx::query_as::<_, ProjetoSquad>(
            "SELECT ps.projeto_id, s.id, s.nome
             FROM projeto_squads ps
             JOIN squads s ON s.id = ps.squad_id
             WHERE ps.projeto_id = ANY($1)
             ORDER BY s.nome, s.id",
        )
        .bind(projeto_ids)
        .fetch_all(pool)
        .await
    }

    /// Number of atividades owned by each of the given projetos.
    ///
    /// Projetos without atividades are absent from the result.
    pub async fn atividade_counts(
        pool: &PgPool,
        projeto_ids: &[DbId],
    ) -> Result<Vec<(DbId, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, i64)>(
            "SELECT projeto_id, COUNT(*)
             FROM atividades
             WHERE projeto_id = ANY($1)
             GROUP BY projeto_id",
        )
        .bind(projeto_ids)
        .fetch_all(pool)
        .await
    }

    /// Resolve squads and atividade counts for a batch of projetos.
    ///
    /// Issues two queries for the whole batch regardless of its size and
    /// preserves the input order.
    pub async fn with_details(
        pool: &PgPool,
        projetos: Vec<Projeto>,
    ) -> Result<Vec<ProjetoDetail>, sqlx::Error> {
        if projetos.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = projetos.iter().map(|p| p.id).collect();

        let mut squads_by_projeto: HashMap<DbId, Vec<NamedRef>> = HashMap::new();
        for row in Self::squads_for(pool, &ids).await? {
            squads_by_projeto.entry(row.projeto_id).or_default().push(NamedRef {
                id: row.id,
                nome: row.nome,
            });
        }

        let counts: HashMap<DbId, i64> = Self::atividade_counts(pool, &ids)
            .await?
            .into_iter()
            .collect();

        Ok(projetos
            .into_iter()
            .map(|projeto| ProjetoDetail {
                squads: squads_by_projeto.remove(&projeto.id).unwrap_or_default(),
                total_atividades: counts.get(&projeto.id).copied().unwrap_or(0),
                projeto,
            })
            .collect())
    }

    /// Find a projeto by ID with its squads and atividade count resolved.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjetoDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(projeto) => Ok(Self::with_details(pool, vec![projeto]).await?.pop()),
            None => Ok(None),
        }
    }

    /// `{id, nome}` of every projeto associated with a squad, by projeto name.
    pub async fn list_refs_by_squad(
        pool: &PgPool,
        squad_id: DbId,
    ) -> Result<Vec<NamedRef>, sqlx::Error> {
        sqlx::query_as::<_, NamedRef>(
            "SELECT p.id, p.nome
             FROM projetos p
             JOIN projeto_squads ps ON ps.projeto_id = p.id
             WHERE ps.squad_id = $1
             ORDER BY p.nome, p.id",
        )
        .bind(squad_id)
        .fetch_all(pool)
        .await
    }
}

/// Build the `WHERE` clause for the listing filters.
///
/// Returns the clause (empty when no filter applies) and the `ILIKE` patterns
/// to bind, in placeholder order starting at `$1`.
fn build_filter(filters: &ProjetoFilters) -> (String, Vec<String>) {
    let candidates = [
        ("subprograma", &filters.subprograma),
        ("nome", &filters.nome),
        ("ordem_producao", &filters.ordem_producao),
        ("disciplinas", &filters.disciplinas),
        ("tipos_processamento", &filters.tipos_processamento),
    ];

    let mut conditions = Vec::new();
    let mut patterns = Vec::new();
    for (column, term) in candidates {
        if let Some(pattern) = term.as_deref().and_then(contains_pattern) {
            patterns.push(pattern);
            conditions.push(format!("{column} ILIKE ${}", patterns.len()));
        }
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, patterns)
}
