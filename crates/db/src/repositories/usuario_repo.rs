//! Repository for the `usuarios` table.

use atividades_core::pagination::PageRequest;
use atividades_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::usuario::{CreateUsuario, UpdateUsuario, Usuario};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, nome, login, senha_hash, role, ativo, created_at, updated_at";

/// Provides CRUD operations for usuarios.
pub struct UsuarioRepo;

impl UsuarioRepo {
    /// Insert a new usuario, returning the created row.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateUsuario,
    ) -> Result<Usuario, sqlx::Error> {
        let query = format!(
            "INSERT INTO usuarios (nome, login, senha_hash, role, ativo)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Usuario>(&query)
            .bind(&input.nome)
            .bind(&input.login)
            .bind(&input.senha_hash)
            .bind(&input.role)
            .bind(input.ativo)
            .fetch_one(executor)
            .await
    }

    /// Find a usuario by internal ID.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Usuario>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM usuarios WHERE id = $1");
        sqlx::query_as::<_, Usuario>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a usuario by login (case-sensitive).
    pub async fn find_by_login<'e, E: PgExecutor<'e>>(
        executor: E,
        login: &str,
    ) -> Result<Option<Usuario>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM usuarios WHERE login = $1");
        sqlx::query_as::<_, Usuario>(&query)
            .bind(login)
            .fetch_optional(executor)
            .await
    }

    /// List usuarios ordered by most recently created first.
    ///
    /// Returns every usuario when `page` is `None`, otherwise only that page.
    pub async fn list(
        pool: &PgPool,
        page: Option<PageRequest>,
    ) -> Result<Vec<Usuario>, sqlx::Error> {
        match page {
            Some(page) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM usuarios
                     ORDER BY created_at DESC, id DESC
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, Usuario>(&query)
                    .bind(page.limit())
                    .bind(page.offset())
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query =
                    format!("SELECT {COLUMNS} FROM usuarios ORDER BY created_at DESC, id DESC");
                sqlx::query_as::<_, Usuario>(&query).fetch_all(pool).await
            }
        }
    }

    /// Total number of usuarios.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(pool)
            .await
    }

    /// Update a usuario. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        input: &UpdateUsuario,
    ) -> Result<Option<Usuario>, sqlx::Error> {
        let query = format!(
            "UPDATE usuarios SET
                nome = COALESCE($2, nome),
                login = COALESCE($3, login),
                senha_hash = COALESCE($4, senha_hash),
                role = COALESCE($5, role),
                ativo = COALESCE($6, ativo)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Usuario>(&query)
            .bind(id)
            .bind(&input.nome)
            .bind(&input.login)
            .bind(&input.senha_hash)
            .bind(&input.role)
            .bind(input.ativo)
            .fetch_optional(executor)
            .await
    }

    /// Permanently delete a usuario by ID. Returns `true` if a row was removed.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
