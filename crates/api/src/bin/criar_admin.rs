//! Bootstrap the initial administrator account.
//!
//! Creates the usuario `admin` (role `admin`) with the password taken from
//! `ADMIN_PASSWORD`, unless a usuario with that login already exists.
//! Applies pending migrations first so it can run against a fresh database.

use anyhow::{bail, Context};
use atividades_api::auth::password::hash_password;
use atividades_core::roles::ROLE_ADMIN;
use atividades_db::models::usuario::CreateUsuario;
use atividades_db::repositories::UsuarioRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ADMIN_LOGIN: &str = "admin";
const ADMIN_NOME: &str = "Administrador";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "criar_admin=info,atividades_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;
    if password.is_empty() {
        bail!("ADMIN_PASSWORD must not be empty");
    }

    let pool = atividades_db::create_pool(&database_url, 1)
        .await
        .context("Failed to connect to database")?;
    atividades_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    if let Some(existing) = UsuarioRepo::find_by_login(&pool, ADMIN_LOGIN).await? {
        tracing::info!(usuario_id = existing.id, "Admin usuario already exists, nothing to do");
        return Ok(());
    }

    let senha_hash = hash_password(&password)?;
    let usuario = UsuarioRepo::create(
        &pool,
        &CreateUsuario {
            nome: ADMIN_NOME.to_string(),
            login: ADMIN_LOGIN.to_string(),
            senha_hash,
            role: ROLE_ADMIN.to_string(),
            ativo: true,
        },
    )
    .await
    .context("Failed to create admin usuario")?;

    tracing::info!(usuario_id = usuario.id, login = ADMIN_LOGIN, "Admin usuario created");
    pool.close().await;
    Ok(())
}
