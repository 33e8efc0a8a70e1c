//! Load the sample squads, projetos and atividades.
//!
//! Everything runs in a single transaction. Rows that already exist are
//! left untouched, so running it again is harmless.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "popular_db=info,atividades_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = atividades_db::create_pool(&database_url, 1)
        .await
        .context("Failed to connect to database")?;
    atividades_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let today = chrono::Local::now().date_naive();
    let mut tx = pool.begin().await?;
    let summary = atividades_db::seed::populate(&mut tx, today)
        .await
        .context("Failed to insert sample data")?;
    tx.commit().await.context("Failed to commit sample data")?;

    tracing::info!(
        squads = summary.squads,
        projetos = summary.projetos,
        atividades = summary.atividades,
        "Sample data loaded"
    );
    pool.close().await;
    Ok(())
}
