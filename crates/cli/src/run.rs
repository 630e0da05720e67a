use anyhow::{Context as _, Result};
use reelview_db::repositories::MovieRepo;
use reelview_db::DbConfig;

use crate::commands::{Context, Executor as _};
use crate::config::CliConfig;

pub async fn run(config: CliConfig) -> Result<()> {
    let db_config = DbConfig::from_env()?;

    let pool = reelview_db::create_pool(&db_config)
        .await
        .context("Failed to connect to database")?;
    reelview_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::debug!(
        max_connections = db_config.max_connections,
        query_timeout = ?db_config.query_timeout,
        "Database connection pool created"
    );

    let movies = MovieRepo::new(pool.clone()).with_timeout(db_config.query_timeout);
    let ctx = Context { pool, movies };

    config.command.run(&ctx).await
}
