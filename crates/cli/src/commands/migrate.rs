use clap::Parser;

use crate::commands::{Context, Executor};

/// Apply pending schema migrations.
#[derive(Parser, Debug)]
pub struct MigrateCmd {}

impl Executor for MigrateCmd {
    async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        reelview_db::run_migrations(&ctx.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}
