use clap::{Parser, Subcommand};

use crate::commands::{
    add::AddCmd, delete::DeleteCmd, list::ListCmd, migrate::MigrateCmd, set_rating::SetRatingCmd,
    show::ShowCmd, Context, Executor,
};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "CLI for reelview - inspect and maintain the movie catalogue directly in the database."
)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Migrate(MigrateCmd),
    List(ListCmd),
    Show(ShowCmd),
    Add(AddCmd),
    SetRating(SetRatingCmd),
    Delete(DeleteCmd),
}

impl Executor for Command {
    async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        match self {
            Command::Migrate(cmd) => cmd.run(ctx).await,
            Command::List(cmd) => cmd.run(ctx).await,
            Command::Show(cmd) => cmd.run(ctx).await,
            Command::Add(cmd) => cmd.run(ctx).await,
            Command::SetRating(cmd) => cmd.run(ctx).await,
            Command::Delete(cmd) => cmd.run(ctx).await,
        }
    }
}
