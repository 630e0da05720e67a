use clap::Parser;

use crate::commands::{print_json, Context, Executor, MOVIE};

/// Print a single movie.
#[derive(Parser, Debug)]
pub struct ShowCmd {
    #[arg(allow_negative_numbers = true)]
    id: i64,
}

impl Executor for ShowCmd {
    async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let movie = ctx
            .movies
            .get(self.id)
            .await
            .map_err(|e| e.into_core(MOVIE, self.id))?;
        print_json(&movie)
    }
}
