use clap::Parser;

use crate::commands::{Context, Executor, MOVIE};

/// Permanently delete a movie.
#[derive(Parser, Debug)]
pub struct DeleteCmd {
    #[arg(allow_negative_numbers = true)]
    id: i64,
}

impl Executor for DeleteCmd {
    async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        ctx.movies
            .delete(self.id)
            .await
            .map_err(|e| e.into_core(MOVIE, self.id))?;
        tracing::info!(movie_id = self.id, "Movie deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_and_zero_ids_parse_as_values() {
        assert_eq!(DeleteCmd::try_parse_from(["delete", "-7"]).unwrap().id, -7);
        assert_eq!(DeleteCmd::try_parse_from(["delete", "0"]).unwrap().id, 0);
    }
}
