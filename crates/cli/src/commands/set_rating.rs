use clap::Parser;
use reelview_core::validator::Validator;
use reelview_db::models::movie::validate_movie;

use crate::commands::{print_json, Context, Executor, MOVIE};

/// Change a movie's rating with an optimistic read-modify-write.
#[derive(Parser, Debug)]
pub struct SetRatingCmd {
    #[arg(allow_negative_numbers = true)]
    id: i64,
    #[arg(allow_negative_numbers = true)]
    rating: f64,
}

impl Executor for SetRatingCmd {
    async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let mut movie = ctx
            .movies
            .get(self.id)
            .await
            .map_err(|e| e.into_core(MOVIE, self.id))?;

        movie.rating = self.rating;

        let mut v = Validator::new();
        validate_movie(&mut v, &movie);
        v.into_result()?;

        // A concurrent writer between the read and this update surfaces as
        // a conflict; the caller re-runs the command against the new version.
        ctx.movies
            .update(&mut movie)
            .await
            .map_err(|e| e.into_core(MOVIE, self.id))?;

        tracing::info!(movie_id = movie.id, version = movie.version, "Movie rating updated");
        print_json(&movie)
    }
}
