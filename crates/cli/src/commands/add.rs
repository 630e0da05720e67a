use chrono::NaiveDate;
use clap::Parser;
use reelview_core::validator::Validator;
use reelview_db::models::movie::{validate_movie, Movie};

use crate::commands::{print_json, Context, Executor};

/// Validate and insert a new movie.
#[derive(Parser, Debug)]
pub struct AddCmd {
    #[arg(long)]
    title: String,
    #[arg(long, help = "Release date as YYYY-MM-DD")]
    release_date: Option<NaiveDate>,
    #[arg(long, value_delimiter = ',', help = "Genres, comma separated")]
    genres: Vec<String>,
    #[arg(long, default_value = "")]
    overview: String,
    #[arg(long, default_value = "")]
    language: String,
    #[arg(long, default_value_t = 0.0)]
    rating: f64,
    #[arg(long, default_value = "")]
    poster_url: String,
    #[arg(long, default_value = "")]
    backdrop_url: String,
}

impl AddCmd {
    fn into_movie(self) -> Movie {
        Movie {
            title: self.title,
            overview: self.overview,
            language: self.language,
            release_date: self.release_date,
            rating: self.rating,
            poster_url: self.poster_url,
            backdrop_url: self.backdrop_url,
            genres: (!self.genres.is_empty()).then_some(self.genres),
            ..Movie::default()
        }
    }
}

impl Executor for AddCmd {
    async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let mut movie = self.into_movie();

        let mut v = Validator::new();
        validate_movie(&mut v, &movie);
        v.into_result()?;

        ctx.movies.insert(&mut movie).await?;
        tracing::info!(movie_id = movie.id, "Movie created");
        print_json(&movie)
    }
}
