use clap::Parser;
use reelview_core::filters::{FilterParams, Filters};
use reelview_core::movie::{DEFAULT_MOVIE_SORT, MOVIE_SORT_SAFELIST};
use reelview_core::validator::Validator;
use serde_json::json;

use crate::commands::{print_json, Context, Executor};

/// Search movies by title and genres, one page at a time.
#[derive(Parser, Debug)]
pub struct ListCmd {
    #[arg(long, default_value = "", help = "Words that must all appear in the title")]
    title: String,
    #[arg(long, value_delimiter = ',', help = "Genres the movie must have, comma separated")]
    genres: Vec<String>,
    #[arg(long, allow_hyphen_values = true)]
    page: Option<i64>,
    #[arg(long, allow_hyphen_values = true)]
    page_size: Option<i64>,
    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Column to sort by, prefix with '-' for descending order"
    )]
    sort: Option<String>,
}

impl ListCmd {
    fn filters(&self) -> Filters {
        let params = FilterParams {
            page: self.page,
            page_size: self.page_size,
            sort: self.sort.clone(),
        };
        Filters::from_params(params, DEFAULT_MOVIE_SORT, MOVIE_SORT_SAFELIST)
    }
}

impl Executor for ListCmd {
    async fn run(self, ctx: &Context) -> anyhow::Result<()> {
        let filters = self.filters();
        let mut v = Validator::new();
        filters.validate(&mut v);
        v.into_result()?;

        let (movies, metadata) = ctx.movies.list(&self.title, &self.genres, &filters).await?;
        print_json(&json!({ "movies": movies, "metadata": metadata }))
    }
}
