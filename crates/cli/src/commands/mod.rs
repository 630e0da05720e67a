pub mod add;
pub mod delete;
pub mod list;
pub mod migrate;
pub mod set_rating;
pub mod show;

use reelview_db::repositories::MovieRepo;
use reelview_db::DbPool;
use serde::Serialize;

/// Shared handles for a single CLI invocation.
pub struct Context {
    pub pool: DbPool,
    pub movies: MovieRepo,
}

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self, ctx: &Context) -> anyhow::Result<()>;
}

/// Entity name used when lifting repository errors into domain errors.
const MOVIE: &str = "movie";

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
