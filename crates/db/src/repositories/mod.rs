//! Repository layer.
//!
//! Each repository owns a clone of the shared `PgPool`, injected at
//! construction, and bounds every round trip with a timeout.

pub mod movie_repo;

pub use movie_repo::MovieRepo;
