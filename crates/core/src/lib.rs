//! Domain types and pure logic for the movie data-access layer.
//!
//! Nothing in this crate touches the database: filters, pagination metadata,
//! field validation and the error taxonomy live here so they can be shared by
//! the repository layer and any front end.

pub mod error;
pub mod filters;
pub mod movie;
pub mod types;
pub mod validator;
