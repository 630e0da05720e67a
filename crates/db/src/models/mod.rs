//! Domain model structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the entity's validation entry point.

pub mod movie;
