use std::time::Duration;

use crate::types::DbId;
use crate::validator::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Edit conflict: {entity} with id {id} was modified by another writer")]
    Conflict { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// A store failure carried as-is; downcast the source to inspect it.
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}
