use std::time::Duration;

use reelview_core::error::CoreError;
use reelview_core::types::DbId;
use sqlx::error::ErrorKind;

/// Errors returned by repository operations.
///
/// Only the absent-row and stale-version cases are translated; every other
/// store failure is carried unchanged in [`DbError::Database`].
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("record not found")]
    RecordNotFound,

    #[error("unable to update the record due to an edit conflict")]
    EditConflict,

    #[error("database operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DbError {
    /// Name of the violated constraint, if the store reported one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            DbError::Database(sqlx::Error::Database(db_err)) => db_err.constraint(),
            _ => None,
        }
    }

    /// Whether the store rejected the row through a `CHECK` constraint.
    pub fn is_check_violation(&self) -> bool {
        matches!(
            self,
            DbError::Database(sqlx::Error::Database(db_err))
                if matches!(db_err.kind(), ErrorKind::CheckViolation)
        )
    }

    /// Lift into the domain error taxonomy for the given entity and id.
    pub fn into_core(self, entity: &'static str, id: DbId) -> CoreError {
        match self {
            DbError::RecordNotFound => CoreError::NotFound { entity, id },
            DbError::EditConflict => CoreError::Conflict { entity, id },
            DbError::Timeout(after) => CoreError::Timeout(after),
            DbError::Database(err) => CoreError::Storage(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translated_variants_map_to_core() {
        assert!(matches!(
            DbError::RecordNotFound.into_core("movie", 7),
            CoreError::NotFound { entity: "movie", id: 7 }
        ));
        assert!(matches!(
            DbError::EditConflict.into_core("movie", 7),
            CoreError::Conflict { entity: "movie", id: 7 }
        ));
    }

    #[test]
    fn passthrough_errors_keep_their_source() {
        let err = DbError::from(sqlx::Error::PoolTimedOut);
        assert!(!err.is_check_violation());
        assert_eq!(err.constraint(), None);
        match err.into_core("movie", 1) {
            CoreError::Storage(source) => assert!(matches!(
                source.downcast_ref::<sqlx::Error>(),
                Some(sqlx::Error::PoolTimedOut)
            )),
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[test]
    fn timeout_stays_distinct_from_storage_errors() {
        let after = Duration::from_millis(200);
        assert!(matches!(
            DbError::Timeout(after).into_core("movie", 1),
            CoreError::Timeout(d) if d == after
        ));
    }

    #[test]
    fn timeout_message_names_duration() {
        let err = DbError::Timeout(Duration::from_secs(3));
        assert_eq!(err.to_string(), "database operation timed out after 3s");
    }
}
