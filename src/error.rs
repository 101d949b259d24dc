//! Errors from building catalogs and restoring override snapshots.
//!
//! Queries never return these: an unknown course or hole is `None`.

use thiserror::Error;

/// Errors from [`crate::CourseCatalog`] construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("course `{0}` is registered more than once")]
    DuplicateCourse(String),

    #[error("course `{course}` has hole {hole} more than once")]
    DuplicateHole { course: String, hole: u32 },

    #[cfg(feature = "json")]
    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from persisting or restoring an override store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(feature = "json")]
    #[error("failed to (de)serialize override snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("override snapshot version {0} is not supported")]
    UnsupportedVersion(u32),
}
