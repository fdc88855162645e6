//! Cart store errors

use thiserror::Error;

/// Input rejected before any storage call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("productId is required")]
    MissingProductId,

    #[error("quantity is required")]
    MissingQuantity,

    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i32),
}

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backing store could not be reached or rejected the statement.
    #[error("storage unavailable: {0:#}")]
    StorageUnavailable(#[source] anyhow::Error),
}

impl CartStoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
