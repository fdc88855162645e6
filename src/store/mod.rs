//! Cart store: validation, storage timeouts and the repository seam.

use std::{future::Future, sync::Arc, time::Duration};

use anyhow::anyhow;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::models::{CartLine, NewCartItem};

pub mod errors;
pub mod memory;
pub mod pg;

pub use errors::{CartStoreError, ValidationError};
pub use memory::InMemoryCartRepository;
pub use pg::PgCartRepository;

/// Persistence contract behind [`CartStore`].
///
/// `add_quantity` must be a single atomic insert-or-increment on
/// `(user_id, product_id)`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// All items for one user, in no particular order.
    async fn find_by_user(&self, user_id: &str) -> anyhow::Result<Vec<CartLine>>;

    /// Create the row or add `item.quantity` to the stored quantity.
    async fn add_quantity(&self, item: &NewCartItem) -> anyhow::Result<()>;

    /// Delete the row if present, returning how many rows went away.
    async fn remove(&self, user_id: &str, product_id: i32) -> anyhow::Result<u64>;
}

/// A product id of `0` is treated the same as an absent one.
fn require_product_id(product_id: Option<i32>) -> Result<i32, ValidationError> {
    match product_id {
        None | Some(0) => Err(ValidationError::MissingProductId),
        Some(product_id) => Ok(product_id),
    }
}

/// Validate an add request into a [`NewCartItem`].
///
/// # Errors
///
/// Returns a [`ValidationError`] when the product id or quantity is missing,
/// or the quantity is not positive.
pub fn validate_add(
    user_id: &str,
    product_id: Option<i32>,
    quantity: Option<i32>,
) -> Result<NewCartItem, ValidationError> {
    let product_id = require_product_id(product_id)?;
    let quantity = quantity.ok_or(ValidationError::MissingQuantity)?;

    if quantity <= 0 {
        return Err(ValidationError::NonPositiveQuantity(quantity));
    }

    Ok(NewCartItem {
        user_id: user_id.to_owned(),
        product_id,
        quantity,
    })
}

#[derive(Clone)]
pub struct CartStore {
    repository: Arc<dyn CartRepository>,
    timeout: Duration,
}

impl CartStore {
    pub fn new(repository: Arc<dyn CartRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    /// Fetch every item in the user's cart. Unknown users get an empty cart.
    pub async fn get_cart(&self, user_id: &str) -> Result<Vec<CartLine>, CartStoreError> {
        self.bounded(self.repository.find_by_user(user_id)).await
    }

    /// Add `quantity` units of a product, merging into any existing line.
    pub async fn add_item(
        &self,
        user_id: &str,
        product_id: Option<i32>,
        quantity: Option<i32>,
    ) -> Result<(), CartStoreError> {
        let item = validate_add(user_id, product_id, quantity)?;

        self.bounded(self.repository.add_quantity(&item)).await?;

        debug!(
            user_id = %item.user_id,
            product_id = item.product_id,
            quantity = item.quantity,
            "added to cart"
        );

        Ok(())
    }

    /// Remove a product from the cart. Removing an absent product succeeds.
    pub async fn remove_item(
        &self,
        user_id: &str,
        product_id: Option<i32>,
    ) -> Result<(), CartStoreError> {
        let product_id = require_product_id(product_id)?;

        let removed = self
            .bounded(self.repository.remove(user_id, product_id))
            .await?;

        debug!(user_id, product_id, removed, "removed from cart");

        Ok(())
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = anyhow::Result<T>>,
    ) -> Result<T, CartStoreError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(CartStoreError::StorageUnavailable),
            Err(_) => Err(CartStoreError::StorageUnavailable(anyhow!(
                "storage call timed out after {:?}",
                self.timeout
            ))),
        }
    }
}
