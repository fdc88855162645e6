//! In-memory cart repository

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};

use crate::models::{CartLine, NewCartItem};

use super::CartRepository;

/// Process-local backend. Each key lives in a sharded map, so a merge only
/// locks the shard holding that key.
#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    items: DashMap<(String, i32), i32>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<CartLine>> {
        Ok(self
            .items
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| CartLine {
                product_id: entry.key().1,
                quantity: *entry.value(),
            })
            .collect())
    }

    async fn add_quantity(&self, item: &NewCartItem) -> Result<()> {
        match self.items.entry((item.user_id.clone(), item.product_id)) {
            Entry::Occupied(mut entry) => {
                let merged = entry.get().checked_add(item.quantity).ok_or_else(|| {
                    anyhow!(
                        "quantity for product {} would overflow ({} + {})",
                        item.product_id,
                        entry.get(),
                        item.quantity
                    )
                })?;
                *entry.get_mut() = merged;
            }
            Entry::Vacant(entry) => {
                entry.insert(item.quantity);
            }
        }

        Ok(())
    }

    async fn remove(&self, user_id: &str, product_id: i32) -> Result<u64> {
        let removed = self.items.remove(&(user_id.to_owned(), product_id));
        Ok(u64::from(removed.is_some()))
    }
}
