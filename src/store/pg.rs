//! Postgres cart repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper, upsert::excluded};
use diesel_async::RunQueryDsl;

use crate::{
    db::DbPool,
    models::{CartItemEntity, CartLine, CreateCartItemEntity, NewCartItem},
    schema::cart_items,
};

use super::CartRepository;

#[derive(Clone)]
pub struct PgCartRepository {
    db_pool: DbPool,
}

impl PgCartRepository {
    pub fn new(db_pool: DbPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<CartLine>> {
        let conn = &mut self
            .db_pool
            .get()
            .await
            .context("Failed to obtain a DB connection pool")?;

        let items: Vec<CartItemEntity> = cart_items::table
            .filter(cart_items::user_id.eq(user_id))
            .select(CartItemEntity::as_select())
            .get_results(conn)
            .await
            .context("Failed to get cart items")?;

        Ok(items.into_iter().map(CartLine::from).collect())
    }

    /// Insert the row, or add to the stored quantity when the key already
    /// exists. One statement, so concurrent merges on a key never race.
    async fn add_quantity(&self, item: &NewCartItem) -> Result<()> {
        let conn = &mut self
            .db_pool
            .get()
            .await
            .context("Failed to obtain a DB connection pool")?;

        diesel::insert_into(cart_items::table)
            .values(CreateCartItemEntity::from(item))
            .on_conflict((cart_items::user_id, cart_items::product_id))
            .do_update()
            .set(cart_items::quantity.eq(cart_items::quantity + excluded(cart_items::quantity)))
            .execute(conn)
            .await
            .context("Failed to upsert cart item")?;

        Ok(())
    }

    async fn remove(&self, user_id: &str, product_id: i32) -> Result<u64> {
        let conn = &mut self
            .db_pool
            .get()
            .await
            .context("Failed to obtain a DB connection pool")?;

        let deleted = diesel::delete(
            cart_items::table
                .filter(cart_items::user_id.eq(user_id))
                .filter(cart_items::product_id.eq(product_id)),
        )
        .execute(conn)
        .await
        .context("Failed to delete cart item")?;

        Ok(deleted as u64)
    }
}
