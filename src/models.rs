use diesel::{
    Selectable,
    prelude::{Insertable, Queryable},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Cart items

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartItemEntity {
    pub user_id: String,
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct CreateCartItemEntity<'a> {
    pub user_id: &'a str,
    pub product_id: i32,
    pub quantity: i32,
}

impl<'a> From<&'a NewCartItem> for CreateCartItemEntity<'a> {
    fn from(item: &'a NewCartItem) -> Self {
        Self {
            user_id: &item.user_id,
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

/// One line of a user's cart as returned by `GetCart`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
pub struct CartLine {
    pub product_id: i32,
    pub quantity: i32,
}

impl From<CartItemEntity> for CartLine {
    fn from(entity: CartItemEntity) -> Self {
        Self {
            product_id: entity.product_id,
            quantity: entity.quantity,
        }
    }
}

/// A validated add request. `quantity` is always positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub user_id: String,
    pub product_id: i32,
    pub quantity: i32,
}
