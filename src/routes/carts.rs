use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app_error::{AppError, StdResponse},
    app_state::AppState,
    models::CartLine,
};

/// Cart routes with OpenAPI specs.
pub fn routes_with_openapi() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest(
        "/cart",
        OpenApiRouter::new()
            .routes(utoipa_axum::routes!(get_cart))
            .routes(utoipa_axum::routes!(add_item))
            .routes(utoipa_axum::routes!(remove_item)),
    )
}

/// Fetch the user's cart.
#[utoipa::path(
    get,
    path = "/{user_id}",
    tags = ["Cart"],
    params(
        ("user_id" = String, Path, description = "Owner of the cart")
    ),
    responses(
        (status = 200, description = "Get cart successfully", body = StdResponse<Vec<CartLine>, String>),
        (status = 500, description = "Storage unavailable", body = StdResponse<String, String>)
    )
)]
async fn get_cart(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let cart = state.cart_store.get_cart(&user_id).await?;

    Ok(StdResponse {
        data: Some(cart),
        message: Some("Get cart successfully"),
    })
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemReq {
    pub product_id: Option<i32>,
    pub quantity: Option<i32>,
}

/// Add a product to the cart, merging with any quantity already there.
#[utoipa::path(
    post,
    path = "/{user_id}/add",
    tags = ["Cart"],
    params(
        ("user_id" = String, Path, description = "Owner of the cart")
    ),
    request_body = AddItemReq,
    responses(
        (status = 200, description = "Item added to cart", body = StdResponse<String, String>),
        (status = 400, description = "productId and a positive quantity are required", body = StdResponse<String, String>),
        (status = 500, description = "Storage unavailable", body = StdResponse<String, String>)
    )
)]
async fn add_item(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    body: Result<Json<AddItemReq>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    state
        .cart_store
        .add_item(&user_id, body.product_id, body.quantity)
        .await?;

    Ok(StdResponse::<String, _> {
        data: None,
        message: Some("Item added to cart"),
    })
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemReq {
    pub product_id: Option<i32>,
}

/// Remove a product from the cart. Unknown products are ignored.
#[utoipa::path(
    delete,
    path = "/{user_id}/remove",
    tags = ["Cart"],
    params(
        ("user_id" = String, Path, description = "Owner of the cart")
    ),
    request_body = RemoveItemReq,
    responses(
        (status = 200, description = "Item removed from cart", body = StdResponse<String, String>),
        (status = 400, description = "productId is required", body = StdResponse<String, String>),
        (status = 500, description = "Storage unavailable", body = StdResponse<String, String>)
    )
)]
async fn remove_item(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    body: Result<Json<RemoveItemReq>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    state
        .cart_store
        .remove_item(&user_id, body.product_id)
        .await?;

    Ok(StdResponse::<String, _> {
        data: None,
        message: Some("Item removed from cart"),
    })
}
