use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{app_state::AppState, swagger};

pub mod carts;

/// Assemble the full HTTP application: cart routes, Swagger UI and tracing.
pub fn app(state: AppState) -> Router {
    let routes = carts::routes_with_openapi();

    let mut openapi = routes.get_openapi().clone();
    openapi.info = utoipa::openapi::InfoBuilder::new()
        .title("KubeShop CartService API")
        .version(env!("CARGO_PKG_VERSION"))
        .build();

    Router::new()
        .merge(routes)
        .merge(swagger::create_swagger_ui(openapi))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
