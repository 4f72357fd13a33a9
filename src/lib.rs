pub mod app_state;
pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{middleware as axum_middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use app_state::AppState;
use handlers::{health::health_routes, proxy::product_routes};

pub fn create_app(state: AppState) -> Router {
    let middleware_layer = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum_middleware::from_fn(middleware::request_logging))
        .into_inner();

    Router::new()
        .merge(health_routes())
        .merge(product_routes())
        .layer(middleware_layer)
        .with_state(state)
}
