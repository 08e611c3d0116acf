//! HTTP surface of the registry under `/api`.

mod handlers;
pub mod models;

use orc_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::validate_handler))
        .routes(routes!(handlers::lookup_handler))
        .routes(routes!(handlers::registry_handler))
        .routes(routes!(handlers::register_handler))
}
