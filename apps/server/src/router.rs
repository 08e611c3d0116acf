use axum::Router;
use orc::kernel::server::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(
    info(title = "ORC Registry", description = "Issuer registration and ORC identifier validation"),
    tags(
        (name = "Registry", description = "Issuer registry and identifier checks"),
        (name = "System", description = "Operational endpoints"),
    )
)]
struct ApiDoc;

/// Builds the application router with the interactive API reference at `/docs`.
pub(crate) fn init(state: ApiState) -> Router {
    let (routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(orc::server::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    Router::new().merge(routes).merge(Scalar::with_url("/docs", api_doc))
}
