use atlas::kernel::prelude::ApiState;
use axum::Router;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Atlas", description = "Travel destination catalog and user lists"))]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let static_dir = state.config.storage.static_dir.clone();

    let api = ApiDoc::openapi();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(atlas::server::router::api_router())
        .with_state(state)
        .split_for_parts();

    let router = Router::new()
        .merge(openapi_routes)
        .merge(Scalar::with_url("/api", api_doc));

    // Unmatched paths serve the browser client when it is deployed next to the server
    let router = match static_dir.as_deref().filter(|dir| dir.is_dir()) {
        Some(dir) => with_static_files(router, dir),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

fn with_static_files(router: Router, dir: &Path) -> Router {
    tracing::debug!(dir = %dir.display(), "Serving static files");
    router.fallback_service(ServeDir::new(dir))
}
