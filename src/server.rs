use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{any, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::handlers::{data, protected, public};
use crate::middleware::{
    capture_context, require_bearer, require_multipart, stamp_json_writes, wrap_paginated,
    TOTAL_COUNT_HEADER,
};
use crate::state::AppState;

/// Build the full application router.
///
/// Request flow: trace → CORS → no-cache headers → request context →
/// timestamps → route (guard or upload gate) → handler, with the pagination
/// envelope wrapped around every route on the way out.
pub fn app(state: AppState) -> Router {
    let public_dir = state.config.storage.public_dir.clone();
    let body_limit = state.config.server.max_request_size_bytes;
    let enable_cors = state.config.server.enable_cors;

    let mut router = Router::new()
        .merge(auth_routes(state.clone()))
        .merge(upload_routes())
        .merge(private_routes(state.clone()))
        .merge(data_routes())
        .route_layer(middleware::from_fn(wrap_paginated))
        .fallback_service(ServeDir::new(public_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(no_cache(header::CACHE_CONTROL, "no-cache"))
                .layer(no_cache(header::PRAGMA, "no-cache"))
                .layer(no_cache(header::EXPIRES, "-1"))
                .layer(middleware::from_fn(capture_context))
                .layer(middleware::from_fn_with_state(state.clone(), stamp_json_writes)),
        );

    if enable_cors {
        router = router.layer(cors());
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .expose_headers([TOTAL_COUNT_HEADER])
}

fn no_cache(name: header::HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    let guarded = Router::new()
        .route("/api/profile", get(protected::auth::profile_get))
        .route_layer(middleware::from_fn_with_state(state, require_bearer));

    Router::new()
        .route("/api/login", post(public::auth::login_post))
        .merge(guarded)
}

fn upload_routes() -> Router<AppState> {
    use public::upload;

    // `any` so that the gate, not the method router, answers unsupported methods
    Router::new()
        .route("/api/with-thumbnail", any(upload::thumbnail_create))
        .route("/api/with-thumbnail/:id", any(upload::thumbnail_update))
        .route_layer(middleware::from_fn(require_multipart))
}

fn private_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/private/:resource",
            get(data::resource_get)
                .post(data::resource_post)
                .put(data::resource_put)
                .patch(data::resource_patch),
        )
        .route(
            "/api/private/:resource/:id",
            get(data::record_get)
                .put(data::record_put)
                .patch(data::record_patch)
                .delete(data::record_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, require_bearer))
}

fn data_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/:resource",
            get(data::resource_get)
                .post(data::resource_post)
                .put(data::resource_put)
                .patch(data::resource_patch),
        )
        .route(
            "/api/:resource/:id",
            get(data::record_get)
                .put(data::record_put)
                .patch(data::record_patch)
                .delete(data::record_delete),
        )
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let bind_addr = format!("0.0.0.0:{}", state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("JSON mock API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
