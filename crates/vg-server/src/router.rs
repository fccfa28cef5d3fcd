//! Axum router construction.
//!
//! Builds the application router with the video, user and health routes,
//! middleware layers, and optional static file serving.

use axum::extract::DefaultBodyLimit;
use axum::http::header;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use vg_core::config::CorsConfig;

use crate::context::AppContext;
use crate::middleware::request_id::{request_id_middleware, X_REQUEST_ID};
use crate::routes;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let exposed = [
        X_REQUEST_ID.clone(),
        header::CONTENT_RANGE,
        header::ACCEPT_RANGES,
        header::CONTENT_LENGTH,
    ];

    if config.allow_credentials {
        // Wildcards are not allowed together with credentials.
        CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
            .expose_headers(exposed)
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers(exposed)
    }
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let upload_limit = ctx.config.upload.max_upload_bytes;

    let video_routes = Router::new()
        .route(
            "/video/upload",
            post(routes::video::upload_video).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/video/{id}", get(routes::video::stream_video));

    let user_routes = Router::new()
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/users/{id}",
            get(routes::users::get_user)
                .patch(routes::users::update_user)
                .delete(routes::users::delete_user),
        );

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(video_routes)
        .merge(user_routes)
        .layer(middleware::from_fn(request_id_middleware));

    if ctx.config.server.cors.enabled {
        app = app.layer(cors_layer(&ctx.config.server.cors));
    }

    let static_dir = ctx.config.server.static_dir.clone();
    let mut app = app.layer(TraceLayer::new_for_http()).with_state(ctx);

    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(ServeFile::new(index_path)),
            );
        } else {
            tracing::warn!("Static directory {:?} does not exist; not serving it", dir);
        }
    }

    app
}
