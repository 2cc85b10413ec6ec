// src/server/routes.rs
//! Axum router configuration for the recipebox server

use crate::server::SharedState;
use crate::server::handlers::{ajax, public, user};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the main application router
pub fn create_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);
    let media = ServeDir::new(&state.config.media_dir);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Public pages
        .route("/", get(public::index))
        .route("/categories/", get(public::categories))
        .route("/category/:slug/", get(public::category))
        .route("/newest/", get(public::newest))
        .route("/popular/", get(public::popular))
        .route("/recipes/by/:user_id/", get(public::by_author))
        .route("/recipe/:id/", get(public::recipe_detail))
        // Authoring
        .route("/recipe/new/", post(user::create_recipe))
        .route(
            "/recipe/:id/edit/",
            get(user::edit_form).post(user::edit_recipe),
        )
        .route(
            "/recipe/:id/publish/",
            get(user::publish_confirm).post(user::publish_recipe),
        )
        .route("/recipe/:id/delete/", post(user::delete_recipe))
        .route("/draft/:id/", get(user::draft_detail))
        // Personal listings
        .route("/recipes/my/published/", get(user::my_published))
        .route("/recipes/my/drafts/", get(user::my_drafts))
        .route("/recipes/my/favourite/", get(user::my_favourites))
        // Recipe page actions
        .route("/recipe/:id/favourite/", get(ajax::toggle_favourite))
        .route("/recipe/:id/add_comment/", post(ajax::add_comment))
        // Uploaded photos
        .nest_service("/media", media)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// CORS: same-origin only unless origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
