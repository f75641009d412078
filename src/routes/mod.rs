pub mod assets;
pub mod contacts;
pub mod graphql;
pub mod home;
pub mod posts;
pub mod tags;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/", get(home::index))
        .route("/posts/{slug}", get(posts::detail))
        .route("/tags/{tag_title}", get(tags::filter))
        .route("/contacts", get(contacts::page))
        .route("/assets/{*path}", get(assets::serve))
        .merge(graphql::router());

    if let Some(media_path) = state.config.media_path() {
        match media_prefix(&state.config.media.url_prefix) {
            Some(prefix) => {
                tracing::info!("Serving media from {} at {}", media_path.display(), prefix);
                app = app.nest_service(prefix, ServeDir::new(media_path));
            }
            None => tracing::warn!(
                "Ignoring media url_prefix {:?}, images will not be served",
                state.config.media.url_prefix
            ),
        }
    }

    app.fallback(not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Mount point for media files: absolute, not the root, no route parameters.
fn media_prefix(url_prefix: &str) -> Option<&str> {
    let prefix = url_prefix.trim_end_matches('/');
    let valid = prefix.starts_with('/') && !prefix.contains(['{', '}', '*']);
    valid.then_some(prefix)
}
