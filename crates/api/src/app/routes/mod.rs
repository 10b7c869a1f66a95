use axum::Router;

pub mod menu;
pub mod system;

/// Router for the public menu endpoints.
pub fn router() -> Router {
    Router::new().nest("/menu", menu::router())
}
