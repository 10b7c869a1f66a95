use std::sync::Arc;

use axum::{Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get};

use crate::app::dto::{ItemEnvelope, ListEnvelope};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_menu))
        .route("/random", get(random_item))
}

/// `GET /menu`: the whole catalog with its count.
pub async fn list_menu(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.menu.list_all().await {
        Ok(listing) => (StatusCode::OK, Json(ListEnvelope::from(listing))).into_response(),
        Err(e) => errors::menu_error_to_response(e, errors::LIST_FAILED),
    }
}

/// `GET /menu/random`: one in-stock item, chosen uniformly at random.
pub async fn random_item(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.menu.sample_one_in_stock().await {
        Ok(item) => (StatusCode::OK, Json(ItemEnvelope::from(item))).into_response(),
        Err(e) => errors::menu_error_to_response(e, errors::SAMPLE_FAILED),
    }
}
