use axum::{Json, http::StatusCode, response::IntoResponse};

use coffeeshop_menu::MenuError;

use crate::app::dto::ErrorEnvelope;

pub const LIST_FAILED: &str = "Error fetching menu items";
pub const SAMPLE_FAILED: &str = "Error fetching random menu item";
pub const NO_STOCK: &str = "No items in stock";

/// Map a query failure to its HTTP response.
///
/// `context` is the message used when the store itself failed.
pub fn menu_error_to_response(err: MenuError, context: &'static str) -> axum::response::Response {
    match err {
        MenuError::NoStockAvailable => json_error(StatusCode::NOT_FOUND, NO_STOCK, None),
        MenuError::StoreUnavailable(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, context, Some(msg))
        }
    }
}

pub fn json_error(
    status: StatusCode,
    message: impl Into<String>,
    error: Option<String>,
) -> axum::response::Response {
    (status, Json(ErrorEnvelope::new(message, error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_stock_is_not_found() {
        let res = menu_error_to_response(MenuError::NoStockAvailable, SAMPLE_FAILED);
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_is_internal_error() {
        let res = menu_error_to_response(
            MenuError::StoreUnavailable("connection refused".to_string()),
            LIST_FAILED,
        );
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
