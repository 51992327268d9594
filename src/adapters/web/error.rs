//! HTTP error responses for the web adapter.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::error::GbceError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<GbceError> for WebError {
    fn from(err: GbceError) -> Self {
        let status = status_from_error(&err);
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

pub fn status_from_error(err: &GbceError) -> StatusCode {
    match err {
        GbceError::StockNotFound { .. } => StatusCode::NOT_FOUND,
        GbceError::InvalidPrice { .. } | GbceError::InvalidTradeType { .. } => {
            StatusCode::BAD_REQUEST
        }
        GbceError::ConfigParse { .. } | GbceError::ConfigInvalid { .. } | GbceError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_not_found_maps_to_404() {
        let err = WebError::from(GbceError::StockNotFound {
            symbol: "XYZ".into(),
        });
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Stock 'XYZ' not found.");
    }

    #[test]
    fn input_errors_map_to_400() {
        assert_eq!(
            status_from_error(&GbceError::InvalidPrice { price: 0.0 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_from_error(&GbceError::InvalidTradeType {
                value: "hold".into()
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn io_maps_to_500() {
        let err = GbceError::Io(std::io::Error::other("disk"));
        assert_eq!(status_from_error(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(WebError::from(err).status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
