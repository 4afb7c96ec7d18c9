//! HTTP error responses for the JSON API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::error::BlotterError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<BlotterError> for ApiError {
    fn from(err: BlotterError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn status_from_error(err: &BlotterError) -> StatusCode {
    match err {
        BlotterError::MissingField { .. }
        | BlotterError::InvalidSide { .. }
        | BlotterError::InvalidOrder { .. }
        | BlotterError::InvalidSortField { .. }
        | BlotterError::InvalidPagination { .. } => StatusCode::BAD_REQUEST,
        BlotterError::Storage { .. }
        | BlotterError::ConfigParse { .. }
        | BlotterError::ConfigMissing { .. }
        | BlotterError::ConfigInvalid { .. }
        | BlotterError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
