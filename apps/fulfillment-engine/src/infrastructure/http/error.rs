//! HTTP error mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};

use crate::error::{ErrorCode, ServiceError};

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.code().http_status();
        if self.code() == ErrorCode::InternalError {
            tracing::error!(error = %self, "Request failed with internal error");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(self.to_http_response())).into_response()
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_request(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid_request(rejection.body_text())
    }
}
