use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;
use treehouse_core::TreeError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Malformed request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Tree(e) => match e {
                TreeError::NotAuthenticated(_) => StatusCode::UNAUTHORIZED,
                TreeError::Validation(_) => StatusCode::BAD_REQUEST,
                TreeError::StorageWrite(_) | TreeError::StorageRead(_) | TreeError::Auth(_) => {
                    StatusCode::BAD_GATEWAY
                }
                TreeError::Config(_) | TreeError::Serialization(_) | TreeError::Io(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status = |e: TreeError| ApiError::from(e).status();
        assert_eq!(status(TreeError::NotAuthenticated("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status(TreeError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(TreeError::StorageWrite("x".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(status(TreeError::StorageRead("x".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(status(TreeError::Config("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::BadRequest("no file".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
