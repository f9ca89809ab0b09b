use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use covid::{ErrorKind, RequestError};

/// Renders a [`RequestError`] as `text/plain`, the way the record API always has.
#[derive(Debug)]
pub struct ApiError(pub RequestError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.kind {
            ErrorKind::Validation | ErrorKind::NotFound => tracing::warn!("{}", self.0),
            // cause already logged when the error was built
            ErrorKind::Storage => {}
        }

        (self.status(), self.0.to_string()).into_response()
    }
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        Self(e)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
