use chrono::{DateTime, Utc};
use covid_query::QueryError;
use covid_store::StoreError;
use std::fmt::Display;
use validator::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed body, bad query parameters or a record failing validation.
    Validation,
    /// Unknown country filter or an empty result set.
    NotFound,
    /// Any database fault. Details are logged, never rendered.
    Storage,
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Storage => 500,
        }
    }
}

/// Failure of a record operation, rendered as
/// `2020-11-23T10:00:00 - HTTP STATUS 404 - No records found!`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{} - HTTP STATUS {} - {message}", .timestamp.format("%Y-%m-%dT%H:%M:%S"), .kind.status_code())]
pub struct RequestError {
    pub kind: ErrorKind,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl RequestError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn storage(err: impl Display) -> Self {
        tracing::error!("{err}");

        Self::new(ErrorKind::Storage, "Internal Server Error")
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }
}

impl From<QueryError> for RequestError {
    fn from(e: QueryError) -> Self {
        RequestError::validation(e.to_string())
    }
}

impl From<ValidationErrors> for RequestError {
    fn from(e: ValidationErrors) -> Self {
        RequestError::validation(e.to_string())
    }
}

impl From<StoreError> for RequestError {
    fn from(e: StoreError) -> Self {
        RequestError::storage(e)
    }
}

pub type Result<T> = std::result::Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_carries_timestamp_status_and_message() {
        let mut err = RequestError::not_found("No records found!");
        err.timestamp = Utc.with_ymd_and_hms(2020, 11, 23, 10, 0, 0).unwrap();

        assert_eq!(
            err.to_string(),
            "2020-11-23T10:00:00 - HTTP STATUS 404 - No records found!"
        );
    }

    #[test]
    fn storage_hides_details() {
        let err = RequestError::storage("relation \"record\" does not exist");

        assert_eq!(err.kind, ErrorKind::Storage);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message, "Internal Server Error");
    }

    #[test]
    fn query_errors_are_validation_errors() {
        let err = RequestError::from(QueryError::MismatchedOrder);

        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.message,
            "Query parameters order and orderBy must both be included"
        );
    }
}
