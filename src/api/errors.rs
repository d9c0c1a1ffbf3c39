use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::analysis::{AnalysisError, ErrorKind};
use crate::api::dtos::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Request body is too large: {0}")]
    PayloadTooLarge(String),

    #[error("Rate limit exceeded")]
    RateLimited,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Analysis(error) => match error.kind() {
                ErrorKind::TooShort | ErrorKind::InvalidFile | ErrorKind::InvalidIndex => {
                    StatusCode::BAD_REQUEST
                }
                ErrorKind::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                ErrorKind::ExtractionFailed => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::FetchFailed => StatusCode::BAD_GATEWAY,
                ErrorKind::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::SummarizationFailed | ErrorKind::SentimentFailed => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Analysis(error) => Some(error.kind()),
            Self::PayloadTooLarge(_) => Some(ErrorKind::TooLarge),
            Self::BadRequest(_) | Self::RateLimited => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                kind: self.kind(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(AnalysisError::TooShort { chars: 3, min: 50 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(AnalysisError::InvalidFile("x.docx".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(AnalysisError::InvalidIndex("-1".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(AnalysisError::TooLarge { bytes: 2, max: 1 }),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                ApiError::from(AnalysisError::ExtractionFailed("empty".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(AnalysisError::FetchFailed("404".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
            (ApiError::BadRequest("bad".to_string()), StatusCode::BAD_REQUEST),
            (ApiError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (
                ApiError::PayloadTooLarge("limit".to_string()),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status(), status, "{error}");
        }
    }

    #[test]
    fn test_bad_request_has_no_kind() {
        assert_eq!(ApiError::BadRequest("bad".to_string()).kind(), None);
        assert_eq!(
            ApiError::PayloadTooLarge("limit".to_string()).kind(),
            Some(ErrorKind::TooLarge)
        );
    }
}
