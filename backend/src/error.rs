use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("No file provided.")]
    MissingFile,

    #[error("Only .txt is allowed.")]
    InvalidExtension,

    #[error("Upload exceeds the {limit} byte limit.")]
    PayloadTooLarge { limit: usize },

    #[error("Malformed upload: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),

    #[error("Prediction service is not reachable.")]
    Unreachable(#[source] reqwest::Error),

    #[error("Prediction service timed out.")]
    Timeout(#[source] reqwest::Error),

    #[error("Prediction service failed with status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Prediction service returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout(err)
        } else {
            GatewayError::Unreachable(err)
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingFile
            | GatewayError::InvalidExtension
            | GatewayError::Multipart(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::Unreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::Upstream { .. } | GatewayError::InvalidResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_mistakes_are_bad_requests() {
        assert_eq!(GatewayError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::InvalidExtension.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::PayloadTooLarge { limit: 10 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn upstream_failures_are_gateway_errors() {
        let err = GatewayError::Upstream {
            status: 500,
            body: "AI System is not ready.".into(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("AI System is not ready."));
    }
}
