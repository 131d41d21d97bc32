use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use invoicepress_aggregate::AggregateError;
use invoicepress_compose::ComposeError;
use invoicepress_render::RenderError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Service overloaded, please try again later")]
    ServiceOverloaded,

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("Document composition failed: {0}")]
    Compose(#[from] ComposeError),

    #[error("PDF rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "InvalidRequest", self.to_string())
            }
            Self::ServiceOverloaded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ServiceOverloaded",
                self.to_string(),
            ),
            Self::Aggregate(AggregateError::DeadlineExceeded) => (
                StatusCode::GATEWAY_TIMEOUT,
                "DeadlineExceeded",
                self.to_string(),
            ),
            Self::Aggregate(AggregateError::DataUnavailable { .. }) => (
                StatusCode::BAD_GATEWAY,
                "DataUnavailable",
                self.to_string(),
            ),
            Self::Aggregate(AggregateError::BadRecord(_)) | Self::Compose(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CompositionFailed",
                self.to_string(),
            ),
            Self::Render(_) => {
                tracing::error!("Render failure: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RenderFailed",
                    "PDF rendering failed".to_string(),
                )
            }
            Self::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ConfigError",
                "Configuration error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
