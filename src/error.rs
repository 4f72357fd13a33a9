use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Failures the proxy handler can produce. Token and upstream failures are
/// kept as separate variants even though both surface as 500 with the raw
/// message, so the external contract can be split later without restructuring.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Unknown category '{0}'.")]
    UnknownCategory(String),

    #[error("{0}")]
    Token(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Unsupported method '{0}'")]
    UnsupportedMethod(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::UnknownCategory(_) => StatusCode::BAD_REQUEST,
            GatewayError::Token(_)
            | GatewayError::Upstream(_)
            | GatewayError::UnsupportedMethod(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // Error bodies are plain text even though success bodies are JSON;
        // this mirrors the legacy contract.
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
