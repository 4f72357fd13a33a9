use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tracing::{error, info};

use crate::app_state::AppState;
use crate::error::GatewayError;

const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Methods the gateway forwards. Anything else is an `UnsupportedMethod`
/// error, not a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProxyMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl ProxyMethod {
    fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("GET") {
            Some(ProxyMethod::Get)
        } else if token.eq_ignore_ascii_case("POST") {
            Some(ProxyMethod::Post)
        } else if token.eq_ignore_ascii_case("PATCH") {
            Some(ProxyMethod::Patch)
        } else if token.eq_ignore_ascii_case("DELETE") {
            Some(ProxyMethod::Delete)
        } else {
            None
        }
    }
}

/// Forwards an inbound product request to the backend API.
///
/// Validation lowercases the category for the allow-list check while the
/// upstream URL uses the uppercased form; both sides of that asymmetry are
/// part of the existing contract and preserved as-is.
pub async fn proxy_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
    method: Method,
    body: Bytes,
) -> Result<Response, GatewayError> {
    if !state
        .allowed_categories
        .contains(&category.to_lowercase())
    {
        return Err(GatewayError::UnknownCategory(category));
    }

    let token = state
        .credential
        .get_token(&state.config.upstream.entra_resource)
        .await
        .map_err(|e| {
            error!("Token acquisition failed: {}", e);
            GatewayError::Token(e.to_string())
        })?;

    let url = format!(
        "{}/{}",
        state.config.upstream.base_url,
        category.to_uppercase()
    );

    let dispatch = ProxyMethod::parse(method.as_str())
        .ok_or_else(|| GatewayError::UnsupportedMethod(method.to_string()))?;

    info!("Forwarding {} {}", method, url);

    let request = match dispatch {
        ProxyMethod::Get => state.http.get(&url),
        ProxyMethod::Delete => state.http.delete(&url),
        ProxyMethod::Post => state
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, DEFAULT_CONTENT_TYPE)
            .body(body),
        ProxyMethod::Patch => state
            .http
            .patch(&url)
            .header(reqwest::header::CONTENT_TYPE, DEFAULT_CONTENT_TYPE)
            .body(body),
    };

    let upstream = request
        .bearer_auth(&token.token)
        .send()
        .await
        .map_err(|e| {
            error!("Upstream call failed: {}", e);
            GatewayError::Upstream(e.to_string())
        })?;

    // Any completed exchange is relayed verbatim, non-2xx included.
    let status = StatusCode::from_u16(upstream.status().as_u16())
        .map_err(|e| GatewayError::Upstream(e.to_string()))?;
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| GatewayError::Upstream(e.to_string()))?;

    Ok((status, [(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

pub fn product_routes() -> Router<AppState> {
    Router::new().route("/products/:category", any(proxy_handler))
}
