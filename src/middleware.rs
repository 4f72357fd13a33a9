use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info, warn};

pub async fn request_logging(req: Request, next: Next) -> Result<Response, StatusCode> {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let status = response.status();
    let elapsed = start.elapsed().as_millis();

    if status.is_success() {
        info!("Relayed {} {} -> {} in {}ms", method, uri, status.as_u16(), elapsed);
    } else if status.is_client_error() {
        warn!("Rejected {} {} -> {} in {}ms", method, uri, status.as_u16(), elapsed);
    } else {
        error!("Gateway failure {} {} -> {} in {}ms", method, uri, status.as_u16(), elapsed);
    }

    Ok(response)
}
