//! Middleware de logging de requests
//!
//! Registra método, ruta, código de estado y duración de cada request y
//! estampa un X-Request-ID en la respuesta.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string();
    let start = std::time::Instant::now();

    let mut response = next.run(request).await;

    let status = response.status();
    let elapsed = start.elapsed();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(
            "📤 {} {} - {} - {}ms [{}]",
            method,
            path,
            status.as_u16(),
            elapsed.as_millis(),
            request_id
        );
    } else {
        tracing::info!(
            "📤 {} {} - {} - {}ms [{}]",
            method,
            path,
            status.as_u16(),
            elapsed.as_millis(),
            request_id
        );
    }

    response
}
