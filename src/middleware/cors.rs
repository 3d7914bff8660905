use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

/// Restricts cross-origin access to the configured origin when one is set;
/// permissive otherwise. `X-Quiz-Title` is exposed so browsers can read it
/// off the PDF response.
pub fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    if let Some(origin) = allowed_origin {
        if let Ok(value) = origin.parse::<HeaderValue>() {
            return layer.allow_origin(value);
        }
        tracing::warn!("Invalid ALLOWED_ORIGIN value, falling back to permissive CORS");
    }

    layer.allow_origin(Any)
}
