use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

pub const ADMIN_KEY_HEADER: &str = "X-Checkout-Admin-Key";

#[derive(Clone)]
pub struct AdminKey(pub String);

/// Guards the routes that write, act for a user or read user data. An empty
/// configured key locks the routes entirely.
pub async fn require_admin_key(State(expected): State<AdminKey>, request: Request<Body>, next: Next) -> Response {
    let provided = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if expected.0.is_empty() || provided != expected.0 {
        tracing::warn!(path = %request.uri().path(), "rejected admin request");
        return Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .body(Body::from("unauthorized"))
            .unwrap_or_else(|_| Response::new(Body::from("unauthorized")));
    }

    next.run(request).await
}
