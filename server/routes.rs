use std::io::Cursor;

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::info;

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type, Authorization"),
];

fn headers(extra: &[(&str, &str)]) -> Vec<Header> {
    CORS_HEADERS
        .iter()
        .chain(extra.iter())
        .filter_map(|(k, v)| Header::from_bytes(k.as_bytes(), v.as_bytes()).ok())
        .collect()
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> Response<Cursor<Vec<u8>>> {
    let bytes = serde_json::to_vec(body)
        .unwrap_or_else(|_| br#"{"error":"response serialization failed"}"#.to_vec());
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        headers(&[("Content-Type", "application/json")]),
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

pub fn error_response(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    json_response(status, &ErrorBody { error: message })
}

/// Answer to a CORS preflight.
pub fn preflight() -> Response<Cursor<Vec<u8>>> {
    Response::new(
        StatusCode(200),
        headers(&[]),
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    error_response(404, "not found")
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Routes one request and sends the response. Runs on the request's own
/// thread; `state` is shared read-only.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or("").to_owned();

    let response = match (&method, path.as_str()) {
        (Method::Options, _) => preflight(),
        (Method::Post, "/api/crack-mask") => handlers::crack_mask::handle(&mut request, &state),
        (Method::Get, "/api/health") => handlers::health::handle(&state),
        _ => not_found(),
    };

    info!(%method, path = %path, status = response.status_code().0, "request");
    if let Err(e) = request.respond(response) {
        tracing::warn!(error = %e, "failed to send response");
    }
}
