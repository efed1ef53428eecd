use std::io::Cursor;

use serde::Serialize;
use tiny_http::Response;

use crate::routes::json_response;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health<'a> {
    pub status: &'static str,
    pub model: &'a str,
    pub patch_size: u32,
}

/// `GET /api/health`
pub fn handle(state: &AppState) -> Response<Cursor<Vec<u8>>> {
    json_response(200, &health(state))
}

fn health(state: &AppState) -> Health<'_> {
    Health {
        status: "ok",
        model: &state.model_description,
        patch_size: state.pipeline.config().patch_size,
    }
}
