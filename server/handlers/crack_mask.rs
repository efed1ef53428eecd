use std::io::{Cursor, Read};

use serde::Serialize;
use thiserror::Error;
use tiny_http::{Request, Response};
use tracing::{error, warn};

use crack_mask::{codec, PipelineError};

use crate::routes::{error_response, json_response};
use crate::state::AppState;
use crate::util::multipart::{extract_boundary, extract_file};

/// Multipart field the upload is expected in.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct MaskResponse {
    pub mask_url: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("expected a multipart/form-data body with a boundary")]
    NotMultipart,

    #[error("no file was uploaded")]
    MissingFile,

    #[error("upload exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("could not read request body: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl UploadError {
    pub fn status(&self) -> u16 {
        match self {
            UploadError::NotMultipart | UploadError::MissingFile | UploadError::Read(_) => 400,
            UploadError::TooLarge { .. } => 413,
            UploadError::Pipeline(e) if e.is_client_error() => 400,
            UploadError::Pipeline(_) => 500,
        }
    }
}

// ---------------------------------------------------------------------------
// POST /api/crack-mask
// ---------------------------------------------------------------------------

pub fn handle(request: &mut Request, state: &AppState) -> Response<Cursor<Vec<u8>>> {
    let content_type = request.headers().iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let declared = request.body_length();
    let result = read_body(request.as_reader(), declared, state.max_upload_bytes)
        .and_then(|body| process_upload(&content_type, &body, state));

    match result {
        Ok(body) => json_response(200, &body),
        Err(e) => {
            let status = e.status();
            if status >= 500 {
                error!(error = %e, "crack mask request failed");
            } else {
                warn!(error = %e, status, "crack mask request rejected");
            }
            error_response(status, &e.to_string())
        }
    }
}

/// Reads at most `limit` bytes. A declared length over the limit is refused
/// before reading; bodies without one are cut off one byte past the limit.
fn read_body(reader: impl Read, declared: Option<usize>, limit: usize) -> Result<Vec<u8>, UploadError> {
    if declared.is_some_and(|len| len > limit) {
        return Err(UploadError::TooLarge { limit });
    }
    let mut body = Vec::new();
    reader.take(limit as u64 + 1).read_to_end(&mut body)?;
    if body.len() > limit {
        return Err(UploadError::TooLarge { limit });
    }
    Ok(body)
}

/// Decode → pipeline → PNG data URI. Any failure aborts; no partial overlay
/// is ever returned.
pub fn process_upload(content_type: &str, body: &[u8], state: &AppState) -> Result<MaskResponse, UploadError> {
    if !content_type.trim_start().to_ascii_lowercase().starts_with("multipart/form-data") {
        return Err(UploadError::NotMultipart);
    }
    let boundary = extract_boundary(content_type).ok_or(UploadError::NotMultipart)?;
    let file = extract_file(body, &boundary, FILE_FIELD).ok_or(UploadError::MissingFile)?;

    let image = codec::decode_image(file)?;
    let overlay = state.pipeline.overlay(&image, state.classifier.as_ref())?;
    let mask_url = codec::overlay_data_uri(&overlay)?;
    Ok(MaskResponse { mask_url })
}
