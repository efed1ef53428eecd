/// crack-mask HTTP service
///
/// Accepts an image upload, runs the crack mask pipeline and answers with a
/// PNG overlay as a data URI. Served by a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin crack-mask-server --release -- [config.json]
///
/// Routes:
///   POST    /api/crack-mask  multipart upload, field `file`
///   GET     /api/health
///   OPTIONS *                CORS preflight

mod config;
mod handlers;
mod routes;
mod state;
mod util;

use std::process::ExitCode;
use std::sync::Arc;

use tiny_http::Server;
use tracing::{error, info};

use crack_mask::{logging, CrackMaskPipeline, NetworkClassifier};

use config::ServerConfig;
use state::AppState;

fn main() -> ExitCode {
    logging::init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => match ServerConfig::load_json(&path) {
            Ok(c) => c,
            Err(e) => {
                error!(path = %path, error = %e, "could not load config");
                return ExitCode::FAILURE;
            }
        },
        None => ServerConfig::default(),
    }
    .with_env_overrides(|key| std::env::var(key).ok());

    let pipeline = match CrackMaskPipeline::new(config.pipeline.clone()) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "invalid pipeline configuration");
            return ExitCode::FAILURE;
        }
    };

    // The model is loaded exactly once and shared read-only by every request.
    let classifier = match NetworkClassifier::load(&config.model_path, config.pipeline.patch_size) {
        Ok(c) => c,
        Err(e) => {
            error!(model = %config.model_path, error = %e, "could not load classifier");
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::http(&config.addr) {
        Ok(s) => s,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "failed to bind HTTP server");
            return ExitCode::FAILURE;
        }
    };

    info!(
        addr = %config.addr,
        model = classifier.description(),
        patch_size = config.pipeline.patch_size,
        "crack-mask listening"
    );

    let state = Arc::new(AppState {
        model_description: classifier.description().to_owned(),
        classifier: Arc::new(classifier),
        pipeline,
        max_upload_bytes: config.max_upload_bytes,
    });

    // One thread per request; the pipeline itself stays single-threaded.
    for request in server.incoming_requests() {
        let state = state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state);
        });
    }

    ExitCode::SUCCESS
}
