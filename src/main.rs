// Offline companion to the HTTP service.
//
//   cargo run --bin crack-mask -- overlay <model.json> <input> <output.png>
//   cargo run --bin crack-mask -- init-model <model.json> [hidden_units]
//
// `init-model` writes a randomly initialized classifier with the right input
// geometry; it only makes the pipeline runnable end to end, it detects nothing.
use std::process::ExitCode;

use tracing::{error, info};

use crack_mask::pipeline::config::PATCH_SIZE;
use crack_mask::{
    codec, logging, ActivationFunction, CrackMaskPipeline, InputType, ModelMetadata,
    NetworkClassifier, Network, Normalization, PipelineConfig,
};

const USAGE: &str = "usage:\n  crack-mask overlay <model.json> <input> <output.png>\n  crack-mask init-model <model.json> [hidden_units]";

fn main() -> ExitCode {
    logging::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["overlay", model, input, output] => run_overlay(model, input, output),
        ["init-model", path] => init_model(path, 8),
        ["init-model", path, hidden] => match hidden.parse::<usize>() {
            Ok(h) if h > 0 => init_model(path, h),
            _ => Err(format!("hidden_units must be a positive integer, got '{}'", hidden)),
        },
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_overlay(model: &str, input: &str, output: &str) -> Result<(), String> {
    let config = PipelineConfig::default();
    let classifier = NetworkClassifier::load(model, config.patch_size).map_err(|e| e.to_string())?;
    let pipeline = CrackMaskPipeline::new(config).map_err(|e| e.to_string())?;

    let bytes = std::fs::read(input).map_err(|e| format!("could not read '{}': {}", input, e))?;
    let image = codec::decode_image(&bytes).map_err(|e| e.to_string())?;
    let out = pipeline.run(&image, &classifier).map_err(|e| e.to_string())?;

    let png = codec::encode_png(&out.overlay).map_err(|e| e.to_string())?;
    std::fs::write(output, png).map_err(|e| format!("could not write '{}': {}", output, e))?;
    info!(
        output,
        positive_patches = out.scan.positive_patches,
        regions = out.clean.components_kept,
        "overlay written"
    );
    Ok(())
}

fn init_model(path: &str, hidden: usize) -> Result<(), String> {
    let inputs = (PATCH_SIZE * PATCH_SIZE * 3) as usize;
    let network = Network::new(vec![
        (hidden, inputs, ActivationFunction::ReLU),
        (1, hidden, ActivationFunction::Sigmoid),
    ])
    .with_metadata(ModelMetadata {
        description: Some(format!("untrained {}-unit crack classifier", hidden)),
        input_type: Some(InputType::ImageRgb {
            width: PATCH_SIZE,
            height: PATCH_SIZE,
            normalization: Normalization::SignedUnit,
        }),
        output_labels: Some(vec!["crack".into()]),
    });
    network.save_json(path).map_err(|e| e.to_string())?;
    info!(path, hidden, "model written");
    Ok(())
}
