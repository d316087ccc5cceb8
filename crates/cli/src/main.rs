use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use presence_check_core::capture::infrastructure::image_device::ImageFileDevice;
use presence_check_core::detection::domain::detection_result::DetectionResult;
use presence_check_core::detection::infrastructure::skin_edge_detector::SkinEdgeDetector;
use presence_check_core::pipeline::batch_presence_checker::BatchPresenceChecker;
use presence_check_core::pipeline::check_presence_use_case::CheckPresenceUseCase;
use presence_check_core::shared::constants::IMAGE_EXTENSIONS;
use presence_check_core::shared::settings::Settings;

/// Exit code when `--require-face` is set and an input shows no face.
const EXIT_NO_FACE: i32 = 2;

/// Checks captured images for a plausibly visible face.
#[derive(Parser)]
#[command(name = "presence-check")]
struct Cli {
    /// Image files or directories of images to check.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Settings JSON file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads for checking several images.
    #[arg(long)]
    workers: Option<usize>,

    /// Print one JSON object per input instead of text.
    #[arg(long)]
    json: bool,

    /// Exit with status 2 when any input has no face.
    #[arg(long)]
    require_face: bool,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(all_faces) => {
            if !all_faces {
                process::exit(EXIT_NO_FACE);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns `false` only when `--require-face` is set and some input failed it.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    if let Some(workers) = cli.workers {
        settings.workers = workers;
    }

    let inputs = expand_inputs(&cli.inputs)?;
    if inputs.is_empty() {
        return Err("no image files found in the given inputs".into());
    }

    let results = if inputs.len() == 1 {
        vec![run_single(&inputs[0], &settings)?]
    } else {
        run_batch(&inputs, &settings)?
    };

    for (path, result) in inputs.iter().zip(&results) {
        println!("{}", format_result(path, result, cli.json)?);
    }

    Ok(meets_requirement(&results, cli.require_face))
}

/// Without `--require-face` every run that produced verdicts passes.
fn meets_requirement(results: &[DetectionResult], require_face: bool) -> bool {
    !require_face || results.iter().all(DetectionResult::has_face)
}

fn run_single(
    input: &Path,
    settings: &Settings,
) -> Result<DetectionResult, Box<dyn std::error::Error>> {
    let detector = SkinEdgeDetector::new(settings.thresholds.clone());
    let use_case = CheckPresenceUseCase::new(Box::new(detector));
    Ok(use_case.execute(ImageFileDevice::new(input))?)
}

fn run_batch(
    inputs: &[PathBuf],
    settings: &Settings,
) -> Result<Vec<DetectionResult>, Box<dyn std::error::Error>> {
    let detector = Arc::new(SkinEdgeDetector::new(settings.thresholds.clone()));
    let checker = BatchPresenceChecker::new(detector, settings.workers);
    log::info!(
        "Checking {} images on {} workers",
        inputs.len(),
        checker.workers()
    );

    let devices = inputs.iter().map(ImageFileDevice::new);
    let mut results = Vec::with_capacity(inputs.len());
    for (path, result) in inputs.iter().zip(checker.check_devices(devices)) {
        results.push(result.map_err(|e| format!("{}: {e}", path.display()))?);
    }
    Ok(results)
}

/// One output line: a JSON object with the verdict and `path`, or plain text.
fn format_result(
    path: &Path,
    result: &DetectionResult,
    json: bool,
) -> Result<String, serde_json::Error> {
    if json {
        let mut value = serde_json::to_value(result)?;
        value["path"] = serde_json::Value::String(path.display().to_string());
        Ok(value.to_string())
    } else {
        Ok(format!(
            "{}: {} (confidence {:.2})",
            path.display(),
            result.message(),
            result.confidence()
        ))
    }
}

/// Replaces each directory with the image files directly inside it, sorted.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut expanded = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut images: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_image(p))
                .collect();
            images.sort();
            expanded.extend(images);
        } else {
            expanded.push(input.clone());
        }
    }
    Ok(expanded)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}
