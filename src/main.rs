//! Liveness Core - Batch Verifier Entry Point
//!
//! Thin file-based driver around the verification pipeline: decode the
//! supplied WAV / keystroke CSV, run one request, print the outcome as
//! JSON. Interactive capture lives in external collaborators.

use std::path::PathBuf;
use std::process::ExitCode;

use liveness_core::constants;
use liveness_core::logic::wav;
use liveness_core::{
    KeystrokeSample, ModelStore, PipelineConfig, ProofStore, VerificationPipeline, VoiceSample,
};

struct Args {
    voice: Option<PathBuf>,
    keystroke: Option<PathBuf>,
    model_dir: Option<PathBuf>,
    proof_dir: Option<PathBuf>,
}

fn print_usage() {
    eprintln!(
        "Usage: {} [--voice <clip.wav>] [--keystroke <timings.csv>] \
         [--models <dir>] [--proof-dir <dir>]",
        constants::APP_NAME
    );
    eprintln!("At least one of --voice / --keystroke is required.");
}

fn parse_args() -> Option<Args> {
    let mut args = Args {
        voice: None,
        keystroke: None,
        model_dir: None,
        proof_dir: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let value = match iter.next() {
            Some(v) => PathBuf::from(v),
            None => {
                eprintln!("Missing value for {}", flag);
                return None;
            }
        };
        match flag.as_str() {
            "--voice" => args.voice = Some(value),
            "--keystroke" => args.keystroke = Some(value),
            "--models" => args.model_dir = Some(value),
            "--proof-dir" => args.proof_dir = Some(value),
            other => {
                eprintln!("Unknown flag: {}", other);
                return None;
            }
        }
    }

    if args.voice.is_none() && args.keystroke.is_none() {
        return None;
    }
    Some(args)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let args = match parse_args() {
        Some(args) => args,
        None => {
            print_usage();
            return ExitCode::from(2);
        }
    };

    let mut config = PipelineConfig::from_env();
    if let Some(dir) = args.model_dir {
        config.model_dir = dir;
    }
    if let Some(dir) = args.proof_dir {
        config.proof_dir = Some(dir);
    }

    let store = ModelStore::new(&config.model_dir);
    let pipeline = match VerificationPipeline::from_store(&store, &config) {
        Ok(p) => p,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Sample decode failures degrade that modality, same policy the
    // pipeline applies internally
    let voice: Option<VoiceSample> = args.voice.and_then(|path| match wav::load_wav(&path) {
        Ok(sample) => Some(sample),
        Err(e) => {
            log::warn!("Voice sample dropped: {}", e);
            None
        }
    });
    let keystroke: Option<KeystrokeSample> =
        args.keystroke
            .and_then(|path| match KeystrokeSample::from_csv_path(&path) {
                Ok(sample) => Some(sample),
                Err(e) => {
                    log::warn!("Keystroke sample dropped: {}", e);
                    None
                }
            });

    let outcome = match pipeline.verify(voice.as_ref(), keystroke.as_ref()) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("Verification aborted: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(dir) = &config.proof_dir {
        if let Err(e) = ProofStore::new(dir).save(&outcome.proof) {
            log::warn!("Failed to persist proof: {}", e);
        }
    }

    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to encode outcome: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
