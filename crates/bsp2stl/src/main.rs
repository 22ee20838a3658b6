//! Convert a Source engine BSP map's world geometry to binary STL.
//!
//! Run: `cargo run -p bsp2stl -- [--debug] [--no-progress] <input.bsp> <output.stl>`

mod args;
mod progress;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bsp_mesh::{ExportOptions, convert_file};
use clap::Parser;
use tracing::Level;

use crate::args::Args;
use crate::progress::ProgressReporter;

/// Directory, relative to the working directory, that receives output files.
const OUTPUT_DIR: &str = "bsp_to_stl_output";

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Debug logging enabled.");

    if !args.input.is_file() {
        tracing::error!("Input BSP not found: {}", args.input.display());
        return ExitCode::FAILURE;
    }

    let output = match prepare_output(Path::new(OUTPUT_DIR), &args.output_name) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Input BSP: {}", args.input.display());
    tracing::info!("Output STL: {}", output.display());

    let mut reporter = ProgressReporter::new(!args.no_progress);
    let result = convert_file(&args.input, &output, ExportOptions::default(), &mut reporter);
    reporter.finish();

    // Failures have already been reported through the reporter.
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Ensure `dir` exists and return the path for `name` inside it.
///
/// Only the final component of `name` is used, so the output cannot escape
/// the directory.
fn prepare_output(dir: &Path, name: &str) -> Result<PathBuf, String> {
    let file_name = Path::new(name)
        .file_name()
        .ok_or_else(|| format!("invalid output file name: {name:?}"))?;
    fs::create_dir_all(dir)
        .map_err(|e| format!("failed to create {}: {e}", dir.display()))?;
    tracing::info!("Output directory ensured: {}", dir.display());
    Ok(dir.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_stays_inside_directory() {
        let temp = std::env::temp_dir().join(format!("bsp2stl-test-{}", std::process::id()));
        let path = prepare_output(&temp, "../../escape.stl").unwrap();
        assert_eq!(path, temp.join("escape.stl"));
        assert!(temp.is_dir());
        fs::remove_dir_all(&temp).unwrap();
    }

    #[test]
    fn empty_name_rejected() {
        let temp = std::env::temp_dir();
        assert!(prepare_output(&temp, "..").is_err());
        assert!(prepare_output(&temp, "").is_err());
    }
}
