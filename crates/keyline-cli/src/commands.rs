// ABOUTME: Implementations of the keyline subcommands.
// ABOUTME: Reads key input, converts it and renders lines, JSON or fingerprints.

use crate::config::{CommentPolicy, Config, FingerprintFormat};
use anyhow::{Context, Result};
use keyline_ssh::{compute_fingerprint, convert, detect_form};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Options for `keyline convert` that override the config file.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Comment to attach regardless of the input
    pub comment: Option<String>,
    /// Drop the input comment
    pub strip_comment: bool,
    /// Emit JSON
    pub json: bool,
}

/// Read key text from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read key from {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read key from stdin")?;
            Ok(input)
        }
    }
}

/// Convert `input` and render it according to `config` and `options`.
pub fn run_convert(input: &str, config: &Config, options: &ConvertOptions) -> Result<String> {
    let form = detect_form(input)?;
    debug!(%form, "detected key encoding");

    let line = convert(input).with_context(|| format!("Failed to convert {form} public key"))?;
    debug!(algorithm = %line.algorithm, "converted key");

    let mut output = config.output.clone();
    if options.strip_comment {
        output.comment = CommentPolicy::Strip;
    }
    let input_comment = line.comment.clone();
    let line = line.with_comment(output.resolve_comment(input_comment, options.comment.clone()));

    if options.json || output.json {
        serde_json::to_string(&line).context("Failed to serialize key as JSON")
    } else {
        Ok(line.to_string())
    }
}

/// Compute the fingerprint of `input` in the configured format.
pub fn run_fingerprint(input: &str, config: &Config, hex: bool) -> Result<String> {
    let line = convert(input).context("Failed to parse public key")?;
    let format = if hex {
        FingerprintFormat::Hex
    } else {
        config.fingerprint.format
    };

    Ok(match format {
        FingerprintFormat::Sha256 => line.fingerprint(),
        FingerprintFormat::Hex => compute_fingerprint(line.key()),
    })
}
