//! CLI for normalizing Gemini generateContent request bodies.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gemini_normalizer_core::modules::{config, logger};
use gemini_normalizer_core::RequestNormalizer;
use gemini_normalizer_types::NormalizerConfig;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON config file (defaults to the per-user config, then built-ins)
    #[arg(long, global = true, env = "GEMINI_NORMALIZER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalizes a request body read from a file or stdin
    Normalize {
        /// Request file to read (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// File to write the normalized request to (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,
        /// Log a summary of applied changes
        #[arg(long)]
        report: bool,
    },
    /// Prints the effective configuration
    Config {
        /// Write the configuration to this file instead of stdout
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    match input {
        Some(path) => std::fs::read(path).with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("writing stdout")?;
            stdout.write_all(b"\n").context("writing stdout")
        }
    }
}

/// Normalizes `raw`. Pretty output and reports need the parsed document;
/// otherwise the byte-level entry point is used as-is.
fn normalize(normalizer: &RequestNormalizer, raw: &[u8], pretty: bool, report: bool) -> Result<Vec<u8>> {
    if !pretty && !report {
        return Ok(normalizer.normalize_bytes(raw).to_vec());
    }

    let mut body: serde_json::Value = match serde_json::from_slice::<serde_json::Value>(raw) {
        Ok(body) if body.is_object() => body,
        _ => return Ok(normalizer.normalize_bytes(raw).to_vec()),
    };
    let summary = normalizer.normalize_in_place(&mut body);
    if report {
        info!("Normalization report: {}", serde_json::to_string(&summary)?);
    }
    let out = if pretty { serde_json::to_vec_pretty(&body)? } else { serde_json::to_vec(&body)? };
    Ok(out)
}

fn run(cli: Cli) -> Result<()> {
    let effective: NormalizerConfig =
        config::resolve_config(cli.config.as_deref()).context("loading normalizer config")?;

    match cli.command {
        Commands::Normalize { input, output, pretty, report } => {
            let normalizer = RequestNormalizer::new(effective);
            let raw = read_input(input.as_deref())?;
            let out = normalize(&normalizer, &raw, pretty, report)?;
            write_output(output.as_deref(), &out)?;
        },
        Commands::Config { write } => match write {
            Some(path) => {
                config::save_config(&path, &effective).context("saving config")?;
                info!("Config written to {}", path.display());
            },
            None => println!("{}", serde_json::to_string_pretty(&effective)?),
        },
    }
    Ok(())
}

fn main() -> Result<()> {
    logger::init_logging("info");
    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cli_parses_normalize_flags() {
        let cli = Cli::try_parse_from(["gemini-normalizer", "normalize", "-i", "req.json", "--pretty"])
            .expect("parse");
        match cli.command {
            Commands::Normalize { input, output, pretty, report } => {
                assert_eq!(input, Some(PathBuf::from("req.json")));
                assert!(output.is_none());
                assert!(pretty);
                assert!(!report);
            },
            Commands::Config { .. } => panic!("expected normalize"),
        }
    }

    #[test]
    fn test_normalize_pretty_output() {
        let normalizer = RequestNormalizer::default();
        let out = normalize(&normalizer, br#"{"contents":[{"parts":[{"text":"hi"}]}]}"#, true, false)
            .expect("normalize");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["contents"][0]["role"], "user");
    }

    #[test]
    fn test_normalize_passes_invalid_input_through() {
        let normalizer = RequestNormalizer::default();
        let out = normalize(&normalizer, b"[1, 2]", true, true).expect("normalize");
        assert_eq!(out, b"[1, 2]");
    }

    #[test]
    fn test_run_normalizes_file_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        std::fs::write(&input, json!({"contents": [{"role": "assistant", "parts": []}]}).to_string())
            .expect("write");
        let config_path = dir.path().join("config.json");
        config::save_config(&config_path, &NormalizerConfig::default()).expect("save config");

        run(Cli {
            config: Some(config_path),
            command: Commands::Normalize {
                input: Some(input),
                output: Some(output.clone()),
                pretty: false,
                report: false,
            },
        })
        .expect("run");

        let value: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&output).expect("read")).expect("json");
        assert_eq!(value["contents"][0]["role"], "user");
        assert!(value["safetySettings"].is_array());
    }
}
