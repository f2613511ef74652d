// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Satzwerk — word-processing document to PDF converter.
//
// Entry point. Initialises logging, loads configuration, resolves the native
// converter once, and converts each input on its own blocking task.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use satzwerk_core::config::ConversionConfig;
use satzwerk_core::error::SatzwerkError;
use satzwerk_core::types::{ConversionOutcome, ConversionStatus, output_name_for};
use satzwerk_document::{DocumentConverter, PdfReader};
use satzwerk_storage::{FileStorage, verify_hash};
use satzwerk_storage::data_dir::default_root;
use tracing::{info, warn};

/// Configuration picked up from the storage root when `--config` is absent.
const ROOT_CONFIG_FILE: &str = "satzwerk.json";

#[derive(Debug, Parser)]
#[command(name = "satzwerk", version, about = "Convert word-processing documents to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert documents; prints one JSON outcome per input.
    Convert {
        /// Input files (.docx, .doc, or plain text).
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Storage root holding uploads/ and results/.
        #[arg(long, env = "SATZWERK_ROOT")]
        root: Option<PathBuf>,

        /// JSON configuration file.
        #[arg(long, env = "SATZWERK_CONFIG")]
        config: Option<PathBuf>,

        /// Skip the native converter even if one is installed.
        #[arg(long)]
        no_native: bool,
    },
    /// Print the page count of a PDF.
    Inspect {
        pdf: PathBuf,

        /// Also print the extracted text.
        #[arg(long)]
        text: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Convert {
            inputs,
            root,
            config,
            no_native,
        } => convert(inputs, root, config, no_native).await,
        Command::Inspect { pdf, text } => {
            let reader = PdfReader::open(&pdf)
                .with_context(|| format!("cannot inspect {}", pdf.display()))?;
            println!("{}", reader.page_count());
            if text {
                print!("{}", reader.text()?);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn convert(
    inputs: Vec<PathBuf>,
    root: Option<PathBuf>,
    config_path: Option<PathBuf>,
    no_native: bool,
) -> Result<ExitCode> {
    let names = upload_names(&inputs)?;
    let root = root.unwrap_or_else(default_root);
    let mut config = load_config(config_path.as_deref(), &root)?;
    if no_native {
        config.native.enabled = false;
    }

    let storage = FileStorage::open(&root)
        .with_context(|| format!("cannot open storage at {}", root.display()))?;
    let native = satzwerk_bridge::native_converter(&config.native);
    let converter = Arc::new(DocumentConverter::with_storage(&config, native, &storage)?);

    info!(inputs = inputs.len(), root = %root.display(), "Satzwerk starting");

    let tasks: Vec<_> = inputs
        .into_iter()
        .zip(names)
        .map(|(input, name)| {
            let converter = Arc::clone(&converter);
            let storage = storage.clone();
            tokio::task::spawn_blocking(move || convert_one(&converter, &storage, &input, &name))
        })
        .collect();

    let mut placeholders = 0usize;
    for task in tasks {
        let outcome = task.await.context("conversion task panicked")?;
        if outcome.status == ConversionStatus::Placeholder {
            placeholders += 1;
        }
        println!("{}", serde_json::to_string(&outcome)?);
    }

    if placeholders > 0 {
        warn!(placeholders, "some inputs could only produce a placeholder");
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

/// An explicit `--config` must load; otherwise `<root>/satzwerk.json` is used
/// when present and defaults apply when it is missing or broken.
fn load_config(explicit: Option<&Path>, root: &Path) -> Result<ConversionConfig> {
    match explicit {
        Some(path) => ConversionConfig::load(path)
            .with_context(|| format!("cannot load configuration {}", path.display())),
        None => Ok(ConversionConfig::load_or_default(root.join(ROOT_CONFIG_FILE))),
    }
}

/// Store the input as an upload, then convert the stored copy.
fn convert_one(
    converter: &DocumentConverter,
    storage: &FileStorage,
    input: &Path,
    name: &str,
) -> ConversionOutcome {
    let output_name = output_name_for(name);
    let stored = std::fs::read(input)
        .map_err(SatzwerkError::from)
        .and_then(|bytes| storage.save_upload(&bytes, name).map(|upload| (bytes, upload)));

    match stored {
        Ok((bytes, upload)) => {
            let outcome = converter.convert(&upload, &output_name);
            // The converter fingerprints what it read from uploads/.
            if let Some(Err(e)) = outcome
                .input_sha256
                .as_deref()
                .map(|digest| verify_hash(&bytes, digest))
            {
                warn!(input = %input.display(), error = %e, "upload changed during conversion");
            }
            outcome
        }
        Err(e) => {
            // Converting the original path still yields a placeholder result.
            warn!(input = %input.display(), error = %e, "input could not be stored");
            converter.convert(input, &output_name)
        }
    }
}

/// File names used for uploads; they must be distinct so outputs don't collide.
fn upload_names(inputs: &[PathBuf]) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(inputs.len());
    for input in inputs {
        let name = input
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("{} has no usable file name", input.display()))?;
        if !seen.insert(output_name_for(name)) {
            bail!("two inputs would both produce {}", output_name_for(name));
        }
        names.push(name.to_string());
    }
    Ok(names)
}
