// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion orchestration with a quality chain.
//
// Chain: native render → manual rebuild → placeholder. The native converter
// is preferred because it preserves the most fidelity; the manual pipeline
// (extract → classify → layout → emit) rebuilds an approximation; the
// placeholder guarantees that every request leaves a file behind.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use satzwerk_bridge::NativeConverter;
use satzwerk_core::config::ConversionConfig;
use satzwerk_core::error::{Result, SatzwerkError};
use satzwerk_core::types::{
    ConversionId, ConversionOutcome, ConversionStatus, DocumentType, SourceDocument,
};
use satzwerk_storage::{FileStorage, hash_bytes, write_atomic};
use tracing::{debug, error, info, instrument, warn};

use crate::classify::ContentClassifier;
use crate::extract::{self, text::paragraphs_from_text};
use crate::layout::LayoutSynthesizer;
use crate::pdf::emitter::PdfEmitter;

/// The only content of a placeholder output.
pub const PLACEHOLDER_MARKER: &[u8] = b"Error.";

/// Converts one input file at a time into a PDF under `result_dir`.
///
/// Holds no mutable state; share it across threads freely as long as each
/// call uses its own output name.
pub struct DocumentConverter {
    native: Arc<dyn NativeConverter>,
    result_dir: PathBuf,
    classifier: ContentClassifier,
    synthesizer: LayoutSynthesizer,
    emitter: PdfEmitter,
}

impl DocumentConverter {
    /// Build a converter writing into `result_dir` (created if missing).
    pub fn new(
        config: &ConversionConfig,
        native: Arc<dyn NativeConverter>,
        result_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        config.validate()?;
        std::fs::create_dir_all(result_dir.as_ref())?;
        let result_dir = std::path::absolute(result_dir.as_ref())?;

        info!(
            result_dir = %result_dir.display(),
            native = native.name(),
            native_available = native.is_available(),
            "document converter ready"
        );

        let geometry = config.page_geometry();
        Ok(Self {
            native,
            result_dir,
            classifier: ContentClassifier::new(&config.title),
            synthesizer: LayoutSynthesizer::new(&geometry),
            emitter: PdfEmitter::from_config(config),
        })
    }

    /// Build a converter that publishes into the storage's results directory.
    pub fn with_storage(
        config: &ConversionConfig,
        native: Arc<dyn NativeConverter>,
        storage: &FileStorage,
    ) -> Result<Self> {
        Self::new(config, native, storage.results_dir())
    }

    pub fn result_dir(&self) -> &Path {
        &self.result_dir
    }

    /// Convert `input` into `<result_dir>/<output_name>`.
    ///
    /// Never fails: the outcome always names the output path and reports which
    /// tier produced it.
    #[instrument(skip(self, input), fields(input = %input.display()))]
    pub fn convert(&self, input: &Path, output_name: &str) -> ConversionOutcome {
        let id = ConversionId::new();
        let started_at = Utc::now();
        let output_path = self.output_path(output_name);
        let doc_type = DocumentType::from_path(input);
        let mut notes: Vec<String> = Vec::new();

        let source = std::fs::read(input);
        let input_sha256 = source.as_ref().ok().map(|bytes| hash_bytes(bytes));

        let outcome = |status: ConversionStatus, notes: Vec<String>| ConversionOutcome {
            id,
            output_path: output_path.clone(),
            status,
            input_sha256: input_sha256.clone(),
            detail: (!notes.is_empty()).then(|| notes.join("; ")),
            started_at,
            finished_at: Utc::now(),
        };

        // -- Native ----------------------------------------------------------
        if doc_type.is_word_processing() && self.native.is_available() {
            match self.try_native(id, input, &output_path) {
                Ok(()) => {
                    info!(%id, output = %output_path.display(), "converted natively");
                    return outcome(ConversionStatus::Native, notes);
                }
                Err(e) => {
                    warn!(%id, converter = self.native.name(), error = %e, "native conversion failed, rebuilding manually");
                    notes.push(e.to_string());
                }
            }
        }

        // -- Manual ----------------------------------------------------------
        let manual = source
            .map_err(SatzwerkError::from)
            .and_then(|bytes| self.render_manual(doc_type, &bytes))
            .and_then(|pdf| write_atomic(&output_path, &pdf));
        let error = match manual {
            Ok(()) => {
                info!(%id, output = %output_path.display(), "converted manually");
                return outcome(ConversionStatus::Manual, notes);
            }
            Err(e) => e,
        };

        // -- Placeholder -----------------------------------------------------
        error!(%id, error = %error, "manual conversion failed, writing placeholder");
        notes.push(error.to_string());
        if let Err(e) = write_atomic(&output_path, PLACEHOLDER_MARKER) {
            error!(%id, error = %e, "placeholder could not be written");
            notes.push(format!("placeholder not written: {e}"));
        }
        outcome(ConversionStatus::Placeholder, notes)
    }

    /// Run the manual pipeline over a parsed document.
    pub fn render_document(&self, document: &SourceDocument) -> Result<Vec<u8>> {
        let classified = self.classifier.classify_all(document);
        let blocks = self.synthesizer.synthesize(&classified);
        self.emitter.emit(&blocks)
    }

    fn render_manual(&self, doc_type: DocumentType, bytes: &[u8]) -> Result<Vec<u8>> {
        debug!(mime = doc_type.mime_type(), bytes_len = bytes.len(), "manual rebuild");
        match doc_type {
            DocumentType::Docx | DocumentType::LegacyDoc => {
                let document = extract::extract(bytes)?;
                self.render_document(&document)
            }
            DocumentType::PlainText => self.emitter.emit(&paragraphs_from_text(bytes)),
        }
    }

    /// Let the native converter write to a private staging file, then publish
    /// it under `output` only if it is non-empty.
    fn try_native(&self, id: ConversionId, input: &Path, output: &Path) -> Result<()> {
        let input = std::path::absolute(input)?;
        let staging = self.result_dir.join(format!(".{id}.native.pdf"));

        let result = self
            .native
            .try_convert(&input, &staging)
            .and_then(|()| {
                let len = std::fs::metadata(&staging).map(|m| m.len()).unwrap_or(0);
                if len == 0 {
                    return Err(SatzwerkError::NativeConversion(
                        "native converter produced no output".into(),
                    ));
                }
                std::fs::rename(&staging, output)?;
                Ok(())
            });

        if result.is_err() && staging.exists() {
            // Leftover staging output is garbage either way.
            let _ = std::fs::remove_file(&staging);
        }
        result
    }

    /// Results are always written inside `result_dir`.
    fn output_path(&self, output_name: &str) -> PathBuf {
        let name = Path::new(output_name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "output.pdf".into());
        self.result_dir.join(name)
    }
}
