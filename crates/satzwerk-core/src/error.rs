// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Satzwerk.

use thiserror::Error;

/// Top-level error type for all Satzwerk operations.
#[derive(Debug, Error)]
pub enum SatzwerkError {
    // -- Extraction errors --
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("corrupt document: {0}")]
    CorruptDocument(String),

    // -- Rendering errors --
    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Native converter --
    #[error("native conversion failed: {0}")]
    NativeConversion(String),

    #[error("native conversion timed out after {secs}s")]
    NativeTimeout { secs: u64 },

    #[error("native converter not available on this system")]
    NativeUnavailable,

    // -- Storage / persistence --
    #[error("storage error: {0}")]
    Storage(String),

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SatzwerkError>;
