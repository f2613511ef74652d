// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Trait definition for native (format-faithful) document converters.

use std::path::Path;

use satzwerk_core::error::Result;

/// An external converter that renders a word-processing file to PDF exactly
/// as the authoring application would.
///
/// Callers treat every `Err` the same way: as a signal to fall back to the
/// manual pipeline. Implementations must be usable from several threads.
pub trait NativeConverter: Send + Sync {
    /// Human-readable converter name (e.g. "LibreOffice (soffice)").
    fn name(&self) -> &str;

    /// Whether the converter can be invoked at all on this system.
    fn is_available(&self) -> bool;

    /// Convert `input` to a PDF written at `output`. Both paths are absolute.
    ///
    /// On success the output file exists. Implementations enforce their own
    /// time limit and return `NativeTimeout` when it expires.
    fn try_convert(&self, input: &Path, output: &Path) -> Result<()>;
}
