// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// satzwerk-document — The document reconstruction and layout engine.
//
// Pipeline: extract (DOCX package → block nodes) → classify (title, key/value,
// plain) → layout (renderable blocks) → pdf (paginated output). The
// `convert` module wraps the pipeline with native-first delegation and a
// placeholder fallback so every conversion yields a file.

pub mod classify;
pub mod convert;
pub mod extract;
pub mod layout;
pub mod pdf;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the primary structs so callers can use `satzwerk_document::DocumentConverter` etc.
pub use classify::ContentClassifier;
pub use convert::{DocumentConverter, PLACEHOLDER_MARKER};
pub use extract::extract;
pub use layout::LayoutSynthesizer;
pub use pdf::emitter::PdfEmitter;
pub use pdf::reader::PdfReader;
