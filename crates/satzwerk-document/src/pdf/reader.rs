// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inspection of finished conversions with `lopdf`: page count and the text a
// PDF viewer would extract.

use std::path::Path;

use lopdf::Document;
use satzwerk_core::error::{Result, SatzwerkError};
use tracing::{debug, instrument};

/// A loaded PDF, native or rebuilt.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = Document::load(path).map_err(|err| {
            SatzwerkError::PdfError(format!("cannot read {}: {err}", path.display()))
        })?;
        debug!(pages = document.get_pages().len(), "PDF opened");
        Ok(Self { document })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Document::load_mem(data)
            .map(|document| Self { document })
            .map_err(|err| SatzwerkError::PdfError(format!("not a readable PDF: {err}")))
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Text of every page, decoded through each font's encoding.
    pub fn text(&self) -> Result<String> {
        let pages: Vec<u32> = self.document.get_pages().keys().copied().collect();
        self.document
            .extract_text(&pages)
            .map_err(|err| SatzwerkError::PdfError(format!("cannot extract text: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::emitter::PdfEmitter;
    use satzwerk_core::config::PageGeometry;
    use satzwerk_core::types::{Alignment, RenderableBlock, StyleSpec};

    #[test]
    fn reads_emitted_pdf_from_disk() {
        let bytes = PdfEmitter::new(PageGeometry::default(), "Converted Document")
            .emit(&[])
            .expect("emit");
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kosong.pdf");
        std::fs::write(&path, &bytes).expect("write");

        assert_eq!(PdfReader::open(&path).expect("open").page_count(), 1);
        assert_eq!(PdfReader::from_bytes(&bytes).expect("bytes").page_count(), 1);
    }

    #[test]
    fn text_is_decoded_from_winansi() {
        let blocks = vec![RenderableBlock::StyledParagraph {
            text: "Perihal: “Undangan” rapat – Jum’at".into(),
            style: StyleSpec::body(Alignment::Left, 0.0),
        }];
        let bytes = PdfEmitter::new(PageGeometry::default(), "Converted Document")
            .emit(&blocks)
            .expect("emit");

        let text = PdfReader::from_bytes(&bytes).expect("read").text().expect("text");
        assert!(text.contains("“Undangan” rapat – Jum’at"), "extracted {text:?}");
    }

    #[test]
    fn garbage_is_a_pdf_error() {
        assert!(matches!(
            PdfReader::from_bytes(b"Error."),
            Err(SatzwerkError::PdfError(_))
        ));
        assert!(matches!(
            PdfReader::open("/definitely/not/here.pdf"),
            Err(SatzwerkError::PdfError(_))
        ));
    }
}
