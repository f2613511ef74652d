// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document model extraction — source bytes to an ordered `SourceDocument`.

pub mod detect;
pub mod docx;
pub mod styles;
pub mod text;

use satzwerk_core::error::{Result, SatzwerkError};
use satzwerk_core::types::SourceDocument;
use tracing::{debug, instrument};

use detect::ContainerKind;

/// Parse a word-processing document into block nodes.
///
/// Fails with `UnsupportedFormat` when the bytes are not a word-processing
/// container and `CorruptDocument` when the container cannot be read.
/// Reads nothing but `data`.
#[instrument(skip_all, fields(bytes_len = data.len()))]
pub fn extract(data: &[u8]) -> Result<SourceDocument> {
    let kind = detect::sniff(data);
    debug!(?kind, "container sniffed");

    match kind {
        ContainerKind::Zip => docx::extract_docx(data),
        ContainerKind::Ole2 => Err(SatzwerkError::UnsupportedFormat(
            "legacy binary Word document (.doc) can only be rendered natively".into(),
        )),
        ContainerKind::Unknown => Err(SatzwerkError::UnsupportedFormat(
            "not a word-processing container".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{docx_bytes, para};

    #[test]
    fn rejects_plain_bytes() {
        assert!(matches!(
            extract(b"just some text"),
            Err(SatzwerkError::UnsupportedFormat(_))
        ));
        assert!(matches!(extract(b""), Err(SatzwerkError::UnsupportedFormat(_))));
    }

    #[test]
    fn rejects_legacy_doc() {
        let mut ole = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        ole.extend_from_slice(&[0; 504]);
        match extract(&ole) {
            Err(SatzwerkError::UnsupportedFormat(msg)) => assert!(msg.contains(".doc")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn truncated_zip_is_corrupt() {
        let bytes = docx_bytes(&para("Halo", None, None));
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            extract(truncated),
            Err(SatzwerkError::CorruptDocument(_))
        ));
    }

    #[test]
    fn extraction_is_deterministic() {
        let bytes = docx_bytes(&format!(
            "{}{}",
            para("SURAT TUGAS", Some("center"), None),
            para("Nama : Budi", None, Some(720))
        ));
        assert_eq!(extract(&bytes).expect("first"), extract(&bytes).expect("second"));
    }
}
