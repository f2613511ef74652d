// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Container detection by magic bytes.

/// ZIP local file header.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// ZIP end-of-central-directory record (an archive with no entries).
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";
/// OLE2 compound file header used by legacy `.doc`.
const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Container families recognised from leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// ZIP archive; an Office Open XML package if it holds `word/document.xml`.
    Zip,
    /// OLE2 compound document (legacy binary Office formats).
    Ole2,
    Unknown,
}

/// Identify the container format of `data`.
pub fn sniff(data: &[u8]) -> ContainerKind {
    if data.starts_with(ZIP_MAGIC) || data.starts_with(ZIP_EMPTY_MAGIC) {
        ContainerKind::Zip
    } else if data.starts_with(OLE2_MAGIC) {
        ContainerKind::Ole2
    } else {
        ContainerKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_known_containers() {
        assert_eq!(sniff(b"PK\x03\x04rest"), ContainerKind::Zip);
        assert_eq!(sniff(b"PK\x05\x06"), ContainerKind::Zip);
        assert_eq!(sniff(OLE2_MAGIC), ContainerKind::Ole2);
        assert_eq!(sniff(b"%PDF-1.7"), ContainerKind::Unknown);
        assert_eq!(sniff(b"PK"), ContainerKind::Unknown);
    }
}
