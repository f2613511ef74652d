// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document fingerprints. Every conversion outcome carries the SHA-256 of its
// input, and stored uploads are read back and checked against the bytes the
// caller handed over.

use std::path::Path;

use satzwerk_core::error::{Result, SatzwerkError};
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Check `data` against a hex digest; case is ignored.
pub fn verify_hash(data: &[u8], expected_hex: &str) -> Result<()> {
    let actual = hash_bytes(data);
    if !actual.eq_ignore_ascii_case(expected_hex) {
        return Err(SatzwerkError::IntegrityMismatch {
            expected: expected_hex.to_owned(),
            actual,
        });
    }
    Ok(())
}

/// Re-read the file at `path` and check it against `expected_hex`.
pub fn verify_file(path: &Path, expected_hex: &str) -> Result<()> {
    verify_hash(&std::fs::read(path)?, expected_hex)
}
