// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// satzwerk-storage — where uploads and conversion results live on disk.
//
// Provides the filesystem storage collaborator (uploads/ and results/ under
// one root), atomic publishing of output files, and SHA-256 fingerprinting
// of input documents.

pub mod data_dir;
pub mod integrity;
pub mod storage;

pub use integrity::{hash_bytes, verify_file, verify_hash};
pub use storage::{FileStorage, write_atomic};
