// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub converter for systems without a native renderer.

use std::path::Path;

use satzwerk_core::error::{Result, SatzwerkError};

use crate::traits::NativeConverter;

/// Converter that is never available; every call reports `NativeUnavailable`.
pub struct StubConverter;

impl NativeConverter for StubConverter {
    fn name(&self) -> &str {
        "none (stub)"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn try_convert(&self, _input: &Path, _output: &Path) -> Result<()> {
        tracing::warn!("NativeConverter::try_convert called on stub converter");
        Err(SatzwerkError::NativeUnavailable)
    }
}
