// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// satzwerk-bridge — native converter abstractions.
//
// Defines the `NativeConverter` trait, a LibreOffice-backed implementation,
// and the stub used when no native renderer is installed. The converter is
// resolved once at process start and handed to the orchestrator explicitly.

use std::sync::Arc;

use satzwerk_core::config::NativeConfig;
use tracing::info;

pub mod soffice;
pub mod stub;
pub mod traits;

pub use soffice::SofficeConverter;
pub use stub::StubConverter;
pub use traits::NativeConverter;

/// Resolve the native converter for this process.
///
/// Returns the LibreOffice bridge when delegation is enabled and the program
/// can be found, otherwise the stub (which the orchestrator treats as
/// "native unavailable").
pub fn native_converter(config: &NativeConfig) -> Arc<dyn NativeConverter> {
    if !config.enabled {
        info!("native conversion disabled by configuration");
        return Arc::new(StubConverter);
    }

    match SofficeConverter::locate(&config.program, config.timeout()) {
        Some(converter) => {
            info!(
                program = %converter.program().display(),
                timeout_secs = config.timeout_secs,
                "native converter available"
            );
            Arc::new(converter)
        }
        None => {
            info!(program = %config.program, "native converter not found, manual engine only");
            Arc::new(StubConverter)
        }
    }
}
