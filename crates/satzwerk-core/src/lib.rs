// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Satzwerk — Core types, configuration, and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConversionConfig, NativeConfig, PageGeometry, TitleHeuristics};
pub use error::SatzwerkError;
pub use types::*;
