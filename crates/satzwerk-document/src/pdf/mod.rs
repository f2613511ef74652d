// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — font metrics, paginated emission, and inspection of results.

pub mod emitter;
pub mod metrics;
pub mod reader;
pub mod winansi;

pub use emitter::PdfEmitter;
pub use reader::PdfReader;
