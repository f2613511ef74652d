// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text path: one body paragraph per input line.

use satzwerk_core::types::{Alignment, RenderableBlock, StyleSpec};

/// Turn arbitrary bytes into left-aligned body paragraphs, one per line.
///
/// Decoding is lossy; bytes that are not valid UTF-8 are dropped rather than
/// replaced.
pub fn paragraphs_from_text(data: &[u8]) -> Vec<RenderableBlock> {
    let decoded = String::from_utf8_lossy(data);
    let text = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded[..]);

    text.lines()
        .map(|line| RenderableBlock::StyledParagraph {
            text: line
                .chars()
                .filter(|c| *c != char::REPLACEMENT_CHARACTER)
                .collect::<String>()
                .trim_end()
                .to_string(),
            style: StyleSpec::body(Alignment::Left, 0.0),
        })
        .collect()
}
