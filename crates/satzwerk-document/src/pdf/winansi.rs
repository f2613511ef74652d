// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WinAnsiEncoding (Windows-1252) for the base-14 fonts.
//
// The built-in Times faces are declared with /WinAnsiEncoding, so string
// operands must be single bytes in that code page, not UTF-8.

/// Byte written for characters outside the code page.
pub const REPLACEMENT: u8 = b'?';

/// The 0x80..0x9F block, where Windows-1252 departs from Latin-1.
const HIGH_BLOCK: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

/// Code of `c`, or `None` when the code page has no glyph for it.
pub fn encode_char(c: char) -> Option<u8> {
    match u32::from(c) {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => u8::try_from(code).ok(),
        _ => HIGH_BLOCK
            .iter()
            .find(|(candidate, _)| *candidate == c)
            .map(|(_, byte)| *byte),
    }
}

/// Encode `text` for a Tj operand. Unmappable characters become `?`.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            _ => encode_char(c).unwrap_or(REPLACEMENT),
        })
        .collect()
}
