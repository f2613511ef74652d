// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font metrics and line breaking for the base-14 Times faces.
//
// Advance widths are the Adobe AFM values (1/1000 em) for printable ASCII
// plus the WinAnsi punctuation Word inserts. Accented Latin-1 letters take the
// width of a letter with the same advance. Characters the encoder replaces are
// measured as `?`; anything else left over is measured at 500.

use satzwerk_core::types::FontFace;

use super::winansi;

const FIRST_CHAR: u32 = 32;
const FALLBACK_WIDTH: u16 = 500;

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 333, 333, 333, 500, 564, 250, 333, 250, 278, // ' '../
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444, // 0..?
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722, // @..O
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500, // P.._
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500, // `..o
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,      // p..~
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 333, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

/// (character, Times-Roman, Times-Bold) for the non-letter high codes.
#[rustfmt::skip]
const PUNCTUATION: [(char, u16, u16); 22] = [
    ('€', 500, 500), ('‚', 333, 333), ('ƒ', 500, 500), ('„', 444, 500),
    ('…', 1000, 1000), ('†', 500, 500), ('‡', 500, 500), ('ˆ', 333, 333),
    ('‰', 1000, 1000), ('‹', 333, 333), ('Œ', 889, 1000), ('‘', 333, 333),
    ('’', 333, 333), ('“', 444, 500), ('”', 444, 500), ('•', 350, 350),
    ('–', 500, 500), ('—', 1000, 1000), ('˜', 333, 333), ('™', 980, 1000),
    ('›', 333, 333), ('œ', 722, 722),
];

/// Stand-ins for U+00C0..U+00FF with the same advance width.
const LATIN1_LETTERS: &str = "AAAAAAMCEEEEIIIIDNOOOOO+OUUUUYPbaaaaaaBceeeeiiiionooooo+ouuuuypy";

fn stand_in(c: char) -> char {
    match c {
        '\u{a0}' => ' ',
        'Š' => 'S',
        'š' => 's',
        'Ž' => 'Z',
        'ž' => 'z',
        'Ÿ' => 'Y',
        '\u{c0}'..='\u{ff}' => LATIN1_LETTERS
            .chars()
            .nth(c as usize - 0xC0)
            .unwrap_or(c),
        _ if winansi::encode_char(c).is_none() => char::from(winansi::REPLACEMENT),
        _ => c,
    }
}

fn char_width(face: FontFace, c: char) -> u16 {
    if let Some((_, regular, bold)) = PUNCTUATION.iter().find(|(p, ..)| *p == c) {
        return match face {
            FontFace::Regular => *regular,
            FontFace::Bold => *bold,
        };
    }
    let table = match face {
        FontFace::Regular => &TIMES_ROMAN,
        FontFace::Bold => &TIMES_BOLD,
    };
    (stand_in(c) as u32)
        .checked_sub(FIRST_CHAR)
        .and_then(|index| table.get(index as usize))
        .copied()
        .unwrap_or(FALLBACK_WIDTH)
}

/// Width of `text` in points at `size_pt`.
pub fn text_width(text: &str, face: FontFace, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(face, c))).sum();
    units as f32 * size_pt / 1000.0
}

/// One laid-out line of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub words: Vec<String>,
    /// Natural width with single spaces between words.
    pub width: f32,
    /// Last line of the paragraph or of a newline-separated segment.
    pub ends_segment: bool,
}

impl Line {
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

struct LineBuilder<'a> {
    face: FontFace,
    size_pt: f32,
    max_width: f32,
    space: f32,
    words: Vec<String>,
    width: f32,
    lines: &'a mut Vec<Line>,
}

impl LineBuilder<'_> {
    fn push_word(&mut self, word: &str) {
        let word_width = text_width(word, self.face, self.size_pt);

        if word_width > self.max_width {
            self.flush(false);
            self.push_long_word(word);
        } else if self.words.is_empty() {
            self.words.push(word.to_string());
            self.width = word_width;
        } else if self.width + self.space + word_width <= self.max_width {
            self.words.push(word.to_string());
            self.width += self.space + word_width;
        } else {
            self.flush(false);
            self.words.push(word.to_string());
            self.width = word_width;
        }
    }

    /// Break a word wider than the line into chunks; the tail stays open.
    fn push_long_word(&mut self, word: &str) {
        let mut chunk = String::new();
        let mut chunk_width = 0.0;
        for c in word.chars() {
            let w = f32::from(char_width(self.face, c)) * self.size_pt / 1000.0;
            if !chunk.is_empty() && chunk_width + w > self.max_width {
                self.words.push(std::mem::take(&mut chunk));
                self.width = chunk_width;
                self.flush(false);
                chunk_width = 0.0;
            }
            chunk.push(c);
            chunk_width += w;
        }
        if !chunk.is_empty() {
            self.words.push(chunk);
            self.width = chunk_width;
        }
    }

    fn flush(&mut self, ends_segment: bool) {
        if self.words.is_empty() && !ends_segment {
            return;
        }
        self.lines.push(Line {
            words: std::mem::take(&mut self.words),
            width: self.width,
            ends_segment,
        });
        self.width = 0.0;
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width` points.
///
/// Newlines force a break; a blank segment becomes an empty line. Text with
/// no visible characters yields no lines at all.
pub fn wrap(text: &str, face: FontFace, size_pt: f32, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    if text.trim().is_empty() {
        return lines;
    }

    let mut builder = LineBuilder {
        face,
        size_pt,
        max_width,
        space: text_width(" ", face, size_pt),
        words: Vec::new(),
        width: 0.0,
        lines: &mut lines,
    };
    for segment in text.split('\n') {
        for word in segment.split_whitespace() {
            builder.push_word(word);
        }
        builder.flush(true);
    }

    lines
}
