// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content classification — tags block nodes as title, key/value field, plain
// paragraph, table, or spacer.

use satzwerk_core::config::TitleHeuristics;
use satzwerk_core::types::{Alignment, BlockNode, ClassifiedBlock, ParagraphNode, SourceDocument};
use tracing::{debug, instrument};

/// Rule-based classifier. Total: every node gets exactly one tag.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    /// Upper-cased, non-empty title keywords.
    keywords: Vec<String>,
    max_length: usize,
}

impl ContentClassifier {
    pub fn new(heuristics: &TitleHeuristics) -> Self {
        let keywords = heuristics
            .keywords
            .iter()
            .map(|k| k.trim().to_uppercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            keywords,
            max_length: heuristics.max_length,
        }
    }

    /// Tag one block node.
    pub fn classify(&self, node: &BlockNode) -> ClassifiedBlock {
        match node {
            BlockNode::Paragraph(paragraph) => self.classify_paragraph(paragraph),
            BlockNode::Table(table) => ClassifiedBlock::Table {
                rows: table.rows.clone(),
            },
        }
    }

    /// Tag every block of `document`, in order.
    #[instrument(skip_all, fields(blocks = document.len()))]
    pub fn classify_all(&self, document: &SourceDocument) -> Vec<ClassifiedBlock> {
        let classified: Vec<_> = document.blocks.iter().map(|node| self.classify(node)).collect();
        let titles = classified
            .iter()
            .filter(|c| matches!(c, ClassifiedBlock::Title { .. }))
            .count();
        let fields = classified
            .iter()
            .filter(|c| matches!(c, ClassifiedBlock::KeyValue { .. }))
            .count();
        debug!(titles, fields, "blocks classified");
        classified
    }

    fn classify_paragraph(&self, paragraph: &ParagraphNode) -> ClassifiedBlock {
        let text = paragraph.text.as_str();
        if paragraph.is_empty() {
            return ClassifiedBlock::Spacer;
        }

        if paragraph.alignment == Alignment::Center || self.is_keyword_title(text) {
            return ClassifiedBlock::Title {
                text: text.to_string(),
            };
        }

        if paragraph.alignment == Alignment::Left {
            if let Some((key, value)) = split_key_value(text) {
                return ClassifiedBlock::KeyValue {
                    key: key.to_string(),
                    value: value.to_string(),
                };
            }
        }

        ClassifiedBlock::Plain {
            text: text.to_string(),
            alignment: paragraph.alignment,
            left_indent_pt: paragraph.left_indent_pt,
        }
    }

    fn is_keyword_title(&self, text: &str) -> bool {
        if text.chars().count() >= self.max_length {
            return false;
        }
        let upper = text.to_uppercase();
        self.keywords.iter().any(|keyword| upper.contains(keyword.as_str()))
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(&TitleHeuristics::default())
    }
}

/// Split `text` at its only colon. Both sides must be non-empty once trimmed.
fn split_key_value(text: &str) -> Option<(&str, &str)> {
    let (key, value) = text.split_once(':')?;
    if value.contains(':') {
        return None;
    }
    let (key, value) = (key.trim(), value.trim());
    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use satzwerk_core::types::{Cell, TableNode};

    fn para(text: &str, alignment: Alignment) -> BlockNode {
        BlockNode::Paragraph(ParagraphNode::new(text, alignment, 0.0))
    }

    #[test]
    fn key_value_needs_exactly_one_colon() {
        let classifier = ContentClassifier::default();
        assert_eq!(
            classifier.classify(&para("Nama : Budi", Alignment::Left)),
            ClassifiedBlock::KeyValue {
                key: "Nama".into(),
                value: "Budi".into()
            }
        );
        assert!(matches!(
            classifier.classify(&para("Time: 10:30", Alignment::Left)),
            ClassifiedBlock::Plain { .. }
        ));
        assert!(matches!(
            classifier.classify(&para("Catatan:", Alignment::Left)),
            ClassifiedBlock::Plain { .. }
        ));
        assert!(matches!(
            classifier.classify(&para(" : nilai", Alignment::Left)),
            ClassifiedBlock::Plain { .. }
        ));
    }

    #[test]
    fn key_value_only_when_left_aligned() {
        let classifier = ContentClassifier::default();
        assert!(matches!(
            classifier.classify(&para("Nama : Budi", Alignment::Justify)),
            ClassifiedBlock::Plain {
                alignment: Alignment::Justify,
                ..
            }
        ));
    }

    #[test]
    fn titles_by_alignment_or_keyword() {
        let classifier = ContentClassifier::default();
        for alignment in [Alignment::Left, Alignment::Right, Alignment::Justify] {
            assert_eq!(
                classifier.classify(&para("SURAT KETERANGAN", alignment)),
                ClassifiedBlock::Title {
                    text: "SURAT KETERANGAN".into()
                }
            );
        }
        assert!(matches!(
            classifier.classify(&para("Surat: pemberitahuan", Alignment::Left)),
            ClassifiedBlock::Title { .. }
        ));
        assert!(matches!(
            classifier.classify(&para("Lampiran", Alignment::Center)),
            ClassifiedBlock::Title { .. }
        ));
    }

    #[test]
    fn long_keyword_paragraph_is_not_a_title() {
        let classifier = ContentClassifier::default();
        let text = "Dengan ini kami sampaikan SURAT edaran kepada seluruh pegawai";
        assert!(text.chars().count() >= 50);
        assert!(matches!(
            classifier.classify(&para(text, Alignment::Left)),
            ClassifiedBlock::Plain { .. }
        ));
    }

    #[test]
    fn configured_keywords_replace_defaults() {
        let classifier = ContentClassifier::new(&TitleHeuristics {
            keywords: vec!["memo".into(), "  ".into()],
            max_length: 20,
        });
        assert!(matches!(
            classifier.classify(&para("Memo internal", Alignment::Left)),
            ClassifiedBlock::Title { .. }
        ));
        assert!(matches!(
            classifier.classify(&para("SURAT TUGAS", Alignment::Left)),
            ClassifiedBlock::Plain { .. }
        ));
    }

    #[test]
    fn spacers_and_tables() {
        let classifier = ContentClassifier::default();
        assert_eq!(
            classifier.classify(&para("   ", Alignment::Center)),
            ClassifiedBlock::Spacer
        );

        let rows = vec![vec![Cell::new("a"), Cell::new("")]];
        assert_eq!(
            classifier.classify(&BlockNode::Table(TableNode { rows: rows.clone() })),
            ClassifiedBlock::Table { rows }
        );
    }

    #[test]
    fn classify_all_is_one_to_one_and_ordered() {
        let classifier = ContentClassifier::default();
        let document = SourceDocument::new(vec![
            para("SURAT TUGAS", Alignment::Center),
            para("Nama : Budi Santoso", Alignment::Left),
            para("", Alignment::Left),
            para("Dengan ini menugaskan...", Alignment::Justify),
        ]);
        let classified = classifier.classify_all(&document);
        assert_eq!(classified.len(), document.len());
        assert!(matches!(classified[0], ClassifiedBlock::Title { .. }));
        assert!(matches!(classified[1], ClassifiedBlock::KeyValue { .. }));
        assert_eq!(classified[2], ClassifiedBlock::Spacer);
        assert!(matches!(classified[3], ClassifiedBlock::Plain { .. }));
    }

    #[test]
    fn classification_is_total() {
        let classifier = ContentClassifier::default();
        let texts = ["", "x", "a:b", "a:b:c", ":", "SURAT", "surat kecil", "Nomor : 12/2024"];
        let alignments = [
            Alignment::Left,
            Alignment::Center,
            Alignment::Right,
            Alignment::Justify,
        ];
        for text in texts {
            for alignment in alignments {
                for indent in [0.0, 36.0] {
                    let node = BlockNode::Paragraph(ParagraphNode::new(text, alignment, indent));
                    let _ = classifier.classify(&node);
                }
            }
        }
    }
}
