// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Satzwerk converter: the extracted document model,
// classification tags, renderable blocks, and conversion outcomes.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionId(pub Uuid);

impl ConversionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input document kinds the converter distinguishes by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    /// Office Open XML word-processing package (.docx).
    Docx,
    /// Legacy binary Word document (.doc). Only a native converter renders it.
    LegacyDoc,
    /// Anything else; converted line by line as plain text.
    PlainText,
}

impl DocumentType {
    /// Infer document type from file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Self::Docx,
            "doc" => Self::LegacyDoc,
            _ => Self::PlainText,
        }
    }

    /// Infer document type from a path's extension. No extension is plain text.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::PlainText)
    }

    /// Whether this is a word-processing source eligible for native delegation.
    pub fn is_word_processing(&self) -> bool {
        matches!(self, Self::Docx | Self::LegacyDoc)
    }

    /// MIME type string, used in logs and reports.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::LegacyDoc => "application/msword",
            Self::PlainText => "text/plain",
        }
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    Letter,
    Legal,
    Custom { width_pt: f32, height_pt: f32 },
}

impl PaperSize {
    /// Dimensions in PostScript points (width, height).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            Self::A4 => (595.28, 841.89),
            Self::Letter => (612.0, 792.0),
            Self::Legal => (612.0, 1008.0),
            Self::Custom {
                width_pt,
                height_pt,
            } => (*width_pt, *height_pt),
        }
    }
}

// -- Source document model ----------------------------------------------------

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Map a WordprocessingML `w:jc/@w:val` value. Unknown values are `Left`.
    pub fn from_ooxml(val: &str) -> Self {
        match val {
            "center" => Self::Center,
            "right" | "end" => Self::Right,
            "both" | "distribute" | "lowKashida" | "mediumKashida" | "highKashida"
            | "thaiDistribute" => Self::Justify,
            _ => Self::Left,
        }
    }
}

/// A paragraph as extracted from the source: run text plus layout attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphNode {
    /// Concatenated run text, trimmed.
    pub text: String,
    pub alignment: Alignment,
    /// Left indent in points; 0 when the source sets none.
    pub left_indent_pt: f32,
}

impl ParagraphNode {
    pub fn new(text: impl Into<String>, alignment: Alignment, left_indent_pt: f32) -> Self {
        Self {
            text: text.into(),
            alignment,
            left_indent_pt,
        }
    }

    /// True when the paragraph carries no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One table cell. Empty cells keep an empty string so the grid keeps its shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A table row: cells in grid order.
pub type Row = Vec<Cell>;

/// A table as extracted from the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableNode {
    pub rows: Vec<Row>,
}

impl TableNode {
    /// Column count when every row has the same length, `None` otherwise.
    pub fn uniform_width(&self) -> Option<usize> {
        let first = self.rows.first().map(Vec::len)?;
        self.rows
            .iter()
            .all(|row| row.len() == first)
            .then_some(first)
    }
}

/// One block-level unit of document content, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockNode {
    Paragraph(ParagraphNode),
    Table(TableNode),
}

/// The extracted document: block nodes in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub blocks: Vec<BlockNode>,
}

impl SourceDocument {
    pub fn new(blocks: Vec<BlockNode>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

// -- Classification -------------------------------------------------------------

/// A block node tagged by the content classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassifiedBlock {
    Title {
        text: String,
    },
    KeyValue {
        key: String,
        value: String,
    },
    Plain {
        text: String,
        alignment: Alignment,
        left_indent_pt: f32,
    },
    Table {
        rows: Vec<Row>,
    },
    Spacer,
}

// -- Styles ---------------------------------------------------------------------

/// Fixed paragraph styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleId {
    /// Bold, centred, 12pt.
    Title,
    /// Regular 11pt body text.
    Body,
    /// Body metrics in red, marks content that could not be laid out.
    Error,
}

/// Font faces available to the emitter (PDF base-14 Times family).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Regular,
    Bold,
}

/// Text colour of a resolved style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextColor {
    Black,
    Red,
}

impl TextColor {
    /// RGB components in the 0.0..=1.0 range.
    pub fn rgb(&self) -> (f32, f32, f32) {
        match self {
            Self::Black => (0.0, 0.0, 0.0),
            Self::Red => (0.8, 0.0, 0.0),
        }
    }
}

/// Parameterised style descriptor carried by a styled paragraph.
///
/// Only alignment and indent vary per paragraph; everything else comes from
/// the fixed base style named by `id` and is filled in by [`StyleSpec::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub id: StyleId,
    pub alignment: Alignment,
    pub left_indent_pt: f32,
}

impl StyleSpec {
    pub fn title() -> Self {
        Self {
            id: StyleId::Title,
            alignment: Alignment::Center,
            left_indent_pt: 0.0,
        }
    }

    pub fn body(alignment: Alignment, left_indent_pt: f32) -> Self {
        Self {
            id: StyleId::Body,
            alignment,
            left_indent_pt,
        }
    }

    pub fn error() -> Self {
        Self {
            id: StyleId::Error,
            alignment: Alignment::Left,
            left_indent_pt: 0.0,
        }
    }

    /// Resolve against the fixed base style.
    pub fn resolve(&self) -> ParagraphStyle {
        let base = match self.id {
            StyleId::Title => ParagraphStyle {
                font: FontFace::Bold,
                font_size_pt: 12.0,
                leading_pt: 14.0,
                space_after_pt: 12.0,
                alignment: Alignment::Center,
                left_indent_pt: 0.0,
                color: TextColor::Black,
            },
            StyleId::Body => ParagraphStyle::body(),
            StyleId::Error => ParagraphStyle {
                color: TextColor::Red,
                ..ParagraphStyle::body()
            },
        };
        ParagraphStyle {
            alignment: self.alignment,
            left_indent_pt: self.left_indent_pt,
            ..base
        }
    }
}

/// A fully resolved paragraph style as used by the emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub font: FontFace,
    pub font_size_pt: f32,
    pub leading_pt: f32,
    pub space_after_pt: f32,
    pub alignment: Alignment,
    pub left_indent_pt: f32,
    pub color: TextColor,
}

impl ParagraphStyle {
    /// The formal body style: Times-Roman 11pt on 14pt leading, 4pt after.
    pub fn body() -> Self {
        Self {
            font: FontFace::Regular,
            font_size_pt: 11.0,
            leading_pt: 14.0,
            space_after_pt: 4.0,
            alignment: Alignment::Left,
            left_indent_pt: 0.0,
            color: TextColor::Black,
        }
    }
}

// -- Renderable blocks ----------------------------------------------------------

/// The layout synthesizer's output unit, consumed by the PDF emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderableBlock {
    StyledParagraph {
        text: String,
        style: StyleSpec,
    },
    /// Borderless key / colon / value row with fixed column widths.
    FieldRow {
        key: String,
        value: String,
    },
    /// Bordered grid; `column_widths_pt.len()` equals every row's length.
    GridTable {
        rows: Vec<Row>,
        column_widths_pt: Vec<f32>,
    },
    VerticalGap {
        height_pt: f32,
    },
}

// -- Conversion outcome ---------------------------------------------------------

/// Which path produced the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    /// Rendered by the native converter.
    Native,
    /// Rebuilt by the extract/classify/layout/emit pipeline.
    Manual,
    /// Only the error marker could be written.
    Placeholder,
}

/// Result of one conversion: always names an output path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub id: ConversionId,
    pub output_path: PathBuf,
    pub status: ConversionStatus,
    /// SHA-256 of the input bytes, when the input could be read.
    pub input_sha256: Option<String>,
    /// Why the run left the preferred path (native failure, pipeline error).
    pub detail: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Output file name for an input name: base name with the extension replaced by `.pdf`.
pub fn output_name_for(input_name: &str) -> String {
    let base = Path::new(input_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(input_name);
    format!("{base}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_from_extension() {
        assert_eq!(DocumentType::from_extension("DOCX"), DocumentType::Docx);
        assert_eq!(DocumentType::from_extension("doc"), DocumentType::LegacyDoc);
        assert_eq!(DocumentType::from_extension("txt"), DocumentType::PlainText);
        assert!(DocumentType::from_path(Path::new("a/b/letter.docx")).is_word_processing());
        assert!(!DocumentType::from_path(Path::new("notes")).is_word_processing());
    }

    #[test]
    fn alignment_mapping_defaults_to_left() {
        assert_eq!(Alignment::from_ooxml("center"), Alignment::Center);
        assert_eq!(Alignment::from_ooxml("both"), Alignment::Justify);
        assert_eq!(Alignment::from_ooxml("end"), Alignment::Right);
        assert_eq!(Alignment::from_ooxml("start"), Alignment::Left);
        assert_eq!(Alignment::from_ooxml("bogus"), Alignment::Left);
    }

    #[test]
    fn output_name_replaces_extension() {
        assert_eq!(output_name_for("surat.docx"), "surat.pdf");
        assert_eq!(output_name_for("archive.tar.txt"), "archive.tar.pdf");
        assert_eq!(output_name_for("README"), "README.pdf");
    }

    #[test]
    fn body_style_keeps_per_paragraph_parameters() {
        let style = StyleSpec::body(Alignment::Justify, 36.0).resolve();
        assert_eq!(style.font, FontFace::Regular);
        assert_eq!(style.font_size_pt, 11.0);
        assert_eq!(style.leading_pt, 14.0);
        assert_eq!(style.space_after_pt, 4.0);
        assert_eq!(style.alignment, Alignment::Justify);
        assert_eq!(style.left_indent_pt, 36.0);
    }

    #[test]
    fn title_style_is_bold_centred() {
        let style = StyleSpec::title().resolve();
        assert_eq!(style.font, FontFace::Bold);
        assert_eq!(style.font_size_pt, 12.0);
        assert_eq!(style.space_after_pt, 12.0);
        assert_eq!(style.alignment, Alignment::Center);
    }

    #[test]
    fn table_uniform_width() {
        let table = TableNode {
            rows: vec![vec![Cell::new("a"), Cell::new("")], vec![Cell::new("c"), Cell::new("d")]],
        };
        assert_eq!(table.uniform_width(), Some(2));

        let ragged = TableNode {
            rows: vec![vec![Cell::new("a")], vec![Cell::new("c"), Cell::new("d")]],
        };
        assert_eq!(ragged.uniform_width(), None);
        assert_eq!(TableNode::default().uniform_width(), None);
    }
}
