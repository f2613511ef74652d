// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF emitter — paginates renderable blocks into `printpdf` 0.8 pages.
//
// Pages are plain `Vec<Op>` lists; the flow tracks how much of the current
// page's content box is used and starts a new page when a block does not fit.
// Coordinates in this module are measured from the top margin downwards and
// converted to PDF user space (origin bottom-left) only when ops are emitted.

use std::io::Write;

use printpdf::graphics::{LinePoint, PaintMode, Polygon, PolygonRing, WindingOrder};
use printpdf::{
    BuiltinFont, DictItem, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
    Rgb,
};
use satzwerk_core::config::{ConversionConfig, PageGeometry};
use satzwerk_core::error::{Result, SatzwerkError};
use satzwerk_core::types::{
    Alignment, FontFace, ParagraphStyle, RenderableBlock, Row, StyleSpec, TextColor,
};
use tracing::{debug, instrument, warn};

use super::metrics::{self, Line};
use super::winansi;
use crate::layout::{
    CELL_PADDING_X_PT, CELL_PADDING_Y_PT, FIELD_COLUMN_WIDTHS_PT, FIELD_PADDING_Y_PT,
    GRID_LINE_WIDTH_PT,
};

fn builtin(face: FontFace) -> BuiltinFont {
    match face {
        FontFace::Regular => BuiltinFont::TimesRoman,
        FontFace::Bold => BuiltinFont::TimesBold,
    }
}

fn pdf_color(color: TextColor) -> printpdf::color::Color {
    let (r, g, b) = color.rgb();
    printpdf::color::Color::Rgb(Rgb::new(r, g, b, None))
}

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// Text is written as raw `Tj` operands, which printpdf only keeps when the
/// save is not in secure mode.
fn save_options() -> PdfSaveOptions {
    PdfSaveOptions {
        secure: false,
        ..PdfSaveOptions::default()
    }
}

/// Writes renderable blocks as a paginated PDF.
#[derive(Debug, Clone)]
pub struct PdfEmitter {
    geometry: PageGeometry,
    title: String,
}

impl PdfEmitter {
    pub fn new(geometry: PageGeometry, title: impl Into<String>) -> Self {
        Self {
            geometry,
            title: title.into(),
        }
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(config.page_geometry(), config.document_title.clone())
    }

    /// Render `blocks` to PDF bytes. Always at least one page.
    #[instrument(skip_all, fields(blocks = blocks.len()))]
    pub fn emit(&self, blocks: &[RenderableBlock]) -> Result<Vec<u8>> {
        let pages: Vec<PdfPage> = self
            .paginate(blocks)
            .into_iter()
            .map(|ops| PdfPage::new(mm(self.geometry.width_pt), mm(self.geometry.height_pt), ops))
            .collect();
        let page_count = pages.len();

        let mut doc = PdfDocument::new(&self.title);
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&save_options(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }
        if bytes.is_empty() {
            return Err(SatzwerkError::Render("PDF serialisation produced no bytes".into()));
        }

        debug!(pages = page_count, bytes_len = bytes.len(), "PDF emitted");
        Ok(bytes)
    }

    /// Render `blocks` into `writer`.
    pub fn emit_to(&self, blocks: &[RenderableBlock], mut writer: impl Write) -> Result<()> {
        let bytes = self.emit(blocks)?;
        writer
            .write_all(&bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| SatzwerkError::Render(format!("cannot write PDF output: {e}")))
    }

    /// Lay out `blocks` and return the op list of every page.
    pub(crate) fn paginate(&self, blocks: &[RenderableBlock]) -> Vec<Vec<Op>> {
        let mut flow = PageFlow::new(self.geometry);

        for block in blocks {
            match block {
                RenderableBlock::StyledParagraph { text, style } => flow.paragraph(text, style),
                RenderableBlock::FieldRow { key, value } => flow.field_row(key, value),
                RenderableBlock::GridTable {
                    rows,
                    column_widths_pt,
                } => flow.grid(rows, column_widths_pt),
                RenderableBlock::VerticalGap { height_pt } => flow.gap(*height_pt),
            }
        }

        flow.finish()
    }
}

/// Cursor over the content box of the page being filled.
struct PageFlow {
    geometry: PageGeometry,
    pages: Vec<Vec<Op>>,
    ops: Vec<Op>,
    /// Height already used on the current page, from the top margin.
    used: f32,
}

impl PageFlow {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            ops: Vec::new(),
            used: 0.0,
        }
    }

    fn capacity(&self) -> f32 {
        self.geometry.available_height()
    }

    fn remaining(&self) -> f32 {
        self.capacity() - self.used
    }

    fn is_fresh(&self) -> bool {
        self.used <= 0.0 && self.ops.is_empty()
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.ops));
        self.used = 0.0;
    }

    /// Move to a new page when a block of `height` would overflow this one but
    /// fits on an empty page.
    fn keep_together(&mut self, height: f32) {
        if height > self.remaining() && height <= self.capacity() && !self.is_fresh() {
            self.new_page();
        }
    }

    /// Vertical whitespace; ends the page instead of carrying over.
    fn gap(&mut self, height: f32) {
        if height >= self.remaining() {
            if !self.is_fresh() {
                self.new_page();
            }
        } else {
            self.used += height;
        }
    }

    fn finish(mut self) -> Vec<Vec<Op>> {
        if !self.is_fresh() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }

    // -- Primitives -----------------------------------------------------------

    /// PDF y of a baseline for a line box starting `top` below the top margin.
    fn baseline_y(&self, top: f32, style: &ParagraphStyle) -> f32 {
        let offset = (style.leading_pt - style.font_size_pt) / 2.0 + style.font_size_pt * 0.8;
        self.geometry.height_pt - self.geometry.margin_pt - top - offset
    }

    fn text_at(&mut self, text: &str, x: f32, y: f32, style: &ParagraphStyle) {
        let font = builtin(style.font);
        self.ops.push(Op::SetFillColor {
            col: pdf_color(style.color),
        });
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point { x: Pt(x), y: Pt(y) },
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(style.font_size_pt),
            font,
        });
        // printpdf passes builtin-font text through as UTF-8, so the WinAnsi
        // bytes go out as a raw operand. The empty write registers the font
        // resource and serialises to nothing.
        self.ops.push(Op::WriteTextBuiltinFont {
            items: Vec::new(),
            font,
        });
        self.ops.push(Op::Unknown {
            key: "Tj".into(),
            value: vec![DictItem::String {
                data: winansi::encode(text),
                literal: false,
            }],
        });
        self.ops.push(Op::EndTextSection);
    }

    /// Place one line inside `[left, left + width]` at `top`.
    fn line(&mut self, line: &Line, left: f32, width: f32, top: f32, style: &ParagraphStyle) {
        if line.words.is_empty() {
            return;
        }
        let y = self.baseline_y(top, style);
        let slack = (width - line.width).max(0.0);

        match style.alignment {
            Alignment::Justify if !line.ends_segment && line.words.len() > 1 => {
                let space = metrics::text_width(" ", style.font, style.font_size_pt);
                let extra = slack / (line.words.len() - 1) as f32;
                let mut x = left;
                for word in &line.words {
                    let advance = metrics::text_width(word, style.font, style.font_size_pt);
                    self.text_at(word, x, y, style);
                    x += advance + space + extra;
                }
            }
            Alignment::Center => self.text_at(&line.text(), left + slack / 2.0, y, style),
            Alignment::Right => self.text_at(&line.text(), left + slack, y, style),
            Alignment::Left | Alignment::Justify => self.text_at(&line.text(), left, y, style),
        }
    }

    fn stroke_rect(&mut self, x: f32, top: f32, width: f32, height: f32) {
        let bottom = self.geometry.height_pt - self.geometry.margin_pt - top - height;
        let y_top = bottom + height;
        let corner = |x: f32, y: f32| LinePoint {
            p: Point { x: Pt(x), y: Pt(y) },
            bezier: false,
        };
        self.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing {
                    points: vec![
                        corner(x, bottom),
                        corner(x + width, bottom),
                        corner(x + width, y_top),
                        corner(x, y_top),
                    ],
                }],
                mode: PaintMode::Stroke,
                winding_order: WindingOrder::NonZero,
            },
        });
    }

    // -- Blocks ---------------------------------------------------------------

    fn paragraph(&mut self, text: &str, spec: &StyleSpec) {
        let style = spec.resolve();
        let available = self.geometry.available_width();
        let indent = style
            .left_indent_pt
            .clamp(0.0, (available - style.font_size_pt).max(0.0));
        let left = self.geometry.margin_pt + indent;
        let width = available - indent;

        let mut lines = metrics::wrap(text, style.font, style.font_size_pt, width);
        if lines.is_empty() {
            // A blank paragraph still occupies one line.
            lines.push(Line {
                words: Vec::new(),
                width: 0.0,
                ends_segment: true,
            });
        }

        self.keep_together(lines.len() as f32 * style.leading_pt);
        for line in &lines {
            if style.leading_pt > self.remaining() && !self.is_fresh() {
                self.new_page();
            }
            let top = self.used;
            self.line(line, left, width, top, &style);
            self.used += style.leading_pt;
        }

        self.gap(style.space_after_pt);
    }

    fn field_row(&mut self, key: &str, value: &str) {
        let style = ParagraphStyle::body();
        let [key_width, colon_width, value_width] = FIELD_COLUMN_WIDTHS_PT;
        let key_lines = metrics::wrap(key, style.font, style.font_size_pt, key_width);
        let value_lines = metrics::wrap(value, style.font, style.font_size_pt, value_width);

        // Field rows never split; whatever exceeds one page is clipped.
        let max_lines = ((self.capacity() - 2.0 * FIELD_PADDING_Y_PT) / style.leading_pt)
            .floor()
            .max(1.0) as usize;
        let line_count = key_lines.len().max(value_lines.len()).clamp(1, max_lines);
        if key_lines.len().max(value_lines.len()) > max_lines {
            warn!(lines = line_count, "field row taller than a page, clipping");
        }
        let height = line_count as f32 * style.leading_pt + 2.0 * FIELD_PADDING_Y_PT;

        self.keep_together(height);

        let x = self.geometry.margin_pt;
        let top = self.used + FIELD_PADDING_Y_PT;
        let colon = Line {
            words: vec![":".into()],
            width: metrics::text_width(":", style.font, style.font_size_pt),
            ends_segment: true,
        };
        self.line(&colon, x + key_width, colon_width, top, &style);
        for (column_x, column_width, lines) in [
            (x, key_width, &key_lines),
            (x + key_width + colon_width, value_width, &value_lines),
        ] {
            for (index, line) in lines.iter().take(line_count).enumerate() {
                let line_top = top + index as f32 * style.leading_pt;
                self.line(line, column_x, column_width, line_top, &style);
            }
        }

        self.used = (self.used + height).min(self.capacity());
    }

    fn grid(&mut self, rows: &[Row], column_widths: &[f32]) {
        if rows.is_empty() || column_widths.is_empty() {
            return;
        }
        let style = ParagraphStyle::body();
        let max_lines = ((self.capacity() - 2.0 * CELL_PADDING_Y_PT) / style.leading_pt)
            .floor()
            .max(1.0) as usize;

        let laid_out: Vec<(Vec<Vec<Line>>, f32)> = rows
            .iter()
            .map(|row| {
                let cells: Vec<Vec<Line>> = row
                    .iter()
                    .zip(column_widths)
                    .map(|(cell, width)| {
                        let inner = (width - 2.0 * CELL_PADDING_X_PT).max(style.font_size_pt);
                        metrics::wrap(&cell.text, style.font, style.font_size_pt, inner)
                    })
                    .collect();
                let lines = cells.iter().map(Vec::len).max().unwrap_or(0).clamp(1, max_lines);
                let height = lines as f32 * style.leading_pt + 2.0 * CELL_PADDING_Y_PT;
                (cells, height)
            })
            .collect();

        let total: f32 = laid_out.iter().map(|(_, height)| height).sum();
        self.keep_together(total);

        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(GRID_LINE_WIDTH_PT),
        });
        self.ops.push(Op::SetOutlineColor {
            col: pdf_color(TextColor::Black),
        });

        for (cells, height) in &laid_out {
            if *height > self.remaining() && !self.is_fresh() {
                self.new_page();
                self.ops.push(Op::SetOutlineThickness {
                    pt: Pt(GRID_LINE_WIDTH_PT),
                });
                self.ops.push(Op::SetOutlineColor {
                    col: pdf_color(TextColor::Black),
                });
            }

            let top = self.used;
            let mut x = self.geometry.margin_pt;
            for (lines, width) in cells.iter().zip(column_widths) {
                self.stroke_rect(x, top, *width, *height);
                let inner = (width - 2.0 * CELL_PADDING_X_PT).max(style.font_size_pt);
                for (index, line) in lines.iter().take(max_lines).enumerate() {
                    let line_top = top + CELL_PADDING_Y_PT + index as f32 * style.leading_pt;
                    self.line(line, x + CELL_PADDING_X_PT, inner, line_top, &style);
                }
                x += width;
            }

            self.used = (self.used + height).min(self.capacity());
        }
    }
}
