// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout synthesis — classified blocks to renderable blocks.
//
// Measurements shared with the emitter (field-row columns, grid padding) live
// here so both sides agree on them.

use satzwerk_core::config::PageGeometry;
use satzwerk_core::types::{ClassifiedBlock, RenderableBlock, Row, StyleSpec};
use tracing::{debug, instrument, warn};

/// Gap emitted for an empty paragraph.
pub const SPACER_GAP_PT: f32 = 6.0;
/// Gap emitted after every table.
pub const TABLE_GAP_PT: f32 = 12.0;

/// Key, colon, and value column widths of a field row (1.5in, 0.2in, 4.5in).
pub const FIELD_COLUMN_WIDTHS_PT: [f32; 3] = [108.0, 14.4, 324.0];
/// Vertical padding above and below a field row.
pub const FIELD_PADDING_Y_PT: f32 = 3.0;

pub const GRID_LINE_WIDTH_PT: f32 = 0.5;
pub const CELL_PADDING_X_PT: f32 = 4.0;
pub const CELL_PADDING_Y_PT: f32 = 3.0;

/// Maps classified blocks onto renderable blocks for one page geometry.
#[derive(Debug, Clone)]
pub struct LayoutSynthesizer {
    available_width_pt: f32,
}

impl LayoutSynthesizer {
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            available_width_pt: geometry.available_width(),
        }
    }

    /// Produce the renderable sequence. Never fails: content that cannot be
    /// laid out is replaced by an error paragraph.
    #[instrument(skip_all, fields(blocks = classified.len()))]
    pub fn synthesize(&self, classified: &[ClassifiedBlock]) -> Vec<RenderableBlock> {
        let mut out = Vec::with_capacity(classified.len() + 4);

        for block in classified {
            match block {
                ClassifiedBlock::Spacer => out.push(RenderableBlock::VerticalGap {
                    height_pt: SPACER_GAP_PT,
                }),
                ClassifiedBlock::Title { text } => out.push(RenderableBlock::StyledParagraph {
                    text: text.clone(),
                    style: StyleSpec::title(),
                }),
                ClassifiedBlock::KeyValue { key, value } => out.push(RenderableBlock::FieldRow {
                    key: key.clone(),
                    value: value.clone(),
                }),
                ClassifiedBlock::Plain {
                    text,
                    alignment,
                    left_indent_pt,
                } => out.push(RenderableBlock::StyledParagraph {
                    text: text.clone(),
                    style: StyleSpec::body(*alignment, *left_indent_pt),
                }),
                ClassifiedBlock::Table { rows } => {
                    out.push(self.grid(rows).unwrap_or_else(|reason| {
                        warn!(%reason, "table replaced by error paragraph");
                        RenderableBlock::StyledParagraph {
                            text: format!("Error processing content: {reason}"),
                            style: StyleSpec::error(),
                        }
                    }));
                    out.push(RenderableBlock::VerticalGap {
                        height_pt: TABLE_GAP_PT,
                    });
                }
            }
        }

        debug!(renderable = out.len(), "layout synthesized");
        out
    }

    fn grid(&self, rows: &[Row]) -> Result<RenderableBlock, String> {
        let Some(first) = rows.first() else {
            return Ok(RenderableBlock::GridTable {
                rows: Vec::new(),
                column_widths_pt: Vec::new(),
            });
        };

        let columns = first.len();
        if columns == 0 {
            return Err("table has no columns".into());
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(format!(
                "table row {} has {} cells, expected {columns}",
                index + 1,
                row.len()
            ));
        }

        let width = self.available_width_pt / columns as f32;
        Ok(RenderableBlock::GridTable {
            rows: rows.to_vec(),
            column_widths_pt: vec![width; columns],
        })
    }
}
