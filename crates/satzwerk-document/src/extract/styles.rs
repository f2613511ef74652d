// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Paragraph style resolution from `word/styles.xml`.
//
// Alignment and left indent are looked up in this order: direct paragraph
// properties, the paragraph style and its `basedOn` ancestors (or the default
// paragraph style when none is named), then the document defaults.

use std::collections::HashMap;

use roxmltree::Node;
use satzwerk_core::error::{Result, SatzwerkError};
use satzwerk_core::types::Alignment;

use super::docx::{w_attr, w_child, w_name};

/// Guard against `basedOn` cycles in malformed style sheets.
const MAX_STYLE_DEPTH: usize = 32;

/// The subset of paragraph properties the document model keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParagraphProps {
    pub alignment: Option<Alignment>,
    pub left_indent_pt: Option<f32>,
}

impl ParagraphProps {
    /// Read `w:jc` and `w:ind` from a `w:pPr` element.
    pub fn from_ppr(ppr: Node<'_, '_>) -> Self {
        let alignment = w_child(ppr, "jc")
            .and_then(|jc| w_attr(jc, "val"))
            .map(Alignment::from_ooxml);
        let left_indent_pt = w_child(ppr, "ind")
            .and_then(|ind| w_attr(ind, "left").or_else(|| w_attr(ind, "start")))
            .and_then(|twips| twips.trim().parse::<f32>().ok())
            .filter(|twips| twips.is_finite())
            .map(|twips| twips / 20.0);
        Self {
            alignment,
            left_indent_pt,
        }
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            alignment: self.alignment.or(fallback.alignment),
            left_indent_pt: self.left_indent_pt.or(fallback.left_indent_pt),
        }
    }

    fn is_complete(&self) -> bool {
        self.alignment.is_some() && self.left_indent_pt.is_some()
    }
}

#[derive(Debug, Clone, Default)]
struct StyleDef {
    based_on: Option<String>,
    props: ParagraphProps,
}

/// Paragraph styles of one document.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: HashMap<String, StyleDef>,
    default_style: Option<String>,
    doc_defaults: ParagraphProps,
}

impl StyleSheet {
    /// Parse the XML text of `word/styles.xml`.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)
            .map_err(|e| SatzwerkError::CorruptDocument(format!("word/styles.xml: {e}")))?;
        let root = doc.root_element();

        let doc_defaults = w_child(root, "docDefaults")
            .and_then(|d| w_child(d, "pPrDefault"))
            .and_then(|d| w_child(d, "pPr"))
            .map(ParagraphProps::from_ppr)
            .unwrap_or_default();

        let mut styles = HashMap::new();
        let mut default_style = None;
        for style in root.children().filter(|n| w_name(*n) == Some("style")) {
            if w_attr(style, "type") != Some("paragraph") {
                continue;
            }
            let Some(id) = w_attr(style, "styleId") else {
                continue;
            };
            if matches!(w_attr(style, "default"), Some("1" | "true" | "on")) {
                default_style = Some(id.to_string());
            }
            let def = StyleDef {
                based_on: w_child(style, "basedOn")
                    .and_then(|b| w_attr(b, "val"))
                    .map(str::to_string),
                props: w_child(style, "pPr")
                    .map(ParagraphProps::from_ppr)
                    .unwrap_or_default(),
            };
            styles.insert(id.to_string(), def);
        }

        Ok(Self {
            styles,
            default_style,
            doc_defaults,
        })
    }

    /// Resolve `direct` properties of a paragraph using style `style_id`.
    pub fn resolve(&self, style_id: Option<&str>, direct: ParagraphProps) -> ParagraphProps {
        let mut props = direct;
        let mut current = style_id
            .filter(|id| self.styles.contains_key(*id))
            .or(self.default_style.as_deref());

        for _ in 0..MAX_STYLE_DEPTH {
            if props.is_complete() {
                break;
            }
            let Some(def) = current.and_then(|id| self.styles.get(id)) else {
                break;
            };
            props = props.or(def.props);
            current = def.based_on.as_deref();
        }

        props.or(self.doc_defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults><w:pPrDefault><w:pPr><w:ind w:left="0"/></w:pPr></w:pPrDefault></w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading"><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="center"/></w:pPr></w:style>
  <w:style w:type="paragraph" w:styleId="Quote"><w:basedOn w:val="Heading"/><w:pPr><w:ind w:left="1440"/></w:pPr></w:style>
  <w:style w:type="paragraph" w:styleId="LoopA"><w:basedOn w:val="LoopB"/></w:style>
  <w:style w:type="paragraph" w:styleId="LoopB"><w:basedOn w:val="LoopA"/></w:style>
  <w:style w:type="character" w:styleId="Emph"><w:pPr><w:jc w:val="right"/></w:pPr></w:style>
</w:styles>"#;

    #[test]
    fn resolves_through_based_on_chain() {
        let sheet = StyleSheet::parse(STYLES).expect("parse");
        let props = sheet.resolve(Some("Quote"), ParagraphProps::default());
        assert_eq!(props.alignment, Some(Alignment::Center));
        assert_eq!(props.left_indent_pt, Some(72.0));
    }

    #[test]
    fn direct_properties_win() {
        let sheet = StyleSheet::parse(STYLES).expect("parse");
        let direct = ParagraphProps {
            alignment: Some(Alignment::Justify),
            left_indent_pt: None,
        };
        let props = sheet.resolve(Some("Quote"), direct);
        assert_eq!(props.alignment, Some(Alignment::Justify));
        assert_eq!(props.left_indent_pt, Some(72.0));
    }

    #[test]
    fn unknown_style_uses_default_then_doc_defaults() {
        let sheet = StyleSheet::parse(STYLES).expect("parse");
        let props = sheet.resolve(Some("Missing"), ParagraphProps::default());
        assert_eq!(props.alignment, None);
        assert_eq!(props.left_indent_pt, Some(0.0));
    }

    #[test]
    fn cycles_terminate_and_character_styles_are_ignored() {
        let sheet = StyleSheet::parse(STYLES).expect("parse");
        let props = sheet.resolve(Some("LoopA"), ParagraphProps::default());
        assert_eq!(props.alignment, None);

        let props = sheet.resolve(Some("Emph"), ParagraphProps::default());
        assert_eq!(props.alignment, None);
    }

    #[test]
    fn malformed_xml_is_corrupt() {
        assert!(matches!(
            StyleSheet::parse("<w:styles"),
            Err(SatzwerkError::CorruptDocument(_))
        ));
    }
}
