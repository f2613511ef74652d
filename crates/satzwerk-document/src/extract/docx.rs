// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Office Open XML (.docx) body walker.
//
// Only `word/document.xml` and `word/styles.xml` are read. The direct
// children of `w:body` map one-to-one onto block nodes; everything that is
// neither a paragraph nor a table is skipped.

use std::io::{Cursor, Read};

use roxmltree::Node;
use satzwerk_core::error::{Result, SatzwerkError};
use satzwerk_core::types::{BlockNode, Cell, ParagraphNode, Row, SourceDocument, TableNode};
use tracing::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use super::styles::{ParagraphProps, StyleSheet};

/// WordprocessingML main namespace.
pub(crate) const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// Local name of `node` if it is a WordprocessingML element.
pub(crate) fn w_name<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    let tag = node.tag_name();
    (node.is_element() && tag.namespace() == Some(W_NS)).then(|| tag.name())
}

/// First WordprocessingML child element called `name`.
pub(crate) fn w_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| w_name(*child) == Some(name))
}

/// Value of the `w:`-qualified attribute `name`.
pub(crate) fn w_attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute((W_NS, name))
}

/// Extract the block nodes of a `.docx` package.
pub fn extract_docx(data: &[u8]) -> Result<SourceDocument> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| SatzwerkError::CorruptDocument(format!("cannot open package: {e}")))?;

    let document_xml = read_part(&mut archive, DOCUMENT_PART)?.ok_or_else(|| {
        SatzwerkError::UnsupportedFormat(format!("ZIP package has no {DOCUMENT_PART}"))
    })?;

    // A broken style sheet costs alignment fidelity, not the document.
    let styles = match read_part(&mut archive, STYLES_PART) {
        Ok(Some(xml)) => StyleSheet::parse(&xml).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable style sheet");
            StyleSheet::default()
        }),
        Ok(None) => StyleSheet::default(),
        Err(e) => {
            warn!(error = %e, "ignoring unreadable style sheet");
            StyleSheet::default()
        }
    };

    let doc = roxmltree::Document::parse(&document_xml)
        .map_err(|e| SatzwerkError::CorruptDocument(format!("{DOCUMENT_PART}: {e}")))?;
    let body = w_child(doc.root_element(), "body")
        .ok_or_else(|| SatzwerkError::CorruptDocument(format!("{DOCUMENT_PART} has no w:body")))?;

    let mut blocks = Vec::new();
    let mut skipped = 0usize;
    for child in body.children().filter(Node::is_element) {
        match w_name(child) {
            Some("p") => blocks.push(BlockNode::Paragraph(paragraph(child, &styles))),
            Some("tbl") => blocks.push(BlockNode::Table(table(child))),
            _ => skipped += 1,
        }
    }

    debug!(blocks = blocks.len(), skipped, "document body walked");
    Ok(SourceDocument::new(blocks))
}

/// Read a package part as text. A missing part is `Ok(None)`.
fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(SatzwerkError::CorruptDocument(format!("{name}: {e}"))),
    };

    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| SatzwerkError::CorruptDocument(format!("{name}: {e}")))?;
    if let Some(stripped) = xml.strip_prefix('\u{feff}') {
        xml = stripped.to_string();
    }
    Ok(Some(xml))
}

fn paragraph(p: Node<'_, '_>, styles: &StyleSheet) -> ParagraphNode {
    let ppr = w_child(p, "pPr");
    let direct = ppr.map(ParagraphProps::from_ppr).unwrap_or_default();
    let style_id = ppr
        .and_then(|ppr| w_child(ppr, "pStyle"))
        .and_then(|style| w_attr(style, "val"));
    let props = styles.resolve(style_id, direct);

    ParagraphNode::new(
        paragraph_text(p),
        props.alignment.unwrap_or_default(),
        props.left_indent_pt.unwrap_or(0.0),
    )
}

/// Visible text of one paragraph, trimmed.
fn paragraph_text(p: Node<'_, '_>) -> String {
    let mut text = String::new();
    collect_text(p, &mut text);
    text.trim().to_string()
}

fn collect_text(node: Node<'_, '_>, out: &mut String) {
    for child in node.children().filter(Node::is_element) {
        match w_name(child) {
            Some("t") => out.push_str(child.text().unwrap_or_default()),
            Some("tab") => out.push('\t'),
            Some("br" | "cr") => out.push('\n'),
            Some("noBreakHyphen") => out.push('-'),
            // Properties, deletions, field codes and floating content.
            Some(
                "pPr" | "rPr" | "del" | "delText" | "moveFrom" | "instrText" | "drawing"
                | "pict" | "object" | "txbxContent" | "footnoteReference"
                | "endnoteReference",
            ) => {}
            Some(_) => collect_text(child, out),
            // mc:AlternateContent and other foreign markup.
            None => {}
        }
    }
}

fn table(tbl: Node<'_, '_>) -> TableNode {
    let mut rows: Vec<Row> = Vec::new();

    for tr in tbl.children().filter(|n| w_name(*n) == Some("tr")) {
        let trpr = w_child(tr, "trPr");
        let grid_skip = |name: &str| {
            trpr.and_then(|trpr| w_child(trpr, name))
                .and_then(|node| w_attr(node, "val"))
                .and_then(|val| val.parse::<usize>().ok())
                .unwrap_or(0)
        };

        let mut row: Row = vec![Cell::default(); grid_skip("gridBefore")];
        for tc in tr.children().filter(|n| w_name(*n) == Some("tc")) {
            let tcpr = w_child(tc, "tcPr");
            let span = tcpr
                .and_then(|tcpr| w_child(tcpr, "gridSpan"))
                .and_then(|span| w_attr(span, "val"))
                .and_then(|val| val.parse::<usize>().ok())
                .unwrap_or(1)
                .max(1);
            let continues_merge = tcpr
                .and_then(|tcpr| w_child(tcpr, "vMerge"))
                .is_some_and(|merge| w_attr(merge, "val").is_none_or(|val| val == "continue"));

            let column = row.len();
            let text = match rows.last().and_then(|above| above.get(column)) {
                Some(above) if continues_merge => above.text.clone(),
                _ => cell_text(tc),
            };
            row.extend(std::iter::repeat_n(Cell::new(text), span));
        }
        row.extend(std::iter::repeat_n(Cell::default(), grid_skip("gridAfter")));

        rows.push(row);
    }

    TableNode { rows }
}

/// Newline-joined text of the paragraphs directly inside a cell.
fn cell_text(tc: Node<'_, '_>) -> String {
    tc.children()
        .filter(|n| w_name(*n) == Some("p"))
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        docx_bytes, docx_bytes_with_styles, package, para, styled_para, table as table_xml,
    };
    use satzwerk_core::types::Alignment;

    fn paragraphs(doc: &SourceDocument) -> Vec<&ParagraphNode> {
        doc.blocks
            .iter()
            .filter_map(|block| match block {
                BlockNode::Paragraph(p) => Some(p),
                BlockNode::Table(_) => None,
            })
            .collect()
    }

    #[test]
    fn paragraphs_keep_order_alignment_and_indent() {
        let body = format!(
            "{}{}{}{}",
            para("SURAT TUGAS", Some("center"), None),
            para("Nama : Budi Santoso", None, Some(720)),
            para("", None, None),
            para("Dengan ini menugaskan", Some("both"), None),
        );
        let doc = extract_docx(&docx_bytes(&body)).expect("extract");
        let paras = paragraphs(&doc);

        assert_eq!(paras.len(), 4);
        assert_eq!(paras[0].text, "SURAT TUGAS");
        assert_eq!(paras[0].alignment, Alignment::Center);
        assert_eq!(paras[1].left_indent_pt, 36.0);
        assert_eq!(paras[1].alignment, Alignment::Left);
        assert!(paras[2].is_empty());
        assert_eq!(paras[3].alignment, Alignment::Justify);
    }

    #[test]
    fn run_text_rules() {
        let body = r#"<w:p>
            <w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
            <w:r><w:t xml:space="preserve">  Satu</w:t><w:tab/><w:t>Dua</w:t></w:r>
            <w:hyperlink><w:r><w:t>Tiga</w:t></w:r></w:hyperlink>
            <w:del><w:r><w:delText>hapus</w:delText></w:r></w:del>
            <w:ins><w:r><w:br/><w:t>Empat  </w:t></w:r></w:ins>
            <w:r><w:fldChar w:fldCharType="begin"/></w:r>
            <w:r><w:instrText>PAGE</w:instrText></w:r>
        </w:p>"#;
        let doc = extract_docx(&docx_bytes(body)).expect("extract");
        assert_eq!(paragraphs(&doc)[0].text, "Satu\tDuaTiga\nEmpat");
    }

    #[test]
    fn non_block_children_are_skipped() {
        let body = format!(
            "{}<w:bookmarkStart w:id=\"0\" w:name=\"x\"/>{}<w:sectPr/>",
            para("Satu", None, None),
            para("Dua", None, None),
        );
        let doc = extract_docx(&docx_bytes(&body)).expect("extract");
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn style_chain_supplies_alignment_and_indent() {
        let styles = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:pPr><w:jc w:val="both"/></w:pPr></w:style>
  <w:style w:type="paragraph" w:styleId="Judul"><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="center"/><w:ind w:left="360"/></w:pPr></w:style>
</w:styles>"#;
        let body = format!(
            "{}{}{}",
            styled_para("SURAT", "Judul"),
            para("Isi", None, None),
            styled_para("Kiri", "Unknown"),
        );
        let doc = extract_docx(&docx_bytes_with_styles(&body, styles)).expect("extract");
        let paras = paragraphs(&doc);

        assert_eq!(paras[0].alignment, Alignment::Center);
        assert_eq!(paras[0].left_indent_pt, 18.0);
        assert_eq!(paras[1].alignment, Alignment::Justify);
        assert_eq!(paras[2].alignment, Alignment::Justify);
        assert_eq!(paras[2].left_indent_pt, 0.0);
    }

    #[test]
    fn broken_style_sheet_is_ignored() {
        let bytes = docx_bytes_with_styles(&para("Isi", Some("right"), None), "<w:styles");
        let doc = extract_docx(&bytes).expect("extract");
        assert_eq!(paragraphs(&doc)[0].alignment, Alignment::Right);
    }

    #[test]
    fn table_keeps_empty_cells() {
        let body = table_xml(&[&["No", "Nama"], &["1", ""], &["2", "Budi"]]);
        let doc = extract_docx(&docx_bytes(&body)).expect("extract");

        let BlockNode::Table(table) = &doc.blocks[0] else {
            panic!("expected a table");
        };
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.uniform_width(), Some(2));
        assert_eq!(table.rows[1][1], Cell::new(""));
        assert_eq!(table.rows[2][1].text, "Budi");
    }

    #[test]
    fn merged_cells_keep_the_grid_rectangular() {
        let body = r#"<w:tbl>
          <w:tr>
            <w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr><w:p><w:r><w:t>Kepala</w:t></w:r></w:p></w:tc>
            <w:tc><w:tcPr><w:vMerge w:val="restart"/></w:tcPr><w:p><w:r><w:t>Gabung</w:t></w:r></w:p></w:tc>
          </w:tr>
          <w:tr>
            <w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc>
            <w:tc><w:p/></w:tc>
            <w:tc><w:tcPr><w:vMerge/></w:tcPr><w:p/></w:tc>
          </w:tr>
          <w:tr>
            <w:trPr><w:gridBefore w:val="1"/><w:gridAfter w:val="1"/></w:trPr>
            <w:tc><w:p><w:r><w:t>tengah</w:t></w:r></w:p></w:tc>
          </w:tr>
        </w:tbl>"#;
        let doc = extract_docx(&docx_bytes(body)).expect("extract");

        let BlockNode::Table(table) = &doc.blocks[0] else {
            panic!("expected a table");
        };
        let texts: Vec<Vec<&str>> = table
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.text.as_str()).collect())
            .collect();
        assert_eq!(
            texts,
            vec![
                vec!["Kepala", "Kepala", "Gabung"],
                vec!["a\nb", "", "Gabung"],
                vec!["", "tengah", ""],
            ]
        );
    }

    #[test]
    fn package_without_document_part_is_unsupported() {
        let bytes = package(&[("xl/workbook.xml", "<workbook/>")]);
        assert!(matches!(
            extract_docx(&bytes),
            Err(SatzwerkError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn malformed_document_xml_is_corrupt() {
        let bytes = package(&[(DOCUMENT_PART, "<w:document><w:body>")]);
        assert!(matches!(
            extract_docx(&bytes),
            Err(SatzwerkError::CorruptDocument(_))
        ));

        let no_body = format!(r#"<w:document xmlns:w="{W_NS}"></w:document>"#);
        let bytes = package(&[(DOCUMENT_PART, no_body.as_str())]);
        assert!(matches!(
            extract_docx(&bytes),
            Err(SatzwerkError::CorruptDocument(_))
        ));
    }

    #[test]
    fn byte_order_mark_is_tolerated() {
        let xml = format!(
            "\u{feff}<w:document xmlns:w=\"{W_NS}\"><w:body>{}</w:body></w:document>",
            para("Halo", None, None)
        );
        let doc = extract_docx(&package(&[(DOCUMENT_PART, xml.as_str())])).expect("extract");
        assert_eq!(paragraphs(&doc)[0].text, "Halo");
    }
}
