// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory .docx fixtures for tests.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

/// Escape XML text content.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A `w:p` with optional `w:jc` and left indent (twips).
pub fn para(text: &str, jc: Option<&str>, indent_twips: Option<u32>) -> String {
    let mut ppr = String::new();
    if let Some(jc) = jc {
        ppr.push_str(&format!(r#"<w:jc w:val="{jc}"/>"#));
    }
    if let Some(left) = indent_twips {
        ppr.push_str(&format!(r#"<w:ind w:left="{left}"/>"#));
    }
    let ppr = if ppr.is_empty() {
        ppr
    } else {
        format!("<w:pPr>{ppr}</w:pPr>")
    };
    let run = if text.is_empty() {
        String::new()
    } else {
        format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, escape(text))
    };
    format!("<w:p>{ppr}{run}</w:p>")
}

/// A `w:p` that names a paragraph style.
pub fn styled_para(text: &str, style_id: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{style_id}"/></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
        escape(text)
    )
}

/// A `w:tbl` with one single-paragraph cell per entry.
pub fn table(rows: &[&[&str]]) -> String {
    let rows: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|text| format!("<w:tc>{}</w:tc>", para(text, None, None)))
                .collect();
            format!("<w:tr>{cells}</w:tr>")
        })
        .collect();
    format!("<w:tbl><w:tblPr/>{rows}</w:tbl>")
}

/// Wrap body content in a complete `word/document.xml`.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    )
}

/// Zip the given `(part name, content)` pairs.
pub fn package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in parts {
        zip.start_file(*name, options).expect("start part");
        zip.write_all(content.as_bytes()).expect("write part");
    }
    zip.finish().expect("finish package").into_inner()
}

/// A minimal .docx whose body is `body`.
pub fn docx_bytes(body: &str) -> Vec<u8> {
    let document = document_xml(body);
    package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/document.xml", document.as_str()),
    ])
}

/// A .docx with a style sheet.
pub fn docx_bytes_with_styles(body: &str, styles_xml: &str) -> Vec<u8> {
    let document = document_xml(body);
    package(&[
        ("[Content_Types].xml", CONTENT_TYPES),
        ("word/document.xml", document.as_str()),
        ("word/styles.xml", styles_xml),
    ])
}
