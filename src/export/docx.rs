//! Minimal WordprocessingML (.docx) encoder.
//!
//! Emits only the parts Word needs to open the file: content types, package
//! relationships, core properties, styles, bullet numbering and the body.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::error::{MandalaError, Result};
use crate::export::document::{Block, Document, DocumentEncoder, Run};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const BULLET_NUM_ID: u32 = 1;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:eastAsia="Microsoft JhengHei" w:hAnsi="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:pPr><w:spacing w:after="120"/></w:pPr></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:pPr><w:jc w:val="center"/><w:spacing w:after="240"/></w:pPr><w:rPr><w:b/><w:color w:val="4F46E5"/><w:sz w:val="40"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:before="200" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="26"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/><w:basedOn w:val="Normal"/><w:pPr><w:outlineLvl w:val="2"/></w:pPr><w:rPr><w:b/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/></w:style></w:styles>"#;

const NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

/// Writes `Document` blocks as a .docx package
#[derive(Debug, Clone, Default)]
pub struct DocxEncoder {
    pub creator: Option<String>,
}

impl DocxEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    fn core_properties(&self, title: &str) -> String {
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let creator = self.creator.as_deref().unwrap_or("mandala-mind");
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>{}</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created></cp:coreProperties>"#,
            escape(title),
            escape(creator)
        )
    }
}

fn part_error(part: &str, err: impl std::fmt::Display) -> MandalaError {
    MandalaError::ExportFailure {
        message: format!("cannot write docx part {part}: {err}"),
    }
}

fn run_xml(run: &Run, out: &mut String) {
    out.push_str("<w:r>");
    if run.bold || run.color.is_some() {
        out.push_str("<w:rPr>");
        if run.bold {
            out.push_str("<w:b/>");
        }
        if let Some(color) = &run.color {
            out.push_str(&format!(r#"<w:color w:val="{}"/>"#, escape(color.as_str())));
        }
        out.push_str("</w:rPr>");
    }
    out.push_str(&format!(
        r#"<w:t xml:space="preserve">{}</w:t>"#,
        escape(run.text.as_str())
    ));
    out.push_str("</w:r>");
}

fn paragraph_xml(style: Option<&str>, numbered: bool, runs: &[Run], out: &mut String) {
    out.push_str("<w:p>");
    if style.is_some() || numbered {
        out.push_str("<w:pPr>");
        if let Some(style) = style {
            out.push_str(&format!(r#"<w:pStyle w:val="{style}"/>"#));
        }
        if numbered {
            out.push_str(&format!(
                r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{BULLET_NUM_ID}"/></w:numPr>"#
            ));
        }
        out.push_str("</w:pPr>");
    }
    for run in runs {
        run_xml(run, out);
    }
    out.push_str("</w:p>");
}

/// `word/document.xml` body for the given blocks
pub fn document_xml(document: &Document) -> String {
    let mut body = String::new();
    for block in &document.blocks {
        match block {
            Block::Title { text } => {
                paragraph_xml(Some("Title"), false, &[Run::plain(text.as_str())], &mut body)
            }
            Block::Heading { level, text } => {
                let style = format!("Heading{}", (*level).clamp(1, 3));
                paragraph_xml(Some(&style), false, &[Run::plain(text.as_str())], &mut body)
            }
            Block::Paragraph { runs } => paragraph_xml(None, false, runs, &mut body),
            Block::Bullet { runs } => paragraph_xml(Some("ListBullet"), true, runs, &mut body),
        }
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body>{body}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440"/></w:sectPr></w:body></w:document>"#
    )
}

impl DocumentEncoder for DocxEncoder {
    fn encode(&self, document: &Document) -> Result<Vec<u8>> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, String); 7] = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", PACKAGE_RELS.to_string()),
            ("docProps/core.xml", self.core_properties(&document.title)),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
            ("word/styles.xml", STYLES.to_string()),
            ("word/numbering.xml", NUMBERING.to_string()),
            ("word/document.xml", document_xml(document)),
        ];
        for (name, content) in parts {
            zip.start_file(name, options).map_err(|e| part_error(name, e))?;
            zip.write_all(content.as_bytes()).map_err(|e| part_error(name, e))?;
        }

        let bytes = zip
            .finish()
            .map_err(|e| part_error("central directory", e))?
            .into_inner();
        tracing::debug!(
            "encoded docx '{}' ({} blocks, {} bytes)",
            document.title,
            document.blocks.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}
