//! Writes the narrative into a minimal Word document: one right-to-left paragraph
//! set in the David font.

use crate::error::Result;
use log::info;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const DEFAULT_FILE_NAME: &str = "1";
pub const DOCX_EXTENSION: &str = ".docx";
pub const FONT_NAME: &str = "David";
/// 12pt, in the half-points WordprocessingML uses.
pub const FONT_SIZE_HALF_POINTS: &str = "24";

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Output path for an optional file name: defaults to `1`, `.docx` appended when missing.
pub fn output_path(file_name: Option<&str>) -> PathBuf {
    let name = file_name
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME);

    if name.ends_with(DOCX_EXTENSION) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}{DOCX_EXTENSION}"))
    }
}

/// Writes `text` as a single paragraph and returns the path of the saved document.
pub fn write_docx(text: &str, file_name: Option<&str>) -> Result<PathBuf> {
    let path = output_path(file_name);
    let document = document_xml(text)?;

    let file = File::create(&path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &[u8]); 3] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("word/document.xml", document.as_slice()),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body)?;
    }
    zip.finish()?;

    info!("Wrote document: {}", path.display());
    Ok(path)
}

/// `word/document.xml` for one bidi paragraph. Newlines become `<w:br/>`.
pub fn document_xml(text: &str) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(
        BytesStart::new("w:document").with_attributes([("xmlns:w", WORDML_NS)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;

    writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
    writer.write_event(Event::Empty(
        BytesStart::new("w:bidi").with_attributes([("w:val", "1")]),
    ))?;
    writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;

    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    writer.write_event(Event::Empty(BytesStart::new("w:rFonts").with_attributes([
        ("w:ascii", FONT_NAME),
        ("w:hAnsi", FONT_NAME),
        ("w:cs", FONT_NAME),
    ])))?;
    // rPr children follow schema order: sz and szCs precede rtl.
    for size in ["w:sz", "w:szCs"] {
        writer.write_event(Event::Empty(
            BytesStart::new(size).with_attributes([("w:val", FONT_SIZE_HALF_POINTS)]),
        ))?;
    }
    writer.write_event(Event::Empty(BytesStart::new("w:rtl")))?;
    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;

    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            writer.write_event(Event::Empty(BytesStart::new("w:br")))?;
        }
        if line.is_empty() {
            continue;
        }
        writer.write_event(Event::Start(
            BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
        ))?;
        writer.write_event(Event::Text(BytesText::new(line)))?;
        writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner())
}
