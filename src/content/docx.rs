//! Minimal `.docx` to HTML conversion.
//!
//! A `.docx` file is a zip archive whose body text lives in
//! `word/document.xml`. Paragraphs (`w:p`) become `<p>` elements, text runs
//! (`w:t`) their content, and explicit breaks (`w:br`) become `<br>`.
//! Formatting beyond that is dropped.

use std::io::{Cursor, Read};

use quick_xml::events::Event;

use crate::error::DocxError;

pub fn convert_to_html(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut document_xml)?;
    document_to_html(&document_xml)
}

fn document_to_html(xml: &str) -> Result<String, DocxError> {
    let mut reader = quick_xml::reader::Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::with_capacity(64);

    let mut html = String::new();
    let mut paragraph = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    paragraph.clear();
                }
                b"w:t" if in_paragraph => {
                    in_text = true;
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                // Text events arrive still XML-escaped, which is exactly the
                // HTML escaping the output needs, so runs pass through as-is.
                let text = reader
                    .decoder()
                    .decode(&e)
                    .map_err(|err| DocxError::Xml(format!("{err:?}")))?;
                paragraph.push_str(text.as_ref());
            }
            Ok(Event::Empty(e)) if in_paragraph => match e.name().as_ref() {
                b"w:br" => paragraph.push_str("<br>"),
                b"w:tab" => paragraph.push('\t'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => {
                    in_text = false;
                }
                b"w:p" => {
                    in_paragraph = false;
                    if !paragraph.trim().is_empty() {
                        html.push_str("<p>");
                        html.push_str(&paragraph);
                        html.push_str("</p>\n");
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(err) => return Err(DocxError::Xml(format!("{err:?}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(html)
}
