use quick_xml::{events::Event, Reader};

use crate::errors::AppResult;

use super::{
    ooxml::{open_package, read_part, xml_error},
    TextExtractor,
};

const DOCUMENT_PART: &str = "word/document.xml";

pub struct WordProcessingExtractor;

impl TextExtractor for WordProcessingExtractor {
    fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        let mut package = open_package(bytes)?;
        let xml = read_part(&mut package, DOCUMENT_PART)?;

        let paragraphs = body_paragraphs(&xml)?;
        Ok(paragraphs
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Text of each body-level paragraph. Table cells, text boxes and content
/// controls (tables of contents among them) are skipped.
fn body_paragraphs(xml: &str) -> AppResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();

    let mut current = String::new();
    let mut paragraph_depth = 0usize;
    let mut excluded_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let collecting = paragraph_depth > 0 && excluded_depth == 0;
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" | b"w:sdt" => excluded_depth += 1,
                b"w:p" if excluded_depth == 0 => {
                    if paragraph_depth == 0 {
                        current.clear();
                    }
                    paragraph_depth += 1;
                }
                b"w:r" => run_depth += 1,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" if excluded_depth == 0 && paragraph_depth == 0 => {
                    paragraphs.push(String::new())
                }
                b"w:tab" if collecting && run_depth > 0 => current.push('\t'),
                b"w:br" | b"w:cr" if collecting && run_depth > 0 => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text && collecting => {
                current.push_str(&t.unescape().map_err(xml_error)?);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" | b"w:sdt" => {
                    excluded_depth = excluded_depth.saturating_sub(1)
                },
                b"w:p" if excluded_depth == 0 && paragraph_depth > 0 => {
                    paragraph_depth -= 1;
                    if paragraph_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
