use std::collections::HashMap;

use quick_xml::{events::Event, Reader};

use crate::errors::{AppError, AppResult};

use super::{
    ooxml::{open_package, read_part, xml_error, Package},
    TextExtractor,
};

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

pub struct SlideDeckExtractor;

impl TextExtractor for SlideDeckExtractor {
    /// Text of every top-level shape on every slide, one fragment per shape.
    ///
    /// Fragments are newline-joined across the whole deck; there is no extra
    /// separator between slides.
    fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        let mut package = open_package(bytes)?;

        let mut fragments = Vec::new();
        for slide_part in slide_parts(&mut package)? {
            let xml = read_part(&mut package, &slide_part)?;
            fragments.extend(shape_texts(&xml)?);
        }

        Ok(fragments.join("\n"))
    }
}

/// Slide part names in presentation order.
fn slide_parts(package: &mut Package<'_>) -> AppResult<Vec<String>> {
    let presentation = read_part(package, PRESENTATION_PART)?;
    let rels = read_part(package, PRESENTATION_RELS_PART)?;

    let targets = relationship_targets(&rels)?;
    slide_relationship_ids(&presentation)?
        .into_iter()
        .map(|id| {
            targets
                .get(&id)
                .map(|target| resolve_target(target))
                .ok_or_else(|| {
                    AppError::ExtractionFailed(format!("slide relationship {} has no target", id))
                })
        })
        .collect()
}

fn slide_relationship_ids(xml: &str) -> AppResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"p:sldId" => {
                if let Some(attr) = e.try_get_attribute("r:id").map_err(xml_error)? {
                    ids.push(attr.unescape_value().map_err(xml_error)?.into_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

fn relationship_targets(xml: &str) -> AppResult<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"Relationship" => {
                let id = e.try_get_attribute("Id").map_err(xml_error)?;
                let target = e.try_get_attribute("Target").map_err(xml_error)?;
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(
                        id.unescape_value().map_err(xml_error)?.into_owned(),
                        target.unescape_value().map_err(xml_error)?.into_owned(),
                    );
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(targets)
}

/// Relationship targets are relative to `ppt/` unless they are package-absolute.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// Text frame contents of the slide's top-level `p:sp` shapes, in document order.
fn shape_texts(xml: &str) -> AppResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut shapes = Vec::new();

    let mut group_depth = 0usize;
    let mut shape_depth = 0usize;
    let mut paragraphs: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        let in_shape = shape_depth > 0;
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"p:grpSp" => group_depth += 1,
                b"p:sp" if group_depth == 0 => {
                    if shape_depth == 0 {
                        paragraphs.clear();
                    }
                    shape_depth += 1;
                }
                b"a:p" if in_shape => paragraphs.push(String::new()),
                b"a:t" if in_shape => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"p:sp" if group_depth == 0 && shape_depth == 0 => shapes.push(String::new()),
                b"a:p" if in_shape => paragraphs.push(String::new()),
                b"a:br" if in_shape => {
                    if let Some(paragraph) = paragraphs.last_mut() {
                        paragraph.push('\n');
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(paragraph) = paragraphs.last_mut() {
                    paragraph.push_str(&t.unescape().map_err(xml_error)?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"p:grpSp" => group_depth = group_depth.saturating_sub(1),
                b"p:sp" if group_depth == 0 && shape_depth > 0 => {
                    shape_depth -= 1;
                    if shape_depth == 0 {
                        shapes.push(paragraphs.join("\n"));
                    }
                }
                b"a:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::documents::{pptx_with_slides, slide_text_shape as text_shape};

    #[test]
    fn collects_shape_text_across_slides_in_order() {
        let bytes = pptx_with_slides(&[
            format!("{}{}", text_shape(&["Title one"]), text_shape(&["Bullet a", "Bullet b"])),
            text_shape(&["Title two"]),
        ]);

        let text = SlideDeckExtractor.extract(&bytes).unwrap();

        assert_eq!(text, "Title one\nBullet a\nBullet b\nTitle two");
    }

    #[test]
    fn grouped_shapes_and_pictures_are_skipped() {
        let bytes = pptx_with_slides(&[format!(
            "{}<p:grpSp>{}</p:grpSp><p:pic/>",
            text_shape(&["Visible"]),
            text_shape(&["Hidden in group"])
        )]);

        let text = SlideDeckExtractor.extract(&bytes).unwrap();

        assert_eq!(text, "Visible");
    }

    #[test]
    fn shapes_without_text_contribute_empty_fragments() {
        let bytes = pptx_with_slides(&[format!(
            "{}<p:sp><p:nvSpPr/></p:sp>{}",
            text_shape(&["Before"]),
            text_shape(&["After"])
        )]);

        let text = SlideDeckExtractor.extract(&bytes).unwrap();

        assert_eq!(text, "Before\n\nAfter");
    }

    #[test]
    fn empty_deck_yields_empty_string() {
        let bytes = pptx_with_slides(&[]);
        assert_eq!(SlideDeckExtractor.extract(&bytes).unwrap(), "");
    }

    #[test]
    fn resolve_target_handles_relative_and_absolute_paths() {
        assert_eq!(resolve_target("slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("/ppt/slides/slide9.xml"), "ppt/slides/slide9.xml");
    }

    #[test]
    fn non_zip_bytes_are_an_extraction_failure() {
        let err = SlideDeckExtractor.extract(b"plain text").unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }
}
