//! Reply fixtures and in-memory document builders shared by unit and
//! integration tests.

use crate::models::domain::QuestionRecord;

pub mod fixtures {
    use super::*;

    /// A well-formed reply block in the format the prompt asks for.
    pub fn reply_block(number: usize, question: &str, options: [&str; 4], answer: char) -> String {
        format!(
            "Q{}. {}\nA. {}\nB. {}\nC. {}\nD. {}\nAnswer: {}\n",
            number, question, options[0], options[1], options[2], options[3], answer
        )
    }

    /// Reply containing three well-formed questions.
    pub fn three_question_reply() -> String {
        [
            reply_block(1, "Capital of France?", ["Paris", "Berlin", "Rome", "Madrid"], 'A'),
            reply_block(2, "Largest planet?", ["Mars", "Jupiter", "Venus", "Earth"], 'B'),
            reply_block(3, "Boiling point of water at sea level?", ["90C", "80C", "100C", "120C"], 'C'),
        ]
        .concat()
    }

    pub fn capital_question() -> QuestionRecord {
        QuestionRecord::new(
            "Capital of France?",
            vec![
                "Paris".to_string(),
                "Berlin".to_string(),
                "Rome".to_string(),
                "Madrid".to_string(),
            ],
            "A",
        )
    }
}

pub mod documents {
    use std::io::{Cursor, Write};

    use lopdf::{
        content::{Content, Operation},
        dictionary, Document, Object, Stream,
    };
    use zip::{write::SimpleFileOptions, ZipWriter};

    const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
    const PRESENTATION_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
    const DRAWING_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
    const RELATIONSHIPS_NS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    fn zip_parts(parts: &[(String, String)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in parts {
            writer
                .start_file(name.as_str(), SimpleFileOptions::default())
                .expect("zip entry should start");
            writer
                .write_all(body.as_bytes())
                .expect("zip entry should be written");
        }
        writer.finish().expect("zip should finish").into_inner()
    }

    /// Minimal DOCX whose `w:body` holds `body_xml`.
    pub fn docx_with_body(body_xml: &str) -> Vec<u8> {
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
            WORD_NS, body_xml
        );
        zip_parts(&[("word/document.xml".to_string(), document)])
    }

    /// A body-level paragraph per entry, in `w:p`/`w:r`/`w:t` form.
    pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|text| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text))
            .collect();
        docx_with_body(&body)
    }

    /// A `p:sp` shape whose text frame holds one `a:p` per entry.
    pub fn slide_text_shape(paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<a:p><a:r><a:t>{}</a:t></a:r></a:p>", p))
            .collect();
        format!("<p:sp><p:nvSpPr/><p:txBody><a:bodyPr/>{}</p:txBody></p:sp>", body)
    }

    /// Minimal PPTX with one slide per entry; each entry is the `p:spTree` content.
    pub fn pptx_with_slides(slides: &[String]) -> Vec<u8> {
        let slide_ids: String = (0..slides.len())
            .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 10))
            .collect();
        let presentation = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><p:presentation xmlns:p="{}" xmlns:r="{}"><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
            PRESENTATION_NS, RELATIONSHIPS_NS, slide_ids
        );

        // Listed in reverse so ordering must come from the slide id list.
        let relationships: String = (0..slides.len())
            .rev()
            .map(|i| {
                format!(
                    r#"<Relationship Id="rId{}" Type="{}/slide" Target="slides/slide{}.xml"/>"#,
                    i + 10,
                    RELATIONSHIPS_NS,
                    i + 1
                )
            })
            .collect();
        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            relationships
        );

        let mut parts = vec![
            ("ppt/presentation.xml".to_string(), presentation),
            ("ppt/_rels/presentation.xml.rels".to_string(), rels),
        ];
        for (i, shapes) in slides.iter().enumerate() {
            parts.push((
                format!("ppt/slides/slide{}.xml", i + 1),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><p:sld xmlns:p="{}" xmlns:a="{}"><p:cSld><p:spTree><p:nvGrpSpPr/><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
                    PRESENTATION_NS, DRAWING_NS, shapes
                ),
            ));
        }

        zip_parts(&parts)
    }

    /// Minimal PDF with one page per entry; `None` pages have an empty content stream.
    pub fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let operations = match page {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("content should encode"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("pdf should serialize");
        bytes
    }
}
