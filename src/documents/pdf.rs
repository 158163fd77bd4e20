use lopdf::Document;

use crate::errors::{AppError, AppResult};

use super::TextExtractor;

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    /// Joins page texts in page order, skipping pages with no extractable text.
    fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        let doc = Document::load_mem(bytes).map_err(|e| AppError::ExtractionFailed(e.to_string()))?;

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys() {
            let text = doc
                .extract_text(&[*page_number])
                .map_err(|e| AppError::ExtractionFailed(e.to_string()))?;
            // lopdf ends every text object with a line break.
            let text = text.trim_end_matches(['\r', '\n']);
            if !text.is_empty() {
                pages.push(text.to_string());
            }
        }

        Ok(pages.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::documents::pdf_with_pages;

    #[test]
    fn extracts_text_from_each_page_in_order() {
        let bytes = pdf_with_pages(&[Some("First page"), Some("Second page")]);

        let text = PdfExtractor.extract(&bytes).unwrap();

        assert_eq!(text, "First page\nSecond page");
    }

    #[test]
    fn empty_pages_leave_no_blank_lines() {
        let bytes = pdf_with_pages(&[Some("First page"), None, Some("Second page")]);

        let text = PdfExtractor.extract(&bytes).unwrap();

        assert_eq!(text, "First page\nSecond page");
    }

    #[test]
    fn pages_without_text_are_skipped() {
        let bytes = pdf_with_pages(&[None, Some("Only text"), None]);

        let text = PdfExtractor.extract(&bytes).unwrap();

        assert_eq!(text, "Only text");
    }

    #[test]
    fn document_without_text_yields_empty_string() {
        let bytes = pdf_with_pages(&[None]);
        assert_eq!(PdfExtractor.extract(&bytes).unwrap(), "");
    }

    #[test]
    fn garbage_bytes_are_an_extraction_failure() {
        let err = PdfExtractor.extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }
}
