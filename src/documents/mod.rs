//! Plain-text extraction from uploaded documents.
//!
//! Every supported upload is reduced to a single newline-joined string before
//! it is embedded in the quiz prompt. Legacy binary `.doc`/`.ppt` files share
//! the zip-based Office readers and therefore fail with an extraction error.

mod ooxml;
pub mod pdf;
pub mod plain_text;
pub mod slides;
pub mod word;

use crate::errors::AppResult;

pub use pdf::PdfExtractor;
pub use plain_text::PlainTextExtractor;
pub use slides::SlideDeckExtractor;
pub use word::WordProcessingExtractor;

pub const ALLOWED_EXTENSIONS: [&str; 6] = ["txt", "pdf", "doc", "docx", "ppt", "pptx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    WordProcessing,
    SlideDeck,
}

impl DocumentKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentKind::PlainText),
            "pdf" => Some(DocumentKind::Pdf),
            "doc" | "docx" => Some(DocumentKind::WordProcessing),
            "ppt" | "pptx" => Some(DocumentKind::SlideDeck),
            _ => None,
        }
    }

    /// Resolves the kind from the text after the last `.` of a filename.
    pub fn from_filename(filename: &str) -> Option<Self> {
        file_extension(filename).and_then(Self::from_extension)
    }
}

/// Text after the last `.` of `filename`, as written.
pub fn file_extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension)
}

pub fn is_allowed_file(filename: &str) -> bool {
    file_extension(filename)
        .map(|extension| ALLOWED_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// An upload as received: the client-side filename and the raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_filename(&self.filename)
    }
}

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> AppResult<String>;
}

pub fn extractor_for(kind: DocumentKind) -> &'static dyn TextExtractor {
    match kind {
        DocumentKind::PlainText => &PlainTextExtractor,
        DocumentKind::Pdf => &PdfExtractor,
        DocumentKind::WordProcessing => &WordProcessingExtractor,
        DocumentKind::SlideDeck => &SlideDeckExtractor,
    }
}

pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> AppResult<String> {
    let text = extractor_for(kind).extract(bytes)?;
    log::debug!("Extracted {} characters from {:?} document", text.chars().count(), kind);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_filename_uses_text_after_last_dot_case_insensitively() {
        assert_eq!(DocumentKind::from_filename("notes.TXT"), Some(DocumentKind::PlainText));
        assert_eq!(DocumentKind::from_filename("archive.tar.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("essay.doc"), Some(DocumentKind::WordProcessing));
        assert_eq!(DocumentKind::from_filename("essay.Docx"), Some(DocumentKind::WordProcessing));
        assert_eq!(DocumentKind::from_filename("deck.ppt"), Some(DocumentKind::SlideDeck));
        assert_eq!(DocumentKind::from_filename("deck.pptx"), Some(DocumentKind::SlideDeck));
    }

    #[test]
    fn from_filename_rejects_unknown_or_missing_extensions() {
        assert_eq!(DocumentKind::from_filename("malware.exe"), None);
        assert_eq!(DocumentKind::from_filename("pdf"), None);
        assert_eq!(DocumentKind::from_filename("notes.txt.zip"), None);
        assert_eq!(DocumentKind::from_filename(""), None);
    }

    #[test]
    fn is_allowed_file_matches_allow_list() {
        for extension in ALLOWED_EXTENSIONS {
            assert!(is_allowed_file(&format!("upload.{}", extension)));
        }
        assert!(!is_allowed_file("upload.md"));
        assert!(!is_allowed_file("upload"));
    }

    #[test]
    fn uploaded_document_kind_follows_filename() {
        assert_eq!(
            UploadedDocument::new("Lecture.PPTX", vec![]).kind(),
            Some(DocumentKind::SlideDeck)
        );
        assert_eq!(UploadedDocument::new("image.png", vec![]).kind(), None);
    }

    #[test]
    fn extract_text_dispatches_on_kind() {
        let text = extract_text(b"plain words", DocumentKind::PlainText).unwrap();
        assert_eq!(text, "plain words");

        let err = extract_text(b"plain words", DocumentKind::Pdf);
        assert!(err.is_err());
    }
}
