use crate::errors::{AppError, AppResult};

use super::TextExtractor;

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| AppError::ExtractionFailed(e.to_string()))
    }
}
