use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::errors::{AppError, AppResult};

pub(crate) type Package<'a> = ZipArchive<Cursor<&'a [u8]>>;

pub(crate) fn open_package(bytes: &[u8]) -> AppResult<Package<'_>> {
    ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::ExtractionFailed(format!("not an Office Open XML package: {}", e)))
}

pub(crate) fn read_part(package: &mut Package<'_>, name: &str) -> AppResult<String> {
    let mut part = package
        .by_name(name)
        .map_err(|e| AppError::ExtractionFailed(format!("missing part {}: {}", name, e)))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| AppError::ExtractionFailed(format!("unreadable part {}: {}", name, e)))?;
    Ok(xml)
}

pub(crate) fn xml_error(err: impl std::fmt::Display) -> AppError {
    AppError::ExtractionFailed(format!("malformed XML: {}", err))
}
