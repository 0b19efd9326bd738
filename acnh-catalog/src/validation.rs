//! Argument checks and fixed lookup constants

use crate::error::{CatalogError, CatalogResult};
use std::path::{Component, Path};

pub const MIN_HOUR: i32 = 0;
pub const MAX_HOUR: i32 = 23;

/// Extension appended to a record's file stem for both catalogs
pub const ASSET_FILE_EXTENSION: &str = ".mp3";

/// Locale consulted by name lookup. Not caller-selectable.
pub const NAME_LOCALE: &str = "EUen";

pub(crate) const STATUS_OK: u16 = 200;

/// Hour must lie in `MIN_HOUR..=MAX_HOUR`
pub fn validate_hour(hour: i32) -> CatalogResult<u8> {
    if !(MIN_HOUR..=MAX_HOUR).contains(&hour) {
        return Err(CatalogError::Validation(format!(
            "hour must be between {} and {} (got {})",
            MIN_HOUR, MAX_HOUR, hour
        )));
    }
    Ok(hour as u8)
}

/// Download target must already exist; it is never created
pub fn validate_download_dir(dir: &Path) -> CatalogResult<()> {
    if !dir.is_dir() {
        return Err(CatalogError::Validation(format!(
            "destination download directory does not exist: {}",
            dir.display()
        )));
    }
    Ok(())
}

/// Asset file stem must name a single entry inside the download directory
///
/// Rejects absolute stems, `..`, `.` and anything containing a separator, so
/// the joined path can never leave the directory.
pub fn validate_file_stem(stem: &str) -> CatalogResult<()> {
    let mut components = Path::new(stem).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == stem => Ok(()),
        _ => Err(CatalogError::Validation(format!(
            "asset file name must be a plain file name (got {:?})",
            stem
        ))),
    }
}

pub(crate) fn check_status(status: u16) -> CatalogResult<()> {
    if status != STATUS_OK {
        return Err(CatalogError::Remote { status });
    }
    Ok(())
}
