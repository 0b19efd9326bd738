//! Asset download
//!
//! A matched record names its own audio file: the target path is
//! `<dir>/<file stem>.mp3`. The directory must already exist and the stem
//! must be a plain file name, so the asset always lands inside `dir`.
//!
//! The body is written in place. A non-200 status leaves no file behind, but
//! a connection dropped mid-body leaves whatever was written so far.

use crate::error::CatalogResult;
use crate::models::CatalogRecord;
use crate::query::Catalog;
use crate::validation::{
    check_status, validate_download_dir, validate_file_stem, ASSET_FILE_EXTENSION,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output path for a record's asset inside `dir` (not canonicalized)
pub fn asset_path(dir: &Path, record: &impl CatalogRecord) -> PathBuf {
    dir.join(format!("{}{}", record.file_stem(), ASSET_FILE_EXTENSION))
}

impl<'a, R: CatalogRecord> Catalog<'a, R> {
    /// Download `record`'s audio into `dir` and return the written path
    pub async fn download(&self, record: &R, dir: impl AsRef<Path>) -> CatalogResult<PathBuf> {
        let dir = dir.as_ref();
        validate_download_dir(dir)?;
        validate_file_stem(record.file_stem())?;

        let output = asset_path(dir, record);
        let request = self.request(R::KIND.asset_path()).path_param("id", record.id());
        debug!(
            catalog = %R::KIND,
            id = record.id(),
            path = %output.display(),
            "Downloading asset"
        );

        let status = self.transport.download(&request, &output).await?;
        check_status(status)?;

        info!(catalog = %R::KIND, id = record.id(), path = %output.display(), "Downloaded asset");
        Ok(output)
    }

    /// Download `record`'s audio into the system temporary directory
    pub async fn download_to_temp(&self, record: &R) -> CatalogResult<PathBuf> {
        self.download(record, std::env::temp_dir()).await
    }
}
