// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::check_file_name;
use async_trait::async_trait;
use module_core::{FileStore, StoreError};
use std::{
    fs::DirBuilder,
    io,
    path::{Path, PathBuf},
};
use tokio::{
    fs::read_dir,
    io::{AsyncReadExt, AsyncWriteExt},
};
use tracing::{debug, error, info, warn};

/// A file system–based implementation of a [`FileStore`].
///
/// Every uploaded GPX file is stored under its file name in the uploads
/// directory. The file name is the identifier of the file.
///
/// ## Important
///
/// `FilesSystemStore` **does not implement any internal synchronization or locking mechanisms**.
/// Therefore, **only one instance should be used per `uploads_dir` in the application at any time**.
pub struct FilesSystemStore {
    uploads_dir: PathBuf,
}

impl FilesSystemStore {
    /// Creates the store and the uploads directory if it does not exist yet.
    pub fn new(uploads_dir: &Path) -> Self {
        if let Err(e) = DirBuilder::new().recursive(true).create(uploads_dir) {
            error!(
                "Failed to create uploads folder {}. Error: {}",
                uploads_dir.to_string_lossy(),
                e
            );
        }
        info!("Using uploads folder: {}", uploads_dir.to_string_lossy());
        FilesSystemStore {
            uploads_dir: uploads_dir.to_path_buf(),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    fn file_path(&self, id: &str) -> PathBuf {
        let mut file_path = self.uploads_dir.clone();
        file_path.push(id);
        file_path
    }

    /// Writes `data` to the file at `path` and syncs it to disk.
    ///
    /// The file is created if it does not exist, or truncated if it does.
    async fn save_bytes(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = tokio::fs::File::create(path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        Ok(())
    }

    async fn load_file(&self, path: &Path) -> io::Result<String> {
        let mut file = tokio::fs::File::open(path).await?;
        let mut text = String::default();
        file.read_to_string(&mut text).await?;
        Ok(text)
    }

    /// Validates an uploaded file that was already written to `path`.
    ///
    /// The file is removed again if it is not UTF-8 or not a GPX document.
    async fn validate_upload(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let result = std::str::from_utf8(bytes)
            .map_err(|e| StoreError::InvalidData(e.to_string()))
            .and_then(|text| {
                gpx::validate_document(text).map_err(|e| StoreError::InvalidData(e.to_string()))
            });
        if let Err(e) = &result {
            warn!(
                "Rejected upload {}. Error: {}",
                path.to_string_lossy(),
                e
            );
            if let Err(e) = tokio::fs::remove_file(path).await {
                error!(
                    "Failed to remove rejected upload {}. Error: {}",
                    path.to_string_lossy(),
                    e
                );
            }
        }
        result
    }
}

fn map_missing(e: io::Error, id: &str) -> StoreError {
    match e.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(id.to_string()),
        _ => e.into(),
    }
}

#[async_trait]
impl FileStore for FilesSystemStore {
    /// Returns the names of all `.gpx` files in the uploads directory, sorted.
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut dirs = read_dir(&self.uploads_dir).await?;
        let mut result = vec![];
        while let Some(entry) = dirs.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.file_type().is_file() {
                continue;
            }
            if let Some(ext) = entry.path().extension()
                && ext.eq_ignore_ascii_case("gpx")
                && let Some(name) = entry.path().file_name()
            {
                result.push(name.to_string_lossy().to_string());
            }
        }
        result.sort();
        debug!(
            "Found {} files in folder {}",
            result.len(),
            self.uploads_dir.to_string_lossy()
        );
        Ok(result)
    }

    async fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, StoreError> {
        check_file_name(filename)?;
        let file_path = self.file_path(filename);
        self.save_bytes(&file_path, bytes).await?;
        self.validate_upload(&file_path, bytes).await?;
        info!("Stored upload {}", file_path.to_string_lossy());
        Ok(filename.to_string())
    }

    async fn fetch(&self, id: &str) -> Result<String, StoreError> {
        check_file_name(id)?;
        let file_path = self.file_path(id);
        let text = self
            .load_file(&file_path)
            .await
            .map_err(|e| map_missing(e, id))?;
        debug!("Load file {}", file_path.to_string_lossy());
        Ok(text)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        check_file_name(id)?;
        let file_path = self.file_path(id);
        tokio::fs::remove_file(&file_path)
            .await
            .map_err(|e| map_missing(e, id))?;
        info!("Deleted file {}", file_path.to_string_lossy());
        Ok(())
    }
}
