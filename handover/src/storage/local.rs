// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::upload::{UploadClock, sanitize_filename, validate_upload};
use super::{ReadFailure, StorageAdapter, StorageError, StorageReadError, UploadedFile};
use crate::content::ContentDocument;
use crate::runtime_paths::{RuntimePaths, UPLOADS_URL_PREFIX};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Keeps the document in a single JSON file and assets as plain files.
pub struct LocalAdapter {
    content_path: PathBuf,
    upload_dir: PathBuf,
    timestamp_prefix: bool,
    clock: UploadClock,
}

impl LocalAdapter {
    pub fn new(content_path: PathBuf, upload_dir: PathBuf, timestamp_prefix: bool) -> Self {
        Self {
            content_path,
            upload_dir,
            timestamp_prefix,
            clock: UploadClock::new(),
        }
    }

    pub fn from_runtime_paths(paths: &RuntimePaths, timestamp_prefix: bool) -> Self {
        Self::new(
            paths.content_file.clone(),
            paths.uploads_dir.clone(),
            timestamp_prefix,
        )
    }

    pub fn content_path(&self) -> &Path {
        &self.content_path
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn stored_file_name(&self, original: &str) -> String {
        let safe_name = sanitize_filename(original);
        if self.timestamp_prefix {
            format!("{}-{}", self.clock.next(), safe_name)
        } else {
            safe_name
        }
    }

    fn temp_path(&self) -> PathBuf {
        let name = match self.content_path.file_name() {
            Some(name) => format!(".{}.{}.tmp", name.to_string_lossy(), Uuid::new_v4()),
            None => format!(".content.{}.tmp", Uuid::new_v4()),
        };
        self.content_path.with_file_name(name)
    }
}

#[async_trait]
impl StorageAdapter for LocalAdapter {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn get_content(&self) -> Result<ContentDocument, StorageError> {
        let raw = fs::read_to_string(&self.content_path).await.map_err(|err| {
            log::error!(
                "Error reading content file {}: {}",
                self.content_path.display(),
                err
            );
            let cause = if err.kind() == ErrorKind::NotFound {
                ReadFailure::Missing
            } else {
                ReadFailure::Io(err)
            };
            StorageReadError {
                path: self.content_path.clone(),
                cause,
            }
        })?;

        serde_json::from_str(&raw).map_err(|err| {
            log::error!(
                "Error parsing content file {}: {}",
                self.content_path.display(),
                err
            );
            StorageError::Read(StorageReadError {
                path: self.content_path.clone(),
                cause: ReadFailure::Parse(err),
            })
        })
    }

    async fn update_content(&self, document: &ContentDocument) -> Result<(), StorageError> {
        let mut serialized = serde_json::to_string_pretty(document)
            .map_err(|err| StorageError::write(&self.content_path, std::io::Error::other(err)))?;
        serialized.push('\n');

        let temp_path = self.temp_path();
        let result = async {
            fs::write(&temp_path, serialized.as_bytes()).await?;
            fs::rename(&temp_path, &self.content_path).await
        }
        .await;

        if let Err(err) = result {
            log::error!(
                "Error writing content file {}: {}",
                self.content_path.display(),
                err
            );
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::write(&self.content_path, err));
        }

        log::debug!("Content written to {}", self.content_path.display());
        Ok(())
    }

    async fn upload_image(&self, file: UploadedFile) -> Result<String, StorageError> {
        if let Err(err) = validate_upload(&file) {
            log::warn!("Upload of '{}' rejected: {}", file.file_name, err);
            return Err(err.into());
        }

        fs::create_dir_all(&self.upload_dir).await.map_err(|err| {
            log::error!(
                "Error creating upload directory {}: {}",
                self.upload_dir.display(),
                err
            );
            StorageError::write(&self.upload_dir, err)
        })?;

        let file_name = self.stored_file_name(&file.file_name);
        let file_path = self.upload_dir.join(&file_name);
        fs::write(&file_path, &file.bytes).await.map_err(|err| {
            log::error!("Error writing upload {}: {}", file_path.display(), err);
            StorageError::write(&file_path, err)
        })?;

        log::info!(
            "Stored upload {} ({} bytes, {})",
            file_name,
            file.size(),
            file.content_type
        );
        Ok(format!("{}/{}", UPLOADS_URL_PREFIX, file_name))
    }
}
