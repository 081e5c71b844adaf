// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::ContentDocument;
use actix_web::web::Bytes;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

pub mod local;
pub mod upload;

pub use local::LocalAdapter;
pub use upload::{ImageType, MAX_UPLOAD_BYTES, UploadClock, sanitize_filename, validate_upload};

/// Persistence backend for the content document and uploaded assets.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    async fn get_content(&self) -> Result<ContentDocument, StorageError>;

    /// Replace the stored document in full. Concurrent callers are not
    /// coordinated; the last completed write wins.
    async fn update_content(&self, document: &ContentDocument) -> Result<(), StorageError>;

    /// Store an image and return its public path.
    async fn upload_image(&self, file: UploadedFile) -> Result<String, StorageError>;
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: &str, content_type: &str, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnsupportedType(String),
    TooLarge { size: u64, limit: u64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnsupportedType(mime) => write!(
                f,
                "Invalid file type '{}'. Only images are allowed.",
                mime
            ),
            ValidationError::TooLarge { limit, .. } => {
                write!(f, "File too large. Max {}MB.", limit / (1024 * 1024))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug)]
pub enum ReadFailure {
    Missing,
    Io(std::io::Error),
    Parse(serde_json::Error),
}

#[derive(Debug)]
pub struct StorageReadError {
    pub path: PathBuf,
    pub cause: ReadFailure,
}

impl fmt::Display for StorageReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            ReadFailure::Missing => write!(f, "content file {} is missing", self.path.display()),
            ReadFailure::Io(err) => {
                write!(f, "failed to read {}: {}", self.path.display(), err)
            }
            ReadFailure::Parse(err) => {
                write!(f, "failed to parse {}: {}", self.path.display(), err)
            }
        }
    }
}

#[derive(Debug)]
pub enum StorageError {
    Read(StorageReadError),
    Write { path: PathBuf, source: std::io::Error },
    Validation(ValidationError),
}

impl StorageError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Write {
            path: path.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StorageError::Validation(_))
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Read(err) => write!(f, "storage read failed: {}", err),
            StorageError::Write { path, source } => {
                write!(f, "storage write failed for {}: {}", path.display(), source)
            }
            StorageError::Validation(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Read(StorageReadError {
                cause: ReadFailure::Io(err),
                ..
            }) => Some(err),
            StorageError::Read(StorageReadError {
                cause: ReadFailure::Parse(err),
                ..
            }) => Some(err),
            StorageError::Read(_) => None,
            StorageError::Write { source, .. } => Some(source),
            StorageError::Validation(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StorageError {
    fn from(err: ValidationError) -> Self {
        StorageError::Validation(err)
    }
}

impl From<StorageReadError> for StorageError {
    fn from(err: StorageReadError) -> Self {
        StorageError::Read(err)
    }
}
