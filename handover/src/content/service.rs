// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::ContentDocument;
use crate::config::ValidatedConfig;
use crate::runtime_paths::RuntimePaths;
use crate::storage::{LocalAdapter, StorageAdapter, StorageError, UploadedFile};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
}

impl StorageBackend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" => Some(StorageBackend::Local),
            _ => None,
        }
    }

    /// Unrecognized values fall back to `Local` with a warning.
    pub fn resolve(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            log::warn!(
                "Unknown storage adapter '{}', falling back to local storage",
                raw
            );
            StorageBackend::Local
        })
    }
}

/// Entry point for everything that reads or writes site content. Built once
/// at startup and shared through the app state.
#[derive(Clone)]
pub struct ContentService {
    adapter: Arc<dyn StorageAdapter>,
}

impl ContentService {
    pub fn from_config(config: &ValidatedConfig, runtime_paths: &RuntimePaths) -> Self {
        let adapter: Arc<dyn StorageAdapter> = match StorageBackend::resolve(&config.storage.adapter)
        {
            StorageBackend::Local => Arc::new(LocalAdapter::from_runtime_paths(
                runtime_paths,
                config.storage.timestamp_prefix,
            )),
        };
        Self::with_adapter(adapter)
    }

    pub fn with_adapter(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self { adapter }
    }

    pub fn backend_name(&self) -> &'static str {
        self.adapter.name()
    }

    pub async fn get_content(&self) -> Result<ContentDocument, StorageError> {
        self.adapter.get_content().await
    }

    pub async fn update_content(&self, document: &ContentDocument) -> Result<(), StorageError> {
        self.adapter.update_content(document).await
    }

    pub async fn upload_image(&self, file: UploadedFile) -> Result<String, StorageError> {
        self.adapter.upload_image(file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::util::test_fixtures::TestFixtureRoot;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MemoryAdapter {
        document: Mutex<Option<ContentDocument>>,
    }

    #[async_trait]
    impl StorageAdapter for MemoryAdapter {
        fn name(&self) -> &'static str {
            "memory"
        }

        async fn get_content(&self) -> Result<ContentDocument, StorageError> {
            self.document
                .lock()
                .expect("lock")
                .clone()
                .ok_or_else(|| {
                    StorageError::Read(crate::storage::StorageReadError {
                        path: "memory".into(),
                        cause: crate::storage::ReadFailure::Missing,
                    })
                })
        }

        async fn update_content(&self, document: &ContentDocument) -> Result<(), StorageError> {
            *self.document.lock().expect("lock") = Some(document.clone());
            Ok(())
        }

        async fn upload_image(&self, file: UploadedFile) -> Result<String, StorageError> {
            Ok(format!("/memory/{}", file.file_name))
        }
    }

    fn config_with_adapter(adapter: &str) -> ValidatedConfig {
        let yaml = format!(
            "server:\n  host: \"127.0.0.1\"\n  port: 3000\nstorage:\n  adapter: \"{}\"\n",
            adapter
        );
        Config::from_yaml(&yaml)
            .expect("parse")
            .validate()
            .expect("validate")
    }

    #[test]
    fn backend_parse_recognizes_local_only() {
        assert_eq!(StorageBackend::parse("local"), Some(StorageBackend::Local));
        assert_eq!(StorageBackend::parse(" LOCAL "), Some(StorageBackend::Local));
        assert_eq!(StorageBackend::parse("s3"), None);
    }

    #[test]
    fn unknown_backend_falls_back_to_local() {
        assert_eq!(StorageBackend::resolve("gcs"), StorageBackend::Local);

        let fixture = TestFixtureRoot::new_unique("service-fallback").expect("fixture");
        let paths = fixture.runtime_paths().expect("paths");
        let service = ContentService::from_config(&config_with_adapter("s3"), &paths);
        assert_eq!(service.backend_name(), "local");
    }

    #[actix_web::test]
    async fn service_delegates_to_adapter() {
        let service = ContentService::with_adapter(Arc::new(MemoryAdapter {
            document: Mutex::new(None),
        }));
        assert!(service.get_content().await.is_err());

        let doc = ContentDocument::starter();
        service.update_content(&doc).await.expect("update");
        assert_eq!(service.get_content().await.expect("get"), doc);

        let url = service
            .upload_image(UploadedFile::new("a.png", "image/png", Vec::new()))
            .await
            .expect("upload");
        assert_eq!(url, "/memory/a.png");
        assert_eq!(service.backend_name(), "memory");
    }

    #[actix_web::test]
    async fn local_service_reads_what_it_writes() {
        let fixture = TestFixtureRoot::new_unique("service-local").expect("fixture");
        let paths = fixture.runtime_paths().expect("paths");
        let service = ContentService::from_config(&config_with_adapter("local"), &paths);

        let mut doc = ContentDocument::starter();
        doc.brand_name = "Studio".to_string().into();
        service.update_content(&doc).await.expect("update");
        assert_eq!(service.get_content().await.expect("get"), doc);
    }
}
