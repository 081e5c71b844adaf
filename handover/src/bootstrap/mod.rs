// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::{Config, ConfigError, ValidatedConfig};
use crate::runtime_paths::RuntimePaths;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod config;
pub mod content;

#[derive(Debug)]
pub struct BootstrapResult {
    pub validated_config: ValidatedConfig,
    pub runtime_paths: RuntimePaths,
    pub created_config: bool,
    pub created_content: bool,
}

#[derive(Debug)]
pub enum BootstrapError {
    Config(ConfigError),
    Io(std::io::Error),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::Config(err) => write!(f, "{}", err),
            BootstrapError::Io(err) => write!(f, "Bootstrap I/O error: {}", err),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BootstrapError::Config(err) => Some(err),
            BootstrapError::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for BootstrapError {
    fn from(err: ConfigError) -> Self {
        BootstrapError::Config(err)
    }
}

impl From<std::io::Error> for BootstrapError {
    fn from(err: std::io::Error) -> Self {
        BootstrapError::Io(err)
    }
}

/// Prepare the runtime root so the server can start: config, seed content
/// and the uploads directory. Existing files are never overwritten.
pub fn bootstrap_runtime(root: &Path) -> Result<BootstrapResult, BootstrapError> {
    let root_path = normalize_root(root)?;

    let created_config = config::ensure_config(&root_path)?;

    let validated_config = Config::load_and_validate(&root_path)?;

    let runtime_paths = RuntimePaths::from_root(&root_path)?;

    let created_content = content::ensure_content(&runtime_paths.content_file)?;

    Ok(BootstrapResult {
        validated_config,
        runtime_paths,
        created_config,
        created_content,
    })
}

fn normalize_root(root: &Path) -> Result<PathBuf, BootstrapError> {
    let root_path = if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root.to_path_buf()
    };

    if root_path.exists() {
        if !root_path.is_dir() {
            return Err(BootstrapError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Runtime root is not a directory: {}", root_path.display()),
            )));
        }
        return Ok(root_path);
    }

    fs::create_dir_all(&root_path)?;
    log_action(format!(
        "created runtime root directory {}",
        root_path.display()
    ));
    Ok(root_path)
}

// Runs before the logger exists, so it writes to stderr directly.
pub(crate) fn log_action(message: impl AsRef<str>) {
    eprintln!("[bootstrap] {}", message.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentDocument;
    use crate::util::test_fixtures::TestFixtureRoot;

    #[test]
    fn bootstrap_creates_defaults_when_missing() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-default").expect("fixture");
        let result = bootstrap_runtime(fixture.path()).expect("bootstrap should succeed");

        assert!(result.created_config);
        assert!(result.created_content);
        assert_eq!(result.validated_config.server.port, config::DEFAULT_PORT);
        assert_eq!(result.validated_config.storage.adapter, "local");
        assert!(result.runtime_paths.uploads_dir.is_dir());

        let raw = fs::read_to_string(fixture.path().join("content.json")).expect("content");
        let document: ContentDocument = serde_json::from_str(&raw).expect("starter parses");
        assert_eq!(document, ContentDocument::starter());
    }

    #[test]
    fn bootstrap_is_idempotent() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-idempotent").expect("fixture");
        bootstrap_runtime(fixture.path()).expect("first run");

        let content_path = fixture.path().join("content.json");
        fs::write(&content_path, "{\"edited\": true}").expect("edit content");
        let config_before = fs::read_to_string(fixture.path().join("config.yaml")).expect("cfg");

        let second = bootstrap_runtime(fixture.path()).expect("second run");
        assert!(!second.created_config);
        assert!(!second.created_content);
        assert_eq!(
            fs::read_to_string(&content_path).expect("content"),
            "{\"edited\": true}"
        );
        assert_eq!(
            fs::read_to_string(fixture.path().join("config.yaml")).expect("cfg"),
            config_before
        );
    }

    #[test]
    fn bootstrap_creates_missing_root() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-nested").expect("fixture");
        let nested = fixture.path().join("site").join("root");
        let result = bootstrap_runtime(&nested).expect("bootstrap");
        assert!(nested.join("config.yaml").is_file());
        assert!(result.runtime_paths.root.is_absolute());
    }

    #[test]
    fn bootstrap_rejects_file_as_root() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-file-root").expect("fixture");
        let file = fixture.path().join("not-a-dir");
        fs::write(&file, "x").expect("file");
        assert!(matches!(
            bootstrap_runtime(&file),
            Err(BootstrapError::Io(_))
        ));
    }

    #[test]
    fn invalid_config_aborts_bootstrap() {
        let fixture = TestFixtureRoot::new_unique("bootstrap-invalid").expect("fixture");
        fs::write(
            fixture.path().join("config.yaml"),
            "server:\n  host: \"127.0.0.1\"\n  port: 0\n",
        )
        .expect("config");
        assert!(matches!(
            bootstrap_runtime(fixture.path()),
            Err(BootstrapError::Config(ConfigError::ValidationError(_)))
        ));
    }
}
