// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const ENV_REQUIRE_AUTH: &str = "REQUIRE_AUTH";
pub const ENV_ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";
pub const ENV_STORAGE_ADAPTER: &str = "STORAGE_ADAPTER";
pub const ENV_AUTH_PROVIDER: &str = "AUTH_PROVIDER";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug)]
pub enum ConfigError {
    LoadError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadError(msg) => write!(f, "Configuration load error: {}", msg),
            ConfigError::ValidationError(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_workers() -> usize {
    4
}

impl ServerConfig {
    pub fn address_tuple(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            description: None,
        }
    }
}

fn default_app_name() -> String {
    "Handover".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub require_auth: bool,
    #[serde(default)]
    pub admin_password: String,
    #[serde(default = "default_auth_provider")]
    pub provider: String,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_auth: false,
            admin_password: String::new(),
            provider: default_auth_provider(),
            cookie_secure: false,
        }
    }
}

fn default_auth_provider() -> String {
    "password".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_adapter")]
    pub adapter: String,
    #[serde(default = "default_timestamp_prefix")]
    pub timestamp_prefix: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            adapter: default_storage_adapter(),
            timestamp_prefix: default_timestamp_prefix(),
        }
    }
}

fn default_storage_adapter() -> String {
    "local".to_string()
}

fn default_timestamp_prefix() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Identity provider shown to admins. Only `Password` participates in the
/// write gate; any other value is carried through for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthProvider {
    Password,
    External(String),
}

impl AuthProvider {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("password") {
            AuthProvider::Password
        } else {
            AuthProvider::External(trimmed.to_ascii_lowercase())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AuthProvider::Password => "password",
            AuthProvider::External(name) => name.as_str(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub auth_provider: AuthProvider,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config_path = root.join("config.yaml");
        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ConfigError::LoadError(format!(
                "Failed to read '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_yaml(&config_content)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(raw)
            .map_err(|e| ConfigError::LoadError(format!("Failed to parse config.yaml: {}", e)))
    }

    pub fn load_and_validate(root: &Path) -> Result<ValidatedConfig, ConfigError> {
        let mut config = Self::load(root)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()
    }

    /// Layer the process environment on top of the file values.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_REQUIRE_AUTH) {
            self.auth.require_auth = value == "true";
        }
        if let Some(value) = lookup(ENV_ADMIN_PASSWORD) {
            self.auth.admin_password = value;
        }
        if let Some(value) = lookup(ENV_STORAGE_ADAPTER) {
            self.storage.adapter = value;
        }
        if let Some(value) = lookup(ENV_AUTH_PROVIDER) {
            self.auth.provider = value;
        }
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than zero".to_string(),
            ));
        }
        if self.server.workers == 0 {
            return Err(ConfigError::ValidationError(
                "server.workers must be at least 1".to_string(),
            ));
        }
        if self.auth.require_auth && self.auth.admin_password.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "auth.require_auth is enabled but no admin password is set (config auth.admin_password or {})",
                ENV_ADMIN_PASSWORD
            )));
        }
        Self::validate_logging(&self.logging)?;

        let auth_provider = AuthProvider::parse(&self.auth.provider);

        Ok(ValidatedConfig {
            server: self.server,
            app: self.app,
            auth: self.auth,
            auth_provider,
            storage: self.storage,
            logging: self.logging,
        })
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
        let level = logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                logging.level
            )));
        }
        Ok(())
    }
}

impl ValidatedConfig {
    /// True when writes must present the admin cookie.
    pub fn write_gate_enabled(&self) -> bool {
        self.auth.require_auth
    }
}
