// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, web};
use handover::api::AUTH_COOKIE_NAME;
use handover::app_state::AppState;
use handover::config::{Config, ValidatedConfig};
use handover::content::ContentDocument;
use handover::runtime_paths::RuntimePaths;
use handover::util::test_fixtures::TestFixtureRoot;
use handover::{admin, api, public};
use std::fs;
use std::sync::Arc;

pub const ADMIN_PASSWORD: &str = "admin-password";

const TEST_CONFIG_YAML: &str = r#"server:
  host: "127.0.0.1"
  port: 8081
  workers: 1
app:
  name: "Test App"
"#;

pub struct TestHarness {
    pub fixture: TestFixtureRoot,
    pub config: Arc<ValidatedConfig>,
    pub runtime_paths: RuntimePaths,
    pub app_state: Arc<AppState>,
}

#[derive(Clone)]
pub struct AppBundle {
    pub config: Arc<ValidatedConfig>,
    pub app_state: Arc<AppState>,
    pub runtime_paths: RuntimePaths,
}

impl TestHarness {
    /// Seeded starter content, write gate off.
    pub fn open() -> Self {
        Self::with_config(build_config(false, ADMIN_PASSWORD), true)
    }

    /// Seeded starter content, write gate on.
    pub fn gated() -> Self {
        Self::with_config(build_config(true, ADMIN_PASSWORD), true)
    }

    pub fn with_config(config: ValidatedConfig, seed_content: bool) -> Self {
        let fixture = TestFixtureRoot::new_unique("http-test-suite").expect("fixture root");
        let runtime_paths = fixture.runtime_paths().expect("runtime paths");
        if seed_content {
            write_document(&runtime_paths, &ContentDocument::starter());
        }

        let config = Arc::new(config);
        let app_state = Arc::new(AppState::from_config(&config, runtime_paths.clone()));

        Self {
            fixture,
            config,
            runtime_paths,
            app_state,
        }
    }

    pub fn app_bundle(&self) -> AppBundle {
        AppBundle {
            config: self.config.clone(),
            app_state: self.app_state.clone(),
            runtime_paths: self.runtime_paths.clone(),
        }
    }

    pub fn auth_cookie(&self) -> Cookie<'static> {
        Cookie::new(AUTH_COOKIE_NAME, ADMIN_PASSWORD)
    }

    pub fn stored_document(&self) -> ContentDocument {
        let raw = fs::read_to_string(&self.runtime_paths.content_file).expect("content file");
        serde_json::from_str(&raw).expect("content json")
    }

    pub fn stored_raw(&self) -> String {
        fs::read_to_string(&self.runtime_paths.content_file).expect("content file")
    }

    pub fn write_raw_content(&self, raw: &str) {
        fs::write(&self.runtime_paths.content_file, raw).expect("content file");
    }

    pub fn remove_content(&self) {
        fs::remove_file(&self.runtime_paths.content_file).expect("remove content");
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.runtime_paths.uploads_dir)
            .expect("uploads dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub fn build_config(require_auth: bool, admin_password: &str) -> ValidatedConfig {
    let mut config = Config::from_yaml(TEST_CONFIG_YAML).expect("test config");
    config.auth.require_auth = require_auth;
    config.auth.admin_password = admin_password.to_string();
    config.validate().expect("valid test config")
}

pub fn write_document(runtime_paths: &RuntimePaths, document: &ContentDocument) {
    let raw = serde_json::to_string_pretty(document).expect("serialize");
    fs::write(&runtime_paths.content_file, raw).expect("seed content");
}

pub fn build_test_app(
    bundle: AppBundle,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let runtime_paths = bundle.runtime_paths;

    App::new()
        .app_data(web::Data::from(bundle.config))
        .app_data(web::Data::from(bundle.app_state))
        .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
        .configure(api::configure)
        .configure(admin::configure)
        .configure(move |cfg| public::configure(cfg, &runtime_paths))
        .default_service(web::route().to(public::handlers::not_found))
}

pub const BOUNDARY: &str = "----handover-test-boundary";

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// One file part named `field`.
pub fn multipart_file(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, field, file_name, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}
