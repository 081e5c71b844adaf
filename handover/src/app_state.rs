// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use std::sync::Arc;

use crate::config::ValidatedConfig;
use crate::content::ContentService;
use crate::public::error::ErrorRenderer;
use crate::runtime_paths::RuntimePaths;
use crate::templates::{MiniJinjaEngine, TemplateEngine};

pub struct AppState {
    pub content: ContentService,
    pub templates: Arc<dyn TemplateEngine>,
    pub error_renderer: ErrorRenderer,
    pub runtime_paths: RuntimePaths,
}

impl AppState {
    pub fn new(app_name: &str, runtime_paths: RuntimePaths, content: ContentService) -> Self {
        Self {
            content,
            templates: Arc::new(MiniJinjaEngine::new()),
            error_renderer: ErrorRenderer::new(app_name.to_string()),
            runtime_paths,
        }
    }

    /// Select the storage backend once and wire it into fresh state.
    pub fn from_config(config: &ValidatedConfig, runtime_paths: RuntimePaths) -> Self {
        let content = ContentService::from_config(config, &runtime_paths);
        Self::new(&config.app.name, runtime_paths, content)
    }
}
