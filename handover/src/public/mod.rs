// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::runtime_paths::{RuntimePaths, UPLOADS_URL_PREFIX};
use actix_files::Files;
use actix_web::web;

pub mod error;
pub mod handlers;

/// Public page plus the uploaded assets it links to.
pub fn configure(cfg: &mut web::ServiceConfig, runtime_paths: &RuntimePaths) {
    cfg.service(
        Files::new(UPLOADS_URL_PREFIX, runtime_paths.uploads_dir.clone())
            .use_last_modified(true)
            .prefer_utf8(true),
    )
    .route("/", web::get().to(handlers::index));
}
