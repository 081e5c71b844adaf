// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;

mod auth;
mod content;
pub mod gate;
mod upload;

pub use gate::{AUTH_COOKIE_MAX_AGE_DAYS, AUTH_COOKIE_NAME, cookie_matches_secret};

/// JSON bodies on the content endpoint can be far larger than form posts.
pub const CONTENT_BODY_LIMIT: usize = 2 * 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/auth", web::post().to(auth::login))
            .route("/auth/logout", web::post().to(auth::logout))
            .service(
                web::resource("/content")
                    .app_data(web::PayloadConfig::new(CONTENT_BODY_LIMIT))
                    .route(web::get().to(content::get_content))
                    .route(web::post().to(content::update_content)),
            )
            .route("/upload", web::post().to(upload::upload_image)),
    );
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Serialize)]
struct SuccessBody {
    success: bool,
}

pub(crate) fn json_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody { error: message })
}

pub(crate) fn json_success() -> HttpResponse {
    HttpResponse::Ok().json(SuccessBody { success: true })
}
