// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::gate::require_write_access;
use super::{json_error, json_success};
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::content::ContentDocument;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};

const FETCH_FAILED: &str = "Failed to fetch content";
const UPDATE_FAILED: &str = "Failed to update content";

pub async fn get_content(app_state: web::Data<AppState>) -> HttpResponse {
    match app_state.content.get_content().await {
        Ok(document) => HttpResponse::Ok().json(document),
        Err(err) => {
            log::error!("GET /api/content failed: {}", err);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
        }
    }
}

/// Replaces the stored document with the request body. Nothing is merged.
pub async fn update_content(
    req: HttpRequest,
    body: web::Bytes,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    if let Err(response) = require_write_access(&req, &config) {
        return response;
    }

    let document: ContentDocument = match serde_json::from_slice(&body) {
        Ok(document) => document,
        Err(err) => {
            log::warn!("Rejected content update with malformed body: {}", err);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED);
        }
    };

    match app_state.content.update_content(&document).await {
        Ok(()) => {
            log::info!("Content document replaced ({} bytes)", body.len());
            json_success()
        }
        Err(err) => {
            log::error!("POST /api/content failed: {}", err);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED)
        }
    }
}
