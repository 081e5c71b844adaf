// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::gate::{removal_cookie, session_cookie, unauthorized};
use super::json_error;
use crate::config::ValidatedConfig;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    password: String,
}

pub async fn login(
    req: HttpRequest,
    body: web::Bytes,
    config: web::Data<ValidatedConfig>,
) -> HttpResponse {
    let body: LoginRequest = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(err) => {
            log::warn!("Rejected login with malformed body: {}", err);
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_FAILED);
        }
    };

    let secret = config.auth.admin_password.as_str();
    if secret.is_empty() || body.password != secret {
        log::warn!(
            "Failed admin password check from {}",
            req.peer_addr()
                .map(|addr| addr.ip().to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        return unauthorized();
    }

    log::info!("Admin session started");
    HttpResponse::Ok()
        .cookie(session_cookie(secret, config.auth.cookie_secure))
        .json(json!({ "success": true }))
}

pub async fn logout(config: web::Data<ValidatedConfig>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(config.auth.cookie_secure))
        .json(json!({ "success": true }))
}
