// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{ADMIN_LOGIN_PATH, ADMIN_PATH};
use crate::api::gate;
use crate::app_state::AppState;
use crate::config::{AuthProvider, ValidatedConfig};
use crate::public::error;
use crate::templates::{AdminDashboardContext, LoginPageContext, render_minijinja_template};
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use minijinja::Value;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(ADMIN_PATH)
            .route("", web::get().to(dashboard))
            .route("/", web::get().to(dashboard))
            .route("/login", web::get().to(login_page)),
    );
}

async fn dashboard(
    req: HttpRequest,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !gate::is_authorized(&req, &config) {
        return Ok(HttpResponse::Found()
            .insert_header((LOCATION, ADMIN_LOGIN_PATH))
            .finish());
    }

    let document = match app_state.content.get_content().await {
        Ok(document) => document,
        Err(err) => {
            log::error!("Cannot render admin dashboard: {}", err);
            return error::serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            );
        }
    };

    let show_sign_out =
        config.write_gate_enabled() && config.auth_provider == AuthProvider::Password;
    let context = AdminDashboardContext::new(
        &config.app.name,
        &document,
        config.auth_provider.name(),
        show_sign_out,
    )
    .to_value();

    render_page(&app_state, "admin/dashboard.html", context)
}

async fn login_page(
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let context = LoginPageContext::new(&config.app.name).to_value();
    render_page(&app_state, "admin/login.html", context)
}

fn render_page(app_state: &AppState, template_name: &str, context: Value) -> Result<HttpResponse> {
    match render_minijinja_template(app_state.templates.as_ref(), template_name, context) {
        Ok(html) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
            .body(html)),
        Err(err) => {
            log::error!("Failed to render {}: {}", template_name, err);
            error::serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            )
        }
    }
}
