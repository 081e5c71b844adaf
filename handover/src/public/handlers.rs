// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::error;
use crate::app_state::AppState;
use crate::templates::{PublicPageContext, render_minijinja_template};
use actix_web::{HttpResponse, Result, web};
use log::debug;

const PUBLIC_PAGE_TEMPLATE: &str = "public/page.html";

pub async fn index(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    let document = match app_state.content.get_content().await {
        Ok(document) => document,
        Err(err) => {
            log::error!("Cannot render public page: {}", err);
            return error::serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            );
        }
    };

    let context = PublicPageContext::new(&document).to_value();
    match render_minijinja_template(
        app_state.templates.as_ref(),
        PUBLIC_PAGE_TEMPLATE,
        context,
    ) {
        Ok(html) => {
            debug!("Rendered public page ({} bytes)", html.len());
            Ok(HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .insert_header(("Cache-Control", "no-cache"))
                .body(html))
        }
        Err(err) => {
            log::error!("Failed to render {}: {}", PUBLIC_PAGE_TEMPLATE, err);
            error::serve_500(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            )
        }
    }
}

pub async fn not_found(app_state: web::Data<AppState>) -> Result<HttpResponse> {
    error::serve_404(
        &app_state.error_renderer,
        Some(app_state.templates.as_ref()),
    )
}
