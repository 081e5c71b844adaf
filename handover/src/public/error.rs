// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::templates::{ErrorPageContext, TemplateEngine, render_minijinja_template};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result};

/// Renders the HTML error pages shared by the public site and the admin pages.
#[derive(Clone)]
pub struct ErrorRenderer {
    app_name: String,
}

impl ErrorRenderer {
    pub fn new(app_name: String) -> Self {
        Self { app_name }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

pub fn serve_404(
    renderer: &ErrorRenderer,
    template_engine: Option<&dyn TemplateEngine>,
) -> Result<HttpResponse> {
    Ok(render_error_page(
        StatusCode::NOT_FOUND,
        "error_404.html",
        renderer.app_name(),
        template_engine,
    ))
}

pub fn serve_500(
    renderer: &ErrorRenderer,
    template_engine: Option<&dyn TemplateEngine>,
) -> Result<HttpResponse> {
    Ok(render_error_page(
        StatusCode::INTERNAL_SERVER_ERROR,
        "error_500.html",
        renderer.app_name(),
        template_engine,
    ))
}

fn render_error_page(
    status: StatusCode,
    template_name: &str,
    app_name: &str,
    template_engine: Option<&dyn TemplateEngine>,
) -> HttpResponse {
    let context = ErrorPageContext::new(app_name).to_value();

    let html = match template_engine {
        Some(engine) => match render_minijinja_template(engine, template_name, context) {
            Ok(html) => html,
            Err(e) => {
                log::error!("Failed to render {} error template: {}", status.as_u16(), e);
                fallback_html(status, app_name)
            }
        },
        None => fallback_html(status, app_name),
    };

    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
        .insert_header(("Pragma", "no-cache"))
        .insert_header(("Expires", "0"))
        .body(html)
}

fn fallback_html(status: StatusCode, app_name: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{code} - {reason} | {app}</title></head>
<body><h1>{code} - {reason}</h1></body></html>"#,
        code = status.as_u16(),
        reason = reason,
        app = escape_text(app_name)
    )
}

fn escape_text(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
