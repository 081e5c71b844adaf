// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::{ContentDocument, EditorSection};
use chrono::Datelike;
use minijinja::{Value, context};

#[derive(Debug, Clone)]
pub struct ErrorPageContext {
    app_name: String,
}

impl ErrorPageContext {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name
        }
    }
}

#[derive(Debug, Clone)]
pub struct PublicPageContext<'a> {
    document: &'a ContentDocument,
    year: i32,
}

impl<'a> PublicPageContext<'a> {
    pub fn new(document: &'a ContentDocument) -> Self {
        Self {
            document,
            year: chrono::Utc::now().year(),
        }
    }

    pub fn to_value(&self) -> Value {
        let doc = self.document;
        context! {
            nav_brand => doc.nav_brand(),
            footer_brand => doc.footer_brand(),
            hero => Value::from_serialize(&doc.hero),
            about => Value::from_serialize(&doc.about),
            theme => Value::from_serialize(&doc.theme),
            portfolio => Value::from_serialize(doc.portfolio_items()),
            testimonials => Value::from_serialize(doc.testimonial_items()),
            year => self.year
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminDashboardContext {
    app_name: String,
    sections: Vec<EditorSection>,
    document_json: String,
    auth_provider: String,
    show_sign_out: bool,
}

impl AdminDashboardContext {
    pub fn new(
        app_name: &str,
        document: &ContentDocument,
        auth_provider: &str,
        show_sign_out: bool,
    ) -> Self {
        let document_json = serde_json::to_string(document).unwrap_or_else(|_| "{}".to_string());
        Self {
            app_name: app_name.to_string(),
            sections: document.editor_sections(),
            document_json: script_safe_json(&document_json),
            auth_provider: auth_provider.to_string(),
            show_sign_out,
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name,
            sections => Value::from_serialize(&self.sections),
            document_json => &self.document_json,
            auth_provider => &self.auth_provider,
            show_sign_out => self.show_sign_out
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginPageContext {
    app_name: String,
}

impl LoginPageContext {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        context! {
            app_name => &self.app_name
        }
    }
}

/// JSON that can sit inside a `<script>` element without closing it.
fn script_safe_json(raw: &str) -> String {
    raw.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
