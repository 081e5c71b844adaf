// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Password gate shared by the write endpoints and the admin pages.
//!
//! The session cookie holds the configured password verbatim and is compared
//! with plain string equality. There is no server-side session.

use super::json_error;
use crate::config::ValidatedConfig;
use actix_web::cookie::time::{Duration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};

pub const AUTH_COOKIE_NAME: &str = "auth";
pub const AUTH_COOKIE_MAX_AGE_DAYS: i64 = 7;

/// An empty secret never matches, even an empty cookie.
pub fn cookie_matches_secret(req: &HttpRequest, secret: &str) -> bool {
    if secret.is_empty() {
        return false;
    }
    req.cookie(AUTH_COOKIE_NAME)
        .map(|cookie| cookie.value() == secret)
        .unwrap_or(false)
}

/// True when the request may see admin-only pages or perform writes.
pub fn is_authorized(req: &HttpRequest, config: &ValidatedConfig) -> bool {
    !config.write_gate_enabled() || cookie_matches_secret(req, &config.auth.admin_password)
}

pub fn require_write_access(
    req: &HttpRequest,
    config: &ValidatedConfig,
) -> Result<(), HttpResponse> {
    if is_authorized(req, config) {
        return Ok(());
    }
    log::warn!(
        "Rejected {} {} without a valid admin cookie",
        req.method(),
        req.path()
    );
    Err(unauthorized())
}

pub fn unauthorized() -> HttpResponse {
    json_error(StatusCode::UNAUTHORIZED, "Unauthorized")
}

pub fn session_cookie(secret: &str, secure: bool) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE_NAME, secret.to_string())
        .path("/")
        .secure(secure)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(AUTH_COOKIE_MAX_AGE_DAYS))
        .finish()
}

pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE_NAME, "")
        .path("/")
        .secure(secure)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(0))
        .expires(OffsetDateTime::UNIX_EPOCH)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use actix_web::test::TestRequest;

    fn config(require_auth: bool, password: &str) -> ValidatedConfig {
        let mut config = Config::from_yaml("server:\n  host: \"127.0.0.1\"\n  port: 3000\n")
            .expect("yaml");
        config.auth.require_auth = require_auth;
        config.auth.admin_password = password.to_string();
        config.validate().expect("valid")
    }

    #[test]
    fn gate_off_allows_anonymous_writes() {
        let req = TestRequest::default().to_http_request();
        assert!(is_authorized(&req, &config(false, "")));
    }

    #[test]
    fn gate_on_requires_exact_cookie() {
        let config = config(true, "s3cret");
        let anonymous = TestRequest::default().to_http_request();
        assert!(!is_authorized(&anonymous, &config));

        let wrong = TestRequest::default()
            .cookie(Cookie::new(AUTH_COOKIE_NAME, "S3CRET"))
            .to_http_request();
        assert!(!is_authorized(&wrong, &config));

        let right = TestRequest::default()
            .cookie(Cookie::new(AUTH_COOKIE_NAME, "s3cret"))
            .to_http_request();
        assert!(is_authorized(&right, &config));
    }

    #[test]
    fn empty_secret_never_matches() {
        let req = TestRequest::default()
            .cookie(Cookie::new(AUTH_COOKIE_NAME, ""))
            .to_http_request();
        assert!(!cookie_matches_secret(&req, ""));
    }

    #[test]
    fn session_cookie_lasts_a_week() {
        let cookie = session_cookie("pw", false);
        assert_eq!(cookie.value(), "pw");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::days(7)));
        assert_eq!(removal_cookie(true).max_age(), Some(Duration::ZERO));
    }
}
