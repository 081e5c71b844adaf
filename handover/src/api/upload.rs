// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::gate::require_write_access;
use super::json_error;
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::storage::{MAX_UPLOAD_BYTES, UploadedFile, ValidationError};
use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use futures_util::future::ready;
use futures_util::stream::once;
use serde_json::json;
use std::fmt;

/// Room for boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;
const FILE_FIELD: &str = "file";
const UNNAMED_FILE: &str = "upload";

#[derive(Debug)]
enum UploadRequestError {
    NotMultipart,
    TooLarge(u64),
    Payload(actix_web::error::PayloadError),
    Multipart(multer::Error),
    MissingFile,
}

impl fmt::Display for UploadRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadRequestError::NotMultipart => write!(f, "Expected multipart/form-data"),
            UploadRequestError::TooLarge(size) => write!(
                f,
                "{}",
                ValidationError::TooLarge {
                    size: *size,
                    limit: MAX_UPLOAD_BYTES
                }
            ),
            UploadRequestError::Payload(err) => write!(f, "Failed to read upload: {}", err),
            UploadRequestError::Multipart(err) => write!(f, "Malformed upload: {}", err),
            UploadRequestError::MissingFile => write!(f, "No file uploaded"),
        }
    }
}

impl From<actix_web::error::PayloadError> for UploadRequestError {
    fn from(err: actix_web::error::PayloadError) -> Self {
        UploadRequestError::Payload(err)
    }
}

impl From<multer::Error> for UploadRequestError {
    fn from(err: multer::Error) -> Self {
        UploadRequestError::Multipart(err)
    }
}

pub async fn upload_image(
    req: HttpRequest,
    payload: web::Payload,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    if let Err(response) = require_write_access(&req, &config) {
        return response;
    }

    let file = match read_upload(&req, payload).await {
        Ok(file) => file,
        Err(err) => {
            log::warn!("Upload rejected: {}", err);
            return json_error(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    match app_state.content.upload_image(file).await {
        Ok(url) => HttpResponse::Ok().json(json!({ "url": url })),
        Err(err) if err.is_validation() => json_error(StatusCode::BAD_REQUEST, &err.to_string()),
        Err(err) => {
            log::error!("Upload failed: {}", err);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

async fn read_upload(
    req: &HttpRequest,
    payload: web::Payload,
) -> Result<UploadedFile, UploadRequestError> {
    let boundary = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| multer::parse_boundary(value).ok())
        .ok_or(UploadRequestError::NotMultipart)?;

    let cap = MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES;
    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());
    if let Some(length) = declared.filter(|length| *length > cap) {
        return Err(UploadRequestError::TooLarge(length));
    }

    let body = read_body_capped(payload, cap).await?;
    extract_file_field(body, boundary).await
}

/// Stop reading as soon as the body passes `cap`.
async fn read_body_capped(
    mut payload: web::Payload,
    cap: u64,
) -> Result<web::Bytes, UploadRequestError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        let size = (body.len() + chunk.len()) as u64;
        if size > cap {
            return Err(UploadRequestError::TooLarge(size));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

async fn extract_file_field(
    body: web::Bytes,
    boundary: String,
) -> Result<UploadedFile, UploadRequestError> {
    let stream = once(ready(Ok::<_, std::io::Error>(body)));
    let mut multipart = multer::Multipart::new(stream, boundary);

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_FILE)
            .to_string();
        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();
        let bytes = field.bytes().await?;
        return Ok(UploadedFile::new(&file_name, &content_type, bytes));
    }

    Err(UploadRequestError::MissingFile)
}
