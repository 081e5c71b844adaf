// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{BootstrapError, log_action};
use crate::content::ContentDocument;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Seed the starter document on first run only. After startup a missing
/// document is a read error, never silently recreated.
pub fn ensure_content(content_path: &Path) -> Result<bool, BootstrapError> {
    if content_path.exists() {
        return Ok(false);
    }

    let mut serialized = serde_json::to_string_pretty(&ContentDocument::starter())
        .map_err(|err| BootstrapError::Io(io::Error::other(err)))?;
    serialized.push('\n');

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(content_path)
    {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(BootstrapError::Io(err)),
    };

    file.write_all(serialized.as_bytes())?;
    file.sync_all()?;

    log_action(format!("seeded starter content at {}", content_path.display()));
    Ok(true)
}
