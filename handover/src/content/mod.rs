// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod document;
pub mod editor;
pub mod service;

pub use document::{
    About, ContentDocument, Hero, Identified, Nullable, PortfolioItem, Testimonial, Theme,
    find_by_id, position_by_id,
};
pub use editor::{EditorField, EditorItem, EditorSection, EditorWidget};
pub use service::{ContentService, StorageBackend};
