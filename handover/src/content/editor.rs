// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

//! Form tree for the admin dashboard.
//!
//! Each top-level key of a [`ContentDocument`] becomes exactly one
//! [`EditorSection`]. The variant is decided here, once, so templates switch
//! on `kind` instead of probing value shapes.

use super::document::{ContentDocument, Identified, Nullable};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorWidget {
    Text,
    TextArea,
    Color,
    Image,
}

impl EditorWidget {
    pub fn for_key(key: &str) -> Self {
        if key.ends_with("_color") {
            EditorWidget::Color
        } else if key == "image" || key.ends_with("_image") {
            EditorWidget::Image
        } else if key == "text" || key == "quote" {
            EditorWidget::TextArea
        } else {
            EditorWidget::Text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorField {
    /// Slash-separated location inside the document, e.g. `/portfolio/0/title`.
    pub path: String,
    pub key: String,
    pub label: String,
    pub value: String,
    pub widget: EditorWidget,
    /// Set when the stored value is not a string and is shown as JSON.
    pub raw_json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorItem {
    pub id: String,
    pub fields: Vec<EditorField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditorSection {
    KeyedSection {
        name: String,
        label: String,
        fields: Vec<EditorField>,
    },
    ItemList {
        name: String,
        label: String,
        items: Vec<EditorItem>,
    },
    ScalarField {
        name: String,
        label: String,
        field: EditorField,
    },
}

impl EditorSection {
    pub fn name(&self) -> &str {
        match self {
            EditorSection::KeyedSection { name, .. }
            | EditorSection::ItemList { name, .. }
            | EditorSection::ScalarField { name, .. } => name.as_str(),
        }
    }

    /// Classify an untyped value by its JSON shape.
    pub fn from_value(name: &str, value: &Value) -> Self {
        match value {
            Value::Object(map) => EditorSection::KeyedSection {
                name: name.to_string(),
                label: humanize(name),
                fields: object_fields(&format!("/{}", name), map),
            },
            Value::Array(entries) => EditorSection::ItemList {
                name: name.to_string(),
                label: humanize(name),
                items: entries
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| value_item(&format!("/{}/{}", name, index), index, entry))
                    .collect(),
            },
            other => EditorSection::ScalarField {
                name: name.to_string(),
                label: humanize(name),
                field: field(&format!("/{}", name), name, other),
            },
        }
    }
}

impl ContentDocument {
    pub fn editor_sections(&self) -> Vec<EditorSection> {
        let mut sections = Vec::new();

        let brand_value = match &self.brand_name {
            Nullable::Null => Value::Null,
            other => Value::String(other.as_deref().unwrap_or_default().to_string()),
        };
        sections.push(EditorSection::ScalarField {
            name: "brand_name".to_string(),
            label: humanize("brand_name"),
            field: field("/brand_name", "brand_name", &brand_value),
        });

        for (name, value) in [
            ("hero", to_value(&self.hero)),
            ("about", to_value(&self.about)),
            ("theme", to_value(&self.theme)),
        ] {
            sections.push(EditorSection::from_value(name, &value));
        }

        sections.push(item_list("portfolio", self.portfolio_items()));
        sections.push(item_list("testimonials", self.testimonial_items()));

        for (name, value) in &self.extra {
            sections.push(EditorSection::from_value(name, value));
        }

        sections
    }
}

fn item_list<T>(name: &str, items: &[T]) -> EditorSection
where
    T: Identified + Serialize,
{
    EditorSection::ItemList {
        name: name.to_string(),
        label: humanize(name),
        items: items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let prefix = format!("/{}/{}", name, index);
                let fields = match to_value(item) {
                    Value::Object(map) => object_fields(&prefix, &map),
                    _ => Vec::new(),
                };
                EditorItem {
                    id: item.id().to_string(),
                    fields,
                }
            })
            .collect(),
    }
}

fn value_item(prefix: &str, index: usize, entry: &Value) -> EditorItem {
    match entry {
        Value::Object(map) => EditorItem {
            id: map
                .get("id")
                .map(value_text)
                .unwrap_or_else(|| index.to_string()),
            fields: object_fields(prefix, map),
        },
        other => EditorItem {
            id: index.to_string(),
            fields: vec![field(prefix, "value", other)],
        },
    }
}

fn object_fields(prefix: &str, map: &Map<String, Value>) -> Vec<EditorField> {
    map.iter()
        .map(|(key, value)| field(&format!("{}/{}", prefix, key), key, value))
        .collect()
}

fn field(path: &str, key: &str, value: &Value) -> EditorField {
    EditorField {
        path: path.to_string(),
        key: key.to_string(),
        label: humanize(key),
        value: value_text(value),
        widget: EditorWidget::for_key(key),
        raw_json: !matches!(value, Value::String(_)),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn to_value<T: Serialize>(section: &T) -> Value {
    serde_json::to_value(section).unwrap_or(Value::Null)
}

/// `cta_text` -> `Cta text`
pub fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section<'a>(sections: &'a [EditorSection], name: &str) -> &'a EditorSection {
        sections
            .iter()
            .find(|section| section.name() == name)
            .expect("section present")
    }

    #[test]
    fn declared_sections_have_fixed_kinds() {
        let sections = ContentDocument::starter().editor_sections();
        assert!(matches!(
            section(&sections, "hero"),
            EditorSection::KeyedSection { .. }
        ));
        assert!(matches!(
            section(&sections, "portfolio"),
            EditorSection::ItemList { .. }
        ));
        assert!(matches!(
            section(&sections, "brand_name"),
            EditorSection::ScalarField { .. }
        ));
    }

    #[test]
    fn extra_keys_are_classified_by_shape() {
        let mut doc = ContentDocument::starter();
        doc.extra.insert("services".to_string(), json!({"title": "S"}));
        doc.extra
            .insert("faq".to_string(), json!([{"id": "q1", "question": "Why?"}]));
        doc.extra.insert("footer_note".to_string(), json!("hi"));
        let sections = doc.editor_sections();

        assert!(matches!(
            section(&sections, "services"),
            EditorSection::KeyedSection { .. }
        ));
        match section(&sections, "faq") {
            EditorSection::ItemList { items, .. } => {
                assert_eq!(items[0].id, "q1");
                assert_eq!(items[0].fields[1].path, "/faq/0/question");
            }
            other => panic!("unexpected section {:?}", other),
        }
        match section(&sections, "footer_note") {
            EditorSection::ScalarField { field, .. } => assert_eq!(field.value, "hi"),
            other => panic!("unexpected section {:?}", other),
        }
    }

    #[test]
    fn widgets_follow_key_names() {
        assert_eq!(EditorWidget::for_key("primary_color"), EditorWidget::Color);
        assert_eq!(EditorWidget::for_key("image"), EditorWidget::Image);
        assert_eq!(EditorWidget::for_key("cover_image"), EditorWidget::Image);
        assert_eq!(EditorWidget::for_key("quote"), EditorWidget::TextArea);
        assert_eq!(EditorWidget::for_key("title"), EditorWidget::Text);
    }

    #[test]
    fn item_fields_carry_positional_paths_and_ids() {
        let sections = ContentDocument::starter().editor_sections();
        match section(&sections, "testimonials") {
            EditorSection::ItemList { items, .. } => {
                assert_eq!(items[0].id, "1");
                assert!(
                    items[0]
                        .fields
                        .iter()
                        .any(|field| field.path == "/testimonials/0/quote"
                            && field.widget == EditorWidget::TextArea)
                );
            }
            other => panic!("unexpected section {:?}", other),
        }
    }

    #[test]
    fn non_string_values_are_marked_raw() {
        let section = EditorSection::from_value("stats", &json!({"count": 3}));
        match section {
            EditorSection::KeyedSection { fields, .. } => {
                assert_eq!(fields[0].value, "3");
                assert!(fields[0].raw_json);
            }
            other => panic!("unexpected section {:?}", other),
        }
    }

    #[test]
    fn null_brand_name_is_edited_as_raw_json() {
        let mut doc = ContentDocument::starter();
        doc.brand_name = Nullable::Null;
        match section(&doc.editor_sections(), "brand_name") {
            EditorSection::ScalarField { field, .. } => {
                assert_eq!(field.value, "null");
                assert!(field.raw_json);
            }
            other => panic!("unexpected section {:?}", other),
        }
    }

    #[test]
    fn humanize_capitalizes_first_word() {
        assert_eq!(humanize("cta_text"), "Cta text");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn sections_serialize_with_kind_tag() {
        let value = serde_json::to_value(EditorSection::from_value("note", &json!("x")))
            .expect("serialize");
        assert_eq!(value["kind"], "scalar_field");
    }
}
