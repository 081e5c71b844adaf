use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub const DEFAULT_NAV_BRAND: &str = "AGENCY.";
pub const DEFAULT_FOOTER_BRAND: &str = "Agency";

/// An optional declared key that remembers whether it was missing or `null`.
///
/// Fields of this type use `#[serde(default, skip_serializing_if =
/// "Nullable::is_absent")]`, so a document is written back with exactly the
/// keys it was read with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nullable<T> {
    Absent,
    Null,
    Set(T),
}

impl<T> Nullable<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Nullable::Absent)
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Nullable::Set(value) => Some(value),
            Nullable::Absent | Nullable::Null => None,
        }
    }
}

impl Nullable<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.get().map(String::as_str)
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Absent
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Nullable::Set(value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Set(value) => serializer.serialize_some(value),
            Nullable::Absent | Nullable::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Nullable::Set(value),
            None => Nullable::Null,
        })
    }
}

/// The whole editable site. Stored and replaced as one unit.
///
/// Keys outside the declared sections land in `extra` and are written back
/// untouched. On write the declared sections come first, in the order below,
/// followed by `extra` in the order it was read; a document that put custom
/// keys ahead of `hero` is stored with its keys reordered but deep-equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub hero: Hero,
    pub about: About,
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub brand_name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub portfolio: Nullable<Vec<PortfolioItem>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub testimonials: Nullable<Vec<Testimonial>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub cta_link: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub image: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub background_color: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct About {
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub background_color: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Colours are free-form: hex strings or the literal `transparent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub title: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub category: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub image: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub quote: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub author: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub role: Nullable<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Records inside an item list. Matching uses `id`, never position.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for PortfolioItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Testimonial {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn position_by_id<T: Identified>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

pub fn find_by_id<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

impl ContentDocument {
    pub fn nav_brand(&self) -> &str {
        non_empty(self.brand_name.as_deref()).unwrap_or(DEFAULT_NAV_BRAND)
    }

    pub fn footer_brand(&self) -> &str {
        non_empty(self.brand_name.as_deref()).unwrap_or(DEFAULT_FOOTER_BRAND)
    }

    pub fn portfolio_items(&self) -> &[PortfolioItem] {
        self.portfolio.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn testimonial_items(&self) -> &[Testimonial] {
        self.testimonials.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Starter document written by bootstrap when a runtime root has none.
    pub fn starter() -> Self {
        Self {
            hero: Hero {
                title: "We build brands that move.".to_string(),
                subtitle: "A small studio for strategy, identity and web.".to_string(),
                cta_text: "Start a project".to_string(),
                cta_link: "#contact".to_string(),
                image: Nullable::Set(String::new()),
                background_color: "transparent".to_string().into(),
                extra: Map::new(),
            },
            about: About {
                title: "About us".to_string(),
                text: "We are a handful of designers and engineers who care about craft."
                    .to_string(),
                background_color: "transparent".to_string().into(),
                extra: Map::new(),
            },
            theme: Theme {
                primary_color: "#111111".to_string(),
                secondary_color: "#2563eb".to_string(),
                background_color: "#ffffff".to_string(),
                text_color: "#111111".to_string(),
                extra: Map::new(),
            },
            brand_name: "AGENCY.".to_string().into(),
            portfolio: Nullable::Set(vec![PortfolioItem {
                id: "1".to_string(),
                title: "First project".to_string().into(),
                category: "Branding".to_string().into(),
                image: Nullable::Set(String::new()),
                extra: Map::new(),
            }]),
            testimonials: Nullable::Set(vec![Testimonial {
                id: "1".to_string(),
                quote: "They understood what we needed before we did."
                    .to_string()
                    .into(),
                author: "A. Client".to_string().into(),
                role: "Founder".to_string().into(),
                extra: Map::new(),
            }]),
            extra: Map::new(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> Value {
        json!({
            "hero": {
                "title": "Hello",
                "subtitle": "World",
                "cta_text": "Go",
                "cta_link": "#contact",
                "image": "/uploads/1-hero.png",
                "background_color": "transparent",
                "overlay": 0.4
            },
            "about": { "title": "About", "text": "Text" },
            "theme": {
                "primary_color": "#000000",
                "secondary_color": "#ff0000",
                "background_color": "#ffffff",
                "text_color": "#111111",
                "accent_color": "#00ff00"
            },
            "brand_name": "ACME",
            "portfolio": [
                { "id": "p1", "title": "One", "category": "Web", "image": "/a.png", "year": 2024 }
            ],
            "testimonials": [
                { "id": "t1", "quote": "Great", "author": "Ann", "role": "CEO" }
            ],
            "services": { "title": "Services", "items": ["a", "b"] },
            "footer_note": "Made with care"
        })
    }

    #[test]
    fn unknown_keys_survive_round_trip() {
        let raw = sample_json();
        let doc: ContentDocument = serde_json::from_value(raw.clone()).expect("parse");
        assert!(doc.extra.contains_key("services"));
        assert!(doc.hero.extra.contains_key("overlay"));
        assert!(doc.theme.extra.contains_key("accent_color"));

        let back = serde_json::to_value(&doc).expect("serialize");
        assert_eq!(back, raw);
    }

    #[test]
    fn null_optional_keys_survive_round_trip() {
        let mut raw = sample_json();
        raw["brand_name"] = Value::Null;
        raw["hero"]["background_color"] = Value::Null;
        raw["about"]["background_color"] = Value::Null;
        raw["testimonials"] = Value::Null;

        let doc: ContentDocument = serde_json::from_value(raw.clone()).expect("parse");
        assert_eq!(doc.brand_name, Nullable::Null);
        assert_eq!(doc.nav_brand(), DEFAULT_NAV_BRAND);
        assert!(doc.testimonial_items().is_empty());
        assert_eq!(serde_json::to_value(&doc).expect("serialize"), raw);
    }

    #[test]
    fn sparse_items_are_written_back_without_added_keys() {
        let mut raw = sample_json();
        raw["portfolio"] = json!([{ "id": "p1", "title": "x" }]);
        raw["testimonials"] = json!([{ "id": "t1", "quote": null }]);

        let doc: ContentDocument = serde_json::from_value(raw.clone()).expect("parse");
        let item = &doc.portfolio_items()[0];
        assert!(item.category.is_absent());
        assert!(item.image.is_absent());
        assert_eq!(doc.testimonial_items()[0].quote, Nullable::Null);
        assert_eq!(serde_json::to_value(&doc).expect("serialize"), raw);
    }

    #[test]
    fn hero_image_may_be_missing_or_null() {
        let mut raw = sample_json();
        raw["hero"]
            .as_object_mut()
            .expect("hero")
            .remove("image");
        let doc: ContentDocument = serde_json::from_value(raw.clone()).expect("parse");
        assert!(doc.hero.image.is_absent());
        assert_eq!(serde_json::to_value(&doc).expect("serialize"), raw);

        raw["hero"]["image"] = Value::Null;
        let doc: ContentDocument = serde_json::from_value(raw.clone()).expect("parse");
        assert_eq!(doc.hero.image.as_deref(), None);
        assert_eq!(serde_json::to_value(&doc).expect("serialize"), raw);
    }

    #[test]
    fn optional_sections_may_be_absent() {
        let mut raw = sample_json();
        let object = raw.as_object_mut().expect("object");
        object.remove("portfolio");
        object.remove("testimonials");
        object.remove("brand_name");

        let doc: ContentDocument = serde_json::from_value(raw.clone()).expect("parse");
        assert!(doc.portfolio_items().is_empty());
        assert_eq!(doc.nav_brand(), DEFAULT_NAV_BRAND);
        assert_eq!(doc.footer_brand(), DEFAULT_FOOTER_BRAND);
        assert_eq!(serde_json::to_value(&doc).expect("serialize"), raw);
    }

    #[test]
    fn missing_declared_section_is_rejected() {
        let mut raw = sample_json();
        raw.as_object_mut().expect("object").remove("hero");
        assert!(serde_json::from_value::<ContentDocument>(raw).is_err());
    }

    #[test]
    fn item_lookup_uses_id_not_position() {
        let doc: ContentDocument = serde_json::from_value(sample_json()).expect("parse");
        let mut items = doc.portfolio.get().cloned().expect("portfolio");
        items.insert(
            0,
            PortfolioItem {
                id: "p0".to_string(),
                title: "Zero".to_string().into(),
                category: Nullable::Absent,
                image: Nullable::Absent,
                extra: Map::new(),
            },
        );
        assert_eq!(position_by_id(&items, "p1"), Some(1));
        assert_eq!(
            find_by_id(&items, "p1").and_then(|i| i.title.as_deref()),
            Some("One")
        );
        assert!(find_by_id(&items, "missing").is_none());
    }

    #[test]
    fn blank_brand_name_uses_defaults() {
        let mut doc = ContentDocument::starter();
        doc.brand_name = "  ".to_string().into();
        assert_eq!(doc.nav_brand(), DEFAULT_NAV_BRAND);
    }

    #[test]
    fn starter_document_round_trips() {
        let doc = ContentDocument::starter();
        let raw = serde_json::to_string_pretty(&doc).expect("serialize");
        let parsed: ContentDocument = serde_json::from_str(&raw).expect("parse");
        assert_eq!(parsed, doc);
    }
}
