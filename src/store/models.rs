// Data models — Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

/// A scraped article as stored in the archive.
///
/// `clean_text` is always derivable from `full_text` via the normalizer and
/// must never be hand-edited; it stays `None` until the record is cleaned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub web_url: String,
    pub headline: Option<String>,
    pub section: Option<String>,
    pub pub_date: Option<String>,
    pub full_text: Option<String>,
    pub clean_text: Option<String>,
}

impl Document {
    /// Look up a filterable field by name, as a JSON value.
    ///
    /// This is what the structured query evaluates against. Absent optional
    /// fields come back as `None`, which `Condition::Exists` distinguishes
    /// from a present-but-empty value.
    pub fn field(&self, name: &str) -> Option<serde_json::Value> {
        match name {
            "id" => Some(serde_json::json!(self.id)),
            "web_url" => Some(serde_json::json!(self.web_url)),
            "headline" => self.headline.as_ref().map(|v| serde_json::json!(v)),
            "section" => self.section.as_ref().map(|v| serde_json::json!(v)),
            "pub_date" => self.pub_date.as_ref().map(|v| serde_json::json!(v)),
            "full_text" => self.full_text.as_ref().map(|v| serde_json::json!(v)),
            "clean_text" => self.clean_text.as_ref().map(|v| serde_json::json!(v)),
            _ => None,
        }
    }
}

/// A document as delivered by the external scraper, before the store has
/// assigned it an id. This is the `import` wire format (JSON lines).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    pub web_url: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub full_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document {
            id: 7,
            web_url: "https://example.com/a".to_string(),
            headline: Some("Headline".to_string()),
            section: None,
            pub_date: None,
            full_text: Some("body".to_string()),
            clean_text: None,
        }
    }

    #[test]
    fn field_lookup_present_and_absent() {
        let d = doc();
        assert_eq!(d.field("id"), Some(serde_json::json!(7)));
        assert_eq!(d.field("headline"), Some(serde_json::json!("Headline")));
        assert_eq!(d.field("section"), None);
        assert_eq!(d.field("clean_text"), None);
        assert_eq!(d.field("no_such_field"), None);
    }
}
