// Structured query filters — field → condition, evaluated against documents.
//
// The pipeline only ever needs equality, inequality, and existence checks,
// so that's the whole condition language. Filters are evaluated in-process
// over fetched rows; find and count share the same matching path, so they
// can never disagree.

use serde_json::Value;

use super::models::Document;

/// A single match condition on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field is present and equals this literal.
    Equals(Value),
    /// Field is present and differs from this literal.
    NotEquals(Value),
    /// Field presence check. `Exists(false)` matches absent fields.
    Exists(bool),
}

/// An ordered conjunction of field conditions.
///
/// All conditions must hold for a document to match. An empty query
/// matches everything.
#[derive(Debug, Clone, Default)]
pub struct Query {
    conditions: Vec<(String, Condition)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: add a condition on a field.
    pub fn with(mut self, field: impl Into<String>, cond: Condition) -> Self {
        self.conditions.push((field.into(), cond));
        self
    }

    /// Add a condition only if the field isn't already constrained.
    /// Used to merge the mandatory `clean_text exists` condition without
    /// clobbering a caller's own filter on the same field.
    pub fn with_default(mut self, field: &str, cond: Condition) -> Self {
        if !self.conditions.iter().any(|(f, _)| f == field) {
            self.conditions.push((field.to_string(), cond));
        }
        self
    }

    pub fn conditions(&self) -> &[(String, Condition)] {
        &self.conditions
    }

    /// Whether this document satisfies every condition.
    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions.iter().all(|(field, cond)| {
            let value = doc.field(field);
            match cond {
                Condition::Equals(lit) => value.as_ref() == Some(lit),
                Condition::NotEquals(lit) => match value {
                    Some(v) => &v != lit,
                    None => false,
                },
                Condition::Exists(wanted) => value.is_some() == *wanted,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(section: Option<&str>, clean: Option<&str>) -> Document {
        Document {
            id: 1,
            web_url: "u".to_string(),
            headline: None,
            section: section.map(String::from),
            pub_date: None,
            full_text: Some("text".to_string()),
            clean_text: clean.map(String::from),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(Query::new().matches(&doc(None, None)));
    }

    #[test]
    fn equals_and_not_equals() {
        let d = doc(Some("World"), None);
        assert!(Query::new()
            .with("section", Condition::Equals(json!("World")))
            .matches(&d));
        assert!(!Query::new()
            .with("section", Condition::Equals(json!("Opinion")))
            .matches(&d));
        assert!(Query::new()
            .with("full_text", Condition::NotEquals(json!("")))
            .matches(&d));
        // NotEquals on an absent field does not match
        assert!(!Query::new()
            .with("clean_text", Condition::NotEquals(json!("")))
            .matches(&d));
    }

    #[test]
    fn exists_distinguishes_absent_fields() {
        let cleaned = doc(None, Some("cat sat"));
        let dirty = doc(None, None);
        let q = Query::new().with("clean_text", Condition::Exists(true));
        assert!(q.matches(&cleaned));
        assert!(!q.matches(&dirty));

        let q_missing = Query::new().with("clean_text", Condition::Exists(false));
        assert!(!q_missing.matches(&cleaned));
        assert!(q_missing.matches(&dirty));
    }

    #[test]
    fn with_default_does_not_clobber() {
        let q = Query::new()
            .with("clean_text", Condition::Exists(false))
            .with_default("clean_text", Condition::Exists(true));
        assert_eq!(q.conditions().len(), 1);
        assert_eq!(q.conditions()[0].1, Condition::Exists(false));
    }
}
