//! Core types for the place subsystem.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// One caption attached to a location, optionally linking to its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A WGS84 point with every label that was merged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub labels: Vec<Label>,
}

impl Location {
    /// Create a location carrying at most one label. Empty text adds no label.
    pub fn new(lat: f64, lon: f64, text: &str, url: Option<&str>) -> Self {
        let mut loc = Self {
            lat,
            lon,
            labels: Vec::new(),
        };
        loc.add_label(text, url);
        loc
    }

    pub fn add_label(&mut self, text: &str, url: Option<&str>) {
        if text.is_empty() {
            return;
        }
        self.labels.push(Label {
            text: text.to_string(),
            url: url.filter(|u| !u.is_empty()).map(str::to_string),
        });
    }

    pub fn label_texts(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.text.as_str()).collect()
    }
}

/// Metadata shared by every location parsed from one block of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Ids come from exports as either strings or integer keys.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        UInt(u64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::UInt(n) => n.to_string(),
    }))
}

impl SourceMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Main title used in labels: "Trip to Brno (7/3/2014)" when dated.
    pub fn label_title(&self) -> Option<String> {
        let title = self.title.as_deref()?;
        Some(match self.date {
            Some(d) => format!("{} ({})", title, d.format("%-d/%-m/%Y")),
            None => title.to_string(),
        })
    }
}

/// Why a text line did not yield a location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected at least 2 comma-separated fields, found {0}")]
    TooFewFields(usize),
    #[error("'{0}' is not a decimal coordinate")]
    InvalidCoordinate(String),
    #[error("unknown hemisphere marker '{0}'")]
    UnknownHemisphere(String),
    #[error("coordinate {value} out of range for {axis}")]
    OutOfRange { axis: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_is_dropped() {
        let loc = Location::new(1.0, 2.0, "", Some("http://x"));
        assert!(loc.labels.is_empty());
    }

    #[test]
    fn test_empty_url_is_none() {
        let loc = Location::new(1.0, 2.0, "A", Some(""));
        assert_eq!(loc.labels[0].url, None);
    }

    #[test]
    fn test_label_title_with_date() {
        let meta = SourceMeta {
            title: Some("Trip to Brno".into()),
            date: NaiveDate::from_ymd_opt(2014, 3, 7),
            ..SourceMeta::default()
        };
        assert_eq!(meta.label_title().as_deref(), Some("Trip to Brno (7/3/2014)"));
    }

    #[test]
    fn test_label_title_without_title() {
        let meta = SourceMeta {
            date: NaiveDate::from_ymd_opt(2014, 3, 7),
            ..SourceMeta::default()
        };
        assert_eq!(meta.label_title(), None);
    }

    #[test]
    fn test_id_accepts_string_or_number() {
        let meta: SourceMeta = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(meta.id.as_deref(), Some("42"));
        let meta: SourceMeta = serde_json::from_str(r#"{"id": "post-7"}"#).unwrap();
        assert_eq!(meta.id.as_deref(), Some("post-7"));
        let meta: SourceMeta = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(meta.id, None);
        assert!(serde_json::from_str::<SourceMeta>(r#"{"id": 1.5}"#).is_err());
    }

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::TooFewFields(1).to_string(),
            "expected at least 2 comma-separated fields, found 1"
        );
        assert_eq!(
            ParseError::UnknownHemisphere("-".into()).to_string(),
            "unknown hemisphere marker '-'"
        );
    }
}
