use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::date::parse_published_at;

pub const PUBLISHED_AT_KEY: &str = "publishedAt";
pub const PUBLISHED_KEY: &str = "published";
pub const SLUG_KEY: &str = "slug";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPost {
    pub slug: String,
    /// Parsed from `publishedAt`. `None` when the field is missing or unusable.
    #[serde(skip)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl BlogPost {
    /// Metadata `slug` fields are replaced by the one derived from the file name.
    #[must_use]
    pub fn new(slug: String, mut meta: Map<String, Value>) -> Self {
        meta.remove(SLUG_KEY);

        let published_at = meta.get(PUBLISHED_AT_KEY).and_then(|value| {
            let published_at = parse_published_at(value);
            if published_at.is_none() {
                warn!("Post `{slug}` has an unusable {PUBLISHED_AT_KEY} value: {value}");
            }
            published_at
        });

        Self {
            slug,
            published_at,
            meta,
        }
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        self.meta.get(PUBLISHED_KEY).is_some_and(is_truthy)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }
}
