//! Search and fetch value objects.

use crate::util::{char_len, truncate_chars};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One web search hit, in provider relevance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }

    /// Coerce one element of a normalized result list.
    ///
    /// Missing or non-string fields become empty strings; `href` is accepted
    /// for `url` and `body` for `snippet`. Elements that are not records are
    /// rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            title: string_field(map, &["title"]),
            url: string_field(map, &["url", "href"]),
            snippet: string_field(map, &["snippet", "body"]),
        })
    }

    /// A result is usable as grounding when it has a title or a snippet.
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty() || !self.snippet.trim().is_empty()
    }

    /// `title: snippet` line used as grounding context.
    pub fn grounding_line(&self) -> String {
        format!("{}: {}", self.title.trim(), self.snippet.trim())
    }
}

/// Readable text extracted from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPage {
    pub title: String,
    /// Text already cut to the caller's character budget.
    pub text: String,
    /// Length of the text before truncation.
    pub length: usize,
}

impl FetchedPage {
    /// Build a page from a normalized record, applying `max_chars`.
    ///
    /// A missing `length` falls back to the length of the received text.
    pub fn from_record(map: &Map<String, Value>, max_chars: usize) -> Self {
        let title = string_field(map, &["title"]);
        let full_text = string_field(map, &["text"]);
        let length = map
            .get("length")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or_else(|| char_len(&full_text));

        Self {
            title,
            text: truncate_chars(&full_text, max_chars).to_string(),
            length,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.text.is_empty()
    }

    /// First `max_chars` characters of the text.
    pub fn preview(&self, max_chars: usize) -> &str {
        truncate_chars(&self.text, max_chars)
    }
}

/// A fetched page kept for a research report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageExtract {
    /// 1-based rank of the search result the page came from
    pub rank: usize,
    pub url: String,
    #[serde(flatten)]
    pub page: FetchedPage,
}

/// Output of the research pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub topic: String,
    pub markdown: String,
    pub results: Vec<SearchResult>,
    pub pages: Vec<PageExtract>,
    /// True when text generation failed and the report was assembled locally.
    pub generated_locally: bool,
}

fn string_field(map: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_string()
}
