//! Envelope decoding with a fixed accessor priority.
//!
//! | Order | Path | Matches when |
//! |:---:|------|--------------|
//! | 1 | [`EnvelopePath::Result`] | record with a `result` field already in the expected shape |
//! | 2 | [`EnvelopePath::ContentText`] | record with a non-empty `content` array whose first item has a string `text` |
//! | 3 | [`EnvelopePath::Text`] | record with a string `text` field |
//! | 4 | [`EnvelopePath::Bare`] | the envelope itself is a list or record |
//! | 5 | [`EnvelopePath::Stringified`] | anything else, converted to a string |
//!
//! String payloads are only parsed as JSON when a list or record is expected
//! and the first non-whitespace character is `[` or `{`. Every mismatch ends
//! in the neutral value for the shape (`""`, `[]` or `{}`).

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Opaque value returned by a tool-call transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnvelope(Value);

impl RawEnvelope {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawEnvelope {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Canonical shape the caller wants out of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedShape {
    Text,
    List,
    Record,
}

impl ExpectedShape {
    fn matches(&self, value: &Value) -> bool {
        match self {
            ExpectedShape::Text => value.is_string(),
            ExpectedShape::List => value.is_array(),
            ExpectedShape::Record => value.is_object(),
        }
    }

    /// The value returned when nothing in the envelope fits.
    pub fn neutral(&self) -> NormalizedValue {
        match self {
            ExpectedShape::Text => NormalizedValue::Text(String::new()),
            ExpectedShape::List => NormalizedValue::List(Vec::new()),
            ExpectedShape::Record => NormalizedValue::Record(Map::new()),
        }
    }
}

/// Accessor path that produced the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopePath {
    Result,
    ContentText,
    Text,
    Bare,
    Stringified,
}

impl EnvelopePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopePath::Result => "result",
            EnvelopePath::ContentText => "content_text",
            EnvelopePath::Text => "text",
            EnvelopePath::Bare => "bare",
            EnvelopePath::Stringified => "stringified",
        }
    }
}

/// Canonical value extracted from an envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    Text(String),
    List(Vec<Value>),
    Record(Map<String, Value>),
}

impl NormalizedValue {
    pub fn into_text(self) -> String {
        match self {
            NormalizedValue::Text(s) => s,
            NormalizedValue::List(items) => Value::Array(items).to_string(),
            NormalizedValue::Record(map) => Value::Object(map).to_string(),
        }
    }

    pub fn into_list(self) -> Vec<Value> {
        match self {
            NormalizedValue::List(items) => items,
            _ => Vec::new(),
        }
    }

    pub fn into_record(self) -> Map<String, Value> {
        match self {
            NormalizedValue::Record(map) => map,
            _ => Map::new(),
        }
    }
}

/// Payload located inside an envelope, before shape conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    Structured(&'a Value),
    Text(Cow<'a, str>),
}

/// Locate the payload of `envelope`, walking the accessor paths in order.
pub fn decode<'a>(envelope: &'a RawEnvelope, shape: ExpectedShape) -> (EnvelopePath, Payload<'a>) {
    let value = envelope.as_value();

    if let Some(direct) = value.get("result")
        && shape.matches(direct)
    {
        return (EnvelopePath::Result, structured_or_text(direct));
    }

    if let Some(text) = value
        .get("content")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(|first| first.get("text"))
        .and_then(Value::as_str)
    {
        return (EnvelopePath::ContentText, Payload::Text(Cow::Borrowed(text)));
    }

    if let Some(text) = value.get("text").and_then(Value::as_str) {
        return (EnvelopePath::Text, Payload::Text(Cow::Borrowed(text)));
    }

    if value.is_array() || value.is_object() {
        return (EnvelopePath::Bare, Payload::Structured(value));
    }

    let text = match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    };
    (EnvelopePath::Stringified, Payload::Text(text))
}

fn structured_or_text(value: &Value) -> Payload<'_> {
    match value {
        Value::String(s) => Payload::Text(Cow::Borrowed(s.as_str())),
        other => Payload::Structured(other),
    }
}

/// Extract the canonical value of `envelope` in the requested shape.
///
/// Never fails: unknown envelope layouts and unparsable text both yield
/// [`ExpectedShape::neutral`].
pub fn normalize(envelope: &RawEnvelope, shape: ExpectedShape) -> NormalizedValue {
    let (_, payload) = decode(envelope, shape);
    convert(payload, shape)
}

fn convert(payload: Payload<'_>, shape: ExpectedShape) -> NormalizedValue {
    match (payload, shape) {
        (Payload::Text(text), ExpectedShape::Text) => NormalizedValue::Text(text.into_owned()),
        (Payload::Structured(value), ExpectedShape::Text) => {
            NormalizedValue::Text(value.to_string())
        }
        (Payload::Structured(value), _) => from_structured(value.clone(), shape),
        (Payload::Text(text), _) => match parse_structured_text(&text) {
            Some(value) => from_structured(value, shape),
            None => shape.neutral(),
        },
    }
}

fn from_structured(value: Value, shape: ExpectedShape) -> NormalizedValue {
    match (value, shape) {
        (Value::Array(items), ExpectedShape::List) => NormalizedValue::List(items),
        (Value::Object(map), ExpectedShape::Record) => NormalizedValue::Record(map),
        _ => shape.neutral(),
    }
}

fn parse_structured_text(text: &str) -> Option<Value> {
    let trimmed = text.trim_start();
    if !(trimmed.starts_with('[') || trimmed.starts_with('{')) {
        return None;
    }
    serde_json::from_str(trimmed).ok()
}

/// Shorthand for [`normalize`] with [`ExpectedShape::Text`].
pub fn normalize_text(envelope: &RawEnvelope) -> String {
    normalize(envelope, ExpectedShape::Text).into_text()
}

/// Shorthand for [`normalize`] with [`ExpectedShape::List`].
pub fn normalize_list(envelope: &RawEnvelope) -> Vec<Value> {
    normalize(envelope, ExpectedShape::List).into_list()
}

/// Shorthand for [`normalize`] with [`ExpectedShape::Record`].
pub fn normalize_record(envelope: &RawEnvelope) -> Map<String, Value> {
    normalize(envelope, ExpectedShape::Record).into_record()
}
