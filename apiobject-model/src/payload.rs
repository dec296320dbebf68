//! Payload normalization and typed accessors.
//!
//! Whatever an API object is constructed from is first reduced to a
//! [`Payload`]: an ordered string-keyed mapping. The payload only lives for the
//! duration of a load; setters read it through [`Slot`]s and entity `parse`
//! hooks read it through the typed accessors below.

use crate::coerce;
use crate::config::BindConfig;
use crate::object::Export;
use crate::property::Slot;
use apiobject_types::{Error, Result, Timestamp};
use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::debug;

/// Construction input accepted by the normalizer.
pub enum ApiData<'a> {
    /// No data: every property takes its default.
    Null,
    /// A structured-data (JSON) document.
    Json(Cow<'a, str>),
    /// Another API object, read through its uncompressed export.
    Entity(&'a dyn Export),
    /// An already-decoded JSON value.
    Value(Value),
}

impl std::fmt::Debug for ApiData<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Json(s) => f.debug_tuple("Json").field(s).finish(),
            Self::Entity(_) => f.write_str("Entity(..)"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

impl<'a> From<&'a str> for ApiData<'a> {
    fn from(s: &'a str) -> Self {
        Self::Json(Cow::Borrowed(s))
    }
}

impl From<String> for ApiData<'_> {
    fn from(s: String) -> Self {
        Self::Json(Cow::Owned(s))
    }
}

impl From<Value> for ApiData<'_> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Map<String, Value>> for ApiData<'_> {
    fn from(map: Map<String, Value>) -> Self {
        Self::Value(Value::Object(map))
    }
}

impl<'a> From<&'a dyn Export> for ApiData<'a> {
    fn from(object: &'a dyn Export) -> Self {
        Self::Entity(object)
    }
}

impl<'a, T: Export> From<&'a T> for ApiData<'a> {
    fn from(object: &'a T) -> Self {
        Self::Entity(object)
    }
}

impl<'a, T: Into<ApiData<'a>>> From<Option<T>> for ApiData<'a> {
    fn from(data: Option<T>) -> Self {
        data.map_or(Self::Null, Into::into)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Sequences become list-like payloads keyed by element index.
fn indexed(items: Vec<Value>) -> Map<String, Value> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| (i.to_string(), item))
        .collect()
}

/// Parses a structured-data document. Malformed input is treated as no data.
fn parse_document(json: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::String(s)) => Err(Error::InvalidPayload(format!(
            "structured-data string encoding a string ({} bytes)",
            s.len()
        ))),
        Ok(value) => from_value(value),
        Err(e) => {
            debug!("discarding malformed structured-data payload: {e}");
            Ok(Map::new())
        }
    }
}

fn from_value(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        Value::Array(items) => Ok(indexed(items)),
        Value::String(json) => parse_document(&json),
        other => Err(Error::InvalidPayload(kind_of(&other).to_string())),
    }
}

/// The canonical payload: an ordered key/value mapping plus the bind config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    data: Map<String, Value>,
    config: BindConfig,
}

impl Payload {
    /// Normalizes construction input using the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPayload`] if the input does not reduce to a
    /// mapping (a bare number or boolean, or a JSON document encoding one).
    pub fn normalize<'a>(data: impl Into<ApiData<'a>>) -> Result<Self> {
        Self::normalize_with(data, &BindConfig::default())
    }

    /// Normalizes construction input.
    ///
    /// - `Null` → empty mapping
    /// - JSON string → parsed; parse failure or a `null` document → empty mapping
    /// - another API object → its uncompressed export
    /// - mapping → used as-is; sequence → keyed by element index
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPayload`] for scalar input.
    pub fn normalize_with<'a>(data: impl Into<ApiData<'a>>, config: &BindConfig) -> Result<Self> {
        let data = match data.into() {
            ApiData::Null => Map::new(),
            ApiData::Json(json) => parse_document(&json)?,
            ApiData::Entity(object) => object.export(false),
            ApiData::Value(value) => from_value(value)?,
        };
        Ok(Self {
            data,
            config: *config,
        })
    }

    /// Wraps an already-canonical mapping.
    #[must_use]
    pub fn from_map(data: Map<String, Value>, config: &BindConfig) -> Self {
        Self {
            data,
            config: *config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    /// The whole mapping.
    #[must_use]
    pub fn all(&self) -> &Map<String, Value> {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True if `key` is present, even with a `null` value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The value at `key`, or `default` when absent.
    #[must_use]
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.slot(key).value_or(default)
    }

    /// The generic read of one key, packaged for a setter.
    #[must_use]
    pub fn slot<'a>(&'a self, key: &'a str) -> Slot<'a> {
        Slot::new(key, self.data.get(key), &self.config)
    }

    /// Integer coercion of the value; `default` only when absent.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.slot(key).int(default)
    }

    /// The integer value if numeric and at least `min`, else `default`.
    #[must_use]
    pub fn get_int_min(&self, key: &str, default: i64, min: i64) -> i64 {
        self.slot(key).int_min(default, min)
    }

    /// 1 if [`get_int`](Self::get_int) is nonzero, else 0.
    #[must_use]
    pub fn get_flag(&self, key: &str, default: i64) -> u8 {
        self.slot(key).flag(default)
    }

    /// 1 if `key` itself appears among the payload's values, else 0.
    ///
    /// For list-like payloads such as `["read", "write"]`.
    #[must_use]
    pub fn get_list_flag(&self, key: &str) -> u8 {
        u8::from(coerce::contains_member(self.data.values(), key))
    }

    /// String coercion of the value; `default` when absent or `null`.
    #[must_use]
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.slot(key).string(default)
    }

    /// The value if it is a sequence or mapping, else `default`.
    #[must_use]
    pub fn get_array(&self, key: &str, default: Value) -> Value {
        self.slot(key).array(default)
    }

    /// Datetime codec import of the value.
    #[must_use]
    pub fn get_datetime(&self, key: &str) -> Option<Timestamp> {
        self.slot(key).timestamp()
    }
}

impl From<Payload> for Map<String, Value> {
    fn from(payload: Payload) -> Self {
        payload.data
    }
}
