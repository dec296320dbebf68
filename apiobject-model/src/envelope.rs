//! Opaque string serialization of API objects.
//!
//! The envelope is the URL-safe, unpadded base64 encoding of an object's
//! string form (JSON of its compressed export). Unwrapping it and loading the
//! JSON reconstructs the object, minus any property whose value was empty or
//! falsy and therefore dropped by compression.

use crate::config::BindConfig;
use crate::object::{ApiObject, Export};
use apiobject_types::{Error, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Wraps an object's string form into an opaque blob.
#[must_use]
pub fn serialize<E: Export + ?Sized>(object: &E) -> String {
    URL_SAFE_NO_PAD.encode(object.to_json())
}

/// Reconstructs an object from a blob produced by [`serialize`].
///
/// # Errors
///
/// Returns [`Error::InvalidEnvelope`] if the blob is not valid base64 or does
/// not decode to UTF-8, or any error of the subsequent load.
pub fn deserialize<T: ApiObject>(blob: &str) -> Result<T> {
    deserialize_with(blob, &BindConfig::default())
}

/// [`deserialize`] with an explicit bind configuration.
///
/// # Errors
///
/// See [`deserialize`].
pub fn deserialize_with<T: ApiObject>(blob: &str, config: &BindConfig) -> Result<T> {
    let json = unwrap(blob)?;
    T::load_with(json, config)
}

/// Recovers the string form carried by a blob.
///
/// # Errors
///
/// Returns [`Error::InvalidEnvelope`] on bad base64 or non-UTF-8 content.
pub fn unwrap(blob: &str) -> Result<String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(blob.trim())
        .map_err(|e| Error::InvalidEnvelope(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidEnvelope(e.to_string()))
}

/// Serde adapter for fields holding an API object:
/// `#[serde(with = "apiobject_model::envelope::as_export")]`.
///
/// Serializes the compressed export mapping and deserializes through the
/// regular load flow.
pub mod as_export {
    use crate::object::{ApiObject, Export};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    pub fn serialize<T: Export, S: Serializer>(object: &T, serializer: S) -> Result<S::Ok, S::Error> {
        object.export(true).serialize(serializer)
    }

    pub fn deserialize<'de, T: ApiObject, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
        let value = Value::deserialize(deserializer)?;
        T::load(value).map_err(serde::de::Error::custom)
    }
}
