//! Core type definitions for apiobject.
//!
//! This crate defines the payload-agnostic types shared by the binding engine:
//! - The crate-wide [`Error`] and [`Result`]
//! - [`Timestamp`], the calendar timestamp value, and its codec to/from
//!   epoch integers and the `YYYY-MM-DD HH:MM:SS` wire format
//! - [`DatetimeOptions`] / [`Zone`], controlling how that codec interprets input
//!
//! Everything that knows about payloads, properties or entities lives in
//! `apiobject-model`.

mod datetime;

pub use datetime::{DatetimeOptions, DatetimeSource, Timestamp, Zone, WIRE_FORMAT};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while binding or exporting API objects.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Construction input does not reduce to a key/value mapping.
    #[error("ApiData must be a mapping, structured-data string, or null (got {0})")]
    InvalidPayload(String),

    /// An opaque serialization blob could not be unwrapped.
    #[error("invalid serialization envelope: {0}")]
    InvalidEnvelope(String),

    /// A property setter rejected its value.
    #[error("failed to bind property `{property}`: {source}")]
    Property {
        property: String,
        #[source]
        source: Box<Error>,
    },

    /// A setter refused a value it was handed.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// A timestamp string is not in the canonical wire format.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wraps a setter failure with the name of the property being bound.
    #[must_use]
    pub fn property(property: &str, source: Error) -> Self {
        Self::Property {
            property: property.to_string(),
            source: Box::new(source),
        }
    }
}
