//! Binding of loosely-typed API payloads onto typed entities.
//!
//! The engine behind every API model:
//! - [`Payload`] — normalizes construction input (JSON string, `null`, another
//!   object, a mapping) into an ordered key/value mapping, with typed accessors
//! - [`PropertyTable`] — a type's declared properties with their getters,
//!   setters and optional exporters
//! - [`ApiObject`] / [`Export`] — the load flow (normalize → bind → drop the
//!   payload) and the export flow (per-property export → optional [`compress`])
//! - [`envelope`] — opaque string serialization round-tripping through the
//!   string form
//!
//! Timestamps and errors come from `apiobject-types` and are re-exported here.

pub mod coerce;
mod compress;
mod config;
pub mod envelope;
mod object;
mod payload;
mod property;

pub use apiobject_types::{
    DatetimeOptions, DatetimeSource, Error, Result, Timestamp, WIRE_FORMAT, Zone,
};
pub use compress::compress;
pub use config::BindConfig;
pub use object::{ApiObject, Export};
pub use payload::{ApiData, Payload};
pub use property::{Exporter, Field, Getter, Property, PropertyTable, Setter, Slot};

/// Implements `Display` as the string form (JSON of the compressed export).
#[macro_export]
macro_rules! impl_api_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(&$crate::Export::to_json(self))
                }
            }
        )+
    };
}
