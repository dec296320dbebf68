//! Property tables: the per-type declaration of which fields take part in
//! loading and exporting, and how.
//!
//! Each [`Property`] pairs a name with a getter and a setter, plus an optional
//! exporter that replaces the getter on the export path. A type builds its
//! [`PropertyTable`] once (typically in a `LazyLock`) and hands it out from
//! [`ApiObject::properties`](crate::ApiObject::properties).

use crate::coerce;
use crate::config::BindConfig;
use crate::object::{ApiObject, Export};
use apiobject_types::{Error, Result, Timestamp};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Reads a property for export.
pub type Getter<T> = for<'a> fn(&'a T) -> Field<'a>;
/// Writes a property from the generic read of its key.
pub type Setter<T> = fn(&mut T, Slot<'_>) -> Result<()>;
/// Produces a property's exported value directly, bypassing the getter.
pub type Exporter<T> = fn(&T) -> Value;

/// What a getter hands to the export path.
pub enum Field<'a> {
    /// A plain value, exported unchanged.
    Value(Value),
    /// A nested API object, exported recursively.
    Entity(&'a dyn Export),
    /// A calendar timestamp, exported in wire format (or `null`).
    Timestamp(Option<Timestamp>),
    /// A sequence of fields, exported element-wise.
    List(Vec<Field<'a>>),
}

impl<'a> Field<'a> {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn entity<E: Export>(object: &'a E) -> Self {
        Self::Entity(object)
    }

    /// A nested object, or `null` when absent.
    pub fn optional_entity<E: Export>(object: Option<&'a E>) -> Self {
        object.map_or(Self::Value(Value::Null), |object| Self::Entity(object))
    }

    pub fn entities<E: Export>(objects: &'a [E]) -> Self {
        Self::List(objects.iter().map(|object| Self::Entity(object)).collect())
    }

    pub fn timestamp(ts: Option<&Timestamp>) -> Self {
        Self::Timestamp(ts.copied())
    }

    /// Converts to the exported representation. Nested objects receive the
    /// same `compress` flag.
    #[must_use]
    pub fn export(self, compress: bool) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Entity(object) => Value::Object(object.export(compress)),
            Self::Timestamp(ts) => Timestamp::export(ts.as_ref()),
            Self::List(items) => Value::Array(
                items.into_iter().map(|item| item.export(compress)).collect(),
            ),
        }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Entity(_) => f.write_str("Entity(..)"),
            Self::Timestamp(ts) => f.debug_tuple("Timestamp").field(ts).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

/// The generic read of one payload key, handed to a setter.
///
/// Typing is the setter's job; the coercions here never fail.
#[derive(Debug, Clone, Copy)]
pub struct Slot<'a> {
    key: &'a str,
    value: Option<&'a Value>,
    config: &'a BindConfig,
}

impl<'a> Slot<'a> {
    #[must_use]
    pub fn new(key: &'a str, value: Option<&'a Value>, config: &'a BindConfig) -> Self {
        Self { key, value, config }
    }

    #[must_use]
    pub fn key(&self) -> &'a str {
        self.key
    }

    #[must_use]
    pub fn config(&self) -> &'a BindConfig {
        self.config
    }

    /// True if the key was present in the payload, even as `null`.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    #[must_use]
    pub fn raw(&self) -> Option<&'a Value> {
        self.value
    }

    /// The value, or `null` when absent.
    #[must_use]
    pub fn value(&self) -> Value {
        self.value_or(Value::Null)
    }

    #[must_use]
    pub fn value_or(&self, default: Value) -> Value {
        self.value.cloned().unwrap_or(default)
    }

    #[must_use]
    pub fn int(&self, default: i64) -> i64 {
        self.value.map_or(default, coerce::to_int)
    }

    #[must_use]
    pub fn int_min(&self, default: i64, min: i64) -> i64 {
        match self.value {
            Some(value) if coerce::is_numeric(value) => {
                let int = coerce::to_int(value);
                if int >= min { int } else { default }
            }
            _ => default,
        }
    }

    #[must_use]
    pub fn flag(&self, default: i64) -> u8 {
        u8::from(self.int(default) != 0)
    }

    #[must_use]
    pub fn string(&self, default: &str) -> String {
        match self.value {
            None | Some(Value::Null) => default.to_string(),
            Some(value) => coerce::to_string(value),
        }
    }

    /// `None` when absent or `null`, else the string coercion.
    #[must_use]
    pub fn opt_string(&self) -> Option<String> {
        match self.value {
            None | Some(Value::Null) => None,
            Some(value) => Some(coerce::to_string(value)),
        }
    }

    #[must_use]
    pub fn array(&self, default: Value) -> Value {
        match self.value {
            Some(value) if coerce::is_collection(value) => value.clone(),
            _ => default,
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<Timestamp> {
        Timestamp::import(self.value, &self.config.datetime)
    }

    /// Loads a nested object from the value; absent or `null` gives its default.
    ///
    /// # Errors
    ///
    /// Propagates the nested load's error, e.g. for a scalar value.
    pub fn entity<E: ApiObject>(&self) -> Result<E> {
        E::load_with(self.value(), self.config)
    }

    /// Like [`entity`](Self::entity), but `None` when absent or `null`.
    ///
    /// # Errors
    ///
    /// Propagates the nested load's error.
    pub fn optional_entity<E: ApiObject>(&self) -> Result<Option<E>> {
        match self.value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => E::load_with(value.clone(), self.config).map(Some),
        }
    }

    /// Loads each element of a sequence (or each value of a mapping).
    /// Anything else gives an empty list.
    ///
    /// # Errors
    ///
    /// Propagates the first failing element's error.
    pub fn entities<E: ApiObject>(&self) -> Result<Vec<E>> {
        let items: Vec<&Value> = match self.value {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Object(map)) => map.values().collect(),
            _ => return Ok(Vec::new()),
        };
        items
            .into_iter()
            .map(|item| E::load_with(item.clone(), self.config))
            .collect()
    }
}

/// One declared property of `T`.
pub struct Property<T> {
    name: &'static str,
    getter: Getter<T>,
    setter: Setter<T>,
    exporter: Option<Exporter<T>>,
}

impl<T> Property<T> {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn has_exporter(&self) -> bool {
        self.exporter.is_some()
    }

    /// Runs the setter, tagging any failure with the property name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Property`] wrapping the setter's error.
    pub fn set(&self, object: &mut T, slot: Slot<'_>) -> Result<()> {
        (self.setter)(object, slot).map_err(|e| {
            warn!("setter for property `{}` failed: {e}", self.name);
            Error::property(self.name, e)
        })
    }

    /// The exported value: the exporter's output verbatim if there is one,
    /// otherwise the getter's field converted for export.
    #[must_use]
    pub fn export(&self, object: &T, compress: bool) -> Value {
        match self.exporter {
            Some(exporter) => exporter(object),
            None => (self.getter)(object).export(compress),
        }
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("has_exporter", &self.has_exporter())
            .finish()
    }
}

/// The ordered property declarations of `T`.
pub struct PropertyTable<T> {
    properties: Vec<Property<T>>,
}

impl<T> PropertyTable<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
        }
    }

    /// Declares a property.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already declared.
    #[must_use]
    pub fn property(self, name: &'static str, getter: Getter<T>, setter: Setter<T>) -> Self {
        self.push(Property {
            name,
            getter,
            setter,
            exporter: None,
        })
    }

    /// Declares a property whose export is produced by `exporter`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already declared.
    #[must_use]
    pub fn property_with_exporter(
        self,
        name: &'static str,
        getter: Getter<T>,
        setter: Setter<T>,
        exporter: Exporter<T>,
    ) -> Self {
        self.push(Property {
            name,
            getter,
            setter,
            exporter: Some(exporter),
        })
    }

    fn push(mut self, property: Property<T>) -> Self {
        assert!(
            self.get(property.name).is_none(),
            "property `{}` declared twice",
            property.name
        );
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Property<T>> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property<T>> {
        self.properties.iter()
    }

    /// Property names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(|p| p.name)
    }

    /// Runs every setter in declaration order with the generic read of its key.
    /// Stops at the first failing setter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Property`] for the first failing setter.
    pub fn bind(&self, object: &mut T, payload: &crate::Payload) -> Result<()> {
        for property in &self.properties {
            property.set(object, payload.slot(property.name))?;
        }
        Ok(())
    }

    /// One entry per declared property, in declaration order.
    #[must_use]
    pub fn export(&self, object: &T, compress: bool) -> Map<String, Value> {
        self.properties
            .iter()
            .map(|p| (p.name.to_string(), p.export(object, compress)))
            .collect()
    }
}

impl<T> Default for PropertyTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PropertyTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.properties).finish()
    }
}
