use crate::compress::compress;
use crate::config::BindConfig;
use crate::payload::{ApiData, Payload};
use crate::property::PropertyTable;
use apiobject_types::Result;
use serde_json::{Map, Value};

/// Anything that can be exported to a key/value mapping.
///
/// Object-safe, so nested objects of any type can be exported through
/// `&dyn Export`. Implemented for every [`ApiObject`].
pub trait Export {
    /// Exports one entry per declared property, in declaration order.
    /// With `compress`, entries with empty or falsy values are dropped.
    fn export(&self, compress: bool) -> Map<String, Value>;

    /// The string form: JSON of the compressed export.
    fn to_json(&self) -> String {
        Value::Object(self.export(true)).to_string()
    }
}

/// A typed entity bound from an API payload.
///
/// Implementors declare their properties once; loading and exporting are
/// driven by that table.
///
/// ```ignore
/// static USER_PROPERTIES: LazyLock<PropertyTable<User>> = LazyLock::new(|| {
///     PropertyTable::<User>::new()
///         .property("id", |u| Field::value(u.id), |u, v| { u.id = v.int(0); Ok(()) })
///         .property("createdAt", |u| Field::timestamp(u.created_at.as_ref()), |u, v| {
///             u.created_at = v.timestamp();
///             Ok(())
///         })
/// });
///
/// impl ApiObject for User {
///     fn properties() -> &'static PropertyTable<Self> {
///         &USER_PROPERTIES
///     }
/// }
/// ```
pub trait ApiObject: Default + 'static {
    /// The declared properties, in load/export order.
    fn properties() -> &'static PropertyTable<Self>;

    /// Binds the canonical payload onto `self`.
    ///
    /// The default runs every declared setter. Override to read keys the
    /// table does not cover, e.g. list-like payloads via
    /// [`Payload::get_list_flag`].
    ///
    /// # Errors
    ///
    /// Returns the first setter failure.
    fn parse(&mut self, payload: &Payload) -> Result<()> {
        Self::properties().bind(self, payload)
    }

    /// The uncompressed per-property export.
    fn export_data(&self, compress: bool) -> Map<String, Value> {
        Self::properties().export(self, compress)
    }

    /// Constructs an object from any accepted input, with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPayload`](apiobject_types::Error::InvalidPayload)
    /// for unsupported input, or the first setter failure.
    fn load<'a>(data: impl Into<ApiData<'a>>) -> Result<Self> {
        Self::load_with(data, &BindConfig::default())
    }

    /// Constructs an object: normalize, bind, then drop the payload.
    ///
    /// # Errors
    ///
    /// As [`load`](Self::load). No partially bound object is ever returned.
    fn load_with<'a>(data: impl Into<ApiData<'a>>, config: &BindConfig) -> Result<Self> {
        let payload = Payload::normalize_with(data, config)?;
        let mut object = Self::default();
        object.parse(&payload)?;
        Ok(object)
    }
}

impl<T: ApiObject> Export for T {
    fn export(&self, compress_empty: bool) -> Map<String, Value> {
        let data = self.export_data(compress_empty);
        if compress_empty { compress(data) } else { data }
    }
}
