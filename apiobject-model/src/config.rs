use apiobject_types::{DatetimeOptions, Zone};
use serde::{Deserialize, Serialize};

/// Configuration for loading API objects.
///
/// Travels with the canonical payload, so typed accessors, setter slots and
/// nested entity loads all see the same settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    /// How datetime values are read.
    pub datetime: DatetimeOptions,
}

impl BindConfig {
    /// Returns a copy reading epoch integers and offset strings in `zone`.
    #[must_use]
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.datetime.zone = zone;
        self
    }

    /// Returns a copy that only accepts canonical `YYYY-MM-DD HH:MM:SS` strings.
    #[must_use]
    pub fn with_strict_datetimes(mut self, strict: bool) -> Self {
        self.datetime.strict = strict;
        self
    }
}
