//! Calendar timestamps and their wire codec.
//!
//! A [`Timestamp`] is a zone-less calendar value (date + wall-clock time, whole
//! seconds). On the wire it is always rendered as `YYYY-MM-DD HH:MM:SS`; on the
//! way in it may come from:
//! - another `Timestamp` (copied)
//! - a nonzero integer, read as Unix epoch seconds in the configured [`Zone`]
//! - a non-empty string in the wire format, or (unless strict) a handful of
//!   other common renderings, RFC 3339 included
//!
//! Anything else imports as `None`. Import never fails loudly.

use crate::Error;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The `chrono` format string of the canonical wire representation.
pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Additional layouts accepted by lenient parsing, tried in order.
const LENIENT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// How instants (epoch integers, offset-bearing strings) map onto calendar time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Zone {
    /// Coordinated Universal Time.
    #[default]
    Utc,
    /// The host's local timezone.
    Local,
    /// A fixed offset, in seconds east of UTC.
    Fixed { offset_secs: i32 },
}

impl Zone {
    fn fixed_offset(offset_secs: i32) -> Option<FixedOffset> {
        FixedOffset::east_opt(offset_secs)
    }

    /// Calendar time in this zone at the given epoch second.
    fn calendar_at(self, secs: i64) -> Option<NaiveDateTime> {
        match self {
            Self::Utc => DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.naive_utc()),
            Self::Local => Local.timestamp_opt(secs, 0).single().map(|dt| dt.naive_local()),
            Self::Fixed { offset_secs } => Self::fixed_offset(offset_secs)?
                .timestamp_opt(secs, 0)
                .single()
                .map(|dt| dt.naive_local()),
        }
    }

    /// Converts an offset-bearing instant into calendar time in this zone.
    fn localize(self, dt: DateTime<FixedOffset>) -> NaiveDateTime {
        match self {
            Self::Utc => dt.naive_utc(),
            Self::Local => dt.with_timezone(&Local).naive_local(),
            Self::Fixed { offset_secs } => match Self::fixed_offset(offset_secs) {
                Some(offset) => dt.with_timezone(&offset).naive_local(),
                None => dt.naive_utc(),
            },
        }
    }

    /// Epoch seconds of a calendar time in this zone.
    ///
    /// Ambiguous local times (DST fold) resolve to the earliest instant;
    /// nonexistent ones (DST gap) yield `None`.
    fn epoch_of(self, naive: NaiveDateTime) -> Option<i64> {
        match self {
            Self::Utc => Some(naive.and_utc().timestamp()),
            Self::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.timestamp()),
            Self::Fixed { offset_secs } => Self::fixed_offset(offset_secs)?
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.timestamp()),
        }
    }
}

/// Options for the datetime codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatetimeOptions {
    /// Zone used to read epoch integers and offset-bearing strings.
    pub zone: Zone,
    /// Accept only the canonical wire format when parsing strings.
    pub strict: bool,
}

/// A source for [`Timestamp::import`].
#[derive(Debug, Clone, Copy)]
pub enum DatetimeSource<'a> {
    Instance(&'a Timestamp),
    Value(Option<&'a Value>),
}

impl<'a> From<&'a Timestamp> for DatetimeSource<'a> {
    fn from(ts: &'a Timestamp) -> Self {
        Self::Instance(ts)
    }
}

impl<'a> From<&'a Value> for DatetimeSource<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(Some(value))
    }
}

impl<'a> From<Option<&'a Value>> for DatetimeSource<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        Self::Value(value)
    }
}

/// A calendar timestamp with one-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Wraps a calendar value, dropping any sub-second part.
    #[must_use]
    pub fn new(naive: NaiveDateTime) -> Self {
        Self(naive.with_nanosecond(0).unwrap_or(naive))
    }

    /// Builds a timestamp from calendar components, if they form a valid date/time.
    #[must_use]
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, min, sec)
            .map(Self)
    }

    /// Calendar time in `zone` at the given Unix epoch second.
    #[must_use]
    pub fn from_epoch(secs: i64, zone: Zone) -> Option<Self> {
        zone.calendar_at(secs).map(Self)
    }

    /// Unix epoch seconds of this calendar time, read in `zone`.
    #[must_use]
    pub fn to_epoch(&self, zone: Zone) -> Option<i64> {
        zone.epoch_of(self.0)
    }

    /// Returns the underlying calendar value.
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Renders the canonical `YYYY-MM-DD HH:MM:SS` form.
    #[must_use]
    pub fn format(&self) -> String {
        self.0.format(WIRE_FORMAT).to_string()
    }

    /// Leniently parses a date/time string. Returns `None` when nothing matches.
    #[must_use]
    pub fn parse(input: &str, options: &DatetimeOptions) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, WIRE_FORMAT) {
            return Some(Self(naive));
        }
        if options.strict {
            debug!("rejecting non-canonical datetime {input:?} in strict mode");
            return None;
        }

        let parsed = LENIENT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
            .or_else(|| {
                DateTime::parse_from_rfc3339(input)
                    .ok()
                    .map(|dt| options.zone.localize(dt))
            })
            .or_else(|| {
                NaiveDate::parse_from_str(input, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            });

        if parsed.is_none() {
            debug!("unrecognised datetime {input:?}, importing as null");
        }
        parsed.map(Self::new)
    }

    /// Imports a timestamp from any accepted external shape.
    #[must_use]
    pub fn import<'a>(source: impl Into<DatetimeSource<'a>>, options: &DatetimeOptions) -> Option<Self> {
        match source.into() {
            DatetimeSource::Instance(ts) => Some(*ts),
            DatetimeSource::Value(Some(Value::Number(n))) => n
                .as_i64()
                .filter(|secs| *secs != 0)
                .and_then(|secs| Self::from_epoch(secs, options.zone)),
            DatetimeSource::Value(Some(Value::String(s))) => Self::parse(s, options),
            DatetimeSource::Value(_) => None,
        }
    }

    /// Exports an optional timestamp: the wire string, or JSON `null`.
    #[must_use]
    pub fn export(ts: Option<&Timestamp>) -> Value {
        ts.map_or(Value::Null, |ts| Value::String(ts.format()))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Self::new(naive)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    /// Strict parse: only the canonical wire format is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, WIRE_FORMAT)
            .map(Self)
            .map_err(|e| Error::InvalidTimestamp(format!("{s:?}: {e}")))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
