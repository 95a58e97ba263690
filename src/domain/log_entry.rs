use super::log_level::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display conversion contract for log payloads.
///
/// Scalars coerce to their natural string form; aggregates get a
/// human-readable recursive dump. Conversion never fails: types without a
/// richer form are captured through [`Payload::debug`].
pub trait ToDisplayString {
    fn to_display_string(&self) -> String;
}

/// Message payload of a single log entry: plain text or a structured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Structured(Value),
}

impl Payload {
    /// Generic textual dump for types with no natural display form.
    pub fn debug<T: std::fmt::Debug>(value: &T) -> Self {
        Payload::Text(format!("{value:?}"))
    }

    /// An empty payload renders as no line at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Text(text) => text.is_empty(),
            Payload::Structured(value) => matches!(value, Value::Null),
        }
    }
}

impl ToDisplayString for Payload {
    fn to_display_string(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Structured(value) => value.to_display_string(),
        }
    }
}

impl ToDisplayString for Value {
    fn to_display_string(&self) -> String {
        match self {
            Value::String(text) => text.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Structured(value)
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Text(value.to_string())
    }
}

macro_rules! impl_payload_from_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Payload {
            fn from(value: $ty) -> Self {
                Payload::Text(value.to_string())
            }
        }
    )*};
}

impl_payload_from_scalar!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize, f32, f64);

/// Per-call options bag: formatting tweaks plus buffering overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryOptions {
    /// Prefix inserted before the timestamp segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,

    /// Collapse whitespace runs in the payload text to single spaces.
    #[serde(default)]
    pub one_line: bool,

    /// Substring find/replace pair applied to the payload text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<(String, String)>,

    /// Buffer this entry even when its level qualifies for immediate output.
    #[serde(default)]
    pub skip: bool,

    /// Surface this entry when the buffer is replayed.
    #[serde(default)]
    pub show: bool,
}

/// One captured log call, owned by the buffer engine once stashed and
/// destroyed on flush or reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Capture time, seconds resolution in output.
    pub timestamp: DateTime<Utc>,
    pub level: Severity,
    pub payload: Payload,
    #[serde(default)]
    pub options: EntryOptions,
    /// Stored surface marker: true when the entry arrived through the skip
    /// path or was explicitly marked in its options.
    #[serde(default)]
    pub show: bool,
}

impl LogEntry {
    /// Capture an entry at the current time.
    pub fn now(payload: Payload, level: Severity, options: EntryOptions) -> Self {
        Self::at(Utc::now(), payload, level, options)
    }

    /// Capture an entry with an explicit timestamp.
    pub fn at(
        timestamp: DateTime<Utc>,
        payload: Payload,
        level: Severity,
        options: EntryOptions,
    ) -> Self {
        let show = options.show;
        Self {
            timestamp,
            level,
            payload,
            options,
            show,
        }
    }
}
