//! Standard library extensions.

use std::time::Duration;

use anyhow::anyhow;

// -----------------------------------------------------------------------------
// Display
// -----------------------------------------------------------------------------

/// Alternative to std::fmt::Display for types we do not own.
pub trait DisplayExt {
    fn to_string_ext(&self) -> String;
}

impl DisplayExt for Duration {
    fn to_string_ext(&self) -> String {
        humantime::Duration::from(*self).to_string()
    }
}

impl DisplayExt for Option<String> {
    fn to_string_ext(&self) -> String {
        match self {
            Some(value) => value.clone(),
            None => "null".to_owned(),
        }
    }
}

// -----------------------------------------------------------------------------
// Serialization
// -----------------------------------------------------------------------------

/// Serializes any serializable value to non-formatted [`String`].
///
/// Values built from strings, numbers and JSON values never fail to serialize, so failures fall back to `null`.
pub fn to_json_string<V: serde::Serialize>(value: &V) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_owned())
}

// -----------------------------------------------------------------------------
// Parsing
// -----------------------------------------------------------------------------

/// Parses a duration from human readable format (`60s`, `500ms`) or from a plain number of seconds (`0.5`).
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if let Ok(duration) = humantime::parse_duration(s) {
        return Ok(duration);
    }
    match s.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(Duration::from_secs_f64(seconds)),
        _ => Err(anyhow!("invalid duration: \"{}\"", s)),
    }
}

// -----------------------------------------------------------------------------
// Standalone functions
// -----------------------------------------------------------------------------

/// `not(something)` instead of `!something`.
#[inline(always)]
pub fn not(value: bool) -> bool {
    !value
}
