//! Format detection for string values
//!
//! Formats are checked as an ordered cascade and the first match wins.
//! Several formats are syntactic subsets of later ones (a `date` is a
//! prefix of a `date-time`, a dotted IPv4 address is also a valid
//! hostname), so the order of [`FORMAT_RULES`] is part of the contract.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Semantic refinement of a string value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// ISO 8601 date-time (YYYY-MM-DDTHH:MM:SS)
    DateTime,
    /// ISO 8601 date (YYYY-MM-DD)
    Date,
    /// Time of day (HH:MM:SS)
    Time,
    /// ISO 8601 duration (P1DT2H)
    Duration,
    /// RFC 4122 UUID
    Uuid,
    /// Email address
    Email,
    /// Absolute URI
    Uri,
    /// IPv4 address
    Ipv4,
    /// IPv6 address
    Ipv6,
    /// Fully qualified hostname
    Hostname,
}

impl Format {
    /// Get the JSON Schema format string for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::DateTime => "date-time",
            Format::Date => "date",
            Format::Time => "time",
            Format::Duration => "duration",
            Format::Uuid => "uuid",
            Format::Email => "email",
            Format::Uri => "uri",
            Format::Ipv4 => "ipv4",
            Format::Ipv6 => "ipv6",
            Format::Hostname => "hostname",
        }
    }

    /// Parse a JSON Schema format string
    pub fn from_schema_format(value: &str) -> Option<Format> {
        FORMAT_RULES
            .iter()
            .map(|(format, _)| *format)
            .find(|format| format.as_str() == value)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Regex patterns for format detection
static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[Tt ]\d{2}:\d{2}:\d{2}(\.\d+)?([Zz]|[+-]\d{2}:?\d{2})?$")
        .unwrap()
});

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}:\d{2}:\d{2}(\.\d+)?([Zz]|[+-]\d{2}:?\d{2})?$").unwrap()
});

static DURATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^P(\d+([.,]\d+)?Y)?(\d+([.,]\d+)?M)?(\d+([.,]\d+)?W)?(\d+([.,]\d+)?D)?(T(\d+([.,]\d+)?H)?(\d+([.,]\d+)?M)?(\d+([.,]\d+)?S)?)?$",
    )
    .unwrap()
});

// Version nibble 1-5, variant nibble 8, 9, a or b.
static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
    )
    .unwrap()
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[^\s"(),:;<>@\[\\\]]+@[^\s"(),:;<>@\[\\\]]+\.[^\s"(),:;<>@\[\\\]]+$"#).unwrap()
});

static URI_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://\S+$").unwrap());

static IPV4_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .unwrap()
});

const MAX_EMAIL_LEN: usize = 254;
const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Ordered detection cascade, evaluated top to bottom
pub const FORMAT_RULES: &[(Format, fn(&str) -> bool)] = &[
    (Format::DateTime, is_date_time),
    (Format::Date, is_date),
    (Format::Time, is_time),
    (Format::Duration, is_duration),
    (Format::Uuid, is_uuid),
    (Format::Email, is_email),
    (Format::Uri, is_uri),
    (Format::Ipv4, is_ipv4),
    (Format::Ipv6, is_ipv6),
    (Format::Hostname, is_hostname),
];

/// Detect the format of a string value
///
/// Returns `None` for empty or whitespace-only strings and for strings that
/// match no rule; such values are still typed as plain `string`.
pub fn detect_format(value: &str) -> Option<Format> {
    if value.trim().is_empty() {
        return None;
    }

    FORMAT_RULES
        .iter()
        .find(|(_, matches)| matches(value))
        .map(|(format, _)| *format)
}

fn is_date_time(value: &str) -> bool {
    DATETIME_REGEX.is_match(value)
}

fn is_date(value: &str) -> bool {
    DATE_REGEX.is_match(value)
}

fn is_time(value: &str) -> bool {
    TIME_REGEX.is_match(value)
}

fn is_duration(value: &str) -> bool {
    // "P" and "PT" carry no designator
    value != "P" && !value.ends_with('T') && DURATION_REGEX.is_match(value)
}

fn is_uuid(value: &str) -> bool {
    UUID_REGEX.is_match(value)
}

fn is_email(value: &str) -> bool {
    value.len() <= MAX_EMAIL_LEN && EMAIL_REGEX.is_match(value)
}

fn is_uri(value: &str) -> bool {
    URI_REGEX.is_match(value)
}

fn is_ipv4(value: &str) -> bool {
    IPV4_REGEX.is_match(value)
}

fn is_ipv6(value: &str) -> bool {
    fn groups(part: &str) -> Option<usize> {
        if part.is_empty() {
            return Some(0);
        }
        let mut count = 0;
        for group in part.split(':') {
            if group.is_empty() || group.len() > 4 || !group.chars().all(|c| c.is_ascii_hexdigit())
            {
                return None;
            }
            count += 1;
        }
        Some(count)
    }

    match value.matches("::").count() {
        0 => groups(value) == Some(8),
        1 => {
            let Some((head, tail)) = value.split_once("::") else {
                return false;
            };
            match (groups(head), groups(tail)) {
                (Some(h), Some(t)) => h + t <= 7,
                _ => false,
            }
        }
        _ => false,
    }
}

fn is_hostname(value: &str) -> bool {
    if value.len() > MAX_HOSTNAME_LEN || !value.contains('.') {
        return false;
    }

    value.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
