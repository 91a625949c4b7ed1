//! Token lifetimes written as `"7d"`, `"12h"`, `"30m"`, `"45s"` or bare seconds.

#[cfg(test)]
#[path = "ttl_test.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Lifetime of an issued token, in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ttl(u64);

impl Ttl {
    /// Expires at the moment of issue.
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn seconds(secs: u64) -> Self {
        Self(secs)
    }

    #[must_use]
    pub const fn minutes(mins: u64) -> Self {
        Self(mins.saturating_mul(MINUTE))
    }

    #[must_use]
    pub const fn hours(hours: u64) -> Self {
        Self(hours.saturating_mul(HOUR))
    }

    #[must_use]
    pub const fn days(days: u64) -> Self {
        Self(days.saturating_mul(DAY))
    }

    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Seconds as a signed offset for unix-timestamp arithmetic, clamped.
    #[must_use]
    pub fn as_offset(self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

impl Default for Ttl {
    /// Seven days.
    fn default() -> Self {
        Self::days(7)
    }
}

impl From<Ttl> for Duration {
    fn from(ttl: Ttl) -> Self {
        Duration::from_secs(ttl.0)
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0;
        if secs == 0 {
            return f.write_str("0s");
        }
        if secs % DAY == 0 {
            write!(f, "{}d", secs / DAY)
        } else if secs % HOUR == 0 {
            write!(f, "{}h", secs / HOUR)
        } else if secs % MINUTE == 0 {
            write!(f, "{}m", secs / MINUTE)
        } else {
            write!(f, "{secs}s")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TtlParseError {
    #[error("empty ttl")]
    Empty,
    #[error("invalid ttl: {0}")]
    Invalid(String),
    #[error("ttl out of range: {0}")]
    Overflow(String),
}

impl FromStr for Ttl {
    type Err = TtlParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(TtlParseError::Empty);
        }

        let (digits, unit) = match raw.char_indices().last() {
            Some((idx, c)) if c.is_ascii_alphabetic() => (&raw[..idx], Some(c.to_ascii_lowercase())),
            _ => (raw, None),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TtlParseError::Invalid(s.to_owned()));
        }

        let value: u64 = digits
            .parse()
            .map_err(|_| TtlParseError::Overflow(s.to_owned()))?;
        let multiplier = match unit {
            None | Some('s') => 1,
            Some('m') => MINUTE,
            Some('h') => HOUR,
            Some('d') => DAY,
            Some(_) => return Err(TtlParseError::Invalid(s.to_owned())),
        };

        value
            .checked_mul(multiplier)
            .map(Self)
            .ok_or_else(|| TtlParseError::Overflow(s.to_owned()))
    }
}
