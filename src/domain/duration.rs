//! Duration value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default toast display duration (3 seconds)
pub const DEFAULT_STATUS_TTL_SECS: u64 = 3;

/// Default capture silence threshold (3 seconds)
pub const DEFAULT_SILENCE_THRESHOLD_SECS: u64 = 3;

/// Value object representing a time duration.
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    /// Create a Duration from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Default status display duration (3 seconds)
    pub const fn default_status_ttl() -> Self {
        Self::from_secs(DEFAULT_STATUS_TTL_SECS)
    }

    /// Default capture silence threshold (3 seconds)
    pub const fn default_silence_threshold() -> Self {
        Self::from_secs(DEFAULT_SILENCE_THRESHOLD_SECS)
    }

    /// Get duration in seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Get duration in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Parse a duration string into a Duration value object.
    /// Supported formats: "30s", "1m", "2m30s", "90s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let err = || DurationParseError {
            input: s.to_string(),
        };

        let (minutes, seconds) = if let Some(rest) = input.strip_suffix('s') {
            match rest.split_once('m') {
                Some((m, sec)) => (
                    m.parse::<u64>().map_err(|_| err())?,
                    sec.parse::<u64>().map_err(|_| err())?,
                ),
                None => (0, rest.parse::<u64>().map_err(|_| err())?),
            }
        } else if let Some(m) = input.strip_suffix('m') {
            (m.parse::<u64>().map_err(|_| err())?, 0)
        } else {
            return Err(err());
        };

        let total_ms = (minutes * 60 + seconds) * 1000;
        if total_ms == 0 {
            return Err(err());
        }

        Ok(Self {
            milliseconds: total_ms,
        })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_status_ttl()
    }
}
