use std::fmt;
use std::str::FromStr;

use crate::errors::SubtitleError;

// @module: Millisecond timestamps used as alignment keys

/// Offset from the start of the media, in milliseconds.
///
/// Ordering on the inner value is chronological, so a `Timestamp` is used
/// directly as the key of a [`crate::Track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Build a timestamp from clock components, rejecting out of range minutes,
    /// seconds or milliseconds
    pub fn from_hms(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Result<Self, SubtitleError> {
        let malformed = || {
            SubtitleError::MalformedTimestamp(format!(
                "{:02}:{:02}:{:02},{:03}",
                hours, minutes, seconds, millis
            ))
        };
        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(malformed());
        }
        hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .map(Timestamp)
            .ok_or_else(malformed)
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`, a `.` separator is also accepted).
    /// The millisecond field must have exactly three digits.
    pub fn parse(timestamp: &str) -> Result<Self, SubtitleError> {
        let malformed = || SubtitleError::MalformedTimestamp(timestamp.to_string());

        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();
        // Milliseconds are a fixed three-digit field
        if parts.len() != 4 || parts[3].len() != 3 {
            return Err(malformed());
        }

        let mut values = [0u64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            *slot = part.parse().map_err(|_| malformed())?;
        }

        Self::from_hms(values[0], values[1], values[2], values[3]).map_err(|_| malformed())
    }

    pub fn add_millis(self, ms: u64) -> Self {
        Timestamp(self.0.saturating_add(ms))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0;
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        write!(f, "{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl FromStr for Timestamp {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
