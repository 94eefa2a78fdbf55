use crate::error::CoreError;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Longest accepted expiry window, roughly a century. Both backends can
/// represent `now + MAX_EXPIRY_DAYS` well before the year-9999 limit.
pub const MAX_EXPIRY_DAYS: u32 = 36_500;

/// Identifier of a stored snippet, assigned by the backing engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(u64);

impl SnippetId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SnippetId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for SnippetId {
    type Err = CoreError;

    /// Parses a positive decimal identifier. Zero is never assigned by an
    /// auto-increment column, so it is rejected here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u64 = s
            .parse()
            .map_err(|_| CoreError::InvalidSnippetId(format!("'{s}' is not a positive integer")))?;

        if id == 0 {
            return Err(CoreError::InvalidSnippetId(
                "'0' is not a positive integer".to_string(),
            ));
        }

        Ok(Self(id))
    }
}

impl Display for SnippetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of days a snippet stays live after creation.
///
/// Always non-negative. A value of zero yields a snippet whose expiry equals
/// its creation time, which no read ever returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ExpiryDays(u32);

impl ExpiryDays {
    /// Validates a caller-supplied day count.
    pub fn new(days: i64) -> Result<Self, CoreError> {
        if days < 0 {
            return Err(CoreError::InvalidExpiry(format!(
                "day count must not be negative, got {days}"
            )));
        }

        match u32::try_from(days) {
            Ok(days) if days <= MAX_EXPIRY_DAYS => Ok(Self(days)),
            _ => Err(CoreError::InvalidExpiry(format!(
                "day count must be at most {MAX_EXPIRY_DAYS}, got {days}"
            ))),
        }
    }

    pub const fn days(self) -> u32 {
        self.0
    }

    /// The expiry window as a duration.
    pub fn as_duration(self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.0) * SECONDS_PER_DAY)
    }
}

impl<'de> Deserialize<'de> for ExpiryDays {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let days = i64::deserialize(deserializer)?;
        ExpiryDays::new(days).map_err(serde::de::Error::custom)
    }
}

impl Display for ExpiryDays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} days", self.0)
    }
}

/// A stored snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    /// Insertion instant, UTC.
    pub created: Timestamp,
    /// `created` plus the requested number of days.
    pub expires: Timestamp,
}

impl Snippet {
    /// A snippet is live while its expiry lies strictly after `now`.
    pub fn is_live_at(&self, now: Timestamp) -> bool {
        self.expires > now
    }

    /// Time between creation and expiry.
    pub fn lifetime(&self) -> SignedDuration {
        self.expires.duration_since(self.created)
    }
}

/// Input of the create operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewSnippet {
    pub title: String,
    pub content: String,
    pub expires_in: ExpiryDays,
}

impl NewSnippet {
    pub fn new(title: impl Into<String>, content: impl Into<String>, expires_in: ExpiryDays) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            expires_in,
        }
    }
}
