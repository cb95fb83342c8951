//! Case-insensitive tag label.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A case-insensitive label attached to notes.
///
/// Tags are normalized to lowercase, so `Home`, `home` and `HOME` name the
/// same inverted index set. A tag written as `Work` is stored and printed
/// as `work`.
///
/// # Validation Rules
/// - Non-empty after trimming
/// - Inner spaces are kept (`to do` is a valid tag)
/// - No commas, since commas separate tags on the command line
/// - No control characters, which includes tabs and newlines
///
/// # Examples
///
/// ```
/// use notekeep::domain::Tag;
///
/// let tag = Tag::new("Errand").unwrap();
/// assert_eq!(tag.as_str(), "errand");
/// assert_eq!(tag, Tag::new("ERRAND").unwrap());
/// assert_eq!(Tag::new(" To Do ").unwrap().as_str(), "to do");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String); // Always stored lowercase

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a new Tag from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if the tag is empty or contains a comma or a
    /// control character.
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let normalized = s.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        if normalized
            .chars()
            .any(|c| c.is_control() || c == ',')
        {
            return Err(ParseTagError(format!(
                "invalid tag '{}': tags cannot contain commas or control characters",
                normalized
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized tag value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
