//! Normalised content tags.
//!
//! A tag names a topical facet of a post: an activity, a destination or a
//! free-form label. Tags carry no hierarchy and compare by exact string
//! equality once lower-cased.
//!
//! # Examples
//! ```
//! use wanderfeed_core::Tag;
//!
//! assert_eq!(Tag::new("Hiking").as_str(), "hiking");
//! assert_eq!(Tag::from("BEACH"), Tag::from("beach"));
//! ```

use std::borrow::Borrow;
use std::fmt;

/// A lower-cased topical label attached to posts and interactions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub struct Tag(String);

impl Tag {
    /// Normalise `raw` into a tag.
    ///
    /// # Examples
    /// ```
    /// use wanderfeed_core::Tag;
    ///
    /// let tag = Tag::new("Lisbon");
    /// assert_eq!(tag.as_str(), "lisbon");
    /// ```
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_lowercase())
    }

    /// Borrow the normalised label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Tag {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by `Tag` be queried with a plain `&str`.
impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
