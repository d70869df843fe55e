//! Posts shared on the trip feed and their engagement counters.

use thiserror::Error;

use crate::Tag;

/// Global engagement counters for a post.
///
/// Only trending ranking reads these; personalised ranking ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EngagementStats {
    /// Number of times the post was saved.
    pub saves: u64,
    /// Number of public reposts.
    pub reposts: u64,
    /// Number of shares.
    pub shares: u64,
    /// Number of impressions.
    pub views: u64,
}

/// A content item eligible for ranking.
///
/// Tags are normalised and deduplicated on construction, keeping their first
/// occurrence order.
///
/// # Examples
///
/// ```
/// use wanderfeed_core::{EngagementStats, Post};
///
/// let post = Post::new("p1", ["Beach", "beach", "Surf"], EngagementStats::default());
/// assert_eq!(post.tags().len(), 2);
/// assert_eq!(post.id(), "p1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PostRecord", into = "PostRecord")
)]
pub struct Post {
    id: String,
    tags: Vec<Tag>,
    engagement: EngagementStats,
}

/// Errors returned when building a [`Post`] from an unvalidated record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostError {
    /// The record carried no tag collection at all.
    #[error("post {post_id} is missing its tag collection")]
    MalformedContentItem {
        /// Identifier of the offending post.
        post_id: String,
    },
}

impl Post {
    /// Construct a post, normalising and deduplicating `tags`.
    #[must_use]
    pub fn new<I, T>(id: impl Into<String>, tags: I, engagement: EngagementStats) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Tag>,
    {
        let mut unique: Vec<Tag> = Vec::new();
        for tag in tags.into_iter().map(Into::into) {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        Self {
            id: id.into(),
            tags: unique,
            engagement,
        }
    }

    /// Stable identifier of the post.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Distinct tags in first-seen order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Engagement counters used by trending ranking.
    #[must_use]
    pub const fn engagement(&self) -> EngagementStats {
        self.engagement
    }

    /// Report whether the post carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

/// Unvalidated post as supplied by a content source.
///
/// A missing `tags` field is distinct from an empty list: the former is
/// malformed, the latter is a valid post that always scores zero.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PostRecord {
    /// Identifier of the post.
    pub id: String,
    /// Tag collection, if present.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Option<Vec<String>>,
    /// Engagement counters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub engagement_stats: EngagementStats,
}

impl TryFrom<PostRecord> for Post {
    type Error = PostError;

    fn try_from(record: PostRecord) -> Result<Self, Self::Error> {
        let Some(tags) = record.tags else {
            return Err(PostError::MalformedContentItem { post_id: record.id });
        };
        Ok(Self::new(record.id, tags, record.engagement_stats))
    }
}

impl From<Post> for PostRecord {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            tags: Some(post.tags.into_iter().map(String::from).collect()),
            engagement_stats: post.engagement,
        }
    }
}
