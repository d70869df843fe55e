//! User interactions recorded against posts.
//!
//! Events snapshot the post's tags when they are created so a user's
//! preference history stays stable even if the post is re-tagged later.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{Post, Tag};

/// The fixed set of interactions the engine understands.
///
/// # Examples
/// ```
/// use std::str::FromStr;
/// use wanderfeed_core::InteractionKind;
///
/// assert_eq!(InteractionKind::from_str("swipe_right"), Ok(InteractionKind::SwipeRight));
/// assert!(InteractionKind::from_str("bookmark").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum InteractionKind {
    /// The post was shown to the user.
    View,
    /// The user saved the post.
    Save,
    /// The user swiped the post away approvingly.
    SwipeRight,
    /// The user swiped the post away dismissively.
    SwipeLeft,
    /// The user shared the post.
    Share,
    /// The user reposted the post publicly.
    Repost,
}

impl InteractionKind {
    /// Every known interaction kind.
    pub const ALL: [Self; 6] = [
        Self::View,
        Self::Save,
        Self::SwipeRight,
        Self::SwipeLeft,
        Self::Share,
        Self::Repost,
    ];

    /// Return the wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Save => "save",
            Self::SwipeRight => "swipe_right",
            Self::SwipeLeft => "swipe_left",
            Self::Share => "share",
            Self::Repost => "repost",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building interaction events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InteractionError {
    /// The interaction type is not one of the known kinds.
    #[error("unknown interaction type '{kind}'")]
    InvalidInteractionType {
        /// The rejected type name.
        kind: String,
    },
}

impl FromStr for InteractionKind {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InteractionError::InvalidInteractionType { kind: s.to_owned() })
    }
}

impl TryFrom<String> for InteractionKind {
    type Error = InteractionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InteractionKind> for String {
    fn from(kind: InteractionKind) -> Self {
        kind.as_str().to_owned()
    }
}

/// A single recorded user action on a post.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use wanderfeed_core::{EngagementStats, InteractionEvent, InteractionKind, Post};
///
/// let post = Post::new("p1", ["beach"], EngagementStats::default());
/// let event = InteractionEvent::for_post("e1", "u1", &post, InteractionKind::Save, Utc::now());
/// assert_eq!(event.post_id, "p1");
/// assert_eq!(event.tags.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct InteractionEvent {
    /// Event identifier.
    pub id: String,
    /// User who performed the action.
    pub user_id: String,
    /// Post the action applied to.
    pub post_id: String,
    /// What the user did.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: InteractionKind,
    /// The post's tags when the event was created.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Tag>,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
}

impl InteractionEvent {
    /// Build an event that snapshots `post`'s current tags.
    #[must_use]
    pub fn for_post(
        id: impl Into<String>,
        user_id: impl Into<String>,
        post: &Post,
        kind: InteractionKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            post_id: post.id().to_owned(),
            kind,
            tags: post.tags().to_vec(),
            created_at,
        }
    }
}
