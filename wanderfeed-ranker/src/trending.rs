//! Non-personalised ranking by global engagement.
#![forbid(unsafe_code)]

use std::cmp::Reverse;

use wanderfeed_core::Post;

use crate::EngagementWeights;

/// Number of posts returned by [`trending_posts`] when callers have no better
/// value.
pub const DEFAULT_TRENDING_LIMIT: usize = 10;

/// Return the `limit` most engaging posts using the default formula.
///
/// This path never consults a preference model.
///
/// # Examples
/// ```
/// use wanderfeed_core::{EngagementStats, Post};
/// use wanderfeed_ranker::trending_posts;
///
/// let quiet = Post::new("quiet", ["city"], EngagementStats::default());
/// let stats = EngagementStats { reposts: 2, ..EngagementStats::default() };
/// let loud = Post::new("loud", ["city"], stats);
/// let posts = [quiet, loud];
/// let top = trending_posts(&posts, 1);
/// assert_eq!(top[0].id(), "loud");
/// ```
#[must_use]
pub fn trending_posts(posts: &[Post], limit: usize) -> Vec<&Post> {
    trending_posts_with(posts, limit, &EngagementWeights::default())
}

/// Return the `limit` most engaging posts under custom `weights`.
///
/// Ties keep their input order.
#[must_use]
pub fn trending_posts_with<'a>(
    posts: &'a [Post],
    limit: usize,
    weights: &EngagementWeights,
) -> Vec<&'a Post> {
    let mut ranked: Vec<&Post> = posts.iter().collect();
    ranked.sort_by_key(|post| Reverse(weights.score(post.engagement())));
    ranked.truncate(limit);
    ranked
}
