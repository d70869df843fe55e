//! Similar-item lookup by shared tags.
#![forbid(unsafe_code)]

use std::cmp::Reverse;
use std::collections::HashSet;

use wanderfeed_core::{Post, Tag};

/// Number of posts returned by [`similar_posts`] when callers have no better
/// value.
pub const DEFAULT_SIMILAR_LIMIT: usize = 5;

/// A post related to a reference post, with the overlap used to rank it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarPost<'a> {
    /// The related post.
    pub post: &'a Post,
    /// Number of tags shared with the reference post.
    pub shared_tags: usize,
}

/// Count the distinct tags `left` and `right` have in common.
#[must_use]
pub fn shared_tag_count(left: &Post, right: &Post) -> usize {
    overlap(&tag_set(left), right)
}

/// Find up to `limit` posts sharing at least one tag with `post`.
///
/// The reference post itself (matched by id) is never returned. Results are
/// ordered by descending overlap; ties keep their input order.
///
/// # Examples
/// ```
/// use wanderfeed_core::{EngagementStats, Post};
/// use wanderfeed_ranker::similar_posts;
///
/// let a = Post::new("a", ["beach", "surf", "portugal"], EngagementStats::default());
/// let b = Post::new("b", ["beach", "surf"], EngagementStats::default());
/// let c = Post::new("c", ["museum"], EngagementStats::default());
/// let all = vec![a.clone(), b, c];
/// let similar = similar_posts(&a, &all, 5);
/// assert_eq!(similar.len(), 1);
/// assert_eq!(similar[0].shared_tags, 2);
/// ```
#[must_use]
pub fn similar_posts<'a>(
    post: &Post,
    all_posts: &'a [Post],
    limit: usize,
) -> Vec<SimilarPost<'a>> {
    let reference = tag_set(post);
    let mut related: Vec<SimilarPost<'a>> = all_posts
        .iter()
        .filter(|candidate| candidate.id() != post.id())
        .map(|candidate| SimilarPost {
            post: candidate,
            shared_tags: overlap(&reference, candidate),
        })
        .filter(|similar| similar.shared_tags > 0)
        .collect();
    related.sort_by_key(|similar| Reverse(similar.shared_tags));
    related.truncate(limit);
    related
}

fn tag_set(post: &Post) -> HashSet<&Tag> {
    post.tags().iter().collect()
}

fn overlap(reference: &HashSet<&Tag>, candidate: &Post) -> usize {
    candidate
        .tags()
        .iter()
        .filter(|tag| reference.contains(tag))
        .count()
}
