//! Personalised scoring, ranking and feed assembly.
#![forbid(unsafe_code)]

use std::collections::HashSet;
use std::hash::BuildHasher;

use rand::Rng;
use wanderfeed_core::{Post, PreferenceModel};

use crate::ExplorationNoise;

/// Number of posts returned by [`personalized_feed`] when callers have no
/// better value.
pub const DEFAULT_FEED_LIMIT: usize = 20;

/// A candidate post with its base and noise-adjusted scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPost<'a> {
    /// The scored post.
    pub post: &'a Post,
    /// Mean tag score under the preference model.
    pub base: f64,
    /// `base` plus exploration noise, or `base` when exploration is off.
    pub adjusted: f64,
}

/// Score `post` as the arithmetic mean of its tag scores under `model`.
///
/// Tags absent from the model count as zero. A post without tags scores
/// exactly `0.0`.
///
/// # Examples
/// ```
/// use wanderfeed_core::{EngagementStats, Post, PreferenceModel};
/// use wanderfeed_ranker::score_post;
///
/// let model = PreferenceModel::new().with_score("beach", 2.0);
/// let post = Post::new("p", ["beach", "unknown"], EngagementStats::default());
/// assert_eq!(score_post(&post, &model), 1.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the score is a mean of tag scores over a small tag count"
)]
pub fn score_post(post: &Post, model: &PreferenceModel) -> f64 {
    let tags = post.tags();
    if tags.is_empty() {
        return 0.0;
    }
    let total: f64 = tags.iter().map(|tag| model.score_or_zero(tag)).sum();
    total / tags.len() as f64
}

/// Score every candidate, drawing one independent noise value per post when
/// `exploration` is set.
#[expect(
    clippy::float_arithmetic,
    reason = "exploration adds bounded noise to the base score"
)]
pub fn score_candidates<'a, I, R>(
    posts: I,
    model: &PreferenceModel,
    exploration: Option<ExplorationNoise>,
    rng: &mut R,
) -> Vec<ScoredPost<'a>>
where
    I: IntoIterator<Item = &'a Post>,
    R: Rng + ?Sized,
{
    posts
        .into_iter()
        .map(|post| {
            let base = score_post(post, model);
            let adjusted = exploration.map_or(base, |noise| base + noise.sample(&mut *rng));
            ScoredPost {
                post,
                base,
                adjusted,
            }
        })
        .collect()
}

/// Order `posts` by descending personalised score.
///
/// Equal scores keep their input order. The input slice is only borrowed;
/// the ranking is returned as references into it.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use wanderfeed_core::{EngagementStats, Post, PreferenceModel};
/// use wanderfeed_ranker::rank_posts;
///
/// let model = PreferenceModel::new().with_score("a", 3.0).with_score("b", 1.0);
/// let posts = vec![
///     Post::new("one", ["b"], EngagementStats::default()),
///     Post::new("two", ["a"], EngagementStats::default()),
/// ];
/// let ranked = rank_posts(&posts, &model, None, &mut StdRng::seed_from_u64(0));
/// assert_eq!(ranked[0].id(), "two");
/// ```
pub fn rank_posts<'a, R: Rng + ?Sized>(
    posts: &'a [Post],
    model: &PreferenceModel,
    exploration: Option<ExplorationNoise>,
    rng: &mut R,
) -> Vec<&'a Post> {
    rank_scored(score_candidates(posts, model, exploration, rng))
}

/// Build a personalised feed of at most `limit` unseen posts.
///
/// Posts whose id appears in `exclude_ids` are dropped before ranking, and the
/// remainder is ranked with exploration enabled. A `limit` of zero yields an
/// empty feed; a limit above the candidate count yields every candidate.
pub fn personalized_feed<'a, R, S>(
    all_posts: &'a [Post],
    model: &PreferenceModel,
    exclude_ids: &HashSet<String, S>,
    limit: usize,
    exploration: ExplorationNoise,
    rng: &mut R,
) -> Vec<&'a Post>
where
    R: Rng + ?Sized,
    S: BuildHasher,
{
    if limit == 0 {
        return Vec::new();
    }
    let candidates = all_posts
        .iter()
        .filter(|post| !exclude_ids.contains(post.id()));
    let mut feed = rank_scored(score_candidates(candidates, model, Some(exploration), rng));
    feed.truncate(limit);
    log::debug!(
        "built feed of {} from {} posts ({} excluded ids)",
        feed.len(),
        all_posts.len(),
        exclude_ids.len()
    );
    feed
}

fn rank_scored<'a>(mut scored: Vec<ScoredPost<'a>>) -> Vec<&'a Post> {
    // `sort_by` is stable, which preserves input order among ties.
    scored.sort_by(|left, right| {
        ordering_key(right.adjusted).total_cmp(&ordering_key(left.adjusted))
    });
    scored.into_iter().map(|candidate| candidate.post).collect()
}

// Collapses `-0.0` onto `0.0` and sinks NaN so `total_cmp` yields the
// numeric order callers expect.
fn ordering_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else if score == 0.0 {
        0.0
    } else {
        score
    }
}
