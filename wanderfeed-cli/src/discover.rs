//! `trending` and `similar`: discovery lists that ignore personal taste.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wanderfeed_core::Post;
use wanderfeed_ranker::{
    DEFAULT_SIMILAR_LIMIT, DEFAULT_TRENDING_LIMIT, EngagementWeights, similar_posts,
    trending_posts_with,
};

use crate::catalogue::load_posts;
use crate::{
    ARG_LIMIT, ARG_POST_ID, ARG_POSTS, CliError, ENV_SIMILAR_POST_ID, ENV_SIMILAR_POSTS,
    ENV_TRENDING_POSTS, require_file, write_output,
};

/// One line of `trending` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrendingEntry<'a> {
    id: &'a str,
    engagement_score: u64,
}

/// One line of `similar` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimilarEntry<'a> {
    id: &'a str,
    shared_tags: usize,
}

/// CLI arguments for the `trending` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank a JSON post catalogue by engagement \
                 (2 x saves + 3 x reposts + shares). Suitable for new users \
                 without a preference model.",
    about = "Print the most engaging posts"
)]
#[ortho_config(prefix = "WANDERFEED")]
pub(crate) struct TrendingArgs {
    /// Path to the JSON post catalogue.
    #[arg(long = ARG_POSTS, value_name = "path")]
    #[serde(default)]
    pub(crate) posts: Option<Utf8PathBuf>,
    /// Maximum number of posts to print.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl TrendingArgs {
    fn into_config(self) -> Result<TrendingConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TrendingConfig::try_from(merged)
    }
}

/// Resolved `trending` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrendingConfig {
    pub(crate) posts: Utf8PathBuf,
    pub(crate) limit: usize,
}

impl TryFrom<TrendingArgs> for TrendingConfig {
    type Error = CliError;

    fn try_from(args: TrendingArgs) -> Result<Self, Self::Error> {
        let posts = args.posts.ok_or(CliError::MissingArgument {
            field: ARG_POSTS,
            env: ENV_TRENDING_POSTS,
        })?;
        Ok(Self {
            posts,
            limit: args.limit.unwrap_or(DEFAULT_TRENDING_LIMIT),
        })
    }
}

pub(crate) fn run_trending(args: TrendingArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_file(&config.posts, ARG_POSTS)?;
    run_trending_with(&config, writer)
}

pub(crate) fn run_trending_with(
    config: &TrendingConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let posts = load_posts(&config.posts)?;
    let weights = EngagementWeights::default();
    let entries: Vec<TrendingEntry<'_>> = trending_posts_with(&posts, config.limit, &weights)
        .into_iter()
        .map(|post| TrendingEntry {
            id: post.id(),
            engagement_score: weights.score(post.engagement()),
        })
        .collect();
    write_output(writer, &entries)
}

/// CLI arguments for the `similar` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List posts sharing at least one tag with the reference \
                 post, most overlapping first. The reference post itself is \
                 never listed.",
    about = "Print posts similar to a reference post"
)]
#[ortho_config(prefix = "WANDERFEED")]
pub(crate) struct SimilarArgs {
    /// Path to the JSON post catalogue.
    #[arg(long = ARG_POSTS, value_name = "path")]
    #[serde(default)]
    pub(crate) posts: Option<Utf8PathBuf>,
    /// Id of the reference post.
    #[arg(long = ARG_POST_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) post_id: Option<String>,
    /// Maximum number of posts to print.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

impl SimilarArgs {
    fn into_config(self) -> Result<SimilarConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SimilarConfig::try_from(merged)
    }
}

/// Resolved `similar` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SimilarConfig {
    pub(crate) posts: Utf8PathBuf,
    pub(crate) post_id: String,
    pub(crate) limit: usize,
}

impl TryFrom<SimilarArgs> for SimilarConfig {
    type Error = CliError;

    fn try_from(args: SimilarArgs) -> Result<Self, Self::Error> {
        let posts = args.posts.ok_or(CliError::MissingArgument {
            field: ARG_POSTS,
            env: ENV_SIMILAR_POSTS,
        })?;
        let post_id = args.post_id.ok_or(CliError::MissingArgument {
            field: ARG_POST_ID,
            env: ENV_SIMILAR_POST_ID,
        })?;
        Ok(Self {
            posts,
            post_id,
            limit: args.limit.unwrap_or(DEFAULT_SIMILAR_LIMIT),
        })
    }
}

pub(crate) fn run_similar(args: SimilarArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_file(&config.posts, ARG_POSTS)?;
    run_similar_with(&config, writer)
}

pub(crate) fn run_similar_with(
    config: &SimilarConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let posts = load_posts(&config.posts)?;
    let reference = find_post(&posts, &config.post_id)?;
    let entries: Vec<SimilarEntry<'_>> = similar_posts(reference, &posts, config.limit)
        .into_iter()
        .map(|similar| SimilarEntry {
            id: similar.post.id(),
            shared_tags: similar.shared_tags,
        })
        .collect();
    write_output(writer, &entries)
}

fn find_post<'a>(posts: &'a [Post], post_id: &str) -> Result<&'a Post, CliError> {
    posts
        .iter()
        .find(|post| post.id() == post_id)
        .ok_or_else(|| CliError::UnknownPost {
            post_id: post_id.to_owned(),
        })
}
