//! `feed`: personalised ranking of a post catalogue.

use std::collections::HashSet;
use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use wanderfeed_ranker::{DEFAULT_FEED_LIMIT, ExplorationNoise, personalized_feed};

use crate::catalogue::{load_model, load_posts};
use crate::{
    ARG_EXCLUDE, ARG_EXPLORATION_BOUND, ARG_LIMIT, ARG_MODEL, ARG_POSTS, ARG_SEED, CliError,
    ENV_FEED_MODEL, ENV_FEED_POSTS, require_file, write_output,
};

/// CLI arguments for the `feed` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank a JSON post catalogue against a preference model. \
                 Posts the user has already seen can be excluded, and a \
                 seed makes the exploration noise reproducible.",
    about = "Print a personalised feed"
)]
#[ortho_config(prefix = "WANDERFEED")]
pub(crate) struct FeedArgs {
    /// Path to the JSON post catalogue.
    #[arg(long = ARG_POSTS, value_name = "path")]
    #[serde(default)]
    pub(crate) posts: Option<Utf8PathBuf>,
    /// Path to the preference model document.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Comma-separated ids of posts to leave out.
    #[arg(long = ARG_EXCLUDE, value_name = "id", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) exclude: Vec<String>,
    /// Maximum number of posts to print.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Seed for the exploration noise.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Upper bound of the exploration noise added to each score.
    #[arg(long = ARG_EXPLORATION_BOUND, value_name = "x")]
    #[serde(default)]
    pub(crate) exploration_bound: Option<f64>,
}

impl FeedArgs {
    fn into_config(self) -> Result<FeedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FeedConfig::try_from(merged)
    }
}

/// Resolved `feed` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FeedConfig {
    pub(crate) posts: Utf8PathBuf,
    pub(crate) model: Utf8PathBuf,
    pub(crate) exclude: HashSet<String>,
    pub(crate) limit: usize,
    pub(crate) seed: Option<u64>,
    pub(crate) exploration: ExplorationNoise,
}

impl FeedConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_file(&self.posts, ARG_POSTS)?;
        require_file(&self.model, ARG_MODEL)?;
        Ok(())
    }
}

impl TryFrom<FeedArgs> for FeedConfig {
    type Error = CliError;

    fn try_from(args: FeedArgs) -> Result<Self, Self::Error> {
        let posts = args.posts.ok_or(CliError::MissingArgument {
            field: ARG_POSTS,
            env: ENV_FEED_POSTS,
        })?;
        let model = args.model.ok_or(CliError::MissingArgument {
            field: ARG_MODEL,
            env: ENV_FEED_MODEL,
        })?;
        let exploration = match args.exploration_bound {
            Some(bound) => ExplorationNoise::new(bound)?,
            None => ExplorationNoise::default(),
        };
        Ok(Self {
            posts,
            model,
            exclude: args.exclude.into_iter().collect(),
            limit: args.limit.unwrap_or(DEFAULT_FEED_LIMIT),
            seed: args.seed,
            exploration,
        })
    }
}

pub(crate) fn run_feed(args: FeedArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    run_feed_with(&config, writer)
}

pub(crate) fn run_feed_with(config: &FeedConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let posts = load_posts(&config.posts)?;
    let model = load_model(&config.model)?;
    let mut rng = config
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    let feed = personalized_feed(
        &posts,
        &model,
        &config.exclude,
        config.limit,
        config.exploration,
        &mut rng,
    );
    write_output(writer, &feed)
}
