//! Command-line interface for exploring Wanderfeed rankings over JSON files.
//!
//! Every subcommand reads its inputs (post catalogues, preference models,
//! interaction events) from JSON documents and prints its result as JSON on
//! stdout. Paths and tuning values can come from CLI flags, configuration
//! files or `WANDERFEED_*` environment variables.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;

mod catalogue;
mod discover;
mod error;
mod feed;
mod profile;

pub use error::CliError;

use discover::{SimilarArgs, TrendingArgs};
use feed::FeedArgs;
use profile::{RecordArgs, SeedArgs};

const ARG_POSTS: &str = "posts";
const ARG_MODEL: &str = "model";
const ARG_EVENT: &str = "event";
const ARG_TAGS: &str = "tags";
const ARG_POST_ID: &str = "post-id";
const ARG_LIMIT: &str = "limit";
const ARG_EXCLUDE: &str = "exclude";
const ARG_SEED: &str = "seed";
const ARG_EXPLORATION_BOUND: &str = "exploration-bound";
const ENV_SEED_MODEL: &str = "WANDERFEED_CMDS_SEED_MODEL";
const ENV_RECORD_MODEL: &str = "WANDERFEED_CMDS_RECORD_MODEL";
const ENV_RECORD_EVENT: &str = "WANDERFEED_CMDS_RECORD_EVENT";
const ENV_FEED_POSTS: &str = "WANDERFEED_CMDS_FEED_POSTS";
const ENV_FEED_MODEL: &str = "WANDERFEED_CMDS_FEED_MODEL";
const ENV_TRENDING_POSTS: &str = "WANDERFEED_CMDS_TRENDING_POSTS";
const ENV_SIMILAR_POSTS: &str = "WANDERFEED_CMDS_SIMILAR_POSTS";
const ENV_SIMILAR_POST_ID: &str = "WANDERFEED_CMDS_SIMILAR_POST_ID";

/// Run the Wanderfeed CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or input documents are
/// invalid, or when output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Seed(args) => profile::run_seed(args, writer),
        Command::Record(args) => profile::run_record(args, writer),
        Command::Feed(args) => feed::run_feed(args, writer),
        Command::Trending(args) => discover::run_trending(args, writer),
        Command::Similar(args) => discover::run_similar(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wanderfeed",
    about = "Tag-based personalisation for travel posts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Seed a preference model from onboarding interests.
    Seed(SeedArgs),
    /// Fold one interaction event into a stored preference model.
    Record(RecordArgs),
    /// Print a personalised feed for a preference model.
    Feed(FeedArgs),
    /// Print the most engaging posts, ignoring personal preferences.
    Trending(TrendingArgs),
    /// Print posts sharing tags with a reference post.
    Similar(SimilarArgs),
}

/// Fail unless `path` names an existing regular file.
fn require_file(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match wanderfeed_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `value` to `writer` as pretty JSON followed by a newline.
fn write_output<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
