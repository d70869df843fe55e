//! `seed` and `record`: creating and evolving preference model documents.

use std::io::Write;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wanderfeed_core::InteractionEvent;
use wanderfeed_ranker::{InteractionWeights, apply_interaction, initial_preferences_at};

use crate::catalogue::load_model_or_empty;
use crate::{
    ARG_EVENT, ARG_MODEL, ARG_TAGS, CliError, ENV_RECORD_EVENT, ENV_RECORD_MODEL, ENV_SEED_MODEL,
    require_file, write_output,
};

/// CLI arguments for the `seed` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Create a preference model from the interests picked during \
                 onboarding. Every selected tag starts with a score of 1.0; \
                 an existing model file is replaced.",
    about = "Seed a preference model from onboarding interests"
)]
#[ortho_config(prefix = "WANDERFEED")]
pub(crate) struct SeedArgs {
    /// Comma-separated interest tags.
    #[arg(long = ARG_TAGS, value_name = "tag", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) tags: Vec<String>,
    /// Path the seeded model is written to.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
}

impl SeedArgs {
    fn into_config(self) -> Result<SeedConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SeedConfig::try_from(merged)
    }
}

/// Resolved `seed` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SeedConfig {
    pub(crate) tags: Vec<String>,
    pub(crate) model: Utf8PathBuf,
}

impl TryFrom<SeedArgs> for SeedConfig {
    type Error = CliError;

    fn try_from(args: SeedArgs) -> Result<Self, Self::Error> {
        let model = args.model.ok_or(CliError::MissingArgument {
            field: ARG_MODEL,
            env: ENV_SEED_MODEL,
        })?;
        Ok(Self {
            tags: args.tags,
            model,
        })
    }
}

pub(crate) fn run_seed(args: SeedArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_seed_with(&config, Utc::now(), writer)
}

pub(crate) fn run_seed_with(
    config: &SeedConfig,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let model = initial_preferences_at(config.tags.iter().map(String::as_str), now);
    wanderfeed_fs::write_json(&config.model, &model)?;
    log::info!("seeded {} tags into {}", model.len(), config.model);
    write_output(writer, &model)
}

/// CLI arguments for the `record` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Apply one interaction event (view, save, swipe_right, \
                 swipe_left, share or repost) to a preference model and \
                 write the updated model back. A missing model file starts \
                 from an empty model.",
    about = "Record an interaction against a preference model"
)]
#[ortho_config(prefix = "WANDERFEED")]
pub(crate) struct RecordArgs {
    /// Path to the preference model document.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Path to a JSON interaction event.
    #[arg(long = ARG_EVENT, value_name = "path")]
    #[serde(default)]
    pub(crate) event: Option<Utf8PathBuf>,
}

impl RecordArgs {
    fn into_config(self) -> Result<RecordConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecordConfig::try_from(merged)
    }
}

/// Resolved `record` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordConfig {
    pub(crate) model: Utf8PathBuf,
    pub(crate) event: Utf8PathBuf,
}

impl RecordConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_file(&self.event, ARG_EVENT)
    }
}

impl TryFrom<RecordArgs> for RecordConfig {
    type Error = CliError;

    fn try_from(args: RecordArgs) -> Result<Self, Self::Error> {
        let model = args.model.ok_or(CliError::MissingArgument {
            field: ARG_MODEL,
            env: ENV_RECORD_MODEL,
        })?;
        let event = args.event.ok_or(CliError::MissingArgument {
            field: ARG_EVENT,
            env: ENV_RECORD_EVENT,
        })?;
        Ok(Self { model, event })
    }
}

pub(crate) fn run_record(args: RecordArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    run_record_with(&config, Utc::now(), writer)
}

pub(crate) fn run_record_with(
    config: &RecordConfig,
    now: DateTime<Utc>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let event: InteractionEvent = wanderfeed_fs::read_json(&config.event)?;
    let current = load_model_or_empty(&config.model)?;
    let updated = apply_interaction(&current, &event, &InteractionWeights::default(), now);
    wanderfeed_fs::write_json(&config.model, &updated)?;
    write_output(writer, &updated)
}
