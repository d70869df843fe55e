//! Behaviour-driven step definitions driving the feed CLI scenarios.

use super::feed::{FeedConfig, run_feed_with};
use super::helpers::{Workspace, ids, parse_output};
use super::profile::{RecordConfig, SeedConfig, run_record_with, run_seed_with};
use super::*;
use camino::Utf8PathBuf;
use chrono::Utc;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use wanderfeed_ranker::ExplorationNoise;

const BEACH_SWIPE: &str = r#"{
    "id": "evt-1",
    "userId": "traveller-1",
    "postId": "beach",
    "type": "swipe_right",
    "tags": ["beach", "surf"],
    "createdAt": "2024-05-01T09:30:00Z"
}"#;

/// Aggregates feed scenario state so each step only needs a single world
/// argument.
struct FeedWorld {
    workspace: Workspace,
    outcome: RefCell<Option<Result<Vec<String>, CliError>>>,
}

impl FeedWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            outcome: RefCell::new(None),
        }
    }

    fn model_path(&self) -> Utf8PathBuf {
        self.workspace.path("model.json")
    }

    fn feed_config(&self, posts: Utf8PathBuf) -> FeedConfig {
        FeedConfig {
            posts,
            model: self.model_path(),
            exclude: std::collections::HashSet::new(),
            limit: 10,
            seed: Some(2024),
            exploration: ExplorationNoise::default(),
        }
    }

    fn listed(&self) -> Vec<String> {
        self.outcome
            .borrow()
            .as_ref()
            .expect("feed requested")
            .as_ref()
            .expect("feed should succeed")
            .clone()
    }
}

#[fixture]
fn world() -> FeedWorld {
    FeedWorld::new()
}

#[given("a post catalogue on disk")]
fn catalogue_on_disk(#[from(world)] world: &FeedWorld) {
    let path = world.workspace.catalogue();
    assert!(path.as_std_path().is_file(), "catalogue should be written");
}

#[given("a traveller seeded with an interest in hiking")]
fn seeded_traveller(#[from(world)] world: &FeedWorld) {
    let config = SeedConfig {
        tags: vec!["hiking".to_owned()],
        model: world.model_path(),
    };
    run_seed_with(&config, Utc::now(), &mut Vec::new()).expect("seed model");
}

#[when("the traveller swipes right on the beach post")]
fn swipe_right_on_beach(#[from(world)] world: &FeedWorld) {
    let config = RecordConfig {
        model: world.model_path(),
        event: world.workspace.write("event.json", BEACH_SWIPE),
    };
    config.validate_sources().expect("event file exists");
    run_record_with(&config, Utc::now(), &mut Vec::new()).expect("record swipe");
}

#[when("the traveller requests a seeded feed")]
fn request_feed(#[from(world)] world: &FeedWorld) {
    let config = world.feed_config(world.workspace.path("posts.json"));
    let mut output = Vec::new();
    let outcome = config
        .validate_sources()
        .and_then(|()| run_feed_with(&config, &mut output))
        .map(|()| ids(&parse_output(&output)));
    *world.outcome.borrow_mut() = Some(outcome);
}

#[when("the traveller requests a feed from a missing catalogue")]
fn request_feed_without_catalogue(#[from(world)] world: &FeedWorld) {
    let config = world.feed_config(world.workspace.path("missing.json"));
    let outcome = config.validate_sources().map(|()| Vec::new());
    *world.outcome.borrow_mut() = Some(outcome);
}

#[then("the beach post is listed first")]
fn beach_first(#[from(world)] world: &FeedWorld) {
    assert_eq!(world.listed().first().map(String::as_str), Some("beach"));
}

#[then("the hiking post is listed first")]
fn hiking_first(#[from(world)] world: &FeedWorld) {
    assert_eq!(world.listed().first().map(String::as_str), Some("hiking"));
}

#[then("the untagged post is not listed")]
fn untagged_absent(#[from(world)] world: &FeedWorld) {
    assert!(!world.listed().iter().any(|id| id == "broken"));
}

#[then("the CLI reports that the \"posts\" file is missing")]
fn reports_missing_posts(#[from(world)] world: &FeedWorld) {
    let borrowed = world.outcome.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_POSTS),
        other => panic!("unexpected error {other:?}"),
    }
}

macro_rules! register_feed_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/feed_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: FeedWorld) {
            let _ = world;
        }
    };
}

register_feed_scenario!(swipe_reshapes_feed, "recording a swipe reshapes the feed");
register_feed_scenario!(
    onboarding_interest_leads,
    "a fresh traveller sees their onboarding interest first"
);
register_feed_scenario!(missing_catalogue, "reporting a missing catalogue");
