//! Shared test harness modules for the Wanderfeed CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod feed_steps;
mod helpers;
