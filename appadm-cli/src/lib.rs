//! # appadm CLI Library
//!
//! Command tree, handlers, and report rendering for the `appadm` binary.
//! Handlers are generic over the [`appadm_core::RmClient`] trait and write
//! to a single text sink, so the whole dispatch path is testable without a
//! live resource manager.

pub mod cli;
pub mod commands;
pub mod output;

#[cfg(test)]
pub(crate) mod testutil;

/// Exit code for a successful invocation
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for semantic failures (not found, invalid value, missing type)
pub const EXIT_FAILURE: i32 = -1;
/// Exit code for usage errors; clap uses the same value for parse failures
pub const EXIT_USAGE: i32 = 2;
