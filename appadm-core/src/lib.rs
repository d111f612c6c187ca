//! # appadm Core Library
//!
//! Client-side types for the cluster resource manager: typed identifiers,
//! report structs, the `RmClient` collaborator trait, the pluggable
//! `AppAdminClient` abstraction, and a REST implementation of both.
//!
//! All scheduling, placement, and lifecycle logic lives in the remote
//! service. This crate only models its surface.

pub mod admin;
pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod report;
pub mod rest;
pub mod state;

pub use admin::{admin_client_for, AppAdminClient, DEFAULT_ADMIN_TYPE};
pub use client::{ListFilter, RmClient};
pub use config::Config;
pub use error::{ClientError, Result};
pub use ids::{ApplicationId, AttemptId, ContainerId, IdParseError};
pub use report::{ApplicationReport, AttemptReport, ContainerReport, Priority};
pub use rest::{RestAdminClient, RestClient};
pub use state::{
    valid_states_message, ApplicationState, FinalStatus, ShellCommand, SignalCommand, StateFilter,
    UnknownStateError,
};
