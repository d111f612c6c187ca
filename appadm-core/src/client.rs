//! # RmClient Trait
//!
//! The narrow interface the CLI consumes: one operation per admin command.
//! Implementations own all transport, timeout, and retry concerns; callers
//! issue calls sequentially and match on the typed error variants.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::ids::{ApplicationId, AttemptId, ContainerId};
use crate::report::{ApplicationReport, AttemptReport, ContainerReport, Priority};
use crate::state::{ApplicationState, ShellCommand, SignalCommand};

/// Filter for the application listing operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Application types, upper-cased
    pub app_types: BTreeSet<String>,
    /// Concrete state set (already resolved from the CLI filter)
    pub states: BTreeSet<ApplicationState>,
    /// Free-form tags
    pub tags: BTreeSet<String>,
}

/// Client for the resource manager's administrative API
#[async_trait]
pub trait RmClient: Send + Sync {
    /// Fetch the report for a single application
    async fn get_application(&self, id: &ApplicationId) -> Result<ApplicationReport>;

    /// List applications matching the filter
    async fn list_applications(&self, filter: &ListFilter) -> Result<Vec<ApplicationReport>>;

    /// Kill a running application
    async fn kill_application(&self, id: &ApplicationId) -> Result<()>;

    /// Move an application to another queue
    async fn move_application_queue(&self, id: &ApplicationId, queue: &str) -> Result<()>;

    /// Fail a single application attempt
    async fn fail_attempt(&self, id: &AttemptId) -> Result<()>;

    /// Update the application priority, returning the effective value
    /// (the service may clamp to the cluster maximum)
    async fn update_priority(&self, id: &ApplicationId, priority: Priority) -> Result<Priority>;

    /// Update the lifetime expiry (ISO-8601), returning the effective value
    /// (the service may clamp to the queue maximum)
    async fn update_lifetime(&self, id: &ApplicationId, expiry: &str) -> Result<String>;

    /// Fetch the report for a single attempt
    async fn get_attempt(&self, id: &AttemptId) -> Result<AttemptReport>;

    /// List the attempts of an application
    async fn list_attempts(&self, id: &ApplicationId) -> Result<Vec<AttemptReport>>;

    /// Fetch the report for a single container
    async fn get_container(&self, id: &ContainerId) -> Result<ContainerReport>;

    /// List the containers of an attempt
    async fn list_containers(&self, id: &AttemptId) -> Result<Vec<ContainerReport>>;

    /// Deliver a signal command to a container
    async fn signal_container(&self, id: &ContainerId, command: SignalCommand) -> Result<()>;

    /// Open a shell command in a container
    async fn shell_container(&self, id: &ContainerId, command: ShellCommand) -> Result<()>;
}
