//! # Report Types
//!
//! Structured reports returned by the resource manager. These are plain
//! data carriers; the service owns their contents and the CLI only renders
//! them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{ApplicationId, AttemptId, ContainerId};
use crate::state::{ApplicationState, FinalStatus};

/// Scheduling priority of an application
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Priority(pub i32);

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Report for a single application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationReport {
    pub id: ApplicationId,
    pub name: String,
    pub app_type: String,
    pub user: String,
    pub queue: String,
    pub priority: Priority,
    pub state: ApplicationState,
    pub final_status: FinalStatus,
    /// Fraction in 0.0..=1.0
    #[serde(default)]
    pub progress: f32,
    /// Epoch millis; absent while the application has not started/finished
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub finish_time: Option<i64>,
    #[serde(default)]
    pub tracking_url: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub rpc_port: u16,
    #[serde(default)]
    pub diagnostics: String,
    /// ISO-8601 lifetime expiry, if a lifetime is set
    #[serde(default)]
    pub lifetime_expiry: Option<String>,
}

/// Report for one execution attempt of an application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    pub id: AttemptId,
    /// Attempt lifecycle state as reported by the service
    pub state: String,
    #[serde(default)]
    pub am_container_id: Option<ContainerId>,
    #[serde(default)]
    pub tracking_url: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub rpc_port: u16,
    #[serde(default)]
    pub diagnostics: String,
}

/// Report for an allocated container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerReport {
    pub id: ContainerId,
    /// Container lifecycle state as reported by the service
    pub state: String,
    #[serde(default)]
    pub creation_time: Option<i64>,
    #[serde(default)]
    pub finish_time: Option<i64>,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub node_http_address: Option<String>,
    #[serde(default)]
    pub log_url: String,
    #[serde(default)]
    pub diagnostics: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_report_deserializes_with_defaults() {
        let json = r#"{
            "id": "app_1712000000000_0001",
            "name": "my-web-service",
            "app_type": "SERVICE",
            "user": "alice",
            "queue": "default",
            "priority": 3,
            "state": "RUNNING",
            "final_status": "UNDEFINED"
        }"#;
        let report: ApplicationReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.id.to_string(), "app_1712000000000_0001");
        assert_eq!(report.priority, Priority(3));
        assert_eq!(report.state, ApplicationState::Running);
        assert_eq!(report.progress, 0.0);
        assert!(report.start_time.is_none());
        assert!(report.lifetime_expiry.is_none());
    }
}
