//! Shared mock client for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use appadm_core::{
    ApplicationId, ApplicationReport, ApplicationState, AttemptId, AttemptReport, ClientError,
    ContainerId, ContainerReport, FinalStatus, ListFilter, Priority, Result, RmClient,
    ShellCommand, SignalCommand,
};

/// Build a minimal application report for tests
pub fn sample_app(id: &str, state: ApplicationState) -> ApplicationReport {
    ApplicationReport {
        id: id.parse().expect("valid application id"),
        name: "my-web-service".to_string(),
        app_type: "SERVICE".to_string(),
        user: "alice".to_string(),
        queue: "default".to_string(),
        priority: Priority(3),
        state,
        final_status: FinalStatus::Undefined,
        progress: 0.5,
        start_time: Some(1_712_000_100_000),
        finish_time: None,
        tracking_url: "http://rm/apps/1".to_string(),
        host: "node-7".to_string(),
        rpc_port: 4980,
        diagnostics: String::new(),
        lifetime_expiry: None,
    }
}

/// In-process `RmClient` that records every call
#[derive(Default)]
pub struct MockClient {
    pub apps: HashMap<ApplicationId, ApplicationReport>,
    pub attempts: HashMap<AttemptId, AttemptReport>,
    pub containers: HashMap<ContainerId, ContainerReport>,
    pub kills: Mutex<Vec<ApplicationId>>,
    pub moves: Mutex<Vec<(ApplicationId, String)>>,
    pub failed_attempts: Mutex<Vec<AttemptId>>,
    pub signals: Mutex<Vec<(ContainerId, SignalCommand)>>,
    pub shells: Mutex<Vec<(ContainerId, ShellCommand)>>,
    pub list_filters: Mutex<Vec<ListFilter>>,
    pub lifetime_requests: Mutex<Vec<String>>,
    /// Reply for update_lifetime; the request is echoed when unset
    pub lifetime_reply: Option<String>,
    /// Reply for update_priority; the request is echoed when unset
    pub priority_reply: Option<Priority>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(mut self, report: ApplicationReport) -> Self {
        self.apps.insert(report.id, report);
        self
    }

    pub fn with_attempt(mut self, report: AttemptReport) -> Self {
        self.attempts.insert(report.id, report);
        self
    }

    pub fn with_container(mut self, report: ContainerReport) -> Self {
        self.containers.insert(report.id, report);
        self
    }

    pub fn with_lifetime_reply(mut self, expiry: &str) -> Self {
        self.lifetime_reply = Some(expiry.to_string());
        self
    }

    pub fn with_priority_reply(mut self, priority: i32) -> Self {
        self.priority_reply = Some(Priority(priority));
        self
    }
}

#[async_trait]
impl RmClient for MockClient {
    async fn get_application(&self, id: &ApplicationId) -> Result<ApplicationReport> {
        self.apps
            .get(id)
            .cloned()
            .ok_or(ClientError::ApplicationNotFound(*id))
    }

    async fn list_applications(&self, filter: &ListFilter) -> Result<Vec<ApplicationReport>> {
        self.list_filters.lock().unwrap().push(filter.clone());
        Ok(self.apps.values().cloned().collect())
    }

    async fn kill_application(&self, id: &ApplicationId) -> Result<()> {
        if !self.apps.contains_key(id) {
            return Err(ClientError::ApplicationNotFound(*id));
        }
        self.kills.lock().unwrap().push(*id);
        Ok(())
    }

    async fn move_application_queue(&self, id: &ApplicationId, queue: &str) -> Result<()> {
        if !self.apps.contains_key(id) {
            return Err(ClientError::ApplicationNotFound(*id));
        }
        self.moves.lock().unwrap().push((*id, queue.to_string()));
        Ok(())
    }

    async fn fail_attempt(&self, id: &AttemptId) -> Result<()> {
        if !self.attempts.contains_key(id) {
            return Err(ClientError::AttemptNotFound(*id));
        }
        self.failed_attempts.lock().unwrap().push(*id);
        Ok(())
    }

    async fn update_priority(&self, id: &ApplicationId, priority: Priority) -> Result<Priority> {
        if !self.apps.contains_key(id) {
            return Err(ClientError::ApplicationNotFound(*id));
        }
        Ok(self.priority_reply.unwrap_or(priority))
    }

    async fn update_lifetime(&self, id: &ApplicationId, expiry: &str) -> Result<String> {
        if !self.apps.contains_key(id) {
            return Err(ClientError::ApplicationNotFound(*id));
        }
        self.lifetime_requests.lock().unwrap().push(expiry.to_string());
        Ok(self
            .lifetime_reply
            .clone()
            .unwrap_or_else(|| expiry.to_string()))
    }

    async fn get_attempt(&self, id: &AttemptId) -> Result<AttemptReport> {
        self.attempts
            .get(id)
            .cloned()
            .ok_or(ClientError::AttemptNotFound(*id))
    }

    async fn list_attempts(&self, id: &ApplicationId) -> Result<Vec<AttemptReport>> {
        if !self.apps.contains_key(id) {
            return Err(ClientError::ApplicationNotFound(*id));
        }
        Ok(self
            .attempts
            .values()
            .filter(|a| a.id.application_id() == *id)
            .cloned()
            .collect())
    }

    async fn get_container(&self, id: &ContainerId) -> Result<ContainerReport> {
        self.containers
            .get(id)
            .cloned()
            .ok_or(ClientError::ContainerNotFound(*id))
    }

    async fn list_containers(&self, id: &AttemptId) -> Result<Vec<ContainerReport>> {
        if !self.attempts.contains_key(id) {
            return Err(ClientError::AttemptNotFound(*id));
        }
        Ok(self
            .containers
            .values()
            .filter(|c| c.id.attempt_id() == *id)
            .cloned()
            .collect())
    }

    async fn signal_container(&self, id: &ContainerId, command: SignalCommand) -> Result<()> {
        if !self.containers.contains_key(id) {
            return Err(ClientError::ContainerNotFound(*id));
        }
        self.signals.lock().unwrap().push((*id, command));
        Ok(())
    }

    async fn shell_container(&self, id: &ContainerId, command: ShellCommand) -> Result<()> {
        if !self.containers.contains_key(id) {
            return Err(ClientError::ContainerNotFound(*id));
        }
        self.shells.lock().unwrap().push((*id, command));
        Ok(())
    }
}
