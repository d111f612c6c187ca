//! # REST Transport
//!
//! reqwest-backed implementations of [`RmClient`] and [`AppAdminClient`]
//! against the resource manager's HTTP admin API. 404 responses map to the
//! operation's typed not-found variant; other non-success statuses surface
//! as [`ClientError::Service`] with the body text.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde_json::json;
use tracing::debug;

use crate::client::{ListFilter, RmClient};
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::ids::{ApplicationId, AttemptId, ContainerId};
use crate::report::{ApplicationReport, AttemptReport, ContainerReport, Priority};
use crate::state::{ShellCommand, SignalCommand};

fn build_http(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()?;
    Ok(client)
}

/// Map a response to `Ok` or a typed error. `missing` supplies the
/// not-found variant appropriate for the operation.
async fn ensure_ok(
    response: Response,
    missing: impl FnOnce() -> ClientError,
) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(missing());
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Service(format!("{status}: {body}")));
    }
    Ok(response)
}

/// REST client for the core report/lifecycle API
pub struct RestClient {
    http: Client,
    base: String,
}

impl RestClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: build_http(config)?,
            base: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base, path)
    }
}

#[async_trait]
impl RmClient for RestClient {
    async fn get_application(&self, id: &ApplicationId) -> Result<ApplicationReport> {
        debug!(%id, "fetching application report");
        let response = self.http.get(self.url(&format!("applications/{id}"))).send().await?;
        let response = ensure_ok(response, || ClientError::ApplicationNotFound(*id)).await?;
        Ok(response.json().await?)
    }

    async fn list_applications(&self, filter: &ListFilter) -> Result<Vec<ApplicationReport>> {
        let states: Vec<String> = filter.states.iter().map(|s| s.to_string()).collect();
        let types: Vec<&str> = filter.app_types.iter().map(String::as_str).collect();
        let tags: Vec<&str> = filter.tags.iter().map(String::as_str).collect();
        debug!(?states, ?types, ?tags, "listing applications");
        let response = self
            .http
            .get(self.url("applications"))
            .query(&[
                ("states", states.join(",")),
                ("types", types.join(",")),
                ("tags", tags.join(",")),
            ])
            .send()
            .await?;
        let response =
            ensure_ok(response, || ClientError::Service("listing failed".into())).await?;
        Ok(response.json().await?)
    }

    async fn kill_application(&self, id: &ApplicationId) -> Result<()> {
        debug!(%id, "killing application");
        let response = self
            .http
            .put(self.url(&format!("applications/{id}/state")))
            .json(&json!({ "state": "KILLED" }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::ApplicationNotFound(*id)).await?;
        Ok(())
    }

    async fn move_application_queue(&self, id: &ApplicationId, queue: &str) -> Result<()> {
        debug!(%id, queue, "moving application across queues");
        let response = self
            .http
            .put(self.url(&format!("applications/{id}/queue")))
            .json(&json!({ "queue": queue }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::ApplicationNotFound(*id)).await?;
        Ok(())
    }

    async fn fail_attempt(&self, id: &AttemptId) -> Result<()> {
        debug!(%id, "failing application attempt");
        let response = self
            .http
            .put(self.url(&format!("attempts/{id}/fail")))
            .send()
            .await?;
        ensure_ok(response, || ClientError::AttemptNotFound(*id)).await?;
        Ok(())
    }

    async fn update_priority(&self, id: &ApplicationId, priority: Priority) -> Result<Priority> {
        debug!(%id, %priority, "updating application priority");
        let response = self
            .http
            .put(self.url(&format!("applications/{id}/priority")))
            .json(&json!({ "priority": priority }))
            .send()
            .await?;
        let response = ensure_ok(response, || ClientError::ApplicationNotFound(*id)).await?;
        #[derive(serde::Deserialize)]
        struct Reply {
            priority: Priority,
        }
        let reply: Reply = response.json().await?;
        Ok(reply.priority)
    }

    async fn update_lifetime(&self, id: &ApplicationId, expiry: &str) -> Result<String> {
        debug!(%id, expiry, "updating application lifetime");
        let response = self
            .http
            .put(self.url(&format!("applications/{id}/lifetime")))
            .json(&json!({ "expiry": expiry }))
            .send()
            .await?;
        let response = ensure_ok(response, || ClientError::ApplicationNotFound(*id)).await?;
        #[derive(serde::Deserialize)]
        struct Reply {
            expiry: String,
        }
        let reply: Reply = response.json().await?;
        Ok(reply.expiry)
    }

    async fn get_attempt(&self, id: &AttemptId) -> Result<AttemptReport> {
        debug!(%id, "fetching attempt report");
        let response = self.http.get(self.url(&format!("attempts/{id}"))).send().await?;
        let response = ensure_ok(response, || ClientError::AttemptNotFound(*id)).await?;
        Ok(response.json().await?)
    }

    async fn list_attempts(&self, id: &ApplicationId) -> Result<Vec<AttemptReport>> {
        debug!(%id, "listing attempts");
        let response = self
            .http
            .get(self.url(&format!("applications/{id}/attempts")))
            .send()
            .await?;
        let response = ensure_ok(response, || ClientError::ApplicationNotFound(*id)).await?;
        Ok(response.json().await?)
    }

    async fn get_container(&self, id: &ContainerId) -> Result<ContainerReport> {
        debug!(%id, "fetching container report");
        let response = self.http.get(self.url(&format!("containers/{id}"))).send().await?;
        let response = ensure_ok(response, || ClientError::ContainerNotFound(*id)).await?;
        Ok(response.json().await?)
    }

    async fn list_containers(&self, id: &AttemptId) -> Result<Vec<ContainerReport>> {
        debug!(%id, "listing containers");
        let response = self
            .http
            .get(self.url(&format!("attempts/{id}/containers")))
            .send()
            .await?;
        let response = ensure_ok(response, || ClientError::AttemptNotFound(*id)).await?;
        Ok(response.json().await?)
    }

    async fn signal_container(&self, id: &ContainerId, command: SignalCommand) -> Result<()> {
        debug!(%id, %command, "signalling container");
        let response = self
            .http
            .post(self.url(&format!("containers/{id}/signal")))
            .json(&json!({ "command": command }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::ContainerNotFound(*id)).await?;
        Ok(())
    }

    async fn shell_container(&self, id: &ContainerId, command: ShellCommand) -> Result<()> {
        debug!(%id, %command, "shelling to container");
        let response = self
            .http
            .post(self.url(&format!("containers/{id}/shell")))
            .json(&json!({ "command": command }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::ContainerNotFound(*id)).await?;
        Ok(())
    }
}

/// REST admin client for the default `service` application type
pub struct RestAdminClient {
    http: Client,
    base: String,
}

impl RestAdminClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: build_http(config)?,
            base: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/services/{}", self.base, path)
    }

    async fn read_spec(&self, spec_file: &Path) -> Result<serde_json::Value> {
        let raw = tokio::fs::read_to_string(spec_file).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn put_state(&self, name: &str, body: serde_json::Value) -> Result<i32> {
        let response = self
            .http
            .put(self.url(&format!("{name}/state")))
            .json(&body)
            .send()
            .await?;
        ensure_ok(response, || ClientError::NameNotFound(name.to_string())).await?;
        Ok(0)
    }
}

#[async_trait]
impl crate::admin::AppAdminClient for RestAdminClient {
    async fn action_launch(
        &self,
        name: &str,
        spec_file: &Path,
        lifetime: Option<i64>,
        queue: Option<&str>,
    ) -> Result<i32> {
        debug!(name, spec = %spec_file.display(), "launching application");
        let spec = self.read_spec(spec_file).await?;
        let response = self
            .http
            .post(self.url(name))
            .json(&json!({ "spec": spec, "lifetime": lifetime, "queue": queue }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::NameNotFound(name.to_string())).await?;
        Ok(0)
    }

    async fn action_save(
        &self,
        name: &str,
        spec_file: &Path,
        lifetime: Option<i64>,
        queue: Option<&str>,
    ) -> Result<i32> {
        debug!(name, spec = %spec_file.display(), "saving application specification");
        let spec = self.read_spec(spec_file).await?;
        let response = self
            .http
            .post(self.url(&format!("{name}/spec")))
            .json(&json!({ "spec": spec, "lifetime": lifetime, "queue": queue }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::NameNotFound(name.to_string())).await?;
        Ok(0)
    }

    async fn action_start(&self, name: &str) -> Result<i32> {
        debug!(name, "starting application");
        self.put_state(name, json!({ "state": "STARTED" })).await
    }

    async fn action_stop(&self, name: &str) -> Result<i32> {
        debug!(name, "stopping application");
        self.put_state(name, json!({ "state": "STOPPED" })).await
    }

    async fn action_destroy(&self, name: &str) -> Result<i32> {
        debug!(name, "destroying application");
        let response = self.http.delete(self.url(name)).send().await?;
        ensure_ok(response, || ClientError::NameNotFound(name.to_string())).await?;
        Ok(0)
    }

    async fn action_flex(&self, name: &str, components: &BTreeMap<String, String>) -> Result<i32> {
        debug!(name, ?components, "flexing components");
        let response = self
            .http
            .put(self.url(&format!("{name}/components")))
            .json(&json!({ "components": components }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::NameNotFound(name.to_string())).await?;
        Ok(0)
    }

    async fn enable_fast_launch(&self, destination: Option<&str>) -> Result<i32> {
        debug!(?destination, "enabling fast launch");
        let response = self
            .http
            .post(format!("{}/v1/fast-launch", self.base))
            .json(&json!({ "destination": destination }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::Service("fast launch unavailable".into())).await?;
        Ok(0)
    }

    async fn upgrade_express(&self, name: &str, spec_file: &Path) -> Result<i32> {
        debug!(name, spec = %spec_file.display(), "express upgrade");
        let spec = self.read_spec(spec_file).await?;
        self.put_state(name, json!({ "state": "EXPRESS_UPGRADING", "spec": spec })).await
    }

    async fn initiate_upgrade(
        &self,
        name: &str,
        spec_file: &Path,
        auto_finalize: bool,
    ) -> Result<i32> {
        debug!(name, auto_finalize, "initiating upgrade");
        let spec = self.read_spec(spec_file).await?;
        let state = if auto_finalize {
            "UPGRADING_AUTO_FINALIZE"
        } else {
            "UPGRADING"
        };
        self.put_state(name, json!({ "state": state, "spec": spec })).await
    }

    async fn upgrade_instances(&self, name: &str, instances: &[String]) -> Result<i32> {
        debug!(name, ?instances, "upgrading instances");
        let response = self
            .http
            .put(self.url(&format!("{name}/instances/upgrade")))
            .json(&json!({ "instances": instances }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::NameNotFound(name.to_string())).await?;
        Ok(0)
    }

    async fn upgrade_components(&self, name: &str, components: &[String]) -> Result<i32> {
        debug!(name, ?components, "upgrading components");
        let response = self
            .http
            .put(self.url(&format!("{name}/components/upgrade")))
            .json(&json!({ "components": components }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::NameNotFound(name.to_string())).await?;
        Ok(0)
    }

    async fn cancel_upgrade(&self, name: &str) -> Result<i32> {
        debug!(name, "cancelling upgrade");
        self.put_state(name, json!({ "state": "CANCEL_UPGRADING" })).await
    }

    async fn decommission_instances(&self, name: &str, instances: &[String]) -> Result<i32> {
        debug!(name, ?instances, "decommissioning instances");
        let response = self
            .http
            .put(self.url(&format!("{name}/instances/decommission")))
            .json(&json!({ "instances": instances }))
            .send()
            .await?;
        ensure_ok(response, || ClientError::NameNotFound(name.to_string())).await?;
        Ok(0)
    }

    async fn status_string(&self, name: &str) -> Result<String> {
        debug!(name, "fetching status by name");
        let response = self.http.get(self.url(name)).send().await?;
        let response = ensure_ok(response, || ClientError::NameNotFound(name.to_string())).await?;
        let value: serde_json::Value = response.json().await?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    async fn list_instances(
        &self,
        name: &str,
        components: &[String],
        version: Option<&str>,
        states: &[String],
    ) -> Result<String> {
        debug!(name, ?components, ?version, ?states, "listing instances by name");
        let response = self
            .http
            .get(self.url(&format!("{name}/instances")))
            .query(&[
                ("components", components.join(",")),
                ("version", version.unwrap_or_default().to_string()),
                ("states", states.join(",")),
            ])
            .send()
            .await?;
        let response = ensure_ok(response, || ClientError::NameNotFound(name.to_string())).await?;
        let value: serde_json::Value = response.json().await?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
