//! # AppAdminClient Abstraction
//!
//! Lifecycle verbs for long-running application frameworks. Each
//! application type may ship its own admin client; the registry resolves a
//! client from the declared type. The behavior of every action is owned by
//! the remote admin service; this layer only forwards.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::rest::RestAdminClient;

/// Application type served by the built-in REST admin client
pub const DEFAULT_ADMIN_TYPE: &str = "service";

/// Admin client for one application type
#[async_trait]
pub trait AppAdminClient: Send + Sync {
    /// Launch an application from a specification file
    async fn action_launch(
        &self,
        name: &str,
        spec_file: &Path,
        lifetime: Option<i64>,
        queue: Option<&str>,
    ) -> Result<i32>;

    /// Save a specification without launching
    async fn action_save(
        &self,
        name: &str,
        spec_file: &Path,
        lifetime: Option<i64>,
        queue: Option<&str>,
    ) -> Result<i32>;

    /// Start a previously saved application
    async fn action_start(&self, name: &str) -> Result<i32>;

    /// Stop a running application, keeping its specification
    async fn action_stop(&self, name: &str) -> Result<i32>;

    /// Destroy an application and its saved specification
    async fn action_destroy(&self, name: &str) -> Result<i32>;

    /// Change component instance counts
    async fn action_flex(&self, name: &str, components: &BTreeMap<String, String>) -> Result<i32>;

    /// Upload framework dependencies so later launches skip the upload
    async fn enable_fast_launch(&self, destination: Option<&str>) -> Result<i32>;

    /// One-shot upgrade driven by a specification file
    async fn upgrade_express(&self, name: &str, spec_file: &Path) -> Result<i32>;

    /// Begin an upgrade; with `auto_finalize` the service finalizes once all
    /// instances are upgraded
    async fn initiate_upgrade(
        &self,
        name: &str,
        spec_file: &Path,
        auto_finalize: bool,
    ) -> Result<i32>;

    /// Upgrade the named component instances
    async fn upgrade_instances(&self, name: &str, instances: &[String]) -> Result<i32>;

    /// Upgrade every instance of the named components
    async fn upgrade_components(&self, name: &str, components: &[String]) -> Result<i32>;

    /// Cancel an in-progress upgrade
    async fn cancel_upgrade(&self, name: &str) -> Result<i32>;

    /// Decommission the named component instances
    async fn decommission_instances(&self, name: &str, instances: &[String]) -> Result<i32>;

    /// Render the status of a name-addressed application
    async fn status_string(&self, name: &str) -> Result<String>;

    /// Render the component instances of a name-addressed application
    async fn list_instances(
        &self,
        name: &str,
        components: &[String],
        version: Option<&str>,
        states: &[String],
    ) -> Result<String>;
}

/// Resolve the admin client for an application type.
///
/// Matching is case-insensitive. Unknown types are a typed error so the CLI
/// can print the valid choice.
pub fn admin_client_for(app_type: &str, config: &Config) -> Result<Box<dyn AppAdminClient>> {
    if app_type.eq_ignore_ascii_case(DEFAULT_ADMIN_TYPE) {
        Ok(Box::new(RestAdminClient::new(config)?))
    } else {
        Err(ClientError::UnsupportedAppType(app_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_default_type_case_insensitively() {
        let config = Config::default();
        assert!(admin_client_for("service", &config).is_ok());
        assert!(admin_client_for("SERVICE", &config).is_ok());
    }

    #[test]
    fn registry_rejects_unknown_type() {
        let config = Config::default();
        let err = admin_client_for("mapreduce", &config)
            .err()
            .expect("unknown type must not resolve");
        match err {
            ClientError::UnsupportedAppType(t) => assert_eq!(t, "mapreduce"),
            other => panic!("expected UnsupportedAppType, got {other}"),
        }
    }
}
