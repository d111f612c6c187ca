//! # Container Commands
//!
//! status, list, signal and shell for containers. Listing accepts either an
//! attempt id or an application name; the name form goes through the admin
//! client for the declared application type.

use std::io::Write;

use tracing::debug;

use appadm_core::{
    AttemptId, ClientError, Config, ContainerId, RmClient, ShellCommand, SignalCommand,
};

use crate::commands::{missing_app_type_message, parse_id, resolve_admin, single_app_type};
use crate::output;
use crate::{EXIT_FAILURE, EXIT_SUCCESS};

/// Print the report of a single container
pub async fn status(
    client: &dyn RmClient,
    container_id: &str,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let Some(id) = parse_id::<ContainerId>(container_id, out)? else {
        return Ok(EXIT_FAILURE);
    };
    match client.get_container(&id).await {
        Ok(report) => {
            output::write_container_report(out, &report)?;
            Ok(EXIT_SUCCESS)
        }
        Err(ClientError::ApplicationNotFound(app)) => {
            writeln!(
                out,
                "Application with id '{app}' doesn't exist in the resource manager."
            )?;
            Ok(EXIT_FAILURE)
        }
        Err(ClientError::AttemptNotFound(attempt)) => {
            writeln!(
                out,
                "Application attempt with id '{attempt}' doesn't exist in the resource manager."
            )?;
            Ok(EXIT_FAILURE)
        }
        Err(ClientError::ContainerNotFound(_)) => {
            writeln!(
                out,
                "Container with id '{container_id}' doesn't exist in the resource manager."
            )?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// List containers of an attempt, or component instances of a name-addressed
/// application
pub async fn list(
    client: &dyn RmClient,
    config: &Config,
    target: &str,
    app_type: Option<&str>,
    version: Option<&str>,
    components: &[String],
    states: &[String],
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    match target.parse::<AttemptId>() {
        Ok(id) => match client.list_containers(&id).await {
            Ok(reports) => {
                output::write_container_table(out, &reports)?;
                Ok(EXIT_SUCCESS)
            }
            Err(ClientError::AttemptNotFound(_)) => {
                writeln!(
                    out,
                    "Application attempt with id '{target}' doesn't exist in the resource manager."
                )?;
                Ok(EXIT_FAILURE)
            }
            Err(e) => Err(e.into()),
        },
        Err(_) => {
            debug!(target, "not an attempt id, listing instances by name");
            let Some(app_type) = single_app_type(app_type, config) else {
                writeln!(
                    out,
                    "Unable to resolve '{target}' by name: {}",
                    missing_app_type_message()
                )?;
                return Ok(EXIT_FAILURE);
            };
            let Some(admin) = resolve_admin(&app_type, config, out)? else {
                return Ok(EXIT_FAILURE);
            };
            match admin.list_instances(target, components, version, states).await {
                Ok(listing) => {
                    writeln!(out, "{listing}")?;
                    Ok(EXIT_SUCCESS)
                }
                Err(ClientError::NameNotFound(name)) => {
                    writeln!(
                        out,
                        "Application with name '{name}' doesn't exist in the resource manager."
                    )?;
                    Ok(EXIT_FAILURE)
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

/// Deliver a signal command to a container
pub async fn signal(
    client: &dyn RmClient,
    container_id: &str,
    command: SignalCommand,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let Some(id) = parse_id::<ContainerId>(container_id, out)? else {
        return Ok(EXIT_FAILURE);
    };
    writeln!(out, "Signalling container {id} with command {command}")?;
    match client.signal_container(&id, command).await {
        Ok(()) => Ok(EXIT_SUCCESS),
        Err(ClientError::ContainerNotFound(_)) => {
            writeln!(
                out,
                "Container with id '{container_id}' doesn't exist in the resource manager."
            )?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Open a shell command in a container
pub async fn shell(
    client: &dyn RmClient,
    container_id: &str,
    command: ShellCommand,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let Some(id) = parse_id::<ContainerId>(container_id, out)? else {
        return Ok(EXIT_FAILURE);
    };
    writeln!(out, "Running {command} in container {id}")?;
    match client.shell_container(&id, command).await {
        Ok(()) => Ok(EXIT_SUCCESS),
        Err(ClientError::ContainerNotFound(_)) => {
            writeln!(
                out,
                "Container with id '{container_id}' doesn't exist in the resource manager."
            )?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
