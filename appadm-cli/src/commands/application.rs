//! # Application Commands
//!
//! status, list, kill, queue moves, priority and lifetime updates.

use std::collections::BTreeSet;
use std::io::Write;

use chrono::{Duration, SecondsFormat, Utc};
use tracing::debug;

use appadm_core::{
    valid_states_message, ApplicationId, ClientError, Config, ListFilter, Priority, RmClient,
    StateFilter,
};

use crate::commands::{missing_app_type_message, parse_id, resolve_admin, single_app_type};
use crate::output;
use crate::{EXIT_FAILURE, EXIT_SUCCESS};

/// Print the report of a single application, addressed by id or name.
///
/// Identifier parse is attempted first; a non-identifier argument falls
/// back to name-based resolution through the admin client for the declared
/// application type.
pub async fn status(
    client: &dyn RmClient,
    config: &Config,
    app: &str,
    app_type: Option<&str>,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    match app.parse::<ApplicationId>() {
        Ok(id) => match client.get_application(&id).await {
            Ok(report) => {
                output::write_application_report(out, &report)?;
                Ok(EXIT_SUCCESS)
            }
            Err(ClientError::ApplicationNotFound(_)) => {
                writeln!(
                    out,
                    "Application with id '{app}' doesn't exist in the resource manager."
                )?;
                Ok(EXIT_FAILURE)
            }
            Err(e) => Err(e.into()),
        },
        Err(_) => {
            debug!(app, "not an application id, resolving by name");
            let Some(app_type) = single_app_type(app_type, config) else {
                writeln!(
                    out,
                    "Unable to resolve '{app}' by name: {}",
                    missing_app_type_message()
                )?;
                return Ok(EXIT_FAILURE);
            };
            let Some(admin) = resolve_admin(&app_type, config, out)? else {
                return Ok(EXIT_FAILURE);
            };
            match admin.status_string(app).await {
                Ok(status) => {
                    writeln!(out, "{status}")?;
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

/// List applications matching the type/state/tag filter
pub async fn list(
    client: &dyn RmClient,
    app_types: &[String],
    app_states: &[String],
    app_tags: &[String],
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let state_filter = match StateFilter::parse(app_states) {
        Ok(filter) => filter,
        Err(e) => {
            writeln!(out, "{e}")?;
            writeln!(out, "{}", valid_states_message())?;
            return Ok(EXIT_FAILURE);
        }
    };

    let filter = ListFilter {
        app_types: normalize_upper(app_types),
        states: state_filter.effective(),
        tags: normalize(app_tags),
    };
    let reports = client.list_applications(&filter).await?;
    output::write_application_table(out, &reports, &filter)?;
    Ok(EXIT_SUCCESS)
}

fn normalize(tokens: &[String]) -> BTreeSet<String> {
    tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_upper(tokens: &[String]) -> BTreeSet<String> {
    tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Kill one or more applications, continuing past per-id not-found.
///
/// Succeeds if at least one id was handled (killed or already finished).
pub async fn kill(
    client: &dyn RmClient,
    app_ids: &[String],
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let mut exit_code = EXIT_FAILURE;
    for raw in app_ids {
        let id: ApplicationId = match raw.parse() {
            Ok(id) => id,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        match kill_one(client, &id, out).await {
            Ok(()) => exit_code = EXIT_SUCCESS,
            Err(ClientError::ApplicationNotFound(_)) => {
                writeln!(
                    out,
                    "Application with id '{id}' doesn't exist in the resource manager."
                )?;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(exit_code)
}

async fn kill_one(
    client: &dyn RmClient,
    id: &ApplicationId,
    out: &mut dyn Write,
) -> Result<(), ClientError> {
    let report = client.get_application(id).await?;
    if report.state.is_terminal() {
        writeln!(out, "Application {id} has already finished")?;
    } else {
        writeln!(out, "Killing application {id}")?;
        client.kill_application(id).await?;
    }
    Ok(())
}

/// Move an application to another queue, skipping finished applications
pub async fn move_to_queue(
    client: &dyn RmClient,
    app_id: &str,
    queue: &str,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let Some(id) = parse_id::<ApplicationId>(app_id, out)? else {
        return Ok(EXIT_FAILURE);
    };
    let report = match client.get_application(&id).await {
        Ok(report) => report,
        Err(ClientError::ApplicationNotFound(_)) => {
            writeln!(
                out,
                "Application with id '{app_id}' doesn't exist in the resource manager."
            )?;
            return Ok(EXIT_FAILURE);
        }
        Err(e) => return Err(e.into()),
    };
    if report.state.is_terminal() {
        writeln!(out, "Application {id} has already finished")?;
        return Ok(EXIT_SUCCESS);
    }
    writeln!(out, "Moving application {id} to queue {queue}")?;
    client.move_application_queue(&id, queue).await?;
    writeln!(out, "Successfully completed move.")?;
    Ok(EXIT_SUCCESS)
}

/// Update the scheduling priority, reporting whether the service clamped it
pub async fn update_priority(
    client: &dyn RmClient,
    app_id: &str,
    priority: i32,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let Some(id) = parse_id::<ApplicationId>(app_id, out)? else {
        return Ok(EXIT_FAILURE);
    };
    let requested = Priority(priority);
    writeln!(out, "Updating priority of application {id}")?;
    let effective = match client.update_priority(&id, requested).await {
        Ok(effective) => effective,
        Err(ClientError::ApplicationNotFound(_)) => {
            writeln!(
                out,
                "Application with id '{app_id}' doesn't exist in the resource manager."
            )?;
            return Ok(EXIT_FAILURE);
        }
        Err(e) => return Err(e.into()),
    };
    if effective == requested {
        writeln!(
            out,
            "Successfully updated the application {id} with priority '{requested}'"
        )?;
    } else {
        writeln!(
            out,
            "Updated priority of application {id} to the cluster max priority or \
             kept the old priority as the application is in a final state"
        )?;
    }
    Ok(EXIT_SUCCESS)
}

/// Update the lifetime: compute the absolute expiry locally, forward it,
/// and report whether the service clamped it to the queue maximum.
pub async fn update_lifetime(
    client: &dyn RmClient,
    app_id: &str,
    seconds: i64,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let Some(id) = parse_id::<ApplicationId>(app_id, out)? else {
        return Ok(EXIT_FAILURE);
    };
    let requested = (Utc::now() + Duration::seconds(seconds))
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    writeln!(out, "Updating lifetime of application {id}")?;
    let effective = match client.update_lifetime(&id, &requested).await {
        Ok(effective) => effective,
        Err(ClientError::ApplicationNotFound(_)) => {
            writeln!(
                out,
                "Application with id '{app_id}' doesn't exist in the resource manager."
            )?;
            return Ok(EXIT_FAILURE);
        }
        Err(e) => return Err(e.into()),
    };
    if effective != requested {
        writeln!(
            out,
            "Application {id} lifetime was clamped to the queue maximum or default. \
             New expiry time is {effective}"
        )?;
    } else {
        writeln!(
            out,
            "Successfully updated application {id} lifetime. New expiry time is {effective}"
        )?;
    }
    Ok(EXIT_SUCCESS)
}
