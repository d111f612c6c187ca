//! # Command Handlers
//!
//! One module per entity scope. Handlers take the client trait and a text
//! sink, and return the process exit code; semantic failures are printed
//! here, while transport and service errors propagate to `main`.

pub mod admin;
pub mod application;
pub mod attempt;
pub mod container;
pub mod upgrade;

use std::io::Write;
use std::str::FromStr;

use appadm_core::admin::DEFAULT_ADMIN_TYPE;
use appadm_core::{
    admin_client_for, AppAdminClient, ApplicationId, ClientError, Config, IdParseError, RmClient,
};

use crate::cli::{ApplicationAction, AttemptAction, Command, ContainerAction};

/// Dispatch a parsed command to its handler
pub async fn run(
    command: Command,
    config: &Config,
    client: &dyn RmClient,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    match command {
        Command::Application { action } => match action {
            ApplicationAction::Status { app, app_type } => {
                application::status(client, config, &app, app_type.as_deref(), out).await
            }
            ApplicationAction::List {
                app_types,
                app_states,
                app_tags,
            } => application::list(client, &app_types, &app_states, &app_tags, out).await,
            ApplicationAction::Kill { app_ids } => application::kill(client, &app_ids, out).await,
            ApplicationAction::MoveToQueue { app_id, queue }
            | ApplicationAction::ChangeQueue { app_id, queue } => {
                application::move_to_queue(client, &app_id, &queue, out).await
            }
            ApplicationAction::UpdatePriority { app_id, priority } => {
                application::update_priority(client, &app_id, priority, out).await
            }
            ApplicationAction::UpdateLifetime { app_id, seconds } => {
                application::update_lifetime(client, &app_id, seconds, out).await
            }
            ApplicationAction::Launch {
                name,
                spec_file,
                app_type,
                lifetime,
                queue,
            } => {
                admin::launch(
                    config,
                    &name,
                    &spec_file,
                    app_type.as_deref(),
                    lifetime,
                    queue.as_deref(),
                    out,
                )
                .await
            }
            ApplicationAction::Save {
                name,
                spec_file,
                app_type,
                lifetime,
                queue,
            } => {
                admin::save(
                    config,
                    &name,
                    &spec_file,
                    app_type.as_deref(),
                    lifetime,
                    queue.as_deref(),
                    out,
                )
                .await
            }
            ApplicationAction::Start { name, app_type } => {
                admin::start(config, &name, app_type.as_deref(), out).await
            }
            ApplicationAction::Stop { app, app_type } => {
                admin::stop(client, config, &app, app_type.as_deref(), out).await
            }
            ApplicationAction::Destroy { name, app_type } => {
                admin::destroy(config, &name, app_type.as_deref(), out).await
            }
            ApplicationAction::Flex {
                app,
                components,
                app_type,
            } => admin::flex(client, config, &app, &components, app_type.as_deref(), out).await,
            ApplicationAction::EnableFastLaunch {
                destination,
                app_type,
            } => {
                admin::enable_fast_launch(config, destination.as_deref(), app_type.as_deref(), out)
                    .await
            }
            ApplicationAction::Decommission {
                app,
                instances,
                app_type,
            } => {
                admin::decommission(client, config, &app, &instances, app_type.as_deref(), out)
                    .await
            }
            ApplicationAction::Upgrade(args) => upgrade::upgrade(config, &args, out).await,
        },
        Command::Attempt { action } => match action {
            AttemptAction::Status { attempt_id } => {
                attempt::status(client, &attempt_id, out).await
            }
            AttemptAction::List { app_id } => attempt::list(client, &app_id, out).await,
            AttemptAction::Fail { attempt_id } => attempt::fail(client, &attempt_id, out).await,
        },
        Command::Container { action } => match action {
            ContainerAction::Status { container_id } => {
                container::status(client, &container_id, out).await
            }
            ContainerAction::List {
                target,
                app_type,
                version,
                components,
                states,
            } => {
                container::list(
                    client,
                    config,
                    &target,
                    app_type.as_deref(),
                    version.as_deref(),
                    &components,
                    &states,
                    out,
                )
                .await
            }
            ContainerAction::Signal {
                container_id,
                command,
            } => {
                container::signal(
                    client,
                    &container_id,
                    command.map(Into::into).unwrap_or_default(),
                    out,
                )
                .await
            }
            ContainerAction::Shell {
                container_id,
                command,
            } => {
                container::shell(
                    client,
                    &container_id,
                    command.map(Into::into).unwrap_or_default(),
                    out,
                )
                .await
            }
        },
    }
}

/// Resolve the application type for name-addressed operations: explicit
/// flag first, configured default second.
pub(crate) fn single_app_type(flag: Option<&str>, config: &Config) -> Option<String> {
    flag.map(str::to_string)
        .or_else(|| config.default_app_type.clone())
}

pub(crate) fn missing_app_type_message() -> String {
    "No application type given: pass --app-type or set default_app_type in the configuration."
        .to_string()
}

/// Parse an identifier, printing the diagnostic and returning `None` on
/// failure so the caller can exit with the semantic failure code.
pub(crate) fn parse_id<T>(raw: &str, out: &mut dyn Write) -> anyhow::Result<Option<T>>
where
    T: FromStr<Err = IdParseError>,
{
    match raw.parse() {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            writeln!(out, "{e}")?;
            Ok(None)
        }
    }
}

/// Build the admin client for a type, printing the diagnostic for unknown
/// types.
pub(crate) fn resolve_admin(
    app_type: &str,
    config: &Config,
    out: &mut dyn Write,
) -> anyhow::Result<Option<Box<dyn AppAdminClient>>> {
    match admin_client_for(app_type, config) {
        Ok(client) => Ok(Some(client)),
        Err(ClientError::UnsupportedAppType(t)) => {
            writeln!(
                out,
                "No admin client available for application type '{t}'. \
                 The supported type is '{DEFAULT_ADMIN_TYPE}'."
            )?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve an id-or-name argument into `(name, app_type)`.
///
/// Identifier parse is attempted first; a report fetch then supplies the
/// name and declared type. A non-identifier argument is taken as the name,
/// with the type coming from the flag or the configured default.
pub(crate) async fn resolve_app_name_and_type(
    client: &dyn RmClient,
    config: &Config,
    arg: &str,
    flag: Option<&str>,
    out: &mut dyn Write,
) -> anyhow::Result<Option<(String, String)>> {
    match arg.parse::<ApplicationId>() {
        Ok(id) => match client.get_application(&id).await {
            Ok(report) => Ok(Some((report.name, report.app_type))),
            Err(ClientError::ApplicationNotFound(_)) => {
                writeln!(
                    out,
                    "Application with id '{arg}' doesn't exist in the resource manager."
                )?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        },
        Err(_) => match single_app_type(flag, config) {
            Some(app_type) => Ok(Some((arg.to_string(), app_type))),
            None => {
                writeln!(out, "{}", missing_app_type_message())?;
                Ok(None)
            }
        },
    }
}
