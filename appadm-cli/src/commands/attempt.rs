//! # Attempt Commands
//!
//! status, list and fail for application attempts.

use std::io::Write;

use appadm_core::{ApplicationId, AttemptId, ClientError, RmClient};

use crate::commands::parse_id;
use crate::output;
use crate::{EXIT_FAILURE, EXIT_SUCCESS};

/// Print the report of a single attempt
pub async fn status(
    client: &dyn RmClient,
    attempt_id: &str,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let Some(id) = parse_id::<AttemptId>(attempt_id, out)? else {
        return Ok(EXIT_FAILURE);
    };
    match client.get_attempt(&id).await {
        Ok(report) => {
            output::write_attempt_report(out, &report)?;
            Ok(EXIT_SUCCESS)
        }
        Err(ClientError::ApplicationNotFound(app)) => {
            writeln!(
                out,
                "Application for attempt with id '{app}' doesn't exist in the resource manager."
            )?;
            Ok(EXIT_FAILURE)
        }
        Err(ClientError::AttemptNotFound(_)) => {
            writeln!(
                out,
                "Application attempt with id '{attempt_id}' doesn't exist in the resource manager."
            )?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// List every attempt of an application
pub async fn list(
    client: &dyn RmClient,
    app_id: &str,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let Some(id) = parse_id::<ApplicationId>(app_id, out)? else {
        return Ok(EXIT_FAILURE);
    };
    match client.list_attempts(&id).await {
        Ok(reports) => {
            output::write_attempt_table(out, &reports)?;
            Ok(EXIT_SUCCESS)
        }
        Err(ClientError::ApplicationNotFound(_)) => {
            writeln!(
                out,
                "Application with id '{app_id}' doesn't exist in the resource manager."
            )?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Fail a single attempt; the resource manager may start a new one
pub async fn fail(
    client: &dyn RmClient,
    attempt_id: &str,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let Some(id) = parse_id::<AttemptId>(attempt_id, out)? else {
        return Ok(EXIT_FAILURE);
    };
    writeln!(
        out,
        "Failing attempt {id} of application {}",
        id.application_id()
    )?;
    match client.fail_attempt(&id).await {
        Ok(()) => Ok(EXIT_SUCCESS),
        Err(ClientError::ApplicationNotFound(app)) => {
            writeln!(
                out,
                "Application with id '{app}' doesn't exist in the resource manager."
            )?;
            Ok(EXIT_FAILURE)
        }
        Err(ClientError::AttemptNotFound(_)) => {
            writeln!(
                out,
                "Application attempt with id '{attempt_id}' doesn't exist in the resource manager."
            )?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_app, MockClient};
    use appadm_core::{ApplicationState, AttemptReport};

    fn run<F, T>(future: F) -> T
    where
        F: std::future::Future<Output = T>,
    {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    fn sample_attempt(id: &str) -> AttemptReport {
        AttemptReport {
            id: id.parse().unwrap(),
            state: "RUNNING".to_string(),
            am_container_id: Some(
                "container_1712000000000_0001_000001_000001".parse().unwrap(),
            ),
            tracking_url: "http://rm/apps/1/attempts/1".to_string(),
            host: "node-7".to_string(),
            rpc_port: 4980,
            diagnostics: String::new(),
        }
    }

    #[test]
    fn status_prints_report_block() {
        let client = MockClient::new()
            .with_attempt(sample_attempt("attempt_1712000000000_0001_000001"));
        let mut buf = Vec::new();
        let code = run(status(&client, "attempt_1712000000000_0001_000001", &mut buf)).unwrap();
        assert_eq!(code, EXIT_SUCCESS);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Application Attempt Report : "));
        assert!(text.contains("attempt_1712000000000_0001_000001"));
    }

    #[test]
    fn status_of_missing_attempt_fails() {
        let client = MockClient::new();
        let mut buf = Vec::new();
        let code = run(status(&client, "attempt_1712000000000_0001_000001", &mut buf)).unwrap();
        assert_eq!(code, EXIT_FAILURE);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Application attempt with id"));
        assert!(text.contains("doesn't exist"));
    }

    #[test]
    fn status_of_malformed_id_fails_without_call() {
        let client = MockClient::new();
        let mut buf = Vec::new();
        let code = run(status(&client, "attempt_oops", &mut buf)).unwrap();
        assert_eq!(code, EXIT_FAILURE);
    }

    #[test]
    fn list_renders_table_for_known_application() {
        let client = MockClient::new()
            .with_app(sample_app("app_1712000000000_0001", ApplicationState::Running))
            .with_attempt(sample_attempt("attempt_1712000000000_0001_000001"));
        let mut buf = Vec::new();
        let code = run(list(&client, "app_1712000000000_0001", &mut buf)).unwrap();
        assert_eq!(code, EXIT_SUCCESS);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Total number of application attempts :1"));
        assert!(text.contains("ApplicationAttempt-Id"));
        assert!(text.contains("attempt_1712000000000_0001_000001"));
    }

    #[test]
    fn list_of_missing_application_fails() {
        let client = MockClient::new();
        let mut buf = Vec::new();
        let code = run(list(&client, "app_1712000000000_0009", &mut buf)).unwrap();
        assert_eq!(code, EXIT_FAILURE);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("doesn't exist"));
    }

    #[test]
    fn fail_announces_attempt_and_application() {
        let client = MockClient::new()
            .with_attempt(sample_attempt("attempt_1712000000000_0001_000002"));
        let mut buf = Vec::new();
        let code = run(fail(&client, "attempt_1712000000000_0001_000002", &mut buf)).unwrap();
        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(client.failed_attempts.lock().unwrap().len(), 1);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains(
            "Failing attempt attempt_1712000000000_0001_000002 \
             of application app_1712000000000_0001"
        ));
    }

    #[test]
    fn fail_of_missing_attempt_fails() {
        let client = MockClient::new();
        let mut buf = Vec::new();
        let code = run(fail(&client, "attempt_1712000000000_0001_000001", &mut buf)).unwrap();
        assert_eq!(code, EXIT_FAILURE);
        assert!(client.failed_attempts.lock().unwrap().is_empty());
    }
}
