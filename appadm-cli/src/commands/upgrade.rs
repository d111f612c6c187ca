//! # Upgrade Commands
//!
//! Exactly one upgrade mode per invocation; the parser enforces the mutual
//! exclusion, so dispatch here is a straight match over the populated mode.

use std::io::Write;
use std::path::Path;

use appadm_core::{ClientError, Config};

use crate::cli::UpgradeArgs;
use crate::commands::{missing_app_type_message, resolve_admin, single_app_type};
use crate::EXIT_FAILURE;

/// Dispatch the single active upgrade mode
pub async fn upgrade(
    config: &Config,
    args: &UpgradeArgs,
    out: &mut dyn Write,
) -> anyhow::Result<i32> {
    let Some(app_type) = single_app_type(args.app_type.as_deref(), config) else {
        writeln!(out, "{}", missing_app_type_message())?;
        return Ok(EXIT_FAILURE);
    };
    let Some(admin) = resolve_admin(&app_type, config, out)? else {
        return Ok(EXIT_FAILURE);
    };
    let name = &args.name;

    let result = if let Some(spec_file) = &args.express {
        if !spec_exists(spec_file, out)? {
            return Ok(EXIT_FAILURE);
        }
        writeln!(out, "Express upgrading application {name}")?;
        admin.upgrade_express(name, spec_file).await
    } else if let Some(spec_file) = &args.initiate {
        if !spec_exists(spec_file, out)? {
            return Ok(EXIT_FAILURE);
        }
        writeln!(out, "Initiating upgrade of application {name}")?;
        admin
            .initiate_upgrade(name, spec_file, args.auto_finalize)
            .await
    } else if !args.instances.is_empty() {
        writeln!(
            out,
            "Upgrading instances [{}] of application {name}",
            args.instances.join(", ")
        )?;
        admin.upgrade_instances(name, &args.instances).await
    } else if !args.components.is_empty() {
        writeln!(
            out,
            "Upgrading components [{}] of application {name}",
            args.components.join(", ")
        )?;
        admin.upgrade_components(name, &args.components).await
    } else if args.finalize {
        // Finalization restarts the application on the new specification
        writeln!(out, "Finalizing upgrade of application {name}")?;
        admin.action_start(name).await
    } else {
        writeln!(out, "Cancelling upgrade of application {name}")?;
        admin.cancel_upgrade(name).await
    };

    match result {
        Ok(code) => Ok(code),
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

fn spec_exists(spec_file: &Path, out: &mut dyn Write) -> anyhow::Result<bool> {
    if spec_file.exists() {
        Ok(true)
    } else {
        writeln!(out, "{} does not exist.", spec_file.display())?;
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

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

    fn express_args(spec_file: PathBuf) -> UpgradeArgs {
        UpgradeArgs {
            name: "my-web-service".to_string(),
            express: Some(spec_file),
            initiate: None,
            auto_finalize: false,
            instances: Vec::new(),
            components: Vec::new(),
            finalize: false,
            cancel: false,
            app_type: Some("service".to_string()),
        }
    }

    #[test]
    fn express_with_missing_spec_fails_before_any_call() {
        let config = Config::default();
        let args = express_args(PathBuf::from("/nonexistent/spec.json"));
        let mut buf = Vec::new();
        let code = run(upgrade(&config, &args, &mut buf)).unwrap();
        assert_eq!(code, EXIT_FAILURE);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("/nonexistent/spec.json does not exist."));
    }

    #[test]
    fn upgrade_without_type_fails_with_guidance() {
        let config = Config::default();
        let mut args = express_args(PathBuf::from("spec.json"));
        args.app_type = None;
        let mut buf = Vec::new();
        let code = run(upgrade(&config, &args, &mut buf)).unwrap();
        assert_eq!(code, EXIT_FAILURE);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("--app-type"));
    }

    #[test]
    fn unsupported_type_is_reported() {
        let config = Config::default();
        let mut args = express_args(PathBuf::from("spec.json"));
        args.app_type = Some("mapreduce".to_string());
        let mut buf = Vec::new();
        let code = run(upgrade(&config, &args, &mut buf)).unwrap();
        assert_eq!(code, EXIT_FAILURE);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("mapreduce"));
    }
}
