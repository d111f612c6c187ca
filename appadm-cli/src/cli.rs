//! # Command Tree
//!
//! The complete clap-derive surface of `appadm`. Every command is a closed
//! enum variant carrying its own field set, so disallowed flags and
//! conflicting combinations are rejected at parse time with a usage error.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

use appadm_core::{ShellCommand, SignalCommand};

/// CLI structure
#[derive(Parser, Debug)]
#[command(name = "appadm")]
#[command(about = "Administrative CLI for the cluster resource manager")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Entity scopes
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Application operations
    #[command(alias = "app")]
    Application {
        #[command(subcommand)]
        action: ApplicationAction,
    },

    /// Application attempt operations
    #[command(alias = "applicationattempt")]
    Attempt {
        #[command(subcommand)]
        action: AttemptAction,
    },

    /// Container operations
    Container {
        #[command(subcommand)]
        action: ContainerAction,
    },
}

/// Application subcommands
#[derive(Subcommand, Debug)]
pub enum ApplicationAction {
    /// Print the report of an application, addressed by id or name
    Status {
        /// Application id or name
        app: String,
        /// Application type for name-based resolution
        #[arg(long)]
        app_type: Option<String>,
    },

    /// List applications matching the filter
    List {
        /// Filter by application types
        #[arg(long, value_delimiter = ',')]
        app_types: Vec<String>,
        /// Filter by application states; ALL selects every state
        #[arg(long, value_delimiter = ',')]
        app_states: Vec<String>,
        /// Filter by application tags
        #[arg(long, value_delimiter = ',')]
        app_tags: Vec<String>,
    },

    /// Kill one or more applications
    Kill {
        /// Application ids
        #[arg(required = true)]
        app_ids: Vec<String>,
    },

    /// Move an application to another queue
    MoveToQueue {
        /// Application id
        app_id: String,
        /// Target queue
        #[arg(long)]
        queue: String,
    },

    /// Move an application to another queue (alias of move-to-queue)
    ChangeQueue {
        /// Application id
        app_id: String,
        /// Target queue
        #[arg(long)]
        queue: String,
    },

    /// Update the scheduling priority of an application
    UpdatePriority {
        /// Application id
        app_id: String,
        /// New priority
        priority: i32,
    },

    /// Update the remaining lifetime of an application
    UpdateLifetime {
        /// Application id
        app_id: String,
        /// Lifetime in seconds from now
        seconds: i64,
    },

    /// Launch an application from a specification file
    Launch {
        /// Application name
        name: String,
        /// Specification file
        spec_file: PathBuf,
        /// Application type
        #[arg(long)]
        app_type: Option<String>,
        /// Lifetime in seconds
        #[arg(long)]
        lifetime: Option<i64>,
        /// Target queue
        #[arg(long)]
        queue: Option<String>,
    },

    /// Save a specification without launching
    Save {
        /// Application name
        name: String,
        /// Specification file
        spec_file: PathBuf,
        /// Application type
        #[arg(long)]
        app_type: Option<String>,
        /// Lifetime in seconds
        #[arg(long)]
        lifetime: Option<i64>,
        /// Target queue
        #[arg(long)]
        queue: Option<String>,
    },

    /// Start a previously saved application
    Start {
        /// Application name
        name: String,
        /// Application type
        #[arg(long)]
        app_type: Option<String>,
    },

    /// Stop a running application, addressed by id or name
    Stop {
        /// Application id or name
        app: String,
        /// Application type for name-based resolution
        #[arg(long)]
        app_type: Option<String>,
    },

    /// Destroy an application and its saved specification
    Destroy {
        /// Application name
        name: String,
        /// Application type
        #[arg(long)]
        app_type: Option<String>,
    },

    /// Change component instance counts, addressed by id or name
    Flex {
        /// Application id or name
        app: String,
        /// Component name and target count; repeatable
        #[arg(
            long = "component",
            num_args = 2,
            value_names = ["NAME", "COUNT"],
            action = clap::ArgAction::Append,
            required = true
        )]
        components: Vec<String>,
        /// Application type for name-based resolution
        #[arg(long)]
        app_type: Option<String>,
    },

    /// Upload framework dependencies so later launches skip the upload
    EnableFastLaunch {
        /// Upload destination folder
        destination: Option<String>,
        /// Application type
        #[arg(long)]
        app_type: Option<String>,
    },

    /// Decommission component instances, addressed by id or name
    Decommission {
        /// Application id or name
        app: String,
        /// Component instances to decommission
        #[arg(long, value_delimiter = ',', required = true)]
        instances: Vec<String>,
        /// Application type for name-based resolution
        #[arg(long)]
        app_type: Option<String>,
    },

    /// Upgrade an application through exactly one mode
    Upgrade(UpgradeArgs),
}

/// Upgrade modes are mutually exclusive and exactly one is required.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["express", "initiate", "instances", "components", "finalize", "cancel"])
))]
pub struct UpgradeArgs {
    /// Application name
    pub name: String,

    /// One-shot upgrade driven by a specification file
    #[arg(long, value_name = "SPEC_FILE")]
    pub express: Option<PathBuf>,

    /// Begin an upgrade from a specification file
    #[arg(long, value_name = "SPEC_FILE")]
    pub initiate: Option<PathBuf>,

    /// Finalize automatically once all instances are upgraded
    #[arg(
        long,
        requires = "initiate",
        conflicts_with_all = ["express", "instances", "components", "finalize", "cancel"]
    )]
    pub auto_finalize: bool,

    /// Upgrade the named component instances
    #[arg(long, value_delimiter = ',')]
    pub instances: Vec<String>,

    /// Upgrade every instance of the named components
    #[arg(long, value_delimiter = ',')]
    pub components: Vec<String>,

    /// Finalize the active upgrade
    #[arg(long)]
    pub finalize: bool,

    /// Cancel the active upgrade
    #[arg(long)]
    pub cancel: bool,

    /// Application type
    #[arg(long)]
    pub app_type: Option<String>,
}

/// Attempt subcommands
#[derive(Subcommand, Debug)]
pub enum AttemptAction {
    /// Print the report of an attempt
    Status {
        /// Attempt id
        attempt_id: String,
    },

    /// List the attempts of an application
    List {
        /// Application id
        app_id: String,
    },

    /// Fail a single attempt
    Fail {
        /// Attempt id
        attempt_id: String,
    },
}

/// Container subcommands
#[derive(Subcommand, Debug)]
pub enum ContainerAction {
    /// Print the report of a container
    Status {
        /// Container id
        container_id: String,
    },

    /// List containers by attempt id, or component instances by
    /// application name
    List {
        /// Attempt id or application name
        target: String,
        /// Application type for name-based resolution
        #[arg(long)]
        app_type: Option<String>,
        /// Specification version filter (name-based listing only)
        #[arg(long)]
        version: Option<String>,
        /// Component filter (name-based listing only)
        #[arg(long, value_delimiter = ',')]
        components: Vec<String>,
        /// Instance state filter (name-based listing only)
        #[arg(long, value_delimiter = ',')]
        states: Vec<String>,
    },

    /// Deliver a signal command to a container
    Signal {
        /// Container id
        container_id: String,
        /// Signal to deliver
        command: Option<SignalCommandArg>,
    },

    /// Open a shell command in a container
    Shell {
        /// Container id
        container_id: String,
        /// Shell to run
        command: Option<ShellCommandArg>,
    },
}

/// Signal command tokens accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SignalCommandArg {
    OutputThreadDump,
    GracefulShutdown,
    ForcefulShutdown,
}

impl From<SignalCommandArg> for SignalCommand {
    fn from(command: SignalCommandArg) -> Self {
        match command {
            SignalCommandArg::OutputThreadDump => SignalCommand::OutputThreadDump,
            SignalCommandArg::GracefulShutdown => SignalCommand::GracefulShutdown,
            SignalCommandArg::ForcefulShutdown => SignalCommand::ForcefulShutdown,
        }
    }
}

/// Shell command tokens accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ShellCommandArg {
    Bash,
    Sh,
}

impl From<ShellCommandArg> for ShellCommand {
    fn from(command: ShellCommandArg) -> Self {
        match command {
            ShellCommandArg::Bash => ShellCommand::Bash,
            ShellCommandArg::Sh => ShellCommand::Sh,
        }
    }
}
