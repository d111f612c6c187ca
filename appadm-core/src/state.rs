//! # Application State Domain
//!
//! The fixed application lifecycle, the listing state filter, and the
//! container signal/shell command sets.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of an application
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationState {
    New,
    Submitted,
    Accepted,
    Running,
    Finished,
    Failed,
    Killed,
}

impl ApplicationState {
    /// Every state in the lifecycle, in order
    pub const ALL: [ApplicationState; 7] = [
        ApplicationState::New,
        ApplicationState::Submitted,
        ApplicationState::Accepted,
        ApplicationState::Running,
        ApplicationState::Finished,
        ApplicationState::Failed,
        ApplicationState::Killed,
    ];

    /// Whether the application can no longer change state
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationState::Finished | ApplicationState::Failed | ApplicationState::Killed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationState::New => "NEW",
            ApplicationState::Submitted => "SUBMITTED",
            ApplicationState::Accepted => "ACCEPTED",
            ApplicationState::Running => "RUNNING",
            ApplicationState::Finished => "FINISHED",
            ApplicationState::Failed => "FAILED",
            ApplicationState::Killed => "KILLED",
        }
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationState {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let state = ApplicationState::ALL
            .iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .copied();
        state.ok_or_else(|| UnknownStateError {
            token: s.to_string(),
        })
    }
}

/// A state token that is not part of the lifecycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The application state {token} is invalid.")]
pub struct UnknownStateError {
    pub token: String,
}

/// Human-readable listing of every valid state token
pub fn valid_states_message() -> String {
    let names: Vec<&str> = ApplicationState::ALL.iter().map(|s| s.as_str()).collect();
    format!(
        "The valid application state can be one of the following: ALL, {}",
        names.join(", ")
    )
}

/// Final status reported once an application terminates
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalStatus {
    Undefined,
    Succeeded,
    Failed,
    Killed,
}

impl fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FinalStatus::Undefined => "UNDEFINED",
            FinalStatus::Succeeded => "SUCCEEDED",
            FinalStatus::Failed => "FAILED",
            FinalStatus::Killed => "KILLED",
        };
        f.write_str(s)
    }
}

/// State filter produced by listing-option parsing.
///
/// Immutable result value: the `ALL` sentinel is resolved at parse time
/// rather than carried as a process-wide flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateFilter {
    /// The `ALL` sentinel was present: every lifecycle state
    All,
    /// An explicit (possibly empty) set of states
    States(BTreeSet<ApplicationState>),
}

impl StateFilter {
    /// Parse raw `--app-states` tokens. Blank tokens are skipped; matching is
    /// case-insensitive; an `ALL` token anywhere selects the full domain.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<StateFilter, UnknownStateError> {
        let mut states = BTreeSet::new();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            if token.eq_ignore_ascii_case("ALL") {
                return Ok(StateFilter::All);
            }
            states.insert(token.parse::<ApplicationState>()?);
        }
        Ok(StateFilter::States(states))
    }

    /// The concrete state set to send to the service. An empty explicit set
    /// defaults to the actively-scheduled states.
    pub fn effective(&self) -> BTreeSet<ApplicationState> {
        match self {
            StateFilter::All => ApplicationState::ALL.iter().copied().collect(),
            StateFilter::States(states) if states.is_empty() => BTreeSet::from([
                ApplicationState::Running,
                ApplicationState::Accepted,
                ApplicationState::Submitted,
            ]),
            StateFilter::States(states) => states.clone(),
        }
    }
}

/// Commands deliverable to a container via `signal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalCommand {
    #[default]
    OutputThreadDump,
    GracefulShutdown,
    ForcefulShutdown,
}

impl fmt::Display for SignalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalCommand::OutputThreadDump => "OUTPUT_THREAD_DUMP",
            SignalCommand::GracefulShutdown => "GRACEFUL_SHUTDOWN",
            SignalCommand::ForcefulShutdown => "FORCEFUL_SHUTDOWN",
        };
        f.write_str(s)
    }
}

/// Shells available for `shell`-ing into a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShellCommand {
    #[default]
    Bash,
    Sh,
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShellCommand::Bash => "BASH",
            ShellCommand::Sh => "SH",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_selects_full_domain() {
        let filter = StateFilter::parse(&["RUNNING", "all"]).unwrap();
        assert_eq!(filter, StateFilter::All);
        let effective = filter.effective();
        assert_eq!(effective.len(), ApplicationState::ALL.len());
    }

    #[test]
    fn absent_states_default_to_active_set() {
        let filter = StateFilter::parse::<&str>(&[]).unwrap();
        let effective = filter.effective();
        let expected = BTreeSet::from([
            ApplicationState::Running,
            ApplicationState::Accepted,
            ApplicationState::Submitted,
        ]);
        assert_eq!(effective, expected);
    }

    #[test]
    fn explicit_states_pass_through() {
        let filter = StateFilter::parse(&["killed", " FAILED "]).unwrap();
        let effective = filter.effective();
        let expected = BTreeSet::from([ApplicationState::Killed, ApplicationState::Failed]);
        assert_eq!(effective, expected);
    }

    #[test]
    fn unknown_state_is_rejected() {
        let err = StateFilter::parse(&["RUNNING", "SLEEPING"]).unwrap_err();
        assert_eq!(err.token, "SLEEPING");
        assert!(valid_states_message().contains("RUNNING"));
        assert!(valid_states_message().contains("ALL"));
    }

    #[test]
    fn terminal_states() {
        assert!(ApplicationState::Finished.is_terminal());
        assert!(ApplicationState::Failed.is_terminal());
        assert!(ApplicationState::Killed.is_terminal());
        assert!(!ApplicationState::Running.is_terminal());
        assert!(!ApplicationState::Submitted.is_terminal());
    }

    #[test]
    fn state_serde_is_screaming_snake() {
        let json = serde_json::to_string(&ApplicationState::Running).unwrap();
        assert_eq!(json, "\"RUNNING\"");
    }
}
