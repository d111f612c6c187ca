//! # Typed Identifiers
//!
//! Format-constrained identifiers for applications, attempts, and
//! containers. The textual forms are the wire format used by the resource
//! manager:
//!
//! - application: `app_<cluster>_<seq>`
//! - attempt:     `attempt_<cluster>_<seq>_<attempt>`
//! - container:   `container_<cluster>_<seq>_<attempt>_<container>`
//!
//! Parsing is strict; a string that does not match is not an identifier and
//! callers are expected to fall back to name-based resolution where that is
//! supported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Failure to parse an identifier from its textual form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} id '{input}'")]
pub struct IdParseError {
    kind: &'static str,
    input: String,
}

impl IdParseError {
    fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}

/// Identifier of a submitted application
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApplicationId {
    /// Cluster timestamp (epoch millis of the resource manager start)
    pub cluster: u64,
    /// Sequence number within the cluster timestamp
    pub seq: u32,
}

impl ApplicationId {
    pub fn new(cluster: u64, seq: u32) -> Self {
        Self { cluster, seq }
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app_{}_{:04}", self.cluster, self.seq)
    }
}

impl FromStr for ApplicationId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || IdParseError::new("application", s);
        let rest = s.strip_prefix("app_").ok_or_else(err)?;
        let (cluster, seq) = rest.split_once('_').ok_or_else(err)?;
        Ok(Self {
            cluster: cluster.parse().map_err(|_| err())?,
            seq: seq.parse().map_err(|_| err())?,
        })
    }
}

/// Identifier of one execution attempt of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId {
    pub app: ApplicationId,
    pub attempt: u32,
}

impl AttemptId {
    pub fn new(app: ApplicationId, attempt: u32) -> Self {
        Self { app, attempt }
    }

    /// The application this attempt belongs to
    pub fn application_id(&self) -> ApplicationId {
        self.app
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempt_{}_{:04}_{:06}",
            self.app.cluster, self.app.seq, self.attempt
        )
    }
}

impl FromStr for AttemptId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || IdParseError::new("attempt", s);
        let rest = s.strip_prefix("attempt_").ok_or_else(err)?;
        let mut parts = rest.split('_');
        let cluster = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let seq = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let attempt = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self {
            app: ApplicationId::new(cluster, seq),
            attempt,
        })
    }
}

/// Identifier of an allocated resource slot within an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId {
    pub attempt: AttemptId,
    pub container: u64,
}

impl ContainerId {
    pub fn new(attempt: AttemptId, container: u64) -> Self {
        Self { attempt, container }
    }

    /// The attempt hosting this container
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt
    }

    /// The application this container belongs to
    pub fn application_id(&self) -> ApplicationId {
        self.attempt.app
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "container_{}_{:04}_{:06}_{:06}",
            self.attempt.app.cluster, self.attempt.app.seq, self.attempt.attempt, self.container
        )
    }
}

impl FromStr for ContainerId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || IdParseError::new("container", s);
        let rest = s.strip_prefix("container_").ok_or_else(err)?;
        let mut parts = rest.split('_');
        let cluster = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let seq = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let attempt = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let container = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self {
            attempt: AttemptId::new(ApplicationId::new(cluster, seq), attempt),
            container,
        })
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(ApplicationId);
string_serde!(AttemptId);
string_serde!(ContainerId);
