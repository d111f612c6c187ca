//! # Error Types
//!
//! Centralized error handling for the appadm client library.
//!
//! The remote service's not-found conditions are modeled as dedicated
//! variants so that call sites can match on them instead of inspecting
//! status codes or message text.

use thiserror::Error;

use crate::ids::{ApplicationId, AttemptId, ContainerId};

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the resource manager client
#[derive(Error, Debug)]
pub enum ClientError {
    /// The application id is unknown to the resource manager
    #[error("Application with id '{0}' doesn't exist in the resource manager")]
    ApplicationNotFound(ApplicationId),

    /// The application attempt id is unknown to the resource manager
    #[error("Application attempt with id '{0}' doesn't exist in the resource manager")]
    AttemptNotFound(AttemptId),

    /// The container id is unknown to the resource manager
    #[error("Container with id '{0}' doesn't exist in the resource manager")]
    ContainerNotFound(ContainerId),

    /// A name-addressed application is unknown to the admin service
    #[error("Application with name '{0}' doesn't exist in the resource manager")]
    NameNotFound(String),

    /// No admin client is registered for the requested application type
    #[error("No admin client available for application type '{0}'")]
    UnsupportedAppType(String),

    /// The service rejected the request or failed internally
    #[error("Service error: {0}")]
    Service(String),

    /// Transport-level failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
