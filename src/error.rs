//! Error types used by the controller and the host loops.
//!
//! This module defines two error enums:
//!
//! - [`ActionError`]: raised when an action envelope is malformed.
//! - [`HostError`]: raised when a job is posted to a host loop that is gone.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logs.

use thiserror::Error;

/// # Errors produced while building an action.
///
/// Surfaced to the view at construction time; a malformed action never
/// reaches the pending buffer.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The property name was empty.
    #[error("invalid argument: property name must not be empty")]
    EmptyPropertyName,
}

impl ActionError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use mvcbridge::ActionError;
    ///
    /// assert_eq!(ActionError::EmptyPropertyName.as_label(), "action_empty_property");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionError::EmptyPropertyName => "action_empty_property",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ActionError::EmptyPropertyName => "property name is empty".to_string(),
        }
    }
}

/// # Errors produced by host loops.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host loop has stopped and no longer accepts jobs.
    #[error("host loop '{host}' is closed")]
    Closed {
        /// Name of the host loop.
        host: String,
    },

    /// The host loop thread could not be started.
    #[error("failed to start host loop '{host}': {reason}")]
    Spawn {
        /// Name of the host loop.
        host: String,
        /// Underlying OS error.
        reason: String,
    },
}

impl HostError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            HostError::Closed { .. } => "host_closed",
            HostError::Spawn { .. } => "host_spawn_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HostError::Closed { host } => format!("closed: {host}"),
            HostError::Spawn { host, reason } => format!("spawn {host}: {reason}"),
        }
    }
}
