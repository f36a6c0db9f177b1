//! Command and configuration errors
//!
//! Typed errors for the failure classes a command can end in. Each class
//! maps to its own process exit code so scripts can tell a refused
//! operation apart from a remote failure.

use platform_cli_common::{ResourceKind, TagError};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// configured instance type is not in the allow-list
    #[error("ec2.instance_type '{instance_type}' is not one of the allowed types: {allowed}")]
    InstanceTypeNotAllowed {
        instance_type: String,
        allowed: String,
    },

    /// default OS label has no AMI mapping
    #[error("ec2.default_os_type '{0}' has no entry in ec2.ami_map")]
    UnknownDefaultOs(String),

    /// two baseline tag keys are the same
    #[error("tags: key '{0}' is used by more than one baseline tag")]
    DuplicateTagKey(String),

    /// a baseline tag key collides with a per-resource tag
    #[error("tags: key '{0}' is reserved for per-resource tags")]
    ReservedTagKey(String),

    /// Field-level validation failures
    #[error("Invalid settings: {0}")]
    Invalid(#[from] garde::Report),

    /// Failed to parse JSON configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to read configuration file
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure classes of a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// Local validation failed before any remote call
    #[error("{0}")]
    InvalidArgument(String),

    /// A tag override was rejected
    #[error(transparent)]
    Tag(#[from] TagError),

    /// The managed-instance ceiling is already reached
    #[error("Instance limit reached: {current} managed instances (maximum {max})")]
    QuotaExceeded { current: usize, max: usize },

    /// The resource does not exist
    #[error("{kind} '{id}' not found")]
    NotFound { kind: ResourceKind, id: String },

    /// The resource exists but does not carry the identity marker
    #[error("Access denied: {kind} '{id}' was not created by {identity}")]
    AccessDenied {
        kind: ResourceKind,
        id: String,
        identity: String,
    },

    /// The provider rejected or failed a call
    #[error(transparent)]
    Remote(#[from] anyhow::Error),
}

impl CommandError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Process exit code for this failure class
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Remote(_) => 1,
            CommandError::InvalidArgument(_) | CommandError::Tag(_) => 2,
            CommandError::AccessDenied { .. } => 3,
            CommandError::NotFound { .. } => 4,
            CommandError::QuotaExceeded { .. } => 5,
        }
    }
}

/// Exit code for any error surfaced by the binary
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(cmd) = cause.downcast_ref::<CommandError>() {
            return cmd.exit_code();
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return 2;
        }
    }
    1
}
