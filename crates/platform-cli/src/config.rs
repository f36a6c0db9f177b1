//! Settings loaded from JSON
//!
//! One immutable [`Settings`] value is built at startup and handed to every
//! command. Missing fields fall back to `platform_cli_common::defaults`.

use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use platform_cli_common::TagPolicy;
use platform_cli_common::defaults::{
    default_allowed_instance_types, default_ami_map, default_environment,
    default_identity_value, default_instance_type, default_max_instances,
    default_operator_fallback, default_os_type, default_project, default_record_ttl,
    default_record_type, default_region, default_sse_algorithm,
};
use platform_cli_common::tags::{
    TAG_CREATED_BY, TAG_ENVIRONMENT, TAG_NAME, TAG_OWNER, TAG_PROJECT, TAG_TIMESTAMP,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the settings file inside the config directory
const CONFIG_FILE_NAME: &str = "config.json";

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, garde::Validate)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// AWS region for every client
    #[garde(length(min = 1))]
    pub region: String,

    #[garde(dive)]
    pub tags: TagSettings,

    #[garde(dive)]
    pub ec2: Ec2Settings,

    #[garde(dive)]
    pub s3: S3Settings,

    #[garde(dive)]
    pub route53: Route53Settings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: default_region(),
            tags: TagSettings::default(),
            ec2: Ec2Settings::default(),
            s3: S3Settings::default(),
            route53: Route53Settings::default(),
        }
    }
}

/// Tag schema and labels
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, garde::Validate)]
#[serde(default, deny_unknown_fields)]
pub struct TagSettings {
    /// Key of the identity marker
    #[garde(length(min = 1))]
    pub identity_key: String,

    /// Value of the identity marker (the tool identity)
    #[garde(length(min = 1))]
    pub identity_value: String,

    #[garde(length(min = 1))]
    pub owner_key: String,

    #[garde(length(min = 1))]
    pub project_key: String,

    #[garde(skip)]
    pub project: String,

    #[garde(length(min = 1))]
    pub environment_key: String,

    #[garde(skip)]
    pub environment: String,

    /// Owner value when the operator name cannot be resolved
    #[garde(length(min = 1))]
    pub operator_fallback: String,
}

impl Default for TagSettings {
    fn default() -> Self {
        Self {
            identity_key: TAG_CREATED_BY.to_string(),
            identity_value: default_identity_value(),
            owner_key: TAG_OWNER.to_string(),
            project_key: TAG_PROJECT.to_string(),
            project: default_project(),
            environment_key: TAG_ENVIRONMENT.to_string(),
            environment: default_environment(),
            operator_fallback: default_operator_fallback(),
        }
    }
}

impl TagSettings {
    /// Build the tagging policy for the given operator
    pub fn policy(&self, owner: impl Into<String>) -> TagPolicy {
        TagPolicy {
            identity_key: self.identity_key.clone(),
            identity_value: self.identity_value.clone(),
            owner_key: self.owner_key.clone(),
            owner: owner.into(),
            project_key: self.project_key.clone(),
            project: self.project.clone(),
            environment_key: self.environment_key.clone(),
            environment: self.environment.clone(),
        }
    }

    /// Baseline keys must be pairwise distinct and stay clear of the
    /// per-resource `Name` and `Timestamp` tags.
    fn check_keys(&self) -> Result<(), ConfigError> {
        let keys = [
            &self.identity_key,
            &self.owner_key,
            &self.project_key,
            &self.environment_key,
        ];

        for (i, key) in keys.iter().enumerate() {
            if [TAG_NAME, TAG_TIMESTAMP].contains(&key.as_str()) {
                return Err(ConfigError::ReservedTagKey(key.to_string()));
            }
            if keys[..i].contains(key) {
                return Err(ConfigError::DuplicateTagKey(key.to_string()));
            }
        }

        Ok(())
    }
}

/// Compute instance settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, garde::Validate)]
#[serde(default, deny_unknown_fields)]
pub struct Ec2Settings {
    /// Instance type for every launch
    #[garde(length(min = 1))]
    pub instance_type: String,

    /// Instance types `instance_type` may be set to
    #[garde(length(min = 1))]
    pub allowed_instance_types: Vec<String>,

    /// Ceiling on live managed instances
    #[garde(range(min = 1))]
    pub max_instances: usize,

    /// OS label used when `--os-type` is not given
    #[garde(length(min = 1))]
    pub default_os_type: String,

    /// OS label to AMI ID
    #[garde(length(min = 1))]
    pub ami_map: BTreeMap<String, String>,
}

impl Default for Ec2Settings {
    fn default() -> Self {
        Self {
            instance_type: default_instance_type(),
            allowed_instance_types: default_allowed_instance_types(),
            max_instances: default_max_instances(),
            default_os_type: default_os_type(),
            ami_map: default_ami_map(),
        }
    }
}

impl Ec2Settings {
    /// AMI for an OS label
    pub fn resolve_ami(&self, os_type: &str) -> Option<&str> {
        self.ami_map.get(os_type).map(String::as_str)
    }

    /// Known OS labels, comma separated
    pub fn os_labels(&self) -> String {
        self.ami_map.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Object storage settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, garde::Validate)]
#[serde(default, deny_unknown_fields)]
pub struct S3Settings {
    /// Default server-side encryption algorithm
    #[garde(length(min = 1))]
    pub sse_algorithm: String,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            sse_algorithm: default_sse_algorithm(),
        }
    }
}

/// DNS settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, garde::Validate)]
#[serde(default, deny_unknown_fields)]
pub struct Route53Settings {
    /// TTL in seconds for managed records
    #[garde(range(min = 1))]
    pub record_ttl: i64,

    #[garde(length(min = 1))]
    pub record_type: String,
}

impl Default for Route53Settings {
    fn default() -> Self {
        Self {
            record_ttl: default_record_ttl(),
            record_type: default_record_type(),
        }
    }
}

impl Settings {
    /// Load settings from an explicit path, the user config file, or defaults.
    ///
    /// An explicit path must exist. The user config file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()));
        }

        match default_config_path() {
            Some(path) if path.is_file() => Self::from_path(&path)
                .with_context(|| format!("Failed to load settings from {}", path.display())),
            _ => {
                debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate settings from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path.display().to_string(), e))?;
        let settings = Self::from_json(&content)?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(content)?;
        settings.check()?;
        Ok(settings)
    }

    /// Field rules plus the cross-field rules garde cannot express
    pub fn check(&self) -> Result<(), ConfigError> {
        garde::Validate::validate(self)?;
        self.tags.check_keys()?;

        if !self
            .ec2
            .allowed_instance_types
            .contains(&self.ec2.instance_type)
        {
            return Err(ConfigError::InstanceTypeNotAllowed {
                instance_type: self.ec2.instance_type.clone(),
                allowed: self.ec2.allowed_instance_types.join(", "),
            });
        }

        if self.ec2.resolve_ami(&self.ec2.default_os_type).is_none() {
            return Err(ConfigError::UnknownDefaultOs(
                self.ec2.default_os_type.clone(),
            ));
        }

        Ok(())
    }

    /// Apply the `--region` flag, if given
    pub fn with_region(mut self, region: Option<String>) -> Self {
        if let Some(region) = region {
            self.region = region;
        }
        self
    }
}

/// `<config dir>/platform-cli/config.json` for the current user
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "platform-cli").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
