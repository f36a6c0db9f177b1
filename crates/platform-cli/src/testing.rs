//! Fixtures shared by unit tests

use crate::aws::{InstanceSummary, classify_aws_error};
use crate::config::Settings;
use anyhow::Context;
use platform_cli_common::{TagPolicy, TagSet};

pub fn settings() -> Settings {
    Settings::default()
}

pub fn policy() -> TagPolicy {
    settings().tags.policy("alice")
}

pub fn instance(id: &str, state: &str, tags: TagSet) -> InstanceSummary {
    InstanceSummary {
        instance_id: id.to_string(),
        state: state.to_string(),
        name: tags.get("Name").map(str::to_string),
        tags,
    }
}

pub fn owned_instance(id: &str, state: &str) -> InstanceSummary {
    instance(id, state, policy().baseline())
}

/// An error shaped like the wrappers return for a classified AWS code
pub fn aws_error(code: &str) -> anyhow::Error {
    Err::<(), _>(classify_aws_error(Some(code), Some("service message")))
        .context("AWS call failed")
        .unwrap_err()
}
