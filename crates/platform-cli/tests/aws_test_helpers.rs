//! Shared utilities for AWS integration tests
//!
//! Provides region detection, unique names and a settings/policy pair.

#![allow(dead_code)]

use chrono::Utc;
use platform_cli::aws::AwsContext;
use platform_cli::config::Settings;
use platform_cli_common::TagPolicy;

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to us-east-1
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "us-east-1".to_string())
}

/// Generate a unique run ID for test resources.
///
/// Format: `test-{timestamp}` where timestamp is Unix seconds.
pub fn test_run_id() -> String {
    format!("test-{}", Utc::now().timestamp())
}

/// Default settings pointed at the test region
pub fn test_settings() -> Settings {
    Settings::default().with_region(Some(get_test_region()))
}

/// Tagging policy with a fixed test operator
pub fn test_policy() -> TagPolicy {
    test_settings().tags.policy("integration-test")
}

pub async fn test_context() -> AwsContext {
    AwsContext::new(&get_test_region()).await
}
