//! Route53 integration tests - actually call AWS APIs
//!
//! These tests are marked `#[ignore]` and only run with:
//! ```
//! AWS_PROFILE=your_profile cargo test --test aws_route53_integration -- --ignored
//! ```
//!
//! They never create zones or records.

mod aws_test_helpers;

use aws_test_helpers::*;
use platform_cli::aws::{FromAwsContext, RecordAction, Route53Client};
use platform_cli::commands::dns;
use platform_cli::error::CommandError;

/// Listed zones all carry the identity marker and have bare IDs
#[tokio::test]
#[ignore]
async fn test_list_zones_returns_owned_zones() {
    let route53 = Route53Client::from_context(&test_context().await);

    let zones = dns::list_zones(&route53, &test_policy())
        .await
        .expect("AWS credentials required - set AWS_PROFILE or AWS_ACCESS_KEY_ID");

    for zone in &zones {
        assert!(!zone.id.contains('/'), "zone id not normalized: {}", zone.id);
    }
}

/// Record changes on a nonexistent zone are refused before any change call
#[tokio::test]
#[ignore]
async fn test_manage_records_on_missing_zone() {
    let route53 = Route53Client::from_context(&test_context().await);

    let err = dns::manage_records(
        &route53,
        &test_settings().route53,
        &test_policy(),
        "/hostedzone/ZNOTAREALZONE0",
        "sample.example.com",
        "192.0.2.1",
        RecordAction::Upsert,
    )
    .await
    .expect_err("missing zone must be refused");

    assert!(
        matches!(err, CommandError::NotFound { .. }),
        "expected zone not found, got: {err}"
    );
}
