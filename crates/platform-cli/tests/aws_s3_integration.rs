//! S3 integration tests - actually call AWS APIs
//!
//! These tests are marked `#[ignore]` and only run with:
//! ```
//! AWS_PROFILE=your_profile cargo test --test aws_s3_integration -- --ignored
//! ```
//!
//! They never create buckets.

mod aws_test_helpers;

use aws_test_helpers::*;
use platform_cli::aws::{FromAwsContext, S3Client};
use platform_cli::commands::storage;
use platform_cli::error::CommandError;
use platform_cli_common::ResourceKind;
use std::io::Write;
use tempfile::NamedTempFile;

/// Uploading to a bucket that does not exist is reported as not found
#[tokio::test]
#[ignore]
async fn test_upload_to_missing_bucket() {
    let s3 = S3Client::from_context(&test_context().await);
    let bucket = format!("platform-cli-{}-missing", test_run_id());

    let mut temp_file = NamedTempFile::new().expect("Should create temp file");
    writeln!(temp_file, "test content").expect("Should write to temp file");

    let err = storage::upload(&s3, &bucket, temp_file.path(), Some("sample.txt"))
        .await
        .expect_err("upload to a missing bucket must fail");

    assert!(
        matches!(err, CommandError::NotFound { kind: ResourceKind::S3Bucket, .. }),
        "expected missing bucket, got: {err}"
    );
}

/// Downloading from a bucket that does not exist writes nothing locally
#[tokio::test]
#[ignore]
async fn test_download_from_missing_bucket() {
    let s3 = S3Client::from_context(&test_context().await);
    let bucket = format!("platform-cli-{}-missing", test_run_id());
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let destination = dir.path().join("out/sample.txt");

    let result = storage::download(&s3, &bucket, "sample.txt", Some(&destination)).await;

    assert!(result.is_err());
    assert!(!destination.exists());
}
