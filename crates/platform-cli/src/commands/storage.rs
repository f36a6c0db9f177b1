//! S3 bucket and object commands

use crate::aws::{AwsError, S3Operations, find_aws_error};
use crate::config::S3Settings;
use crate::error::CommandError;
use crate::prompt::Confirmer;
use anyhow::Context;
use platform_cli_common::{ResourceKind, TagPolicy};
use std::path::{Path, PathBuf};
use tracing::info;

/// Requested bucket visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BucketAccess {
    Public,
    #[default]
    Private,
}

impl BucketAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketAccess::Public => "public",
            BucketAccess::Private => "private",
        }
    }
}

/// Result of `storage create`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketCreation {
    Created,
    /// The operator declined the public-bucket confirmation
    Aborted,
}

/// Create an encrypted, tagged bucket.
///
/// Public buckets need an explicit confirmation first. The three calls are
/// not transactional: a failure after the bucket exists leaves it in place
/// and the error says which step was missed.
pub async fn create_bucket<S, C>(
    s3: &S,
    confirmer: &C,
    settings: &S3Settings,
    policy: &TagPolicy,
    name: &str,
    access: BucketAccess,
) -> Result<BucketCreation, CommandError>
where
    S: S3Operations,
    C: Confirmer,
{
    if access == BucketAccess::Public
        && !confirmer.confirm(&format!(
            "WARNING: Bucket {name} will be PUBLIC. Are you sure?"
        ))
    {
        info!(bucket = %name, "Public bucket creation declined");
        return Ok(BucketCreation::Aborted);
    }

    let tags = policy.build_tag_set(&[])?;

    s3.create_bucket(name).await?;

    s3.put_bucket_encryption(name, &settings.sse_algorithm)
        .await
        .with_context(|| {
            format!(
                "Bucket '{name}' was created but default encryption was not applied. \
                 The bucket was left in place"
            )
        })?;

    s3.put_bucket_tagging(name, &tags).await.with_context(|| {
        format!(
            "Bucket '{name}' was created and encrypted but could not be tagged. \
             The bucket was left in place and is not recognized as managed"
        )
    })?;

    Ok(BucketCreation::Created)
}

/// Upload a local file; the key defaults to the local path as given.
///
/// Returns the key the object was stored under.
pub async fn upload<S>(
    s3: &S,
    bucket: &str,
    file: &Path,
    key: Option<&str>,
) -> Result<String, CommandError>
where
    S: S3Operations,
{
    if !file.is_file() {
        return Err(CommandError::invalid_argument(format!(
            "File '{}' does not exist or is not a regular file",
            file.display()
        )));
    }

    let key = match key {
        Some(key) => key.to_string(),
        None => file.to_string_lossy().into_owned(),
    };

    s3.upload_file(bucket, &key, file)
        .await
        .map_err(|e| transfer_error(e, bucket, &key))?;
    Ok(key)
}

/// Download an object; the destination defaults to the key as a relative path.
///
/// Returns the local path written.
pub async fn download<S>(
    s3: &S,
    bucket: &str,
    key: &str,
    file: Option<&Path>,
) -> Result<PathBuf, CommandError>
where
    S: S3Operations,
{
    let destination = file.map_or_else(|| PathBuf::from(key), Path::to_path_buf);

    s3.download_file(bucket, key, &destination)
        .await
        .map_err(|e| transfer_error(e, bucket, key))?;
    Ok(destination)
}

/// Report a missing bucket or object as "not found"
fn transfer_error(error: anyhow::Error, bucket: &str, key: &str) -> CommandError {
    match find_aws_error(&error).and_then(AwsError::code) {
        Some("NoSuchBucket") => CommandError::NotFound {
            kind: ResourceKind::S3Bucket,
            id: bucket.to_string(),
        },
        Some("NoSuchKey" | "NotFound") => CommandError::NotFound {
            kind: ResourceKind::S3Object,
            id: key.to_string(),
        },
        _ => CommandError::Remote(error),
    }
}
