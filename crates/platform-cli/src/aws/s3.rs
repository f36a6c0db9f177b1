//! S3 bucket and object management

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::classify_sdk_error;
use crate::aws::tags::s3_tagging;
use anyhow::{Context, Result};
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ServerSideEncryption,
    ServerSideEncryptionByDefault, ServerSideEncryptionConfiguration, ServerSideEncryptionRule,
};
use platform_cli_common::TagSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Region that rejects an explicit location constraint
const US_EAST_1: &str = "us-east-1";

/// Largest object a single `PutObject` accepts (5 GiB)
const MAX_PUT_OBJECT_BYTES: u64 = 5 * 1024 * 1024 * 1024;

/// Suffix of the sibling file a download is streamed into
const PARTIAL_SUFFIX: &str = ".part";

/// S3 client for managing tagged buckets and their objects
pub struct S3Client {
    client: Client,
    region: String,
}

impl FromAwsContext for S3Client {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.s3_client(),
            region: ctx.region().to_string(),
        }
    }
}

impl S3Client {
    /// Create a bucket in the client's region
    pub async fn create_bucket(&self, bucket_name: &str) -> Result<()> {
        info!(bucket = %bucket_name, region = %self.region, "Creating S3 bucket");

        let create_config = location_constraint(&self.region).map(|constraint| {
            CreateBucketConfiguration::builder()
                .location_constraint(constraint)
                .build()
        });

        self.client
            .create_bucket()
            .bucket(bucket_name)
            .set_create_bucket_configuration(create_config)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to create bucket")?;

        Ok(())
    }

    /// Apply default server-side encryption with a single algorithm
    pub async fn put_bucket_encryption(&self, bucket: &str, algorithm: &str) -> Result<()> {
        info!(bucket = %bucket, algorithm = %algorithm, "Applying default bucket encryption");

        let rule = ServerSideEncryptionRule::builder()
            .apply_server_side_encryption_by_default(
                ServerSideEncryptionByDefault::builder()
                    .sse_algorithm(ServerSideEncryption::from(algorithm))
                    .build()?,
            )
            .build();
        let config = ServerSideEncryptionConfiguration::builder()
            .rules(rule)
            .build()?;

        self.client
            .put_bucket_encryption()
            .bucket(bucket)
            .server_side_encryption_configuration(config)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to apply bucket encryption")?;

        Ok(())
    }

    /// Replace the bucket's tag set
    pub async fn put_bucket_tagging(&self, bucket: &str, tags: &TagSet) -> Result<()> {
        info!(bucket = %bucket, tags = tags.len(), "Tagging bucket");

        self.client
            .put_bucket_tagging()
            .bucket(bucket)
            .tagging(s3_tagging(tags)?)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to tag bucket")?;

        Ok(())
    }

    /// Upload a file to S3 with a single `PutObject`.
    ///
    /// Files above 5 GiB are refused before any request; there is no
    /// multipart upload.
    pub async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        debug!(bucket = %bucket, key = %key, path = %path.display(), "Uploading file");

        let size = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?
            .len();
        check_upload_size(size)?;

        let body = ByteStream::from_path(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to upload file")?;

        Ok(())
    }

    /// Download an object to a local file, creating parent directories as needed.
    ///
    /// The body is streamed into a `.part` sibling that is renamed over the
    /// destination once complete, so a failed transfer leaves no truncated file.
    pub async fn download_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        debug!(bucket = %bucket, key = %key, path = %path.display(), "Downloading object");

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))
            .context("Failed to download object")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let written = write_object(path, response.body).await?;
        debug!(bytes = written, path = %path.display(), "Object downloaded");
        Ok(())
    }
}

fn check_upload_size(size: u64) -> Result<()> {
    if size > MAX_PUT_OBJECT_BYTES {
        anyhow::bail!(
            "File is {size} bytes; a single upload is limited to {MAX_PUT_OBJECT_BYTES} bytes"
        );
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}

/// Stream a body to `path` through its partial sibling; the partial file is
/// removed on any failure.
async fn write_object(path: &Path, body: ByteStream) -> Result<usize> {
    let partial = partial_path(path);

    let result = async {
        let written = stream_to_file(&partial, body).await?;
        tokio::fs::rename(&partial, path)
            .await
            .with_context(|| format!("Failed to move download into place: {}", path.display()))?;
        Ok::<_, anyhow::Error>(written)
    }
    .await;

    if result.is_err() {
        match tokio::fs::remove_file(&partial).await {
            Ok(()) => debug!(path = %partial.display(), "Removed partial download"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %partial.display(), error = %e, "Failed to remove partial download")
            }
        }
    }

    result
}

async fn stream_to_file(path: &Path, mut body: ByteStream) -> Result<usize> {
    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    let mut written = 0usize;
    while let Some(chunk) = body
        .try_next()
        .await
        .context("Failed to read object body")?
    {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        written += chunk.len();
    }
    file.flush().await?;

    Ok(written)
}

/// Location constraint for a region; `us-east-1` must omit it.
fn location_constraint(region: &str) -> Option<BucketLocationConstraint> {
    (region != US_EAST_1).then(|| BucketLocationConstraint::from(region))
}

/// Trait for S3 operations that can be mocked in tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait S3Operations: Send + Sync {
    async fn create_bucket(&self, bucket: &str) -> Result<()>;

    async fn put_bucket_encryption(&self, bucket: &str, algorithm: &str) -> Result<()>;

    async fn put_bucket_tagging(&self, bucket: &str, tags: &TagSet) -> Result<()>;

    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()>;

    async fn download_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()>;
}

impl S3Operations for S3Client {
    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        S3Client::create_bucket(self, bucket).await
    }

    async fn put_bucket_encryption(&self, bucket: &str, algorithm: &str) -> Result<()> {
        S3Client::put_bucket_encryption(self, bucket, algorithm).await
    }

    async fn put_bucket_tagging(&self, bucket: &str, tags: &TagSet) -> Result<()> {
        S3Client::put_bucket_tagging(self, bucket, tags).await
    }

    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        S3Client::upload_file(self, bucket, key, path).await
    }

    async fn download_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        S3Client::download_file(self, bucket, key, path).await
    }
}
