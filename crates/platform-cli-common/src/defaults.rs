//! Default configuration values
//!
//! Every adjustable setting falls back to one of these when the config
//! file does not set it.

use std::collections::BTreeMap;

/// Default AWS region
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default identity marker value written to the `CreatedBy` tag
pub const DEFAULT_IDENTITY_VALUE: &str = "platform-cli";

/// Default project label
pub const DEFAULT_PROJECT: &str = "CloudAutomation";

/// Default environment label
pub const DEFAULT_ENVIRONMENT: &str = "Dev";

/// Owner tag value used when the local operator cannot be resolved
pub const DEFAULT_OPERATOR_FALLBACK: &str = "Unknown_User";

/// Default EC2 instance type for new instances
pub const DEFAULT_INSTANCE_TYPE: &str = "t3.micro";

/// Instance types the config may select
pub const DEFAULT_ALLOWED_INSTANCE_TYPES: &[&str] = &["t3.micro", "t2.small"];

/// Maximum number of live managed instances
pub const DEFAULT_MAX_INSTANCES: usize = 2;

/// Default OS label for `compute create`
pub const DEFAULT_OS_TYPE: &str = "amazon";

/// OS label to AMI mapping (us-east-1 images)
pub const DEFAULT_AMI_MAP: &[(&str, &str)] = &[
    ("amazon", "ami-0532be01f26a3de55"),
    ("ubuntu", "ami-0b6c6ebed2801a5cb"),
];

/// Default server-side encryption algorithm for new buckets
pub const DEFAULT_SSE_ALGORITHM: &str = "AES256";

/// Default TTL in seconds for Route53 records
pub const DEFAULT_RECORD_TTL: i64 = 300;

/// Default Route53 record type
pub const DEFAULT_RECORD_TYPE: &str = "A";

// Serde default functions for struct field defaults

pub fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

pub fn default_identity_value() -> String {
    DEFAULT_IDENTITY_VALUE.to_string()
}

pub fn default_project() -> String {
    DEFAULT_PROJECT.to_string()
}

pub fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

pub fn default_operator_fallback() -> String {
    DEFAULT_OPERATOR_FALLBACK.to_string()
}

pub fn default_instance_type() -> String {
    DEFAULT_INSTANCE_TYPE.to_string()
}

pub fn default_allowed_instance_types() -> Vec<String> {
    DEFAULT_ALLOWED_INSTANCE_TYPES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_max_instances() -> usize {
    DEFAULT_MAX_INSTANCES
}

pub fn default_os_type() -> String {
    DEFAULT_OS_TYPE.to_string()
}

pub fn default_ami_map() -> BTreeMap<String, String> {
    DEFAULT_AMI_MAP
        .iter()
        .map(|(os, ami)| (os.to_string(), ami.to_string()))
        .collect()
}

pub fn default_sse_algorithm() -> String {
    DEFAULT_SSE_ALGORITHM.to_string()
}

pub fn default_record_ttl() -> i64 {
    DEFAULT_RECORD_TTL
}

pub fn default_record_type() -> String {
    DEFAULT_RECORD_TYPE.to_string()
}
