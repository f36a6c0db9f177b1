//! AWS resource tag schema and ownership rules for platform-cli
//!
//! Every resource created by platform-cli carries the identity marker
//! (`CreatedBy = platform-cli` by default). The marker is the only signal
//! used to decide whether a resource is managed by this tool.
//!
//! ## Tag Schema
//!
//! | Tag Key | Description |
//! |---------|-------------|
//! | `CreatedBy` | Identity marker, fixed tool identity |
//! | `Owner` | Local operator who ran the command |
//! | `Project` | Fixed project label |
//! | `Environment` | Fixed environment label |
//! | `Name` | Instance name (EC2 only, per call) |
//! | `Timestamp` | Caller reference of the create request (Route53 only) |

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Tag key for the identity marker - all platform-cli resources have this
pub const TAG_CREATED_BY: &str = "CreatedBy";

/// Tag key for the local operator name
pub const TAG_OWNER: &str = "Owner";

/// Tag key for the project label
pub const TAG_PROJECT: &str = "Project";

/// Tag key for the environment label
pub const TAG_ENVIRONMENT: &str = "Environment";

/// Tag key for the instance display name
pub const TAG_NAME: &str = "Name";

/// Tag key for the Route53 caller reference
pub const TAG_TIMESTAMP: &str = "Timestamp";

/// Errors raised while building a tag set
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    /// A caller override tried to replace the identity marker
    #[error("tag key '{0}' is reserved for the identity marker and cannot be overridden")]
    ReservedKey(String),
}

/// Ordered list of key/value tags in the shape AWS tagging APIs expect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<(String, String)>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag, replacing the value in place if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

impl IntoIterator for TagSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Provider-side ownership filter: the identity key must equal the identity value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipFilter {
    pub key: String,
    pub value: String,
}

impl OwnershipFilter {
    /// Filter name in EC2 `Describe*` syntax (`tag:<key>`)
    pub fn tag_filter_name(&self) -> String {
        format!("tag:{}", self.key)
    }
}

/// The ownership convention: which baseline tags get written at creation
/// time and which marker proves a resource belongs to this tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPolicy {
    pub identity_key: String,
    pub identity_value: String,
    pub owner_key: String,
    pub owner: String,
    pub project_key: String,
    pub project: String,
    pub environment_key: String,
    pub environment: String,
}

impl TagPolicy {
    /// Baseline tags written on every resource, identity marker first.
    pub fn baseline(&self) -> TagSet {
        let mut tags = TagSet::new();
        tags.insert(&self.identity_key, &self.identity_value);
        tags.insert(&self.owner_key, &self.owner);
        tags.insert(&self.project_key, &self.project);
        tags.insert(&self.environment_key, &self.environment);
        tags
    }

    /// Merge per-call overrides onto the baseline.
    ///
    /// Overrides replace baseline values for matching keys and new keys are
    /// appended in the order given. Overriding the identity key is rejected.
    pub fn build_tag_set(&self, overrides: &[(&str, &str)]) -> Result<TagSet, TagError> {
        let mut tags = self.baseline();
        for (key, value) in overrides {
            if *key == self.identity_key {
                return Err(TagError::ReservedKey((*key).to_string()));
            }
            tags.insert(*key, *value);
        }
        Ok(tags)
    }

    /// True if any pair matches the identity key and value exactly.
    pub fn is_owned<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        tags.into_iter()
            .any(|(k, v)| k == self.identity_key && v == self.identity_value)
    }

    pub fn ownership_filter(&self) -> OwnershipFilter {
        OwnershipFilter {
            key: self.identity_key.clone(),
            value: self.identity_value.clone(),
        }
    }
}

/// Format a request timestamp for the `Timestamp` tag and caller references
pub fn format_timestamp(time: chrono::DateTime<chrono::Utc>) -> String {
    time.to_rfc3339()
}
