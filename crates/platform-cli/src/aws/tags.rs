//! Conversions from [`TagSet`] to the tagging shapes of each AWS service

use anyhow::Result;
use platform_cli_common::{OwnershipFilter, TagSet};

/// Build an EC2 TagSpecification carrying every tag in the set.
pub fn ec2_tag_spec(
    resource_type: aws_sdk_ec2::types::ResourceType,
    tags: &TagSet,
) -> aws_sdk_ec2::types::TagSpecification {
    use aws_sdk_ec2::types::{Tag, TagSpecification};

    let mut builder = TagSpecification::builder().resource_type(resource_type);
    for (k, v) in tags.iter() {
        builder = builder.tags(Tag::builder().key(k).value(v).build());
    }
    builder.build()
}

/// Build the EC2 describe filter that restricts results to owned resources.
pub fn ec2_ownership_filter(filter: &OwnershipFilter) -> aws_sdk_ec2::types::Filter {
    aws_sdk_ec2::types::Filter::builder()
        .name(filter.tag_filter_name())
        .values(&filter.value)
        .build()
}

/// Collect EC2 tags into a [`TagSet`], skipping incomplete pairs.
pub fn tag_set_from_ec2(tags: &[aws_sdk_ec2::types::Tag]) -> TagSet {
    tags.iter()
        .filter_map(|t| Some((t.key()?, t.value()?)))
        .collect()
}

/// Build S3 bucket Tagging from the set.
pub fn s3_tagging(tags: &TagSet) -> Result<aws_sdk_s3::types::Tagging> {
    use aws_sdk_s3::types::{Tag, Tagging};

    let mut builder = Tagging::builder();
    for (k, v) in tags.iter() {
        builder = builder.tag_set(Tag::builder().key(k).value(v).build()?);
    }
    Ok(builder.build()?)
}

/// Build Route53 tags from the set.
pub fn route53_tags(tags: &TagSet) -> Vec<aws_sdk_route53::types::Tag> {
    tags.iter()
        .map(|(k, v)| aws_sdk_route53::types::Tag::builder().key(k).value(v).build())
        .collect()
}

/// Collect Route53 tags into a [`TagSet`], skipping incomplete pairs.
pub fn tag_set_from_route53(tags: &[aws_sdk_route53::types::Tag]) -> TagSet {
    tags.iter()
        .filter_map(|t| Some((t.key()?, t.value()?)))
        .collect()
}
