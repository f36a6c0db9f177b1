//! platform-cli - tagged AWS resource management
//!
//! Provisions EC2 instances, S3 buckets and Route53 hosted zones, tagging
//! each with an identity marker, and refuses destructive or listing
//! operations on resources that do not carry it.

pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod ownership;
pub mod prompt;

#[cfg(test)]
mod testing;
