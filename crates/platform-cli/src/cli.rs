//! Command-line interface

use crate::aws::RecordAction;
use crate::commands::storage::BucketAccess;
use crate::output::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "platform-cli")]
#[command(about = "Provision and manage tagged EC2 instances, S3 buckets and Route53 zones")]
#[command(version)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file (default: <config dir>/platform-cli/config.json)
    #[arg(long, global = true, env = "PLATFORM_CLI_CONFIG")]
    pub config: Option<PathBuf>,

    /// AWS region (overrides the settings file)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// EC2 instance commands
    #[command(subcommand, visible_alias = "ec2")]
    Compute(ComputeCommand),

    /// S3 bucket and object commands
    #[command(subcommand, visible_alias = "s3")]
    Storage(StorageCommand),

    /// Route53 hosted zone and record commands
    #[command(subcommand, visible_alias = "route53")]
    Dns(DnsCommand),
}

#[derive(Subcommand, Debug)]
pub enum ComputeCommand {
    /// List instances created by this tool
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Launch a new instance
    Create {
        /// Value of the Name tag
        #[arg(long)]
        name: String,

        /// OS label mapped to an AMI (default from settings, e.g. "amazon")
        #[arg(long, alias = "os_type")]
        os_type: Option<String>,
    },

    /// Stop an instance created by this tool
    Stop {
        /// Instance to stop
        #[arg(long, alias = "instance_id")]
        instance_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum StorageCommand {
    /// Create an encrypted, tagged bucket
    Create {
        /// Bucket name
        #[arg(long)]
        name: String,

        /// Bucket visibility; public asks for confirmation
        #[arg(long, value_enum, ignore_case = true, default_value_t)]
        access: BucketAccess,
    },

    /// Upload a local file
    Upload {
        /// Target bucket
        #[arg(long)]
        bucket: String,

        /// Local file to upload
        #[arg(long)]
        file: PathBuf,

        /// Object key (default: the file path as given)
        #[arg(long)]
        key: Option<String>,
    },

    /// Download an object
    Download {
        /// Source bucket
        #[arg(long)]
        bucket: String,

        /// Object key
        #[arg(long)]
        key: String,

        /// Local destination (default: the key)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DnsCommand {
    /// Create a hosted zone
    Create {
        /// Domain name for the zone
        #[arg(long)]
        domain: String,
    },

    /// List hosted zones created by this tool
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Create, delete or upsert an A record in a zone created by this tool
    ManageRecords {
        /// Hosted zone ID, with or without the /hostedzone/ prefix
        #[arg(long, alias = "zoneid")]
        zone_id: String,

        /// Record name (e.g., www.example.com)
        #[arg(long)]
        name: String,

        /// Record value (e.g., an IPv4 address)
        #[arg(long)]
        value: String,

        /// Change action
        #[arg(long, value_enum, ignore_case = true)]
        action: RecordAction,
    },
}

/// Default log directive for a `-v` count
pub fn log_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
