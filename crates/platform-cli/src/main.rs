//! platform-cli: provision and manage tagged EC2 instances, S3 buckets and
//! Route53 hosted zones.

use clap::Parser;
use platform_cli::aws::find_aws_error;
use platform_cli::cli::{Cli, log_directive};
use platform_cli::commands;
use platform_cli::error::exit_code_for;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::run(cli).await {
        print_error(&e);
        std::process::exit(exit_code_for(&e));
    }
}

/// SDK crates stay at warn regardless of `-v`
const SDK_LOG_DIRECTIVES: &str =
    "aws_config=warn,aws_smithy_runtime=warn,aws_sdk_ec2=warn,aws_sdk_s3=warn,aws_sdk_route53=warn";

/// Log to stderr so command output on stdout stays clean.
///
/// `RUST_LOG` replaces the `-v` level.
fn init_tracing(verbose: u8) {
    let base = std::env::var("RUST_LOG").unwrap_or_else(|_| log_directive(verbose).to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("{base},{SDK_LOG_DIRECTIVES}")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    // Print main error message
    let _ = writeln!(stderr, "\x1b[1;31mError:\x1b[0m {e}");

    // Print error chain (causes)
    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(hint) = find_aws_error(e).and_then(|err| err.suggestion()) {
        let _ = writeln!(stderr, "\n\x1b[2mHint:\x1b[0m {hint}");
    }

    if std::env::var("RUST_BACKTRACE").is_ok() {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}
