use std::sync::Arc;

use clap::Args;
use gapshield_core::{CaptureSuppressionDetector, Config};

use super::{parse_timestamp, require_child_id};

#[derive(Args)]
pub struct CheckArgs {
    /// Child identifier
    #[arg(long)]
    child: String,
    /// URL currently on screen
    #[arg(long)]
    url: String,
    /// Capture instant, RFC 3339 (default: now)
    #[arg(long)]
    at: Option<String>,
}

/// Prints exactly `{"suppress":<bool>}` and nothing else.
pub fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let child = require_child_id(&args.child)?;
    let timestamp = parse_timestamp(args.at.as_deref())?;

    let config = Config::load()?;
    let detector = CaptureSuppressionDetector::in_memory(
        config.crisis_allowlist(),
        Arc::new(config.privacy_gap_config()?),
    );

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let result = runtime.block_on(detector.should_suppress_capture(child, timestamp, &args.url));

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
