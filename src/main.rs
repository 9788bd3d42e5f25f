//! Cache Client - command runner
//!
//! Sends commands to a cache server and prints each output on stdout.
//!
//! ```text
//! cache_client GET visits          # one command from the arguments
//! printf 'GET a\nDEL a\n' | cache_client   # one command per stdin line
//! ```

use std::env;

use anyhow::{bail, Context};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_client::{CacheClient, ClientConfig};

/// Main entry point for the command runner.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Build the client
/// 4. Send the argument command, or each stdin line in turn
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    info!(
        "Configuration loaded: base_url={}, decode_mode={}, header_policy={}",
        config.base_url, config.decode_mode, config.header_policy
    );

    let client = CacheClient::new(config).context("Invalid cache client configuration")?;

    let args: Vec<String> = env::args().skip(1).collect();
    let mut failures = 0usize;

    if !args.is_empty() {
        if !run_line(&client, &args.join(" ")).await {
            failures += 1;
        }
    } else {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !run_line(&client, line).await {
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} command(s) failed", failures);
    }
    Ok(())
}

/// Sends one command and prints its output. Returns false on failure.
async fn run_line(client: &CacheClient, input: &str) -> bool {
    match client.send_input(input).await {
        Ok(output) => {
            println!("{}", output);
            true
        }
        Err(e) => {
            error!("Command '{}' failed: {}", input, e);
            false
        }
    }
}
