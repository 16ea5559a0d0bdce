//! # Custody Node
//!
//! Development host for the custody contract.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging (stderr, `NodeConfig::log_filter`)
//! 3. Report ignored overrides and validate configuration
//! 4. Create the in-memory ledger and run the contract's init hook
//! 5. Serve stdin lines until EOF or Ctrl+C

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use custody_lifecycle::{CONTRACT_NAME, VERSION};
use custody_node::config::{self, NodeConfig};
use custody_node::DevHost;

fn init_tracing(filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn serve(host: &DevHost) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                None
            }
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let response = host.execute_line(&line);
        let mut encoded = serde_json::to_vec(&response).context("failed to encode response")?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await?;
        stdout.flush().await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let (config, ignored) = NodeConfig::from_env();
    init_tracing(&config.log_filter)?;

    for entry in &ignored {
        warn!(
            variable = entry.variable,
            value = %entry.value,
            "Ignoring invalid environment override"
        );
    }
    config.validate()?;

    info!("===========================================");
    info!("  {CONTRACT_NAME} development node v{VERSION}");
    info!("===========================================");
    if !config.custody.enforce_org_identity {
        warn!("Organization identity is not enforced; role claims are trusted as given");
    }

    let host = DevHost::new(config.custody).context("contract init failed")?;
    serve(&host).await?;

    let stats = host.stats();
    info!(
        requests = stats.requests,
        committed = stats.committed,
        failed = stats.failed,
        "Node stopped"
    );
    Ok(())
}
