//! `check` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use contracts::CommandTransport;
use dispatch::BrokerConnection;

use crate::cli::CheckArgs;
use crate::commands::load_blueprint;

/// Execute the `check` command
///
/// Opens a connection, which bootstraps the configured topology, then closes
/// it again. A zero exit means publishing would have a declared topology to
/// land on.
pub async fn run_check(args: &CheckArgs) -> Result<()> {
    let blueprint = load_blueprint(&args.config, args.host.as_deref(), args.port)?;

    info!(
        broker = %blueprint.broker.addr(),
        vhost = %blueprint.broker.vhost,
        "Checking broker connectivity"
    );

    let mut connection = BrokerConnection::open(&blueprint.broker, &blueprint.topology)
        .await
        .with_context(|| {
            format!(
                "Failed to open broker connection to {}",
                blueprint.broker.addr()
            )
        })?;

    connection.close().await;

    println!(
        "✓ Connected to {} and declared {} exchange(s)",
        blueprint.broker.addr(),
        blueprint.topology.exchanges.len()
    );
    Ok(())
}
