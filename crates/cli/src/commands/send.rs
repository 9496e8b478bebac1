//! `send` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use contracts::{CommandPayload, DispatchTarget};
use dispatch::{BrokerConnection, CommandDispatcher};
use observability::{record_command_published, record_publish_failure};

use crate::cli::{SendArgs, TargetArgs};
use crate::commands::load_blueprint;

/// Execute the `send` command
pub async fn run_send(args: &SendArgs) -> Result<()> {
    let blueprint = load_blueprint(&args.config, args.host.as_deref(), args.port)?;
    let target = dispatch_target(&args.target);
    let command = parse_payload(&args.payload, args.raw);

    info!(
        broker = %blueprint.broker.addr(),
        exchange = %blueprint.topology.command_exchange,
        target = ?target,
        "Dispatching command"
    );

    let connection = BrokerConnection::open(&blueprint.broker, &blueprint.topology)
        .await
        .with_context(|| format!("Failed to open broker connection to {}", blueprint.broker.addr()))?;

    let mut dispatcher = CommandDispatcher::new(connection, blueprint.topology.clone());
    let delivered = dispatcher.dispatch(&target, &command).await;

    if delivered {
        record_command_published(&target);
    } else {
        record_publish_failure(&blueprint.topology.command_exchange);
    }

    dispatcher.close().await;

    if delivered {
        println!("✓ Command dispatched");
        Ok(())
    } else {
        anyhow::bail!("Command dispatch failed (see log for exchange and routing key)")
    }
}

/// Map CLI target arguments onto a DispatchTarget
fn dispatch_target(target: &TargetArgs) -> DispatchTarget {
    match target {
        TargetArgs::Computer { room, computer } => DispatchTarget::Computer {
            computer_id: computer.clone(),
            room_id: room.clone(),
        },
        TargetArgs::Room { room } => DispatchTarget::Room {
            room_id: room.clone(),
        },
        TargetArgs::Queue { name } => DispatchTarget::NamedQueue {
            queue: name.clone(),
        },
    }
}

/// Interpret the payload argument
///
/// Valid JSON becomes a structured payload; anything else (or `--raw`) passes
/// through as text.
fn parse_payload(text: &str, raw: bool) -> CommandPayload {
    if raw {
        return CommandPayload::from(text);
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => CommandPayload::Structured(value),
        Err(_) => CommandPayload::from(text),
    }
}
