//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;

use config_loader::DispatchBlueprint;

use crate::cli::InfoArgs;
use crate::commands::load_blueprint;

/// Topology information for display
#[derive(Serialize)]
struct TopologyInfo {
    broker: String,
    vhost: String,
    command_exchange: String,
    computer_routing_key: String,
    room_broadcast_routing_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exchanges: Option<Vec<ExchangeInfo>>,
}

#[derive(Serialize)]
struct ExchangeInfo {
    name: String,
    kind: String,
    durable: bool,
    auto_delete: bool,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let blueprint = load_blueprint(&args.config, None, None)?;
    let info = topology_info(&blueprint, args.exchanges);

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize topology info")?;
        println!("{}", json);
    } else {
        print_info(&info);
    }

    Ok(())
}

fn topology_info(blueprint: &DispatchBlueprint, with_exchanges: bool) -> TopologyInfo {
    let exchanges = with_exchanges.then(|| {
        blueprint
            .topology
            .exchanges
            .iter()
            .map(|e| ExchangeInfo {
                name: e.name.clone(),
                kind: format!("{:?}", e.kind).to_lowercase(),
                durable: e.durable,
                auto_delete: e.auto_delete,
            })
            .collect()
    });

    TopologyInfo {
        broker: blueprint.broker.addr(),
        vhost: blueprint.broker.vhost.clone(),
        command_exchange: blueprint.topology.command_exchange.clone(),
        computer_routing_key: blueprint
            .topology
            .computer_routing_key
            .as_str()
            .to_string(),
        room_broadcast_routing_key: blueprint
            .topology
            .room_broadcast_routing_key
            .as_str()
            .to_string(),
        exchanges,
    }
}

fn print_info(info: &TopologyInfo) {
    println!("Broker: {} (vhost {})", info.broker, info.vhost);
    println!("Command exchange: {}", info.command_exchange);
    println!("Computer routing key: {}", info.computer_routing_key);
    println!("Room broadcast key: {}", info.room_broadcast_routing_key);

    if let Some(ref exchanges) = info.exchanges {
        println!("\nExchanges:");
        for exchange in exchanges {
            println!(
                "  {} ({}, durable={}, auto_delete={})",
                exchange.name, exchange.kind, exchange.durable, exchange.auto_delete
            );
        }
    }
}
