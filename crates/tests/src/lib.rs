//! # Integration Tests
//!
//! End-to-end tests for the dispatch core, run against an in-memory
//! transport (no broker required):
//! - config string -> blueprint -> topology bootstrap -> dispatch
//! - delivery invariants (content type, persistence marking) at the seam

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ExchangeKind::Topic;
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::{Arc, Mutex};

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{CommandPayload, CommandTransport, CoreError, ExchangeSpec};
    use dispatch::{bootstrap_topology, CommandDispatcher};
    use serde_json::json;

    const CONFIG: &str = r#"
[broker]
host = "localhost"
port = 5672

[topology]
command_exchange = "commands"
computer_routing_key = "cmd.{room}.{computer}"
room_broadcast_routing_key = "cmd.{room}.all"

[[topology.exchanges]]
name = "commands"
kind = "topic"
durable = true
"#;

    #[derive(Debug, Clone, PartialEq)]
    enum BrokerEvent {
        ExchangeDeclared {
            name: String,
            durable: bool,
        },
        QueueDeclared(String),
        Published {
            exchange: String,
            routing_key: String,
            payload: Vec<u8>,
        },
        Closed,
    }

    /// In-memory stand-in for a broker channel
    #[derive(Default)]
    struct FakeBroker {
        events: Arc<Mutex<Vec<BrokerEvent>>>,
        closed: bool,
    }

    impl CommandTransport for FakeBroker {
        async fn declare_exchange(&mut self, spec: &ExchangeSpec) -> Result<(), CoreError> {
            self.events
                .lock()
                .unwrap()
                .push(BrokerEvent::ExchangeDeclared {
                    name: spec.name.clone(),
                    durable: spec.durable,
                });
            Ok(())
        }

        async fn declare_queue(&mut self, name: &str) -> Result<(), CoreError> {
            self.events
                .lock()
                .unwrap()
                .push(BrokerEvent::QueueDeclared(name.to_string()));
            Ok(())
        }

        async fn publish(
            &mut self,
            exchange: &str,
            routing_key: &str,
            payload: &[u8],
        ) -> Result<(), CoreError> {
            self.events.lock().unwrap().push(BrokerEvent::Published {
                exchange: exchange.to_string(),
                routing_key: routing_key.to_string(),
                payload: payload.to_vec(),
            });
            Ok(())
        }

        async fn close(&mut self) {
            // Second close must not record another event
            if self.closed {
                return;
            }
            self.closed = true;
            self.events.lock().unwrap().push(BrokerEvent::Closed);
        }
    }

    /// End-to-end: config -> blueprint -> bootstrap -> dispatch
    ///
    /// Mirrors the reference scenario: topic exchange "commands", templates
    /// `cmd.{room}.{computer}` / `cmd.{room}.all`, one command to computer c9
    /// in room r1.
    #[tokio::test]
    async fn test_e2e_computer_dispatch() {
        let blueprint = ConfigLoader::load_from_str(CONFIG, ConfigFormat::Toml).unwrap();

        let mut broker = FakeBroker::default();
        let events = Arc::clone(&broker.events);

        // Startup: declare the configured exchanges exactly once
        bootstrap_topology(&mut broker, &blueprint.topology)
            .await
            .unwrap();

        let mut dispatcher = CommandDispatcher::new(broker, blueprint.topology.clone());
        assert!(
            dispatcher
                .send_to_computer("c9", "r1", &CommandPayload::from(json!({"op": "lock"})))
                .await
        );
        dispatcher.close().await;

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                BrokerEvent::ExchangeDeclared {
                    name: "commands".to_string(),
                    durable: true,
                },
                BrokerEvent::Published {
                    exchange: "commands".to_string(),
                    routing_key: "cmd.r1.c9".to_string(),
                    payload: serde_json::to_vec(&json!({"op": "lock"})).unwrap(),
                },
                BrokerEvent::Closed,
            ]
        );
    }

    #[tokio::test]
    async fn test_e2e_room_and_queue_dispatch() {
        let blueprint = ConfigLoader::load_from_str(CONFIG, ConfigFormat::Toml).unwrap();

        let broker = FakeBroker::default();
        let events = Arc::clone(&broker.events);

        let mut dispatcher = CommandDispatcher::new(broker, blueprint.topology.clone());
        assert!(
            dispatcher
                .send_to_room("r1", &CommandPayload::from(json!({"op": "reboot"})))
                .await
        );
        assert!(
            dispatcher
                .send_to_queue("maintenance", &CommandPayload::from("drain"))
                .await
        );

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                BrokerEvent::Published {
                    exchange: "commands".to_string(),
                    routing_key: "cmd.r1.all".to_string(),
                    payload: serde_json::to_vec(&json!({"op": "reboot"})).unwrap(),
                },
                BrokerEvent::QueueDeclared("maintenance".to_string()),
                BrokerEvent::Published {
                    exchange: "commands".to_string(),
                    routing_key: "maintenance".to_string(),
                    payload: b"drain".to_vec(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_e2e_close_is_idempotent() {
        let blueprint = ConfigLoader::load_from_str(CONFIG, ConfigFormat::Toml).unwrap();

        let broker = FakeBroker::default();
        let events = Arc::clone(&broker.events);

        let mut dispatcher = CommandDispatcher::new(broker, blueprint.topology.clone());
        dispatcher.close().await;
        dispatcher.close().await;

        assert_eq!(*events.lock().unwrap(), vec![BrokerEvent::Closed]);
    }
}
