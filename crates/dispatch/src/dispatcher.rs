//! CommandDispatcher: resolves targets into publishes

use std::sync::Arc;

use tracing::{debug, error, instrument};

use contracts::{CommandPayload, CommandTransport, CoreError, DispatchTarget, Topology};

use crate::metrics::DispatchMetrics;

/// Orchestration layer between callers and the broker connection
///
/// Every send operation returns `true` iff the underlying publish succeeded.
/// This is the error boundary: broker faults are logged with exchange and
/// routing-key context and reported as `false`, never propagated to the
/// caller.
pub struct CommandDispatcher<T> {
    transport: T,
    topology: Topology,
    metrics: Arc<DispatchMetrics>,
}

impl<T: CommandTransport> CommandDispatcher<T> {
    /// Create a dispatcher over an opened transport
    pub fn new(transport: T, topology: Topology) -> Self {
        Self {
            transport,
            topology,
            metrics: Arc::new(DispatchMetrics::new()),
        }
    }

    /// Shared metrics handle
    pub fn metrics(&self) -> &Arc<DispatchMetrics> {
        &self.metrics
    }

    /// The topology this dispatcher routes with
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Send a command to a single computer in a room
    #[instrument(
        name = "send_to_computer",
        skip(self, command),
        fields(room = %room_id, computer = %computer_id)
    )]
    pub async fn send_to_computer(
        &mut self,
        computer_id: &str,
        room_id: &str,
        command: &CommandPayload,
    ) -> bool {
        let routing_key = self.topology.computer_key(room_id, computer_id);
        self.publish_command(&routing_key, command).await
    }

    /// Send a command to every computer in a room
    #[instrument(name = "send_to_room", skip(self, command), fields(room = %room_id))]
    pub async fn send_to_room(&mut self, room_id: &str, command: &CommandPayload) -> bool {
        let routing_key = self.topology.room_key(room_id);
        self.publish_command(&routing_key, command).await
    }

    /// Send a command to a named queue
    ///
    /// The queue is declared (durable, non-exclusive, non-auto-delete) before
    /// the publish; a declare failure suppresses the publish entirely. The
    /// publish then goes through the command exchange with the queue name as
    /// the routing key, so delivery relies on a binding for that key existing
    /// on the exchange.
    #[instrument(name = "send_to_queue", skip(self, command), fields(queue = %queue))]
    pub async fn send_to_queue(&mut self, queue: &str, command: &CommandPayload) -> bool {
        if let Err(e) = self.transport.declare_queue(queue).await {
            self.metrics.inc_declare_failure_count();
            error!(queue = %queue, error = %e, "Queue declare failed");
            return false;
        }
        self.publish_command(queue, command).await
    }

    /// Entry point for callers holding a `DispatchTarget`
    pub async fn dispatch(&mut self, target: &DispatchTarget, command: &CommandPayload) -> bool {
        match target {
            DispatchTarget::Computer {
                computer_id,
                room_id,
            } => self.send_to_computer(computer_id, room_id, command).await,
            DispatchTarget::Room { room_id } => self.send_to_room(room_id, command).await,
            DispatchTarget::NamedQueue { queue } => self.send_to_queue(queue, command).await,
        }
    }

    /// Close the underlying transport. Safe to call multiple times.
    pub async fn close(&mut self) {
        self.transport.close().await;
    }

    /// Core publish path: serialize, publish, report
    async fn publish_command(&mut self, routing_key: &str, command: &CommandPayload) -> bool {
        match self.try_publish(routing_key, command).await {
            Ok(()) => {
                self.metrics.inc_published_count();
                debug!(
                    exchange = %self.topology.command_exchange,
                    routing_key = %routing_key,
                    "Command published"
                );
                true
            }
            Err(e) => {
                self.metrics.inc_publish_failure_count();
                error!(
                    exchange = %self.topology.command_exchange,
                    routing_key = %routing_key,
                    error = %e,
                    "Failed to publish command"
                );
                false
            }
        }
    }

    async fn try_publish(
        &mut self,
        routing_key: &str,
        command: &CommandPayload,
    ) -> Result<(), CoreError> {
        let payload = command.to_bytes()?;
        self.transport
            .publish(&self.topology.command_exchange, routing_key, &payload)
            .await
    }
}
