//! Topology description: exchanges and routing-key templates
//!
//! Pure data, no I/O. Consumed by the broker connection (bootstrap) and the
//! dispatcher (routing-key rendering).

use serde::{Deserialize, Serialize};

/// Exchange type on the broker side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeKind {
    Direct,
    #[default]
    Topic,
    Fanout,
    Headers,
}

/// Declarative exchange definition
///
/// Declared once at startup; identity is `name`. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSpec {
    /// Exchange name
    pub name: String,

    /// Exchange type
    #[serde(default)]
    pub kind: ExchangeKind,

    /// Definition survives a broker restart
    #[serde(default = "default_durable")]
    pub durable: bool,

    /// Exchange is deleted once the last binding is removed
    #[serde(default)]
    pub auto_delete: bool,
}

fn default_durable() -> bool {
    true
}

/// Routing-key template holding `{room}` / `{computer}` placeholder tokens
///
/// Substitution is literal token replacement: no escaping, and no validation
/// that the produced key is well-formed for the target exchange type. Template
/// correctness is the topology owner's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutingTemplate(String);

impl RoutingTemplate {
    /// Create a template from a raw string
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The raw template string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Replace every `{token}` occurrence with its value, in order
    pub fn fill(&self, vars: &[(&str, &str)]) -> String {
        vars.iter().fold(self.0.clone(), |key, (token, value)| {
            key.replace(&format!("{{{token}}}"), value)
        })
    }

    /// Whether the template contains a `{token}` placeholder
    pub fn has_token(&self, token: &str) -> bool {
        self.0.contains(&format!("{{{token}}}"))
    }
}

impl From<&str> for RoutingTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

/// Complete broker-side topology for command dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Exchanges to declare at startup
    pub exchanges: Vec<ExchangeSpec>,

    /// Exchange all command publishes go through
    pub command_exchange: String,

    /// Per-computer command template (`{room}`, `{computer}`)
    pub computer_routing_key: RoutingTemplate,

    /// Room broadcast template (`{room}`)
    pub room_broadcast_routing_key: RoutingTemplate,
}

impl Topology {
    /// Routing key addressing a single computer in a room
    pub fn computer_key(&self, room_id: &str, computer_id: &str) -> String {
        self.computer_routing_key
            .fill(&[("room", room_id), ("computer", computer_id)])
    }

    /// Routing key addressing every computer in a room
    pub fn room_key(&self, room_id: &str) -> String {
        self.room_broadcast_routing_key.fill(&[("room", room_id)])
    }
}
