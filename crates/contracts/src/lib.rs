//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Delivery Model
//! - Every outbound message is tagged `content_type = application/json`
//! - Every outbound message is marked persistent (delivery mode 2)
//! - One connection owns one channel; access is exclusive (`&mut self`)

mod blueprint;
mod broker;
mod command;
mod error;
mod topology;
mod transport;

pub use blueprint::DispatchBlueprint;
pub use broker::*;
pub use command::*;
pub use error::*;
pub use topology::*;
pub use transport::{CommandTransport, LocalCommandTransport};
