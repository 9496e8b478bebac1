//! Command implementations.

mod check;
mod info;
mod send;
mod validate;

pub use check::run_check;
pub use info::run_info;
pub use send::run_send;
pub use validate::run_validate;

use std::path::Path;

use anyhow::{Context, Result};

use config_loader::{ConfigLoader, DispatchBlueprint};

/// Load a blueprint and apply broker overrides from the command line
pub(crate) fn load_blueprint(
    path: &Path,
    host: Option<&str>,
    port: Option<u16>,
) -> Result<DispatchBlueprint> {
    let mut blueprint = ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    if let Some(host) = host {
        blueprint.broker.host = host.to_string();
    }
    if let Some(port) = port {
        blueprint.broker.port = port;
    }

    Ok(blueprint)
}
