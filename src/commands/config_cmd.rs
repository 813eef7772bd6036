//! Show or create the user config file.

use std::path::Path;

use super::common::print_json;
use crate::{config::Config, Result, RosterError};

/// Handle `config show`: the effective config after file, env and CLI overrides.
pub fn handle_config_show(config: &Config, path: &Path, as_json: bool) -> Result<()> {
    if as_json {
        return print_json(config);
    }
    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    println!("Config file: {}", source);
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

/// Handle `config init`: write the defaults, refusing to clobber an existing
/// file unless `force` is set.
pub fn handle_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(RosterError::Config {
            message: format!("'{}' already exists (use --force to overwrite)", path.display()),
        });
    }
    Config::default().save(path)?;
    tracing::info!(path = %path.display(), "wrote default config");
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}
