use std::fs;
use std::path::Path;

use crate::config::{validate, Config};
use crate::error::{GatewayError, Result};

pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    let txt = fs::read_to_string(p)
        .map_err(|e| GatewayError::Config(format!("Failed to read config file: {e}")))?;
    let cfg: Config = toml::from_str(&txt)
        .map_err(|e| GatewayError::Config(format!("Failed to parse config: {e}")))?;

    validate(&cfg)?;

    Ok(cfg)
}
