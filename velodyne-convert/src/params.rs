use crate::error::Result;
use crate::reconfigure::apply_update;
use std::fs;
use std::path::Path;
use velodyne_data::{ConfigUpdate, Configuration};

/// Parses a JSON parameter document. Missing parameters take their defaults.
pub fn parse_params(json: &str, num_lasers: usize) -> Result<Configuration> {
    let update = parse_update(json)?;
    let mut config = Configuration::new(num_lasers);
    apply_update(&mut config, &update, num_lasers);
    Ok(config)
}

pub fn load_params<P: AsRef<Path>>(path: P, num_lasers: usize) -> Result<Configuration> {
    let json = fs::read_to_string(path.as_ref())?;
    log::info!("Loading parameters from {}", path.as_ref().display());
    parse_params(&json, num_lasers)
}

/// Parses a partial parameter document for reconfiguration.
pub fn parse_update(json: &str) -> Result<ConfigUpdate> {
    Ok(serde_json::from_str(json)?)
}
