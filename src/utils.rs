use crate::bridge::proof_builder::{RawBlock, RelayParams};
use anyhow::{Error, Result};
use howlong::ProcessDuration;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing_subscriber::EnvFilter;

pub fn init_tracing_subscriber(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(Error::msg)
}

pub fn load_raw_block_from_file(path: &Path) -> Result<RawBlock> {
    let data = fs::read_to_string(path)?;
    let block: RawBlock = serde_json::from_str(&data)?;
    Ok(block)
}

pub fn load_relay_params_from_file(path: &Path) -> Result<RelayParams> {
    let data = fs::read_to_string(path)?;
    let params: RelayParams = serde_json::from_str(&data)?;
    Ok(params)
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Time {
    real: u64,
    user: u64,
    sys: u64,
}

impl From<ProcessDuration> for Time {
    fn from(p_duration: ProcessDuration) -> Self {
        Self {
            real: p_duration.real.as_micros() as u64,
            user: p_duration.user.as_micros() as u64,
            sys: p_duration.system.as_micros() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{proof_builder::build_relay_params, tests::sample_block};

    #[test]
    fn test_load_raw_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("block.json");
        let block = sample_block(2);
        fs::write(&path, serde_json::to_string_pretty(&block).unwrap()).unwrap();
        assert_eq!(load_raw_block_from_file(&path).unwrap(), block);
    }

    #[test]
    fn test_load_relay_params() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        let params = build_relay_params(&sample_block(3), 1).unwrap();
        fs::write(&path, serde_json::to_string_pretty(&params).unwrap()).unwrap();
        assert_eq!(load_relay_params_from_file(&path).unwrap(), params);
    }
}
