use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "cropsim")]
#[command(about = "Synthetic sensor fleet simulator for greenhouse telemetry collectors")]
#[command(version)]
pub struct Config {
    /// Collector base URL for /register and /update requests
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    pub collector_url: String,

    /// Seconds between rounds of readings
    #[arg(long, default_value_t = 2.0)]
    pub interval: f64,

    /// Number of simulated sensors; every third one is classified infected
    #[arg(long, default_value_t = 3)]
    pub sensors: usize,

    /// Seed the pseudo-random source for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// TOML fleet file declaring explicit nodes (overrides --sensors)
    #[arg(long)]
    pub fleet: Option<PathBuf>,

    /// Stop after this many rounds instead of running until interrupted
    #[arg(long)]
    pub rounds: Option<u64>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(self.interval > 0.0) {
            bail!("--interval must be a positive number of seconds");
        }
        if self.sensors == 0 && self.fleet.is_none() {
            bail!("--sensors must be at least 1 (or pass --fleet)");
        }
        Ok(())
    }
}
