// src/config.rs
//! Command line configuration.

use clap::Parser;

use crate::collector::{Collector, DEFAULT_DEVICE_PREFIX, Tool};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "smartd-agent",
    version,
    about = "Serve smartctl data for every block device over HTTP"
)]
pub struct Args {
    /// Address the HTTP server listens on
    #[arg(long, default_value = "localhost:9090")]
    pub listen: String,

    /// Path of the lsblk binary
    #[arg(long, default_value = "lsblk")]
    pub lsblk: String,

    /// Path of the smartctl binary
    #[arg(long, default_value = "smartctl")]
    pub smartctl: String,

    /// Prefix joined with lsblk device names to form device paths
    #[arg(long, default_value = DEFAULT_DEVICE_PREFIX)]
    pub device_prefix: String,
}

impl Args {
    pub fn collector(&self) -> Collector {
        Collector::new(
            Tool::new(&self.lsblk),
            Tool::new(&self.smartctl),
            &self.device_prefix,
        )
    }
}
