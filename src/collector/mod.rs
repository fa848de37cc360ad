// src/collector/mod.rs

pub mod command;
pub mod lsblk;
pub mod smart_info;
pub mod smartctl;

pub use command::{Tool, ToolOutput};
pub use lsblk::{BlockDevice, LsblkOutput, list_block_devices};
pub use smart_info::{SmartInfo, collect_smart_info};
pub use smartctl::{Protocol, SmartctlOutput, query_device};

pub const DEFAULT_DEVICE_PREFIX: &str = "/dev/";

/// The external tools a collection run shells out to.
#[derive(Debug, Clone)]
pub struct Collector {
    pub lsblk: Tool,
    pub smartctl: Tool,
    /// Prepended to lsblk device names to build the path passed to smartctl.
    pub device_prefix: String,
}

impl Collector {
    pub fn new(lsblk: Tool, smartctl: Tool, device_prefix: impl Into<String>) -> Self {
        Self {
            lsblk,
            smartctl,
            device_prefix: device_prefix.into(),
        }
    }

    pub fn device_path(&self, name: &str) -> String {
        format!("{}{}", self.device_prefix, name)
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(
            Tool::new("lsblk"),
            Tool::new("smartctl"),
            DEFAULT_DEVICE_PREFIX,
        )
    }
}
