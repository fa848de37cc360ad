// src/collector/smart_info.rs
//! Combines device discovery and per-device SMART queries into one report.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::collector::Collector;
use crate::collector::lsblk::list_block_devices;
use crate::collector::smartctl::{SmartctlOutput, query_device};
use crate::error::Result;

/// SMART report for one device path. Exactly one of `output` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartInfo {
    pub device: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<SmartctlOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SmartInfo {
    pub fn from_result(device: String, result: Result<SmartctlOutput>) -> Self {
        match result {
            Ok(output) => Self {
                device,
                output: Some(output),
                error: None,
            },
            Err(e) => Self {
                device,
                output: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Function to collect SMART data for every named top-level block device.
///
/// Devices are queried one after another. Only a failed enumeration fails the
/// whole call; a device whose query fails still gets an entry carrying the error.
pub async fn collect_smart_info(collector: &Collector) -> Result<Vec<SmartInfo>> {
    let devices = list_block_devices(&collector.lsblk).await?;
    debug!(count = devices.len(), "enumerated block devices");

    let mut results = Vec::with_capacity(devices.len());

    for device in devices.iter().filter(|d| !d.name.is_empty()) {
        let dev_path = collector.device_path(&device.name);
        let result = query_device(&collector.smartctl, &dev_path).await;

        if let Err(e) = &result {
            warn!(device = %dev_path, error = %e, "failed to read SMART data");
        }

        results.push(SmartInfo::from_result(dev_path, result));
    }

    Ok(results)
}
