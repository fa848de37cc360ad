// src/collector/smartctl.rs
//! SMART data collection via `smartctl --json -a`.
//!
//! One schema covers every device: the NVMe and ATA sections are optional and
//! only the one matching `device.protocol` is kept after parsing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collector::command::Tool;
use crate::error::Result;

/// smartctl exit status bit 0: command line did not parse.
const EXIT_BAD_COMMAND_LINE: i32 = 1 << 0;
/// smartctl exit status bit 1: device open failed or device did not answer IDENTIFY.
const EXIT_OPEN_FAILED: i32 = 1 << 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartctlOutput {
    pub json_format_version: Vec<u32>,
    pub smartctl: Smartctl,
    pub device: Device,

    pub model_name: String,
    pub serial_number: String,
    pub firmware_version: String,
    pub user_capacity: Capacity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_block_size: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_cycle_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_on_time: Option<PowerOnTime>,
    pub local_time: LocalTime,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_status: Option<SmartStatus>,

    // NVMe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvme_pci_vendor: Option<NvmePciVendor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvme_ieee_oui_identifier: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvme_total_capacity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvme_unallocated_capacity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvme_controller_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvme_version: Option<NvmeVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvme_namespaces: Option<Vec<NvmeNamespace>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvme_smart_health_information_log: Option<NvmeSmartHealthLog>,

    // ATA
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ata_smart_attributes: Option<AtaSmartAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ata_smart_status: Option<AtaSmartStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ata_error_count: Option<u64>,
}

/// Information smartctl reports about itself and the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Smartctl {
    pub version: Vec<u32>,
    pub svn_revision: String,
    pub platform_info: String,
    pub build_info: String,
    pub argv: Vec<String>,
    pub exit_status: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<SmartctlMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartctlMessage {
    pub string: String,
    pub severity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub name: String,
    pub info_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub protocol: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capacity {
    pub blocks: u64,
    pub bytes: u64,
}

/// Current temperature in degrees Celsius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Temperature {
    pub current: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerOnTime {
    pub hours: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalTime {
    pub time_t: i64,
    pub asctime: String,
}

/// Overall SMART self-assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartStatus {
    pub passed: bool,
    /// Raw NVMe critical warning byte backing the verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nvme: Option<SmartStatusNvme>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartStatusNvme {
    pub value: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NvmePciVendor {
    pub id: u64,
    pub subsystem_id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NvmeVersion {
    pub string: String,
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NvmeNamespace {
    pub id: u64,
    pub size: Capacity,
    pub capacity: Capacity,
    pub utilization: Capacity,
    pub formatted_lba_size: u64,
    pub eui64: Eui64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Eui64 {
    pub oui: u64,
    pub ext_id: u64,
}

/// NVMe SMART / Health Information log page (Log Identifier 02h) as decoded
/// by smartctl. Temperatures are in Celsius, data units are 1000 * 512 bytes.
///
/// The counters are 128-bit on the wire but held as `u64`; a device reporting
/// a value above `u64::MAX` fails to parse and is reported as a device error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NvmeSmartHealthLog {
    pub critical_warning: u64,
    pub temperature: i64,
    pub available_spare: u64,
    pub available_spare_threshold: u64,
    pub percentage_used: u64,
    pub data_units_read: u64,
    pub data_units_written: u64,
    pub host_reads: u64,
    pub host_writes: u64,
    pub controller_busy_time: u64,
    pub power_cycles: u64,
    pub power_on_hours: u64,
    pub unsafe_shutdowns: u64,
    pub media_errors: u64,
    pub num_err_log_entries: u64,
    pub warning_temp_time: u64,
    pub critical_comp_time: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub temperature_sensors: Vec<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtaSmartStatus {
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtaSmartAttributes {
    pub revision: u64,
    pub table: Vec<AtaSmartAttribute>,
}

/// One row of the ATA attribute table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtaSmartAttribute {
    pub id: u64,
    pub name: String,
    pub value: u64,
    pub worst: u64,
    pub thresh: u64,
    pub when_failed: String,
    pub flags: AtaAttributeFlags,
    pub raw: AtaRawValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtaAttributeFlags {
    pub value: u64,
    pub string: String,
    pub prefailure: bool,
    pub updated_online: bool,
    pub performance: bool,
    pub error_rate: bool,
    pub event_count: bool,
    pub auto_keep: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtaRawValue {
    pub value: u64,
    pub string: String,
}

/// Transport protocol as reported in `device.protocol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Ata,
    Nvme,
    Scsi,
    Unknown,
}

impl Protocol {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "ata" => Protocol::Ata,
            "nvme" => Protocol::Nvme,
            "scsi" => Protocol::Scsi,
            _ => Protocol::Unknown,
        }
    }
}

impl SmartctlOutput {
    pub fn protocol(&self) -> Protocol {
        Protocol::from_name(&self.device.protocol)
    }

    /// Drops whichever protocol section does not belong to this device.
    /// Records with an unrecognised protocol are left as reported.
    pub fn retain_protocol_fields(&mut self) {
        match self.protocol() {
            Protocol::Ata => self.clear_nvme(),
            Protocol::Nvme => self.clear_ata(),
            Protocol::Scsi => {
                self.clear_nvme();
                self.clear_ata();
            }
            Protocol::Unknown => {}
        }
    }

    fn clear_nvme(&mut self) {
        self.nvme_pci_vendor = None;
        self.nvme_ieee_oui_identifier = None;
        self.nvme_total_capacity = None;
        self.nvme_unallocated_capacity = None;
        self.nvme_controller_id = None;
        self.nvme_version = None;
        self.nvme_namespaces = None;
        self.nvme_smart_health_information_log = None;
        if let Some(status) = self.smart_status.as_mut() {
            status.nvme = None;
        }
    }

    fn clear_ata(&mut self) {
        self.ata_smart_attributes = None;
        self.ata_smart_status = None;
        self.ata_error_count = None;
    }

    /// Joined text of smartctl's own error messages, if any.
    pub fn error_messages(&self) -> Option<String> {
        let errors: Vec<&str> = self
            .smartctl
            .messages
            .iter()
            .filter(|m| m.severity.eq_ignore_ascii_case("error"))
            .map(|m| m.string.as_str())
            .collect();

        if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        }
    }
}

/// Function to read the SMART record of a single device path.
pub async fn query_device(smartctl: &Tool, device: &str) -> Result<SmartctlOutput> {
    let output = smartctl.run(&["--json", "-a", device]).await?;
    let mut record: SmartctlOutput = output.parse()?;

    // smartctl still prints JSON when it could not talk to the device; such a
    // record is all zeroes and must not pass for a healthy disk.
    let code = output.status.code().unwrap_or(record.smartctl.exit_status);
    if code & (EXIT_BAD_COMMAND_LINE | EXIT_OPEN_FAILED) != 0 {
        let message = record
            .error_messages()
            .unwrap_or_else(|| format!("no SMART data returned for {device}"));
        return Err(output.exit_error(message));
    }
    if code != 0 {
        debug!(device, code, "smartctl reported health findings");
    }

    record.retain_protocol_fields();
    Ok(record)
}
