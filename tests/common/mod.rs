// tests/common/mod.rs
//! Fake lsblk/smartctl tools built from `sh -c` scripts.
#![allow(dead_code)]

use smartd_agent::collector::{Collector, Tool};

/// Minimal ATA record as printed by `smartctl --json -a /dev/sda`.
pub const ATA_SDA: &str = r#"{"json_format_version":[1,0],"smartctl":{"version":[7,3],"exit_status":0},"device":{"name":"/dev/sda","info_name":"/dev/sda [SAT]","type":"sat","protocol":"ATA"},"model_name":"WDC WD40EFRX-68N32N0","serial_number":"WD-WCC7K1234567","firmware_version":"82.00A82","user_capacity":{"blocks":7814037168,"bytes":4000787030016},"smart_status":{"passed":true},"ata_smart_status":{"passed":true},"ata_smart_attributes":{"revision":16,"table":[{"id":5,"name":"Reallocated_Sector_Ct","value":200,"worst":200,"thresh":140,"when_failed":"","flags":{"value":51,"string":"PO--CK ","prefailure":true,"updated_online":true,"performance":false,"error_rate":false,"event_count":true,"auto_keep":true},"raw":{"value":0,"string":"0"}}]},"power_on_time":{"hours":30211},"power_cycle_count":97,"temperature":{"current":34}}"#;

/// Minimal NVMe record for `/dev/nvme0n1`.
pub const NVME_NVME0N1: &str = r#"{"json_format_version":[1,0],"smartctl":{"version":[7,3],"exit_status":0},"device":{"name":"/dev/nvme0n1","info_name":"/dev/nvme0n1","type":"nvme","protocol":"NVMe"},"model_name":"Samsung SSD 970 EVO Plus 1TB","serial_number":"S4EWNX0R123456","firmware_version":"2B2QEXM7","nvme_pci_vendor":{"id":5197,"subsystem_id":5197},"nvme_total_capacity":1000204886016,"nvme_namespaces":[{"id":1,"size":{"blocks":1953525168,"bytes":1000204886016},"capacity":{"blocks":1953525168,"bytes":1000204886016},"utilization":{"blocks":412345678,"bytes":211120987136},"formatted_lba_size":512,"eui64":{"oui":9528,"ext_id":123456789}}],"smart_status":{"passed":true,"nvme":{"value":0}},"nvme_smart_health_information_log":{"critical_warning":0,"temperature":41,"available_spare":100,"available_spare_threshold":10,"percentage_used":3,"data_units_read":41234567,"data_units_written":35123456,"host_reads":512345678,"host_writes":498765432,"controller_busy_time":1234,"power_cycles":321,"power_on_hours":8760,"unsafe_shutdowns":17,"media_errors":0,"num_err_log_entries":2,"warning_temp_time":0,"critical_comp_time":0,"temperature_sensors":[41,49]},"temperature":{"current":41},"power_on_time":{"hours":8760},"power_cycle_count":321}"#;

/// smartctl output when the device could not be opened.
pub const OPEN_FAILED: &str = r#"{"json_format_version":[1,0],"smartctl":{"version":[7,3],"exit_status":2,"messages":[{"string":"Smartctl open device: /dev/sdz failed: No such device","severity":"error"}]},"device":{"name":"/dev/sdz","info_name":"/dev/sdz","type":"ata","protocol":"ATA"}}"#;

/// Tool running `script` under `sh -c`, with call arguments available as `$1..`.
pub fn script_tool(name: &str, script: &str) -> Tool {
    Tool::with_args("sh", ["-c".to_string(), script.to_string(), name.to_string()])
}

/// Shell snippet printing `json` on stdout.
pub fn print_json(json: &str) -> String {
    format!("printf '%s\\n' '{json}'")
}

/// Fake lsblk that always prints `json`.
pub fn fake_lsblk(json: &str) -> Tool {
    script_tool("lsblk", &print_json(json))
}

/// Fake smartctl dispatching on the device path (`$3` in `--json -a <dev>`).
/// Unknown paths behave like a missing device: stderr message and exit 2.
pub fn fake_smartctl(cases: &[(&str, String)]) -> Tool {
    let mut script = String::from("case \"$3\" in\n");
    for (device, body) in cases {
        script.push_str(&format!("  {device}) {body} ;;\n"));
    }
    script.push_str("  *) echo \"no such device: $3\" >&2; exit 2 ;;\nesac\n");
    script_tool("smartctl", &script)
}

pub fn collector(lsblk: Tool, smartctl: Tool) -> Collector {
    Collector::new(lsblk, smartctl, "/dev/")
}
