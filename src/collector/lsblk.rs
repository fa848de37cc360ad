// src/collector/lsblk.rs
//! Block device discovery via `lsblk --json`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::collector::command::Tool;
use crate::error::Result;

/// One entry of the lsblk device tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockDevice {
    pub name: String,
    pub kname: String,
    #[serde(rename = "maj:min")]
    pub maj_min: String,
    /// Removable flag
    #[serde(deserialize_with = "de_flag")]
    pub rm: bool,
    pub size: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub mountpoint: Option<String>,
    /// Partitions and holders stacked on top of this device
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockDevice>,
}

/// Top-level document printed by `lsblk --json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LsblkOutput {
    #[serde(default)]
    pub blockdevices: Vec<BlockDevice>,
}

/// lsblk before util-linux 2.33 printed flags as "0"/"1" strings.
fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u64),
        Str(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(b)) => Ok(b),
        Some(Flag::Int(n)) => Ok(n != 0),
        // Anything that is not a nonzero integer reads as not removable.
        Some(Flag::Str(s)) => Ok(s.trim().parse::<u64>().is_ok_and(|n| n != 0)),
    }
}

/// Function to list the top-level block devices reported by lsblk.
pub async fn list_block_devices(lsblk: &Tool) -> Result<Vec<BlockDevice>> {
    let output = lsblk.run(&["--json"]).await?;
    let parsed: LsblkOutput = output.parse()?;
    Ok(parsed.blockdevices)
}
