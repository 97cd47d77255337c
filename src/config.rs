//! Process configuration.
//!
//! Every port, file path, and tunable the service graph needs has a
//! literal default here. An operator may override any subset of them by
//! pointing the process at a TOML file; anything the file omits falls back to
//! the default, so the process runs identically whether or not a config file
//! is present.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InboundPorts {
    pub prices: u16,
    pub trades: u16,
    pub market_data: u16,
    pub inquiries: u16,
}

impl Default for InboundPorts {
    fn default() -> Self {
        Self {
            prices: 8080,
            trades: 8081,
            market_data: 8082,
            inquiries: 8083,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutboundPorts {
    pub streaming: u16,
    pub executions: u16,
}

impl Default for OutboundPorts {
    fn default() -> Self {
        Self {
            streaming: 9000,
            executions: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub throttle_interval_ms: u64,
    pub cadence_advance_ms: u64,
    pub max_updates: u32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            throttle_interval_ms: 30,
            cadence_advance_ms: 300,
            max_updates: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveFiles {
    pub positions: PathBuf,
    pub risk: PathBuf,
    pub executions: PathBuf,
    pub streaming: PathBuf,
    pub inquiries: PathBuf,
}

impl Default for ArchiveFiles {
    fn default() -> Self {
        Self {
            positions: PathBuf::from("positions.txt"),
            risk: PathBuf::from("risk.txt"),
            executions: PathBuf::from("executions.txt"),
            streaming: PathBuf::from("streaming.txt"),
            inquiries: PathBuf::from("all_inquiries.txt"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SectorConfig {
    pub front_end: Vec<String>,
    pub belly: Vec<String>,
    pub long_end: Vec<String>,
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            front_end: vec!["91282CLY5".into(), "91282CMB4".into()],
            belly: vec![
                "91282CMA6".into(),
                "91282CLZ2".into(),
                "91282CLW9".into(),
            ],
            long_end: vec!["912810UF3".into(), "912810UE6".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inbound_ports: InboundPorts,
    pub outbound_ports: OutboundPorts,
    pub gui: GuiConfig,
    pub archives: ArchiveFiles,
    pub sectors: SectorConfig,
    pub reference_csv: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inbound_ports: InboundPorts::default(),
            outbound_ports: OutboundPorts::default(),
            gui: GuiConfig::default(),
            archives: ArchiveFiles::default(),
            sectors: SectorConfig::default(),
            reference_csv: PathBuf::from("TBonds.csv"),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, falling back to defaults for any
    /// field the file does not set. A missing file is not an error — it just
    /// means "use the built-in defaults".
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(toml::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }
}
