//! Port configuration and the configured-port topology.

use crate::error::{DutError, DutResult};
use saitest_types::PortOid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Port speed in Mbps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortSpeed(u32);

impl PortSpeed {
    /// 1 Gigabit Ethernet
    pub const GE_1: Self = PortSpeed(1_000);
    /// 10 Gigabit Ethernet
    pub const GE_10: Self = PortSpeed(10_000);
    /// 25 Gigabit Ethernet
    pub const GE_25: Self = PortSpeed(25_000);
    /// 40 Gigabit Ethernet
    pub const GE_40: Self = PortSpeed(40_000);
    /// 100 Gigabit Ethernet
    pub const GE_100: Self = PortSpeed(100_000);
    /// 400 Gigabit Ethernet
    pub const GE_400: Self = PortSpeed(400_000);

    /// Creates a port speed from Mbps.
    pub const fn from_mbps(mbps: u32) -> Self {
        PortSpeed(mbps)
    }

    /// Returns the speed in Mbps.
    pub const fn as_mbps(&self) -> u32 {
        self.0
    }
}

/// Forward Error Correction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FecMode {
    /// No FEC
    #[default]
    None,
    /// Reed-Solomon FEC
    Rs,
    /// Fire Code FEC
    Fc,
    /// Auto-negotiate FEC
    Auto,
}

/// Configuration one front-panel port is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    /// Port name, e.g. "Ethernet0".
    pub name: String,
    /// Hardware lane list.
    pub lanes: Vec<u32>,
    /// Port speed.
    pub speed: PortSpeed,
    /// Local device-port index.
    pub index: u32,
    /// FEC mode, if explicitly configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fec: Option<FecMode>,
    /// MTU, if explicitly configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
}

/// Error type for port-config init file handling.
#[derive(Debug, Error)]
pub enum PortConfigError {
    #[error("failed to read port config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse port config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("port {port} has an empty lane list")]
    EmptyLanes { port: String },

    #[error("port {port} has zero speed")]
    ZeroSpeed { port: String },

    #[error("duplicate device-port index {index} (ports {first} and {second})")]
    DuplicateIndex {
        index: u32,
        first: String,
        second: String,
    },
}

#[derive(Deserialize)]
struct PortInitFile {
    #[serde(rename = "PORT")]
    ports: BTreeMap<String, PortInitEntry>,
}

#[derive(Deserialize)]
struct PortInitEntry {
    lanes: Vec<u32>,
    speed: PortSpeed,
    index: u32,
    #[serde(default)]
    fec: Option<FecMode>,
    #[serde(default)]
    mtu: Option<u32>,
}

/// The set of port configurations the device boots with, ordered by
/// device-port index.
///
/// Loaded from a JSON init file shaped like the `PORT` table:
///
/// ```json
/// {
///   "PORT": {
///     "Ethernet0": { "lanes": [0, 1, 2, 3], "speed": 100000, "index": 0 },
///     "Ethernet4": { "lanes": [4, 5, 6, 7], "speed": 100000, "index": 1 }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PortConfigSet {
    configs: Vec<PortConfig>,
}

impl PortConfigSet {
    /// Builds a config set from already-constructed entries.
    ///
    /// Entries are reordered by device-port index.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty lane list, a zero speed, or a
    /// duplicated device-port index.
    pub fn from_configs(mut configs: Vec<PortConfig>) -> Result<Self, PortConfigError> {
        configs.sort_by_key(|c| c.index);

        for config in &configs {
            if config.lanes.is_empty() {
                return Err(PortConfigError::EmptyLanes {
                    port: config.name.clone(),
                });
            }
            if config.speed.as_mbps() == 0 {
                return Err(PortConfigError::ZeroSpeed {
                    port: config.name.clone(),
                });
            }
        }

        for pair in configs.windows(2) {
            if pair[0].index == pair[1].index {
                return Err(PortConfigError::DuplicateIndex {
                    index: pair[0].index,
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                });
            }
        }

        Ok(Self { configs })
    }

    /// Parses a config set from init-file JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, PortConfigError> {
        let file: PortInitFile = serde_json::from_str(json)?;
        Self::from_init_file(file)
    }

    /// Loads a config set from an init file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PortConfigError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let file: PortInitFile = serde_json::from_reader(reader)?;
        let set = Self::from_init_file(file)?;
        info!("Loaded {} port configs from {}", set.len(), path.display());
        Ok(set)
    }

    fn from_init_file(file: PortInitFile) -> Result<Self, PortConfigError> {
        let configs = file
            .ports
            .into_iter()
            .map(|(name, entry)| PortConfig {
                name,
                lanes: entry.lanes,
                speed: entry.speed,
                index: entry.index,
                fec: entry.fec,
                mtu: entry.mtu,
            })
            .collect();
        Self::from_configs(configs)
    }

    /// Number of configured ports.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns true if no ports are configured.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// The configs, ordered by device-port index.
    pub fn configs(&self) -> &[PortConfig] {
        &self.configs
    }

    /// Looks up a config by port name.
    pub fn get(&self, name: &str) -> Option<&PortConfig> {
        self.configs.iter().find(|c| c.name == name)
    }

    /// Looks up a config by device-port index.
    pub fn by_index(&self, index: u32) -> Option<&PortConfig> {
        self.configs.iter().find(|c| c.index == index)
    }
}

/// A port created on the switch, paired with the config it was created
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    oid: PortOid,
    config: PortConfig,
}

impl Port {
    pub fn new(oid: PortOid, config: PortConfig) -> Self {
        Self { oid, config }
    }

    /// The port object id on the switch.
    pub fn oid(&self) -> PortOid {
        self.oid
    }

    /// The config the port was created with.
    pub fn config(&self) -> &PortConfig {
        &self.config
    }

    /// The port name.
    pub fn name(&self) -> &str {
        &self.config.name
    }
}

/// The configured port topology: device-port indices and port objects,
/// positionally aligned.
///
/// `dev_ports()[i]` is the local device-port number backing
/// `ports()[i]`. The two lists can only be installed together, so the
/// alignment cannot drift after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortState {
    dev_ports: Vec<u32>,
    ports: Vec<Port>,
}

impl PortState {
    /// Builds the topology from the two aligned lists.
    ///
    /// # Errors
    ///
    /// Returns [`DutError::PortListLengthMismatch`] if the lists differ
    /// in length; nothing is stored in that case.
    pub fn new(dev_ports: Vec<u32>, ports: Vec<Port>) -> DutResult<Self> {
        if dev_ports.len() != ports.len() {
            return Err(DutError::PortListLengthMismatch {
                dev_ports: dev_ports.len(),
                ports: ports.len(),
            });
        }
        Ok(Self { dev_ports, ports })
    }

    /// Local device-port indices.
    pub fn dev_ports(&self) -> &[u32] {
        &self.dev_ports
    }

    /// Port objects, aligned with [`Self::dev_ports`].
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Number of ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Returns true if the topology has no ports.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Returns true if the topology contains the port handle.
    pub fn contains(&self, oid: PortOid) -> bool {
        self.ports.iter().any(|p| p.oid() == oid)
    }

    /// The device-port index and port at position `i`.
    pub fn get(&self, i: usize) -> Option<(u32, &Port)> {
        Some((*self.dev_ports.get(i)?, self.ports.get(i)?))
    }
}
