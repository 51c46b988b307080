//! Configuration system for the hart model.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (memory map, debug entry, bus latency).
//! 2. **Structures:** Hierarchical config for general, core, and system settings.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field is optional in JSON; `Config::default()` reproduces the reference
//! hardware build.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Base address of the on-chip RAM window.
    pub const RAM_BASE: u32 = constants::RAM_BASE;

    /// Size of the on-chip RAM window (16 KiB).
    pub const RAM_SIZE: u32 = constants::RAM_SIZE;

    /// Reset vector.
    pub const RESET_PC: u32 = constants::RESET_PC;

    /// Debug-mode entry address.
    pub const DEBUG_ENTRY: u32 = constants::DEBUG_ENTRY_POINT;

    /// Test-harness completion address.
    pub const TOHOST: u32 = constants::TOHOST_ADDR;

    /// Number of independent harts on the shared bus.
    pub const HARTS: usize = 1;

    /// Cycles between a request and its response on the bus.
    ///
    /// Zero means the response arrives on the step after the request.
    pub const BUS_LATENCY: u32 = 0;

    /// Cycle limit for a run.
    pub const MAX_CYCLES: u64 = 10_000_000;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rvdbg_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true },
///     "core": { "debug_entry": 512 },
///     "system": { "harts": 2, "bus_latency": 3 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.core.debug_entry, 0x200);
/// assert_eq!(config.core.ram_base, 0x0001_0000);
/// assert_eq!(config.system.harts, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Per-hart memory map and debug parameters
    #[serde(default)]
    pub core: CoreConfig,
    /// Bus and hart-count parameters
    #[serde(default)]
    pub system: SystemConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON document; missing sections and fields take their defaults.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or `SimError::Config` on malformed input.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace!` event for every retired instruction
    #[serde(default)]
    pub trace_instructions: bool,

    /// Stop the run after this many cycles
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Per-hart parameters.
///
/// Every hart shares these; only `mhartid` differs and is assigned by the
/// simulator from the hart's index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoreConfig {
    /// Initial PC after reset
    #[serde(default = "CoreConfig::default_reset_pc")]
    pub reset_pc: u32,

    /// Address every debug-mode entry jumps to (0x600, or 0x200 on older builds)
    #[serde(default = "CoreConfig::default_debug_entry")]
    pub debug_entry: u32,

    /// First byte of the RAM window instructions may be fetched from
    #[serde(default = "CoreConfig::default_ram_base")]
    pub ram_base: u32,

    /// Size of the RAM window in bytes
    #[serde(default = "CoreConfig::default_ram_size")]
    pub ram_size: u32,

    /// Completion sentinel address
    #[serde(default = "CoreConfig::default_tohost")]
    pub tohost: u32,
}

impl CoreConfig {
    fn default_reset_pc() -> u32 {
        defaults::RESET_PC
    }

    fn default_debug_entry() -> u32 {
        defaults::DEBUG_ENTRY
    }

    fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    fn default_ram_size() -> u32 {
        defaults::RAM_SIZE
    }

    fn default_tohost() -> u32 {
        defaults::TOHOST
    }

    /// Returns true if `addr` lies inside the RAM window.
    pub const fn in_ram(&self, addr: u32) -> bool {
        addr >= self.ram_base && addr - self.ram_base < self.ram_size
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            reset_pc: defaults::RESET_PC,
            debug_entry: defaults::DEBUG_ENTRY,
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            tohost: defaults::TOHOST,
        }
    }
}

/// Bus and hart-count parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemConfig {
    /// Number of harts sharing the bus
    #[serde(default = "SystemConfig::default_harts")]
    pub harts: usize,

    /// Extra cycles before the bus answers a request
    #[serde(default = "SystemConfig::default_bus_latency")]
    pub bus_latency: u32,
}

impl SystemConfig {
    fn default_harts() -> usize {
        defaults::HARTS
    }

    fn default_bus_latency() -> u32 {
        defaults::BUS_LATENCY
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            harts: defaults::HARTS,
            bus_latency: defaults::BUS_LATENCY,
        }
    }
}
