//! System-on-Chip construction and top-level `System` type.
//!
//! This module builds the shared bus from configuration. It registers:
//! 1. **RAM:** The instruction/data window at `core.ram_base`.
//! 2. **Debug ROM:** The park loop and program buffer at `core.debug_entry`.
//! 3. **HTIF:** The `tohost` sink, when the address is not already claimed.

use tracing::{debug, warn};

use crate::config::Config;
use crate::soc::devices::{DebugRom, Htif};
use crate::soc::interconnect::Bus;
use crate::soc::memory::Memory;

/// Top-level system instance: the bus every hart shares.
#[derive(Debug)]
pub struct System {
    /// System interconnect; routes accesses to RAM and devices.
    pub bus: Bus,
}

impl System {
    /// Builds a new system from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration.
    ///
    /// # Returns
    ///
    /// A fully constructed `System` with an empty RAM.
    pub fn new(config: &Config) -> Self {
        let core = &config.core;
        let mut bus = Bus::new();

        bus.add_device(Box::new(Memory::new(core.ram_base, core.ram_size)));

        if bus.is_valid_address(core.debug_entry) {
            warn!(
                addr = format_args!("{:#010x}", core.debug_entry),
                "debug entry overlaps another device; debug ROM not mapped"
            );
        } else {
            bus.add_device(Box::new(DebugRom::new(core.debug_entry)));
        }

        if !bus.is_valid_address(core.tohost) {
            bus.add_device(Box::new(Htif::new(core.tohost)));
        }

        debug!(devices = ?bus.device_names(), "system built");
        Self { bus }
    }
}
