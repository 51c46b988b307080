//! System interconnect (bus) for memory and MMIO access.
//!
//! This module implements the bus that routes addresses to devices. It provides:
//! 1. **Device registration:** Devices are added by address range and sorted for lookup.
//! 2. **Access routing:** Word and byte access by address with a last-device hint.
//! 3. **Loading:** Bulk binary writes for the program loader.
//!
//! Unclaimed reads return zero and unclaimed writes are dropped; the hart
//! has no access-fault path.

use std::fmt;

use tracing::trace;

use crate::common::error::SimError;
use crate::soc::traits::Device;

/// Returns true if `addr` lies in `[start, start + size)`.
const fn in_range(addr: u32, start: u32, size: u32) -> bool {
    addr >= start && addr - start < size
}

/// System bus connecting the harts and devices; routes accesses by address.
pub struct Bus {
    /// Registered devices, sorted by base address.
    devices: Vec<Box<dyn Device>>,
    last_device_idx: usize,
}

impl Bus {
    /// Creates an empty bus; add devices with `add_device`.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            last_device_idx: 0,
        }
    }

    /// Registers a device on the bus; devices are sorted by base address for lookup.
    pub fn add_device(&mut self, dev: Box<dyn Device>) {
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
    }

    /// Names of the registered devices in address order.
    pub fn device_names(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.name()).collect()
    }

    /// Writes a binary blob at the given address.
    ///
    /// # Arguments
    ///
    /// * `data` - Bytes to write.
    /// * `addr` - Base address.
    ///
    /// # Returns
    ///
    /// `SimError::Unmapped` unless a single device covers the whole range.
    pub fn load_binary_at(&mut self, data: &[u8], addr: u32) -> Result<(), SimError> {
        let unmapped = SimError::Unmapped {
            addr,
            len: data.len(),
        };
        let Some((dev, offset)) = self.find_device(addr) else {
            return Err(unmapped);
        };
        let (_, size) = dev.address_range();
        if (offset as usize).saturating_add(data.len()) > size as usize {
            return Err(unmapped);
        }
        dev.write_bytes(offset, data);
        Ok(())
    }

    /// Returns whether the given address is backed by any device.
    pub fn is_valid_address(&self, addr: u32) -> bool {
        self.devices.iter().any(|dev| {
            let (start, size) = dev.address_range();
            in_range(addr, start, size)
        })
    }

    fn find_device(&mut self, addr: u32) -> Option<(&mut Box<dyn Device>, u32)> {
        if let Some(dev) = self.devices.get(self.last_device_idx) {
            let (start, size) = dev.address_range();
            if in_range(addr, start, size) {
                let idx = self.last_device_idx;
                return Some((&mut self.devices[idx], addr - start));
            }
        }

        let idx = self.devices.iter().position(|dev| {
            let (start, size) = dev.address_range();
            in_range(addr, start, size)
        })?;
        self.last_device_idx = idx;
        let (start, _) = self.devices[idx].address_range();
        Some((&mut self.devices[idx], addr - start))
    }

    /// Reads a byte; unclaimed addresses read zero.
    pub fn read_u8(&mut self, addr: u32) -> u8 {
        match self.find_device(addr) {
            Some((dev, offset)) => dev.read_u8(offset),
            None => {
                trace!(addr = format_args!("{addr:#010x}"), "unmapped byte read");
                0
            }
        }
    }

    /// Writes a byte; unclaimed addresses drop the write.
    pub fn write_u8(&mut self, addr: u32, val: u8) {
        match self.find_device(addr) {
            Some((dev, offset)) => dev.write_u8(offset, val),
            None => trace!(addr = format_args!("{addr:#010x}"), "unmapped byte write"),
        }
    }

    /// Reads a word; unclaimed addresses read zero.
    pub fn read_u32(&mut self, addr: u32) -> u32 {
        match self.find_device(addr) {
            Some((dev, offset)) => dev.read_u32(offset),
            None => {
                trace!(addr = format_args!("{addr:#010x}"), "unmapped word read");
                0
            }
        }
    }

    /// Writes a word; unclaimed addresses drop the write.
    pub fn write_u32(&mut self, addr: u32, val: u32) {
        match self.find_device(addr) {
            Some((dev, offset)) => dev.write_u32(offset, val),
            None => trace!(
                addr = format_args!("{addr:#010x}"),
                val = format_args!("{val:#x}"),
                "unmapped word write"
            ),
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("devices", &self.device_names())
            .finish_non_exhaustive()
    }
}
