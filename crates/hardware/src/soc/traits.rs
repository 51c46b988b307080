//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by all bus-attached components. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Byte and word read/write at device-relative offsets.
//! 3. **Loading:** Bulk writes used by the program loader and the debugger.
//!
//! The hart's data port is word-wide, so word access is the hot path; byte
//! access exists for loading and inspection.

/// Trait for memory-mapped devices attached to the bus.
pub trait Device: Send {
    /// Returns a short name for this device (e.g., `"RAM"`, `"HTIF"`).
    fn name(&self) -> &str;

    /// Returns (base_address, size_in_bytes) for this device's region.
    fn address_range(&self) -> (u32, u32);

    /// Reads one byte at the given device-relative offset.
    fn read_u8(&mut self, offset: u32) -> u8;

    /// Writes one byte at the given offset.
    fn write_u8(&mut self, offset: u32, val: u8);

    /// Reads four bytes (little-endian) at the given offset.
    fn read_u32(&mut self, offset: u32) -> u32 {
        let bytes = [
            self.read_u8(offset),
            self.read_u8(offset.wrapping_add(1)),
            self.read_u8(offset.wrapping_add(2)),
            self.read_u8(offset.wrapping_add(3)),
        ];
        u32::from_le_bytes(bytes)
    }

    /// Writes four bytes (little-endian) at the given offset.
    fn write_u32(&mut self, offset: u32, val: u32) {
        for (i, byte) in val.to_le_bytes().into_iter().enumerate() {
            self.write_u8(offset.wrapping_add(i as u32), byte);
        }
    }

    /// Writes a contiguous byte slice at the given offset (default: byte-by-byte).
    fn write_bytes(&mut self, offset: u32, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(offset.wrapping_add(i as u32), *byte);
        }
    }
}
