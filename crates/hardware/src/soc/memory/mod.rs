//! On-chip RAM.
//!
//! A flat little-endian byte array mapped at a base address. A word access
//! that runs past the end reads zero and drops the write.

use crate::soc::traits::Device;

/// On-chip RAM device.
#[derive(Clone, Debug)]
pub struct Memory {
    /// Backing storage.
    data: Vec<u8>,
    /// The base address where this memory is mapped.
    base_addr: u32,
}

impl Memory {
    /// Creates a zero-filled RAM.
    ///
    /// # Arguments
    ///
    /// * `base_addr` - Starting address.
    /// * `size` - Size in bytes.
    pub fn new(base_addr: u32, size: u32) -> Self {
        Self {
            data: vec![0; size as usize],
            base_addr,
        }
    }

    /// Returns the RAM contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Device for Memory {
    fn name(&self) -> &str {
        "RAM"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, self.data.len() as u32)
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        if let Some(b) = self.data.get_mut(offset as usize) {
            *b = val;
        }
    }

    /// Reads a word (Little Endian); out-of-range bytes read as zero.
    fn read_u32(&mut self, offset: u32) -> u32 {
        let i = offset as usize;
        match self.data.get(i..i + 4) {
            Some(s) => u32::from_le_bytes([s[0], s[1], s[2], s[3]]),
            None => 0,
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        let i = offset as usize;
        if let Some(s) = self.data.get_mut(i..i + 4) {
            s.copy_from_slice(&val.to_le_bytes());
        }
    }

    fn write_bytes(&mut self, offset: u32, data: &[u8]) {
        let i = offset as usize;
        if let Some(s) = self.data.get_mut(i..i + data.len()) {
            s.copy_from_slice(data);
        }
    }
}
