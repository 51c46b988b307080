//! Debug ROM and program buffer.
//!
//! Every debug-mode entry jumps to the base of this region. Out of reset it
//! holds a park loop (`jal x0, 0`) at the entry and at entry+4, so a halted
//! hart spins until the debugger writes a program and the program ends in
//! `dret`. The region is writable to model the program buffer.

use crate::common::constants::DEBUG_ROM_SIZE;
use crate::soc::traits::Device;

/// `jal x0, 0`: branch to self.
pub const PARK_LOOP: u32 = 0x0000_006F;

/// Debug ROM / program buffer device.
#[derive(Clone, Debug)]
pub struct DebugRom {
    base_addr: u32,
    data: Vec<u8>,
}

impl DebugRom {
    /// Creates the ROM at `base_addr` with the default park loop.
    pub fn new(base_addr: u32) -> Self {
        let mut rom = Self {
            base_addr,
            data: vec![0; DEBUG_ROM_SIZE as usize],
        };
        rom.load_program(&[PARK_LOOP, PARK_LOOP]);
        rom
    }

    /// Replaces the program starting at the entry address.
    ///
    /// Words past the end of the region are dropped.
    pub fn load_program(&mut self, words: &[u32]) {
        for (chunk, word) in self.data.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
    }
}

impl Device for DebugRom {
    fn name(&self) -> &str {
        "DEBUG_ROM"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, DEBUG_ROM_SIZE)
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        if let Some(b) = self.data.get_mut(offset as usize) {
            *b = val;
        }
    }
}
