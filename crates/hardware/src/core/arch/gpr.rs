//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file of one hart.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Debugging:** Provides utilities for dumping the complete register state.

use std::fmt;

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers. Register `x0` is hardwired to zero
/// and cannot be modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; 32],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    ///
    /// # Returns
    ///
    /// A new `Gpr` instance with all registers set to 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index; only the low five bits are used.
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register. Register `x0` always returns 0.
    pub const fn read(&self, idx: usize) -> u32 {
        match idx & 0x1F {
            0 => 0,
            i => self.regs[i],
        }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index; only the low five bits are used.
    /// * `val` - The 32-bit value to write.
    pub const fn write(&mut self, idx: usize, val: u32) {
        let i = idx & 0x1F;
        if i != 0 {
            self.regs[i] = val;
        }
    }

    /// Returns a snapshot of all 32 registers (`x0` reads as zero).
    pub const fn snapshot(&self) -> [u32; 32] {
        self.regs
    }
}

impl fmt::Display for Gpr {
    /// Formats registers four per line with hexadecimal values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..32).step_by(4) {
            for i in row..row + 4 {
                write!(f, "x{:<2}={:#010x} ", i, self.read(i))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
