//! Global System Constants.
//!
//! This module defines system-wide constants shared by the hart and the
//! surrounding harness. It includes:
//! 1. **Memory Map:** Default RAM window, reset vector, debug ROM, and `tohost`.
//! 2. **Instruction Constants:** Instruction size and field masks.
//! 3. **Handshake Constants:** Write-width codes carried on the data port.

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Bit mask for extracting the opcode field from a RISC-V instruction.
pub const OPCODE_MASK: u32 = 0x7F;

/// Bit mask for extracting the destination register (rd) field.
pub const RD_MASK: u32 = 0x1F;

/// Bit position shift for the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;

/// Bit mask for extracting the first source register (rs1) field.
pub const RS1_MASK: u32 = 0x1F;

/// Bit position shift for the first source register (rs1) field.
pub const RS1_SHIFT: u32 = 15;

/// Bit mask for extracting the second source register (rs2) field.
pub const RS2_MASK: u32 = 0x1F;

/// Bit position shift for the second source register (rs2) field.
pub const RS2_SHIFT: u32 = 20;

/// Address every debug-mode entry redirects the PC to.
///
/// Some hardware builds place the debug ROM at `0x200`; the address is a
/// configuration field (`CoreConfig::debug_entry`) and this is its default.
pub const DEBUG_ENTRY_POINT: u32 = 0x0000_0600;

/// Alternative debug ROM entry used by the older hardware builds.
pub const DEBUG_ENTRY_POINT_LEGACY: u32 = 0x0000_0200;

/// Size of the debug ROM / program buffer window in bytes.
pub const DEBUG_ROM_SIZE: u32 = 0x100;

/// First byte of the on-chip RAM window.
pub const RAM_BASE: u32 = 0x0001_0000;

/// Size of the on-chip RAM window (16 KiB).
pub const RAM_SIZE: u32 = 0x4000;

/// Reset vector: execution starts at the bottom of RAM.
pub const RESET_PC: u32 = RAM_BASE;

/// Test-harness completion sentinel.
///
/// Any write to this address is latched by the harness as "test completed".
pub const TOHOST_ADDR: u32 = 0x8000_1000;

/// Mask that aligns an address down to its containing 32-bit word.
pub const WORD_ALIGN_MASK: u32 = !0x3;

/// Number of hardware trigger slots implemented per hart.
pub const TRIGGER_COUNT: usize = 4;

/// Number of external trigger input lines.
pub const EXTERNAL_TRIGGER_INPUTS: usize = 4;
