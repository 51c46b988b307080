//! Instruction and memory-operation latches.
//!
//! 1. **Instruction latch:** captured once per fetch, used for decode, execute,
//!    writeback, and trap bookkeeping.
//! 2. **Memory latch:** captured when a load or store is recognised and valid only
//!    while that access is in flight.

use crate::core::fsm::signals::ControlSignals;

/// Latched instruction and the PC it was fetched from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstructionLatch {
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Address the instruction was fetched from.
    pub inst_pc: u32,
}

/// State carried across the memory substates of a load or store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemOpLatch {
    /// Instruction that issued the access.
    pub mem_inst: u32,
    /// Unaligned effective address (low bits select the lane).
    pub mem_addr_saved: u32,
    /// Store data from `rs2`.
    pub store_data: u32,
    /// Control signals decoded when the access was recognised.
    pub ctrl: ControlSignals,
    /// Word assembled for the write phase (merged word for sub-word stores).
    pub write_word: u32,
    /// Word returned by the read phase.
    pub read_word: u32,
}
