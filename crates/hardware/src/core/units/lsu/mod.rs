//! Load/Store Unit (LSU).
//!
//! The data port is word-addressed, so every access moves a full aligned
//! word. This module provides:
//! - [`lanes`]: byte/halfword lane extraction for loads and the lane merge
//!   for read-modify-write stores.
//!
//! Misaligned accesses raise no exception: the low address bits only select
//! a lane, and a halfword at offset 3 wraps into the same word's lanes.

/// Byte and halfword lane selection.
pub mod lanes;

use crate::core::fsm::signals::MemWidth;

/// Load/Store Unit (LSU) for memory operations.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Extracts a load result from the word returned by the data port.
    ///
    /// # Arguments
    ///
    /// * `word`   - The aligned word read from memory.
    /// * `addr`   - The unaligned effective address.
    /// * `width`  - The access width.
    /// * `signed` - Sign-extend the extracted lane.
    ///
    /// # Returns
    ///
    /// The value written back to `rd`.
    pub const fn load(word: u32, addr: u32, width: MemWidth, signed: bool) -> u32 {
        lanes::extract(word, addr, width, signed)
    }

    /// Builds the word written for a store.
    ///
    /// Word stores write `data` directly. Byte and halfword stores replace the
    /// addressed lane of `old`, the word fetched by the read phase.
    ///
    /// # Arguments
    ///
    /// * `old`   - The current memory word (ignored for word stores).
    /// * `addr`  - The unaligned effective address.
    /// * `data`  - The `rs2` value.
    /// * `width` - The access width.
    ///
    /// # Returns
    ///
    /// The full word to put on the data port.
    pub const fn store(old: u32, addr: u32, data: u32, width: MemWidth) -> u32 {
        lanes::merge(old, addr, data, width)
    }
}
