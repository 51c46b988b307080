//! Bus-attached devices.
//!
//! 1. **Debug ROM:** the debug entry code and program buffer.
//! 2. **HTIF:** the `tohost` completion sink.

/// Debug ROM and program buffer.
pub mod debug_rom;

/// `tohost` completion sink.
pub mod htif;

pub use self::debug_rom::DebugRom;
pub use self::htif::{Htif, HtifStatus};
pub use crate::soc::traits::Device;
