//! Host-Target Interface (HTIF) `tohost` sink.
//!
//! Test programs signal completion by writing a result value to the `tohost`
//! address:
//!
//! * `1`: test passed.
//! * Odd and not 1: test failed; the failing test number is `value >> 1`.
//! * Anything else: reported raw.
//!
//! The hart itself latches the store and freezes; this device only records
//! the outcome.

use std::fmt;

use tracing::{info, warn};

use crate::soc::traits::Device;

/// Size of the `tohost` + `fromhost` slot.
const HTIF_SIZE: u32 = 16;

/// Interpretation of a `tohost` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HtifStatus {
    /// Value 1.
    Pass,
    /// Odd value other than 1; carries `value >> 1`.
    Fail(u32),
    /// Any other value.
    Other(u32),
}

impl HtifStatus {
    /// Classifies a `tohost` value.
    pub const fn from_value(val: u32) -> Self {
        if val == 1 {
            Self::Pass
        } else if val & 1 != 0 {
            Self::Fail(val >> 1)
        } else {
            Self::Other(val)
        }
    }

    /// Process exit code for this status (0 on pass).
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Pass => 0,
            // Exit codes are seven bits wide; a value that truncates to 0
            // must still read as a failure.
            Self::Fail(n) | Self::Other(n) => match (n & 0x7F) as i32 {
                0 => 1,
                code => code,
            },
        }
    }
}

impl fmt::Display for HtifStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail(n) => write!(f, "FAIL (test {n})"),
            Self::Other(v) => write!(f, "tohost={v:#x}"),
        }
    }
}

/// HTIF device: logs writes to the `tohost` address.
#[derive(Clone, Copy, Debug)]
pub struct Htif {
    base_addr: u32,
}

impl Htif {
    /// Creates a new HTIF device at `base_addr`.
    pub const fn new(base_addr: u32) -> Self {
        Self { base_addr }
    }

    fn handle_tohost(val: u32) {
        match HtifStatus::from_value(val) {
            HtifStatus::Pass => info!("tohost: PASS"),
            HtifStatus::Fail(n) => warn!(test = n, "tohost: FAIL (tohost={val:#x})"),
            HtifStatus::Other(v) => warn!("tohost: unhandled value {v:#x}"),
        }
    }
}

impl Device for Htif {
    fn name(&self) -> &str {
        "HTIF"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, HTIF_SIZE)
    }

    fn read_u8(&mut self, _offset: u32) -> u8 {
        0
    }

    fn write_u8(&mut self, _offset: u32, _val: u8) {}

    fn read_u32(&mut self, _offset: u32) -> u32 {
        0
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        if offset == 0 {
            Self::handle_tohost(val);
        }
    }
}
