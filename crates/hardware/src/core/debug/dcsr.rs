//! Debug control and status register (`dcsr`).
//!
//! Layout: `xdebugver[31:28]` (4, external debug support), `cause[8:6]`,
//! `step[2]`, and `prv[1:0]`. All other fields read zero.

use serde::Serialize;

/// `xdebugver` value for a hart implementing external debug support.
pub const XDEBUGVER: u32 = 4;

/// Bit position of the `xdebugver` field.
pub const XDEBUGVER_SHIFT: u32 = 28;

/// Bit position of the `cause` field.
pub const CAUSE_SHIFT: u32 = 6;

/// Mask of the `cause` field (after shifting).
pub const CAUSE_MASK: u32 = 0x7;

/// Single-step bit.
pub const STEP: u32 = 1 << 2;

/// Mask of the `prv` field.
pub const PRV_MASK: u32 = 0x3;

/// Machine privilege level encoding.
pub const PRV_MACHINE: u32 = 3;

/// Reason the hart entered debug mode, as reported in `dcsr.cause`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum DebugCause {
    /// An `ebreak` instruction executed outside debug mode.
    Ebreak = 1,
    /// A trigger with the "enter debug mode" action matched.
    Trigger = 2,
    /// The debugger requested a halt (also used for memory-boundary faults).
    HaltReq = 3,
    /// Single-step completed one instruction.
    Step = 4,
    /// The hart was halted coming out of reset.
    ResetHaltReq = 5,
}

impl DebugCause {
    /// Returns the 3-bit encoding stored in `dcsr.cause`.
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// Software-visible fields of `dcsr`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dcsr {
    /// Cause of the most recent debug-mode entry (hardware-set only).
    pub cause: Option<DebugCause>,
    /// Single-step enable.
    pub step: bool,
    /// Privilege level to return to on `dret`.
    pub prv: u32,
}

impl Default for Dcsr {
    fn default() -> Self {
        Self {
            cause: None,
            step: false,
            prv: PRV_MACHINE,
        }
    }
}

impl Dcsr {
    /// Packs the fields into the 32-bit register view.
    pub fn read(&self) -> u32 {
        let cause = self.cause.map_or(0, DebugCause::code);
        (XDEBUGVER << XDEBUGVER_SHIFT)
            | ((cause & CAUSE_MASK) << CAUSE_SHIFT)
            | if self.step { STEP } else { 0 }
            | (self.prv & PRV_MASK)
    }

    /// Applies a software write: only `step` and `prv` change.
    pub const fn write(&mut self, val: u32) {
        self.step = val & STEP != 0;
        self.prv = val & PRV_MASK;
    }
}
