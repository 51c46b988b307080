//! External debug support (Sdext) and triggers (Sdtrig).
//!
//! 1. **Debug CSRs:** `dcsr`, `dpc`, `dscratch0/1`, visible only in debug mode.
//! 2. **Halt latch:** the sticky `halt_pending` flag set by a halt request.
//! 3. **Triggers:** slot storage and the pure matcher (see [`trigger`]).

/// Debug control and status register.
pub mod dcsr;

/// Trigger slots and matcher.
pub mod trigger;

use crate::common::error::CsrError;
use crate::core::arch::csr::{DCSR, DPC, DSCRATCH0, DSCRATCH1};
use crate::core::debug::dcsr::Dcsr;

/// Debug-mode state of one hart.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugState {
    /// The hart is in debug mode.
    pub debug_mode: bool,
    /// Debug control and status.
    pub dcsr: Dcsr,
    /// PC to resume at on `dret`.
    pub dpc: u32,
    /// Debugger scratch register 0.
    pub dscratch0: u32,
    /// Debugger scratch register 1.
    pub dscratch1: u32,
    /// A halt request has been observed and not yet honoured.
    ///
    /// Set on the step `haltreq` is seen outside debug mode and cleared on the
    /// step the hart enters debug mode for any cause.
    pub halt_pending: bool,
}

impl DebugState {
    /// Returns true if `addr` is one of the debug-only CSRs.
    pub const fn owns(addr: u32) -> bool {
        matches!(addr, DCSR | DPC | DSCRATCH0 | DSCRATCH1)
    }

    /// Reads a debug CSR. Outside debug mode the registers are invisible.
    pub fn read(&self, addr: u32) -> Result<u32, CsrError> {
        if !Self::owns(addr) {
            return Err(CsrError::Unsupported(addr));
        }
        if !self.debug_mode {
            return Err(CsrError::DebugOnly(addr));
        }
        Ok(match addr {
            DCSR => self.dcsr.read(),
            DPC => self.dpc,
            DSCRATCH0 => self.dscratch0,
            _ => self.dscratch1,
        })
    }

    /// Writes a debug CSR. Outside debug mode the write is dropped.
    pub fn write(&mut self, addr: u32, val: u32) -> Result<(), CsrError> {
        if !Self::owns(addr) {
            return Err(CsrError::Unsupported(addr));
        }
        if !self.debug_mode {
            return Err(CsrError::DebugOnly(addr));
        }
        match addr {
            DCSR => self.dcsr.write(val),
            DPC => self.dpc = val,
            DSCRATCH0 => self.dscratch0 = val,
            _ => self.dscratch1 = val,
        }
        Ok(())
    }
}
