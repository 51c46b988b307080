//! CSR Access and Dispatch.
//!
//! Routes a CSR address to the block that stores it:
//! 1. **Debug CSRs:** `dcsr`, `dpc`, `dscratch0/1`, invisible outside debug mode.
//! 2. **Trigger CSRs:** `tselect`, `tdata1-3`, `tinfo`, `tcontrol`, `mcontext`.
//! 3. **Machine CSRs:** everything else in the implemented map.
//!
//! The executing instruction sees failed reads as `0` and failed writes as
//! no-ops; the `Result` values exist for callers that need to tell them apart.

use tracing::trace;

use super::Hart;
use crate::common::error::CsrError;
use crate::core::arch::csr::{MCONTEXT, TCONTROL, TSELECT};
use crate::core::debug::DebugState;
use crate::core::fsm::signals::CsrOp;

/// Returns true for addresses stored in the trigger block.
const fn is_trigger_csr(addr: u32) -> bool {
    matches!(addr, TSELECT..=TCONTROL | MCONTEXT)
}

impl Hart {
    /// Reads a CSR.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    ///
    /// # Returns
    ///
    /// The value, or the reason the hardware would read zero.
    pub fn csr_read(&self, addr: u32) -> Result<u32, CsrError> {
        if DebugState::owns(addr) {
            self.debug.read(addr)
        } else if is_trigger_csr(addr) {
            self.triggers.read(addr)
        } else {
            self.csrs.read(addr)
        }
    }

    /// Writes a CSR.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    /// * `val`  - The value to write.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the write took effect, or the reason it was dropped.
    pub fn csr_write(&mut self, addr: u32, val: u32) -> Result<(), CsrError> {
        if DebugState::owns(addr) {
            self.debug.write(addr, val)
        } else if is_trigger_csr(addr) {
            self.triggers.write(addr, val)
        } else {
            self.csrs.write(addr, val)
        }
    }

    /// Executes a Zicsr command and returns the old CSR value for `rd`.
    ///
    /// Set and clear with a zero source operand index (`rs1 == x0`, or
    /// `zimm == 0`) only read the register.
    ///
    /// # Arguments
    ///
    /// * `op`      - The CSR command.
    /// * `addr`    - The CSR address.
    /// * `operand` - The `rs1` value, or the zero-extended `zimm`.
    /// * `src_idx` - The raw `rs1` field.
    pub(crate) fn csr_command(&mut self, op: CsrOp, addr: u32, operand: u32, src_idx: usize) -> u32 {
        let old = self.csr_read(addr).unwrap_or_else(|e| {
            trace!(hart = self.csrs.mhartid, error = %e, "csr read reads zero");
            0
        });

        let new = match op {
            CsrOp::None => None,
            CsrOp::Write => Some(operand),
            CsrOp::Set => (src_idx != 0).then_some(old | operand),
            CsrOp::Clear => (src_idx != 0).then_some(old & !operand),
        };

        if let Some(val) = new {
            if let Err(e) = self.csr_write(addr, val) {
                trace!(hart = self.csrs.mhartid, error = %e, "csr write dropped");
            }
        }
        old
    }
}
