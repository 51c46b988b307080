//! Trap and Debug-Mode Transitions.
//!
//! This module implements every control transfer that does not come from the
//! instruction's own ALU result:
//! 1. **Trap Entry:** `mepc`/`mcause`, the `mstatus` and `tcontrol` save, and
//!    the `mtvec` target (direct or vectored).
//! 2. **Trap Triggers:** itrigger/etrigger, evaluated with the trigger enable
//!    that was in force before the trap.
//! 3. **Return Handling:** `mret` and `dret`.
//! 4. **Debug Entry:** `dcsr.cause`, `dpc`, and the jump to the debug entry address.

use tracing::debug;

use super::{Hart, HartOutputs};
use crate::core::arch::csr::{
    MIP_MEIP, MIP_MSIP, MIP_MTIP, MSTATUS_MIE, MSTATUS_MPIE, MSTATUS_MPP, MTVEC_MODE_MASK,
    MTVEC_MODE_VECTORED,
};
use crate::core::debug::dcsr::{DebugCause, PRV_MACHINE};
use crate::core::debug::trigger::{TriggerEngine, TriggerProbe};
use crate::isa::privileged::cause::{INTERRUPT_BIT, exception, interrupt};

impl Hart {
    /// Enters debug mode.
    ///
    /// # Arguments
    ///
    /// * `cause` - Value for `dcsr.cause`.
    /// * `dpc`   - PC to resume at on `dret`.
    pub(crate) fn enter_debug(&mut self, cause: DebugCause, dpc: u32) {
        self.debug.debug_mode = true;
        self.debug.dcsr.cause = Some(cause);
        self.debug.dcsr.prv = PRV_MACHINE;
        self.debug.dpc = dpc;
        self.debug.halt_pending = false;
        self.pc = self.config.debug_entry;
        self.stats.record_debug_entry(cause);
        debug!(
            hart = self.csrs.mhartid,
            ?cause,
            dpc = format_args!("{dpc:#010x}"),
            "enter debug mode"
        );
    }

    /// Leaves debug mode (`dret`) and resumes at `dpc`.
    pub(crate) fn leave_debug(&mut self) {
        self.debug.debug_mode = false;
        self.pc = self.debug.dpc;
        debug!(
            hart = self.csrs.mhartid,
            pc = format_args!("{:#010x}", self.pc),
            "resume from debug mode"
        );
    }

    /// Takes an M-mode trap without consulting the trap triggers.
    ///
    /// # Arguments
    ///
    /// * `cause` - Value for `mcause` (bit 31 set for interrupts).
    /// * `epc`   - Value for `mepc`.
    pub(crate) fn enter_trap(&mut self, cause: u32, epc: u32) {
        let is_interrupt = cause & INTERRUPT_BIT != 0;

        self.csrs.mepc = epc;
        self.csrs.mcause = cause;

        let mie = self.csrs.mstatus & MSTATUS_MIE != 0;
        let mut mstatus = self.csrs.mstatus & !(MSTATUS_MIE | MSTATUS_MPIE);
        if mie {
            mstatus |= MSTATUS_MPIE;
        }
        self.csrs.mstatus = mstatus | MSTATUS_MPP;
        self.triggers.on_trap();

        let base = self.csrs.mtvec & !MTVEC_MODE_MASK;
        self.pc = if is_interrupt && self.csrs.mtvec & MTVEC_MODE_MASK == MTVEC_MODE_VECTORED {
            base.wrapping_add(4 * (cause & !INTERRUPT_BIT))
        } else {
            base
        };

        if is_interrupt {
            self.stats.traps_interrupt += 1;
        } else {
            self.stats.traps_exception += 1;
        }
        debug!(
            hart = self.csrs.mhartid,
            cause = format_args!("{cause:#x}"),
            epc = format_args!("{epc:#010x}"),
            handler = format_args!("{:#010x}", self.pc),
            "trap"
        );
    }

    /// Takes an M-mode trap and applies any itrigger/etrigger that matches it.
    ///
    /// The trap triggers are matched against the trigger enable in force before
    /// the trap clears it. A debug action halts with `dpc` at the handler; an
    /// exception action stacks a breakpoint trap on top of the first.
    pub(crate) fn take_trap(&mut self, cause: u32, epc: u32, out: &mut HartOutputs) {
        let is_interrupt = cause & INTERRUPT_BIT != 0;
        let probe = TriggerProbe {
            interrupt: is_interrupt,
            exception: !is_interrupt,
            ..TriggerProbe::default()
        };
        let vector = TriggerEngine::evaluate(&self.triggers, &probe, self.debug.debug_mode);

        self.enter_trap(cause, epc);
        out.trigger.merge(&vector);

        if vector.fire {
            self.enter_debug(DebugCause::Trigger, self.pc);
        } else if vector.exception_req {
            self.enter_trap(exception::BREAKPOINT, self.pc);
        }
    }

    /// Returns from an M-mode trap (`mret`).
    pub(crate) fn mret(&mut self) {
        let mpie = self.csrs.mstatus & MSTATUS_MPIE != 0;
        let mut mstatus = self.csrs.mstatus & !MSTATUS_MIE;
        if mpie {
            mstatus |= MSTATUS_MIE;
        }
        self.csrs.mstatus = mstatus | MSTATUS_MPIE;
        self.triggers.on_mret();
        self.pc = self.csrs.mepc;
    }

    /// Returns the highest-priority enabled and pending interrupt, if it may be taken.
    ///
    /// Interrupts are masked in debug mode, behind a pending halt request, while
    /// single-stepping, and while `mstatus.MIE` is clear. Priority is external, then software, then timer.
    pub(crate) const fn pending_interrupt(&self) -> Option<u32> {
        if self.debug.debug_mode
            || self.debug.halt_pending
            || self.debug.dcsr.step
            || !self.csrs.mie_enabled()
        {
            return None;
        }
        let pending = self.csrs.mie & self.csrs.mip;
        if pending & MIP_MEIP != 0 {
            Some(interrupt::MACHINE_EXTERNAL)
        } else if pending & MIP_MSIP != 0 {
            Some(interrupt::MACHINE_SOFTWARE)
        } else if pending & MIP_MTIP != 0 {
            Some(interrupt::MACHINE_TIMER)
        } else {
            None
        }
    }
}
