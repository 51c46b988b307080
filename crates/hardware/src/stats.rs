//! Simulation statistics collection and reporting.
//!
//! This module tracks per-hart execution metrics. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived CPI.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, system).
//! 3. **Stalls:** Cycles spent waiting on the fetch and data handshakes.
//! 4. **Debug activity:** Traps taken and debug-mode entries per cause.

use std::fmt;

use serde::Serialize;

use crate::core::debug::dcsr::DebugCause;

/// Debug-mode entries broken down by `dcsr.cause`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DebugEntryStats {
    /// Entries caused by `ebreak`.
    pub ebreak: u64,
    /// Entries caused by a trigger.
    pub trigger: u64,
    /// Entries caused by a halt request or a memory-boundary fault.
    pub haltreq: u64,
    /// Entries caused by single-step.
    pub step: u64,
    /// Entries caused by a reset-halt request.
    pub resethaltreq: u64,
}

impl DebugEntryStats {
    /// Total number of debug-mode entries.
    pub const fn total(&self) -> u64 {
        self.ebreak + self.trigger + self.haltreq + self.step + self.resethaltreq
    }
}

/// Statistics of one hart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HartStats {
    /// Total FSM steps taken.
    pub cycles: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of ALU instructions retired.
    pub inst_alu: u64,
    /// Count of system (CSR, ECALL, etc.) instructions retired.
    pub inst_system: u64,

    /// Steps spent waiting for the fetch-valid handshake.
    pub stalls_fetch: u64,
    /// Steps spent waiting for the read-valid or write-ready handshake.
    pub stalls_mem: u64,
    /// Steps spent in debug mode.
    pub cycles_debug: u64,

    /// Exception traps taken.
    pub traps_exception: u64,
    /// Interrupt traps taken.
    pub traps_interrupt: u64,
    /// Debug-mode entries per cause.
    pub debug_entries: DebugEntryStats,
}

impl HartStats {
    /// Counts one debug-mode entry.
    pub const fn record_debug_entry(&mut self, cause: DebugCause) {
        let e = &mut self.debug_entries;
        match cause {
            DebugCause::Ebreak => e.ebreak += 1,
            DebugCause::Trigger => e.trigger += 1,
            DebugCause::HaltReq => e.haltreq += 1,
            DebugCause::Step => e.step += 1,
            DebugCause::ResetHaltReq => e.resethaltreq += 1,
        }
    }

    /// Cycles per retired instruction (0 when nothing retired).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }
}

impl fmt::Display for HartStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_cpi                  {:.4}", self.cpi())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INSTRUCTION MIX")?;
        writeln!(f, "  alu                    {}", self.inst_alu)?;
        writeln!(f, "  load                   {}", self.inst_load)?;
        writeln!(f, "  store                  {}", self.inst_store)?;
        writeln!(f, "  branch                 {}", self.inst_branch)?;
        writeln!(f, "  system                 {}", self.inst_system)?;
        writeln!(f, "STALLS")?;
        writeln!(
            f,
            "  stalls.fetch           {} ({:.2}%)",
            self.stalls_fetch,
            pct(self.stalls_fetch)
        )?;
        writeln!(
            f,
            "  stalls.memory          {} ({:.2}%)",
            self.stalls_mem,
            pct(self.stalls_mem)
        )?;
        writeln!(f, "DEBUG")?;
        writeln!(
            f,
            "  cycles.debug           {} ({:.2}%)",
            self.cycles_debug,
            pct(self.cycles_debug)
        )?;
        writeln!(f, "  traps.exception        {}", self.traps_exception)?;
        writeln!(f, "  traps.interrupt        {}", self.traps_interrupt)?;
        let e = &self.debug_entries;
        writeln!(f, "  entries.ebreak         {}", e.ebreak)?;
        writeln!(f, "  entries.trigger        {}", e.trigger)?;
        writeln!(f, "  entries.haltreq        {}", e.haltreq)?;
        writeln!(f, "  entries.step           {}", e.step)?;
        write!(f, "  entries.resethaltreq   {}", e.resethaltreq)
    }
}
