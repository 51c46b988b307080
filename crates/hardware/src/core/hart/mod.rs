//! Hart Definition and Initialization.
//!
//! This module defines the `Hart` structure, the container for the complete
//! state of one hardware thread. It coordinates the following:
//! 1. **State Management:** Registers, program counter, CSRs, debug and trigger state.
//! 2. **FSM Control:** The current `FsmState` and the instruction/memory latches.
//! 3. **Bus Contract:** The request the hart drives (`BusRequest`) and the
//!    handshake and control lines it samples each step (`HartInputs`).
//!
//! Each hart exclusively owns its state; several harts only meet on the bus
//! the caller passes between them.

/// CSR dispatch with debug-mode gating.
pub mod csr;

/// FSM step and retirement priority chain.
pub mod execution;

/// Data-port request generation and memory substates.
pub mod memory;

/// Trap entry, `mret`, and debug-mode entry/exit.
pub mod trap;

use crate::common::constants::EXTERNAL_TRIGGER_INPUTS;
use crate::config::CoreConfig;
use crate::core::arch::csr::Csrs;
use crate::core::arch::gpr::Gpr;
use crate::core::debug::DebugState;
use crate::core::debug::dcsr::DebugCause;
use crate::core::debug::trigger::{TriggerVector, Triggers};
use crate::core::fsm::FsmState;
use crate::core::fsm::latches::{InstructionLatch, MemOpLatch};
use crate::stats::HartStats;

/// Request driven by the hart towards the bus adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BusRequest {
    /// No transaction.
    #[default]
    Idle,

    /// Instruction fetch.
    Fetch {
        /// Instruction address.
        addr: u32,
    },

    /// Word-aligned data read.
    Read {
        /// Aligned address.
        addr: u32,
    },

    /// Full-word data write; sub-word stores arrive already merged.
    Write {
        /// Aligned address.
        addr: u32,
        /// Word to write.
        data: u32,
    },
}

/// Lines sampled by the hart on one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HartInputs {
    /// Fetch-valid handshake.
    pub imem_valid: bool,
    /// Fetched instruction word.
    pub imem_data: u32,
    /// Read-valid handshake.
    pub dmem_rvalid: bool,
    /// Read data word.
    pub dmem_rdata: u32,
    /// Write-ready handshake.
    pub dmem_wready: bool,
    /// External halt request from the debug module.
    pub haltreq: bool,
    /// External trigger input lines.
    pub external_triggers: [bool; EXTERNAL_TRIGGER_INPUTS],
    /// Machine timer interrupt line.
    pub timer_irq: bool,
    /// Machine software interrupt line.
    pub software_irq: bool,
    /// Machine external interrupt line.
    pub external_irq: bool,
}

/// Lines driven by the hart after one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HartOutputs {
    /// An instruction committed on this step.
    pub instruction_retired: bool,
    /// The hart is in debug mode.
    pub debug_mode: bool,
    /// OR-reduced trigger vector.
    pub trigger: TriggerVector,
    /// The hart has completed its `tohost` store and is frozen.
    pub exited: bool,
}

/// One RV32I hardware thread.
#[derive(Clone, Debug)]
pub struct Hart {
    /// Memory map and debug parameters.
    pub(crate) config: CoreConfig,
    /// Current FSM state.
    pub(crate) state: FsmState,
    /// Program counter.
    pub(crate) pc: u32,
    /// General-purpose registers.
    pub(crate) gpr: Gpr,
    /// Machine-mode CSRs.
    pub(crate) csrs: Csrs,
    /// Debug-mode state.
    pub(crate) debug: DebugState,
    /// Trigger CSRs and counters.
    pub(crate) triggers: Triggers,
    /// Latched instruction.
    pub(crate) ir: InstructionLatch,
    /// In-flight memory operation.
    pub(crate) mem: MemOpLatch,
    /// `tohost` was written; the FSM no longer advances.
    pub(crate) exit_pending: bool,
    /// Value last written to `tohost`.
    pub(crate) exit_value: Option<u32>,
    /// Emit a trace event per retirement.
    pub(crate) trace: bool,
    /// Execution statistics.
    pub(crate) stats: HartStats,
}

impl Hart {
    /// Creates a hart in its reset state.
    ///
    /// # Arguments
    ///
    /// * `config`  - Memory map and debug parameters.
    /// * `hart_id` - Value reported by `mhartid`.
    ///
    /// # Returns
    ///
    /// A hart in `FsmState::Fetch` with `pc = config.reset_pc`.
    pub fn new(config: &CoreConfig, hart_id: u32) -> Self {
        Self {
            config: config.clone(),
            state: FsmState::Fetch,
            pc: config.reset_pc,
            gpr: Gpr::new(),
            csrs: Csrs::new(hart_id),
            debug: DebugState::default(),
            triggers: Triggers::default(),
            ir: InstructionLatch::default(),
            mem: MemOpLatch::default(),
            exit_pending: false,
            exit_value: None,
            trace: false,
            stats: HartStats::default(),
        }
    }

    /// Enables or disables per-retirement trace events.
    pub const fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Restores the reset state.
    ///
    /// With `resethaltreq` the hart enters debug mode immediately with cause
    /// `resethaltreq` and `dpc` pointing at the reset vector.
    pub fn reset(&mut self, resethaltreq: bool) {
        let trace = self.trace;
        *self = Self::new(&self.config, self.csrs.mhartid);
        self.trace = trace;
        if resethaltreq {
            self.enter_debug(DebugCause::ResetHaltReq, self.config.reset_pc);
        }
    }

    /// Current program counter.
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Current FSM state.
    pub const fn state(&self) -> FsmState {
        self.state
    }

    /// Reads a general-purpose register.
    pub const fn reg(&self, idx: usize) -> u32 {
        self.gpr.read(idx)
    }

    /// Writes a general-purpose register (debugger access).
    pub const fn set_reg(&mut self, idx: usize, val: u32) {
        self.gpr.write(idx, val);
    }

    /// The register file.
    pub const fn gpr(&self) -> &Gpr {
        &self.gpr
    }

    /// Machine-mode CSRs.
    pub const fn csrs(&self) -> &Csrs {
        &self.csrs
    }

    /// Debug-mode state (`dcsr`, `dpc`, halt latch).
    pub const fn debug(&self) -> &DebugState {
        &self.debug
    }

    /// Trigger CSRs and counters.
    pub const fn triggers(&self) -> &Triggers {
        &self.triggers
    }

    /// True while the hart is in debug mode.
    pub const fn in_debug_mode(&self) -> bool {
        self.debug.debug_mode
    }

    /// Hardware thread id.
    pub const fn hart_id(&self) -> u32 {
        self.csrs.mhartid
    }

    /// The latched instruction.
    pub const fn instruction_latch(&self) -> InstructionLatch {
        self.ir
    }

    /// The in-flight memory operation.
    pub const fn mem_latch(&self) -> MemOpLatch {
        self.mem
    }

    /// Value written to `tohost`, once the hart has exited.
    pub const fn exit_value(&self) -> Option<u32> {
        self.exit_value
    }

    /// True once the `tohost` store has retired.
    pub const fn exited(&self) -> bool {
        self.exit_pending
    }

    /// Execution statistics.
    pub const fn stats(&self) -> &HartStats {
        &self.stats
    }
}
