//! FSM Step and Retirement.
//!
//! This module advances a hart by exactly one FSM state per call. It performs
//! the following:
//! 1. **Fetch:** samples interrupts, issues the fetch, and latches the instruction.
//! 2. **Execute:** decodes, reads registers, runs the ALU, and either dispatches
//!    a data access or resolves the instruction on the same step.
//! 3. **Preemption:** the memory-boundary check and execute/load/store triggers,
//!    which replace the instruction before it has any effect.
//! 4. **Retirement:** register and CSR writeback, then exactly one PC update:
//!    a pending halt request, a single-step re-halt, `dret`, `ecall`,
//!    `ebreak`, `mret`, or the ordinary next PC.
//!
//! Priority across one instruction, highest first: boundary fault, trigger
//! exception, trigger debug entry (all before execution), then halt request
//! and single-step, which suppress the instruction's own system effect.

use tracing::trace;

use super::{Hart, HartInputs, HartOutputs};
use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::arch::csr::{MIP_MEIP, MIP_MSIP, MIP_MTIP};
use crate::core::debug::dcsr::DebugCause;
use crate::core::debug::trigger::{TriggerEngine, TriggerProbe};
use crate::core::fsm::FsmState;
use crate::core::fsm::control::control_signals;
use crate::core::fsm::signals::{
    ControlSignals, CsrOp, MemOp, OpASrc, OpBSrc, PcSel, SystemOp, WbSel,
};
use crate::core::units::alu::{Alu, AluOutput};
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::privileged::cause::exception;

/// Everything needed to commit one instruction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Retirement {
    /// Control signals of the instruction.
    pub ctrl: ControlSignals,
    /// Decoded instruction fields.
    pub decoded: Decoded,
    /// ALU output computed in `FetchDone`.
    pub alu: AluOutput,
    /// Value of `rs1` (CSR operand).
    pub rv1: u32,
    /// Lane-extracted load data.
    pub load: u32,
}

impl Hart {
    /// Advances the hart by one FSM state.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Handshake responses and control lines for this step.
    ///
    /// # Returns
    ///
    /// The retirement strobe, debug-mode flag, and trigger vector.
    pub fn step(&mut self, inputs: &HartInputs) -> HartOutputs {
        let mut out = HartOutputs::default();

        if self.exit_pending {
            out.debug_mode = self.debug.debug_mode;
            out.exited = true;
            return out;
        }

        self.stats.cycles += 1;
        self.csrs.mcycle = self.csrs.mcycle.wrapping_add(1);
        if self.debug.debug_mode {
            self.stats.cycles_debug += 1;
        }

        self.csrs.mip = (if inputs.software_irq { MIP_MSIP } else { 0 })
            | (if inputs.timer_irq { MIP_MTIP } else { 0 })
            | (if inputs.external_irq { MIP_MEIP } else { 0 });

        // Sticky until the next debug-mode entry; ignored while already halted.
        if inputs.haltreq && !self.debug.debug_mode {
            self.debug.halt_pending = true;
        }

        match self.state {
            FsmState::Fetch => self.fetch(&mut out),
            FsmState::WaitFetch => {
                if inputs.imem_valid {
                    self.ir.inst = inputs.imem_data;
                    self.ir.inst_pc = self.pc;
                    self.state = FsmState::FetchDone;
                } else {
                    self.stats.stalls_fetch += 1;
                }
            }
            FsmState::FetchDone => self.execute(inputs, &mut out),
            FsmState::MemRead => self.mem_read(inputs),
            FsmState::MemWrite => self.mem_write(inputs, &mut out),
            FsmState::MemDone => self.mem_done(&mut out),
        }

        let background = TriggerProbe {
            external: inputs.external_triggers,
            ..TriggerProbe::default()
        };
        let vector = TriggerEngine::evaluate(&self.triggers, &background, self.debug.debug_mode);
        out.trigger.merge(&vector);
        out.debug_mode = self.debug.debug_mode;
        out.exited = self.exit_pending;
        out
    }

    /// `Fetch`: take a pending interrupt, then issue the fetch.
    fn fetch(&mut self, out: &mut HartOutputs) {
        if let Some(cause) = self.pending_interrupt() {
            self.take_trap(cause, self.pc, out);
        }
        self.state = FsmState::WaitFetch;
    }

    /// `FetchDone`: decode, execute, and resolve or dispatch the instruction.
    fn execute(&mut self, inputs: &HartInputs, out: &mut HartOutputs) {
        let inst_pc = self.ir.inst_pc;
        let ctrl = control_signals(self.ir.inst).unwrap_or_else(|e| {
            trace!(hart = self.csrs.mhartid, error = %e, "inert decode");
            ControlSignals::default()
        });
        let d = decode(self.ir.inst);
        let rv1 = self.gpr.read(d.rs1);
        let rv2 = self.gpr.read(d.rs2);

        let a = match ctrl.a_src {
            OpASrc::Reg1 => rv1,
            OpASrc::Pc => inst_pc,
            OpASrc::Zero => 0,
        };
        let b = match ctrl.b_src {
            OpBSrc::Reg2 => rv2,
            OpBSrc::Imm => d.imm as u32,
        };
        let alu = Alu::execute(ctrl.alu, a, b);

        // Memory-boundary fault: running off the RAM window halts the hart.
        if !self.debug.debug_mode && !self.config.in_ram(inst_pc) {
            self.enter_debug(DebugCause::HaltReq, inst_pc);
            self.state = FsmState::Fetch;
            return;
        }

        let probe = TriggerProbe {
            exec_pc: Some(inst_pc),
            load_addr: matches!(ctrl.mem, MemOp::Load { .. }).then_some(alu.result),
            store_addr: matches!(ctrl.mem, MemOp::Store { .. }).then_some(alu.result),
            external: inputs.external_triggers,
            ..TriggerProbe::default()
        };
        let vector = TriggerEngine::evaluate(&self.triggers, &probe, self.debug.debug_mode);
        out.trigger.merge(&vector);
        self.triggers.acknowledge(vector.hits);

        if vector.exception_req {
            self.enter_trap(exception::BREAKPOINT, inst_pc);
            self.state = FsmState::Fetch;
            return;
        }
        if vector.fire {
            self.enter_debug(DebugCause::Trigger, inst_pc);
            self.state = FsmState::Fetch;
            return;
        }

        match ctrl.mem {
            MemOp::None => {
                self.retire(
                    &Retirement {
                        ctrl,
                        decoded: d,
                        alu,
                        rv1,
                        load: 0,
                    },
                    out,
                );
            }
            MemOp::Load { .. } | MemOp::Store { .. } => self.dispatch_mem(self.ir.inst, ctrl, alu.result, rv2),
        }
    }

    /// Commits an instruction and resolves the next PC.
    pub(crate) fn retire(&mut self, r: &Retirement, out: &mut HartOutputs) {
        let inst_pc = self.ir.inst_pc;
        let next_pc = inst_pc.wrapping_add(INSTRUCTION_SIZE);
        let d = &r.decoded;
        let was_debug = self.debug.debug_mode;

        out.instruction_retired = true;
        // Counted before the CSR command so a `tdata1` write does not count itself.
        self.triggers.count_retirement(was_debug);

        let csr_old = if r.ctrl.csr_op == CsrOp::None {
            0
        } else {
            let operand = if r.ctrl.csr_imm { d.rs1 as u32 } else { r.rv1 };
            self.csr_command(r.ctrl.csr_op, r.ctrl.csr_addr, operand, d.rs1)
        };
        self.record_retirement(&r.ctrl);

        if r.ctrl.reg_write {
            let value = match r.ctrl.wb {
                WbSel::Alu => r.alu.result,
                WbSel::Mem => r.load,
                WbSel::PcPlus4 => next_pc,
                WbSel::Csr => csr_old,
            };
            self.gpr.write(d.rd, value);
        }

        let resolved_pc = match r.ctrl.pc_sel {
            PcSel::Next => next_pc,
            PcSel::Branch if r.alu.taken => inst_pc.wrapping_add(d.imm as u32),
            PcSel::Branch => next_pc,
            PcSel::Alu => r.alu.result,
        };

        // A pending halt or single-step outranks the instruction's own system
        // effect; `ecall`/`ebreak`/`mret` then retire without trapping.
        if !was_debug && self.debug.halt_pending {
            self.enter_debug(DebugCause::HaltReq, resolved_pc);
        } else if !was_debug && self.debug.dcsr.step {
            self.enter_debug(DebugCause::Step, resolved_pc);
        } else {
            match r.ctrl.system {
                SystemOp::Dret if was_debug => self.leave_debug(),
                SystemOp::Ecall => {
                    self.take_trap(exception::ENVIRONMENT_CALL_FROM_M_MODE, next_pc, out);
                }
                SystemOp::Ebreak if was_debug => {
                    self.pc = self.config.debug_entry.wrapping_add(INSTRUCTION_SIZE);
                }
                SystemOp::Ebreak => self.enter_debug(DebugCause::Ebreak, inst_pc),
                SystemOp::Mret => self.mret(),
                SystemOp::None | SystemOp::FenceI | SystemOp::Dret => self.pc = resolved_pc,
            }
        }

        if self.trace || cfg!(feature = "always-trace") {
            trace!(
                hart = self.csrs.mhartid,
                pc = format_args!("{inst_pc:#010x}"),
                inst = format_args!("{:#010x}", self.ir.inst),
                next = format_args!("{:#010x}", self.pc),
                "retire"
            );
        }
        self.state = FsmState::Fetch;
    }

    /// Updates the retirement counters.
    fn record_retirement(&mut self, ctrl: &ControlSignals) {
        self.csrs.minstret = self.csrs.minstret.wrapping_add(1);
        self.stats.instructions_retired += 1;
        match ctrl.mem {
            MemOp::Load { .. } => self.stats.inst_load += 1,
            MemOp::Store { .. } => self.stats.inst_store += 1,
            MemOp::None if ctrl.pc_sel != PcSel::Next => self.stats.inst_branch += 1,
            MemOp::None if ctrl.csr_op != CsrOp::None || ctrl.system != SystemOp::None => {
                self.stats.inst_system += 1;
            }
            MemOp::None => self.stats.inst_alu += 1,
        }
    }
}
