//! Data Port and Memory Substates.
//!
//! This module implements the data side of the FSM. It performs the following:
//! 1. **Requests:** derives the combinational `BusRequest` from the FSM state.
//! 2. **Dispatch:** latches a load or store and picks the first memory state.
//! 3. **Read-Modify-Write:** sub-word stores read the containing word, merge
//!    the addressed lane, and write the full word back.
//! 4. **Completion:** load writeback in `MemDone`, store retirement on write-ready,
//!    and the `tohost` completion latch.
//!
//! Only one data transaction is outstanding at a time and every access is
//! word-aligned on the port.

use tracing::debug;

use super::execution::Retirement;
use super::{BusRequest, Hart, HartInputs, HartOutputs};
use crate::common::constants::WORD_ALIGN_MASK;
use crate::core::fsm::FsmState;
use crate::core::fsm::latches::MemOpLatch;
use crate::core::fsm::signals::{ControlSignals, MemOp, MemWidth};
use crate::core::units::alu::AluOutput;
use crate::core::units::lsu::Lsu;
use crate::isa::decode::decode;

impl Hart {
    /// Returns the request the hart drives in its current state.
    pub const fn bus_request(&self) -> BusRequest {
        if self.exit_pending {
            return BusRequest::Idle;
        }
        let addr = self.mem.mem_addr_saved & WORD_ALIGN_MASK;
        match self.state {
            FsmState::Fetch | FsmState::WaitFetch => BusRequest::Fetch { addr: self.pc },
            FsmState::MemRead => BusRequest::Read { addr },
            FsmState::MemWrite => BusRequest::Write {
                addr,
                data: self.mem.write_word,
            },
            FsmState::FetchDone | FsmState::MemDone => BusRequest::Idle,
        }
    }

    /// Latches a load or store and enters its first memory state.
    ///
    /// Loads and byte/halfword stores read first; word stores write directly.
    pub(crate) fn dispatch_mem(&mut self, inst: u32, ctrl: ControlSignals, addr: u32, rv2: u32) {
        self.mem = MemOpLatch {
            mem_inst: inst,
            mem_addr_saved: addr,
            store_data: rv2,
            ctrl,
            write_word: rv2,
            read_word: 0,
        };
        self.state = match ctrl.mem {
            MemOp::Store {
                width: MemWidth::Word,
            } => FsmState::MemWrite,
            _ => FsmState::MemRead,
        };
    }

    /// `MemRead`: wait for read-valid, then land the load or start the RMW write.
    pub(crate) fn mem_read(&mut self, inputs: &HartInputs) {
        if !inputs.dmem_rvalid {
            self.stats.stalls_mem += 1;
            return;
        }
        self.mem.read_word = inputs.dmem_rdata;
        if let MemOp::Store { width } = self.mem.ctrl.mem {
            self.mem.write_word = Lsu::store(
                inputs.dmem_rdata,
                self.mem.mem_addr_saved,
                self.mem.store_data,
                width,
            );
            self.state = FsmState::MemWrite;
        } else {
            self.state = FsmState::MemDone;
        }
    }

    /// `MemWrite`: wait for write-ready, then retire the store.
    pub(crate) fn mem_write(&mut self, inputs: &HartInputs, out: &mut HartOutputs) {
        if !inputs.dmem_wready {
            self.stats.stalls_mem += 1;
            return;
        }

        let addr = self.mem.mem_addr_saved & WORD_ALIGN_MASK;
        if addr == self.config.tohost & WORD_ALIGN_MASK {
            self.exit_pending = true;
            self.exit_value = Some(self.mem.write_word);
            debug!(
                hart = self.csrs.mhartid,
                value = format_args!("{:#x}", self.mem.write_word),
                "tohost written"
            );
        }

        let retirement = self.mem_retirement(0);
        self.retire(&retirement, out);
    }

    /// `MemDone`: write the lane-extracted load result back and retire.
    pub(crate) fn mem_done(&mut self, out: &mut HartOutputs) {
        let load = match self.mem.ctrl.mem {
            MemOp::Load { width, signed } => {
                Lsu::load(self.mem.read_word, self.mem.mem_addr_saved, width, signed)
            }
            _ => 0,
        };
        let retirement = self.mem_retirement(load);
        self.retire(&retirement, out);
    }

    /// Rebuilds the retirement record of the in-flight memory instruction.
    fn mem_retirement(&self, load: u32) -> Retirement {
        Retirement {
            ctrl: self.mem.ctrl,
            decoded: decode(self.mem.mem_inst),
            alu: AluOutput {
                result: self.mem.mem_addr_saved,
                taken: false,
            },
            rv1: 0,
            load,
        }
    }
}
