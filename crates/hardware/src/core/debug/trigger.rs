//! Hardware triggers (Sdtrig).
//!
//! This module implements the trigger CSR state and the trigger matcher:
//! 1. **Storage:** four slots of `tdata1`/`tdata2`/`tdata3`, `tselect`,
//!    `tcontrol`, `mcontext`, and the per-slot instruction counters.
//! 2. **Matching:** `TriggerEngine::evaluate`, a pure function over the slots and
//!    one step's observations, producing the OR-reduced trigger vector.
//!
//! Supported types are mcontrol (2), icount (3), itrigger (4), etrigger (5),
//! mcontrol6 (6), and tmexttrigger (7). Every type is gated by `tcontrol.mte`
//! and suppressed while the hart is in debug mode.

use crate::common::constants::{EXTERNAL_TRIGGER_INPUTS, TRIGGER_COUNT};
use crate::common::error::CsrError;
use crate::core::arch::csr::{MCONTEXT, TCONTROL, TDATA1, TDATA2, TDATA3, TINFO, TSELECT};

/// Bit position of the type field in `tdata1`.
const TYPE_SHIFT: u32 = 28;

/// Supported trigger types 2 through 7, as reported by `tinfo`.
pub const TINFO_SUPPORTED: u32 = 0xFC;

/// `tcontrol.mte`: M-mode trigger enable.
pub const TCONTROL_MTE: u32 = 1 << 3;

/// `tcontrol.mpte`: M-mode previous trigger enable.
pub const TCONTROL_MPTE: u32 = 1 << 7;

/// mcontrol: execute match enable.
pub const MCONTROL_EXECUTE: u32 = 1 << 2;

/// mcontrol: store match enable.
pub const MCONTROL_STORE: u32 = 1 << 1;

/// mcontrol: load match enable.
pub const MCONTROL_LOAD: u32 = 1 << 0;

/// Shift of the 4-bit action field used by types 2, 6, and 7.
const ACTION4_SHIFT: u32 = 12;

/// Shift of the 2-bit action field used by types 3, 4, and 5.
const ACTION2_SHIFT: u32 = 6;

/// Shift of the mcontrol6 select field.
const MCONTROL6_SELECT_SHIFT: u32 = 16;

/// Shift of the tmexttrigger select field.
const TMEXT_SELECT_SHIFT: u32 = 16;

/// Shift of the icount count field.
pub const ICOUNT_COUNT_SHIFT: u32 = 10;

/// Mask of the 14-bit icount count field (after shifting).
pub const ICOUNT_COUNT_MASK: u32 = 0x3FFF;

/// icount pending flag.
pub const ICOUNT_PENDING: u32 = 1 << 0;

/// Trigger type, from `tdata1[31:28]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerType {
    /// Slot disabled.
    Disabled,
    /// Address/PC match (type 2).
    Mcontrol,
    /// Instruction count (type 3).
    Icount,
    /// Interrupt trap (type 4).
    Itrigger,
    /// Exception trap (type 5).
    Etrigger,
    /// Address/PC match with explicit select (type 6).
    Mcontrol6,
    /// External trigger input (type 7).
    Tmexttrigger,
}

impl TriggerType {
    /// Decodes the type field of a `tdata1` value.
    pub const fn from_tdata1(tdata1: u32) -> Self {
        match tdata1 >> TYPE_SHIFT {
            2 => Self::Mcontrol,
            3 => Self::Icount,
            4 => Self::Itrigger,
            5 => Self::Etrigger,
            6 => Self::Mcontrol6,
            7 => Self::Tmexttrigger,
            _ => Self::Disabled,
        }
    }
}

/// What a matching trigger does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerAction {
    /// Raise a breakpoint exception.
    Exception,
    /// Enter debug mode.
    Debug,
    /// Assert external trigger output 0 or 1.
    External(usize),
    /// Reserved encoding; the match has no effect.
    Reserved,
}

impl TriggerAction {
    /// Decodes a 4-bit action (types 2, 6, 7).
    const fn from_wide(code: u32) -> Self {
        match code & 0xF {
            0 => Self::Exception,
            1 => Self::Debug,
            8 => Self::External(0),
            9 => Self::External(1),
            _ => Self::Reserved,
        }
    }

    /// Decodes a 2-bit action (types 3, 4, 5).
    const fn from_narrow(code: u32) -> Self {
        match code & 0x3 {
            0 => Self::Exception,
            1 => Self::Debug,
            2 => Self::External(0),
            _ => Self::External(1),
        }
    }
}

/// One trigger slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerSlot {
    /// Type and configuration.
    pub tdata1: u32,
    /// Comparison operand.
    pub tdata2: u32,
    /// Auxiliary data (stored, not interpreted).
    pub tdata3: u32,
    /// icount down-counter.
    pub icount_counter: u32,
    /// icount reached zero and has not been acted on yet.
    pub icount_pending: bool,
}

impl TriggerSlot {
    /// Returns the decoded trigger type.
    pub const fn kind(&self) -> TriggerType {
        TriggerType::from_tdata1(self.tdata1)
    }

    /// Returns the decoded action of this slot.
    pub const fn action(&self) -> TriggerAction {
        match self.kind() {
            TriggerType::Icount | TriggerType::Itrigger | TriggerType::Etrigger => {
                TriggerAction::from_narrow(self.tdata1 >> ACTION2_SHIFT)
            }
            _ => TriggerAction::from_wide(self.tdata1 >> ACTION4_SHIFT),
        }
    }

    /// Stores a new `tdata1`. Unsupported types store zero; icount reloads its counter.
    fn write_tdata1(&mut self, val: u32) {
        self.tdata1 = match TriggerType::from_tdata1(val) {
            TriggerType::Disabled => 0,
            _ => val,
        };
        if self.kind() == TriggerType::Icount {
            self.icount_counter = (val >> ICOUNT_COUNT_SHIFT) & ICOUNT_COUNT_MASK;
            self.icount_pending = val & ICOUNT_PENDING != 0;
        } else {
            self.icount_counter = 0;
            self.icount_pending = false;
        }
    }

    /// `tdata1` as read by software; icount reports its live counter and pending flag.
    fn read_tdata1(&self) -> u32 {
        if self.kind() == TriggerType::Icount {
            let fixed = self.tdata1 & !((ICOUNT_COUNT_MASK << ICOUNT_COUNT_SHIFT) | ICOUNT_PENDING);
            fixed
                | (self.icount_counter << ICOUNT_COUNT_SHIFT)
                | if self.icount_pending { ICOUNT_PENDING } else { 0 }
        } else {
            self.tdata1
        }
    }
}

/// Trigger CSR state of one hart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Triggers {
    /// Selected slot for `tdata*` accesses.
    pub tselect: usize,
    /// Trigger slots.
    pub slots: [TriggerSlot; TRIGGER_COUNT],
    /// Trigger control (`mte`, `mpte`).
    pub tcontrol: u32,
    /// Machine context.
    pub mcontext: u32,
}

impl Default for Triggers {
    fn default() -> Self {
        Self {
            tselect: 0,
            slots: [TriggerSlot::default(); TRIGGER_COUNT],
            tcontrol: TCONTROL_MTE,
            mcontext: 0,
        }
    }
}

impl Triggers {
    /// Returns true if M-mode triggers are enabled.
    pub const fn enabled(&self) -> bool {
        self.tcontrol & TCONTROL_MTE != 0
    }

    /// Reads a trigger CSR.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    ///
    /// # Returns
    ///
    /// The value, or `CsrError::Unsupported` for addresses outside the trigger block.
    pub fn read(&self, addr: u32) -> Result<u32, CsrError> {
        let slot = &self.slots[self.tselect];
        Ok(match addr {
            TSELECT => self.tselect as u32,
            TDATA1 => slot.read_tdata1(),
            TDATA2 => slot.tdata2,
            TDATA3 => slot.tdata3,
            TINFO => TINFO_SUPPORTED,
            TCONTROL => self.tcontrol,
            MCONTEXT => self.mcontext,
            _ => return Err(CsrError::Unsupported(addr)),
        })
    }

    /// Writes a trigger CSR.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    /// * `val` - The value to write.
    pub fn write(&mut self, addr: u32, val: u32) -> Result<(), CsrError> {
        let sel = self.tselect;
        match addr {
            TSELECT => self.tselect = (val as usize) % TRIGGER_COUNT,
            TDATA1 => self.slots[sel].write_tdata1(val),
            TDATA2 => self.slots[sel].tdata2 = val,
            TDATA3 => self.slots[sel].tdata3 = val,
            TCONTROL => self.tcontrol = val & (TCONTROL_MTE | TCONTROL_MPTE),
            MCONTEXT => self.mcontext = val,
            TINFO => return Err(CsrError::ReadOnly(addr)),
            _ => return Err(CsrError::Unsupported(addr)),
        }
        Ok(())
    }

    /// Counts one retired instruction on every armed icount slot.
    ///
    /// A counter that reaches zero sets its pending flag. Counting stops while
    /// triggers are disabled or the hart is in debug mode.
    pub fn count_retirement(&mut self, debug_mode: bool) {
        if debug_mode || !self.enabled() {
            return;
        }
        for slot in &mut self.slots {
            if slot.kind() == TriggerType::Icount && slot.icount_counter > 0 {
                slot.icount_counter -= 1;
                if slot.icount_counter == 0 {
                    slot.icount_pending = true;
                }
            }
        }
    }

    /// Clears the icount pending flag of every slot in `mask`.
    pub fn acknowledge(&mut self, mask: u8) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if mask & (1 << i) != 0 {
                slot.icount_pending = false;
            }
        }
    }

    /// Saves `mte` into `mpte` and disables triggers (trap entry).
    pub const fn on_trap(&mut self) {
        let mpte = if self.enabled() { TCONTROL_MPTE } else { 0 };
        self.tcontrol = mpte;
    }

    /// Restores `mte` from `mpte` (`mret`).
    pub const fn on_mret(&mut self) {
        let mte = if self.tcontrol & TCONTROL_MPTE != 0 {
            TCONTROL_MTE
        } else {
            0
        };
        self.tcontrol = (self.tcontrol & TCONTROL_MPTE) | mte;
    }
}

/// Observations fed to the matcher for one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerProbe {
    /// PC of the instruction about to execute.
    pub exec_pc: Option<u32>,
    /// Effective address of a load about to execute.
    pub load_addr: Option<u32>,
    /// Effective address of a store about to execute.
    pub store_addr: Option<u32>,
    /// An interrupt trap is being taken.
    pub interrupt: bool,
    /// An exception trap is being taken.
    pub exception: bool,
    /// External trigger input lines.
    pub external: [bool; EXTERNAL_TRIGGER_INPUTS],
}

/// OR-reduced trigger outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriggerVector {
    /// A matching slot requests debug-mode entry.
    pub fire: bool,
    /// A matching slot requests a breakpoint exception.
    pub exception_req: bool,
    /// External trigger outputs.
    pub external: [bool; 2],
    /// Bitmask of the slots that matched.
    pub hits: u8,
}

impl TriggerVector {
    /// Returns true if the vector changes control flow.
    pub const fn redirects(&self) -> bool {
        self.fire || self.exception_req
    }

    /// ORs another vector into this one.
    pub const fn merge(&mut self, other: &Self) {
        self.fire |= other.fire;
        self.exception_req |= other.exception_req;
        self.external[0] |= other.external[0];
        self.external[1] |= other.external[1];
        self.hits |= other.hits;
    }
}

/// Stateless trigger matcher.
#[derive(Debug)]
pub struct TriggerEngine;

impl TriggerEngine {
    /// Matches every slot against one step's observations.
    ///
    /// # Arguments
    ///
    /// * `triggers`   - The trigger CSR state.
    /// * `probe`      - What the hart is doing this step.
    /// * `debug_mode` - Whether the hart is in debug mode (suppresses all triggers).
    ///
    /// # Returns
    ///
    /// The OR of the actions of all matching slots.
    pub fn evaluate(triggers: &Triggers, probe: &TriggerProbe, debug_mode: bool) -> TriggerVector {
        let mut out = TriggerVector::default();
        if debug_mode || !triggers.enabled() {
            return out;
        }

        for (i, slot) in triggers.slots.iter().enumerate() {
            if !Self::matches(slot, probe) {
                continue;
            }
            out.hits |= 1 << i;
            match slot.action() {
                TriggerAction::Exception => out.exception_req = true,
                TriggerAction::Debug => out.fire = true,
                TriggerAction::External(line) => out.external[line] = true,
                TriggerAction::Reserved => {}
            }
        }
        out
    }

    fn matches(slot: &TriggerSlot, probe: &TriggerProbe) -> bool {
        let operand = Some(slot.tdata2);
        match slot.kind() {
            TriggerType::Disabled => false,
            TriggerType::Mcontrol => {
                (slot.tdata1 & MCONTROL_EXECUTE != 0 && probe.exec_pc == operand)
                    || (slot.tdata1 & MCONTROL_LOAD != 0 && probe.load_addr == operand)
                    || (slot.tdata1 & MCONTROL_STORE != 0 && probe.store_addr == operand)
            }
            TriggerType::Mcontrol6 => match (slot.tdata1 >> MCONTROL6_SELECT_SHIFT) & 0x3 {
                0 => probe.exec_pc == operand,
                1 => probe.load_addr == operand,
                2 => probe.store_addr == operand,
                _ => probe.load_addr == operand || probe.store_addr == operand,
            },
            TriggerType::Icount => slot.icount_pending,
            TriggerType::Itrigger => probe.interrupt,
            TriggerType::Etrigger => probe.exception,
            TriggerType::Tmexttrigger => {
                let line = ((slot.tdata1 >> TMEXT_SELECT_SHIFT) & 0xF) as usize;
                probe.external.get(line).copied().unwrap_or(false)
            }
        }
    }
}
