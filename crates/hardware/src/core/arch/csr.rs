//! Control and Status Register (CSR) definitions and storage.
//!
//! This module implements the machine-mode CSR file of the hart. It provides:
//! 1. **Address Definitions:** Constants for the machine, counter, debug, and trigger CSRs.
//! 2. **Field Masks:** Bitmasks and shifts for `mstatus`, `mie`/`mip`, and `misa`.
//! 3. **Register Storage:** The `Csrs` struct for the machine-mode architectural state.
//! 4. **Access Logic:** Read and write rules for the machine-mode subset.
//!
//! Debug (`dcsr`, `dpc`, `dscratch*`) and trigger (`tselect`, `tdata*`, ...)
//! registers are stored by `core::debug`; their addresses are defined here so
//! the whole map lives in one place.

use crate::common::error::CsrError;

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;

/// Machine ISA register CSR address.
pub const MISA: u32 = 0x301;

/// Machine interrupt enable register CSR address.
pub const MIE: u32 = 0x304;

/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;

/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;

/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;

/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Machine interrupt pending register CSR address.
pub const MIP: u32 = 0x344;

/// Machine cycle counter CSR address.
pub const MCYCLE: u32 = 0xB00;

/// Machine instructions retired counter CSR address.
pub const MINSTRET: u32 = 0xB02;

/// Upper half of the machine cycle counter.
pub const MCYCLEH: u32 = 0xB80;

/// Upper half of the machine instructions retired counter.
pub const MINSTRETH: u32 = 0xB82;

/// Cycle counter CSR address (read-only view).
pub const CYCLE: u32 = 0xC00;

/// Instructions retired counter CSR address (read-only view).
pub const INSTRET: u32 = 0xC02;

/// Upper half of the cycle counter.
pub const CYCLEH: u32 = 0xC80;

/// Upper half of the instructions retired counter.
pub const INSTRETH: u32 = 0xC82;

/// Machine hardware thread ID CSR address.
pub const MHARTID: u32 = 0xF14;

/// Trigger select register.
pub const TSELECT: u32 = 0x7A0;

/// Trigger data 1 (type and configuration of the selected trigger).
pub const TDATA1: u32 = 0x7A1;

/// Trigger data 2 (comparison operand of the selected trigger).
pub const TDATA2: u32 = 0x7A2;

/// Trigger data 3 (auxiliary data of the selected trigger).
pub const TDATA3: u32 = 0x7A3;

/// Trigger info (supported types of the selected trigger).
pub const TINFO: u32 = 0x7A4;

/// Trigger control (`mte`/`mpte`).
pub const TCONTROL: u32 = 0x7A5;

/// Machine context register.
pub const MCONTEXT: u32 = 0x7A8;

/// Debug control and status register.
pub const DCSR: u32 = 0x7B0;

/// Debug program counter.
pub const DPC: u32 = 0x7B1;

/// Debug scratch register 0.
pub const DSCRATCH0: u32 = 0x7B2;

/// Debug scratch register 1.
pub const DSCRATCH1: u32 = 0x7B3;

/// Machine interrupt enable bit in `mstatus` register.
pub const MSTATUS_MIE: u32 = 1 << 3;

/// Machine previous interrupt enable bit in `mstatus` register.
pub const MSTATUS_MPIE: u32 = 1 << 7;

/// Machine previous privilege mode field mask in `mstatus` register.
pub const MSTATUS_MPP: u32 = 3 << 11;

/// Bits of `mstatus` that hold state; every other bit reads zero.
pub const MSTATUS_WRITABLE: u32 = MSTATUS_MIE | MSTATUS_MPIE | MSTATUS_MPP;

/// Machine software interrupt bit in `mie`/`mip`.
pub const MIP_MSIP: u32 = 1 << 3;

/// Machine timer interrupt bit in `mie`/`mip`.
pub const MIP_MTIP: u32 = 1 << 7;

/// Machine external interrupt bit in `mie`/`mip`.
pub const MIP_MEIP: u32 = 1 << 11;

/// Bits of `mie` that are implemented.
pub const MIE_WRITABLE: u32 = MIP_MSIP | MIP_MTIP | MIP_MEIP;

/// MISA value for RV32I: MXL=1 and the `I` extension bit.
pub const MISA_RV32I: u32 = 0x4000_0100;

/// `mtvec` mode field mask.
pub const MTVEC_MODE_MASK: u32 = 0x3;

/// `mtvec` vectored mode.
pub const MTVEC_MODE_VECTORED: u32 = 1;

/// Machine-mode Control and Status Register file.
///
/// The hart only runs in M-mode, so there is no supervisor or user state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Csrs {
    /// Machine status register (only `MSTATUS_WRITABLE` bits are kept).
    pub mstatus: u32,
    /// Machine interrupt enable.
    pub mie: u32,
    /// Machine interrupt pending, mirrored from the interrupt input lines.
    pub mip: u32,
    /// Machine trap vector base address.
    pub mtvec: u32,
    /// Machine scratch register.
    pub mscratch: u32,
    /// Machine exception program counter.
    pub mepc: u32,
    /// Machine trap cause.
    pub mcause: u32,
    /// Machine cycle counter.
    pub mcycle: u64,
    /// Machine instructions retired counter.
    pub minstret: u64,
    /// Hardware thread ID.
    pub mhartid: u32,
}

impl Csrs {
    /// Creates the reset-state CSR file for the given hart.
    pub fn new(mhartid: u32) -> Self {
        Self {
            mhartid,
            ..Self::default()
        }
    }

    /// Returns true if `mstatus.MIE` is set.
    pub const fn mie_enabled(&self) -> bool {
        self.mstatus & MSTATUS_MIE != 0
    }

    /// Reads a machine-mode CSR value by its address.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    ///
    /// # Returns
    ///
    /// The 32-bit value, or `CsrError::Unsupported` if the address is not a
    /// machine-mode CSR.
    pub const fn read(&self, addr: u32) -> Result<u32, CsrError> {
        Ok(match addr {
            MSTATUS => self.mstatus,
            MISA => MISA_RV32I,
            MIE => self.mie,
            MTVEC => self.mtvec,
            MSCRATCH => self.mscratch,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            MIP => self.mip,
            MCYCLE | CYCLE => self.mcycle as u32,
            MCYCLEH | CYCLEH => (self.mcycle >> 32) as u32,
            MINSTRET | INSTRET => self.minstret as u32,
            MINSTRETH | INSTRETH => (self.minstret >> 32) as u32,
            MHARTID => self.mhartid,
            _ => return Err(CsrError::Unsupported(addr)),
        })
    }

    /// Writes a machine-mode CSR.
    ///
    /// Only the defined fields of `mstatus` and `mie` change. Counters, `misa`,
    /// `mip`, and `mhartid` are read-only.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    /// * `val` - The 32-bit value to write.
    pub const fn write(&mut self, addr: u32, val: u32) -> Result<(), CsrError> {
        match addr {
            MSTATUS => self.mstatus = val & MSTATUS_WRITABLE,
            MIE => self.mie = val & MIE_WRITABLE,
            MTVEC => self.mtvec = val,
            MSCRATCH => self.mscratch = val,
            MEPC => self.mepc = val,
            MCAUSE => self.mcause = val,
            MISA | MIP | MCYCLE | MCYCLEH | MINSTRET | MINSTRETH | CYCLE | CYCLEH | INSTRET
            | INSTRETH | MHARTID => return Err(CsrError::ReadOnly(addr)),
            _ => return Err(CsrError::Unsupported(addr)),
        }
        Ok(())
    }
}
