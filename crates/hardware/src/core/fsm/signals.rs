//! Control signals and operation types.
//!
//! This module defines the signals the decode table produces for one
//! instruction. It performs:
//! 1. **Operation Classification:** Categorizes ALU, CSR, and system operations.
//! 2. **Operand Selection:** Defines sources for ALU inputs (registers, PC, or immediates).
//! 3. **Memory Control:** Specifies access widths and sign-extension requirements.
//! 4. **Writeback Control:** Selects what is written to `rd` and how the PC advances.
//!
//! Signals are regenerated every step from the instruction latch and never
//! stored across steps.

/// ALU operation types.
///
/// The branch variants produce the taken flag; `Jalr` adds and clears bit 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also the default).
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,

    /// Branch if equal.
    Beq,

    /// Branch if not equal.
    Bne,

    /// Branch if less than (signed).
    Blt,

    /// Branch if greater or equal (signed).
    Bge,

    /// Branch if less than unsigned.
    Bltu,

    /// Branch if greater or equal unsigned.
    Bgeu,

    /// Jump target computation: `(a + b) & !1`.
    Jalr,
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// 8-bit byte access.
    Byte,

    /// 16-bit half-word access.
    Half,

    /// 32-bit word access.
    #[default]
    Word,
}

/// Memory operation requested by an instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemOp {
    /// No memory access.
    #[default]
    None,

    /// Load of the given width.
    Load {
        /// Access width.
        width: MemWidth,
        /// Sign-extend the loaded value.
        signed: bool,
    },

    /// Store of the given width.
    Store {
        /// Access width.
        width: MemWidth,
    },
}

impl MemOp {
    /// Returns true for a store narrower than a word, which needs a read phase first.
    pub const fn needs_rmw(self) -> bool {
        matches!(
            self,
            Self::Store {
                width: MemWidth::Byte | MemWidth::Half
            }
        )
    }
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use `rs1` register value.
    #[default]
    Reg1,

    /// Use program counter value.
    Pc,

    /// Use zero.
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use sign-extended immediate value.
    #[default]
    Imm,

    /// Use `rs2` register value.
    Reg2,
}

/// Writeback source for the destination register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WbSel {
    /// ALU result.
    #[default]
    Alu,

    /// Loaded (lane-extracted) memory data.
    Mem,

    /// Return address `inst_pc + 4`.
    PcPlus4,

    /// Old CSR value.
    Csr,
}

/// How the PC advances on ordinary retirement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PcSel {
    /// `inst_pc + 4`.
    #[default]
    Next,

    /// `inst_pc + imm` when the branch flag is set, otherwise `inst_pc + 4`.
    Branch,

    /// PC taken from the ALU result (`jal`, `jalr`).
    Alu,
}

/// CSR (Control and Status Register) command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CsrOp {
    /// No CSR operation.
    #[default]
    None,

    /// Write operand (`CSRRW`, `CSRRWI`).
    Write,

    /// Set operand bits (`CSRRS`, `CSRRSI`).
    Set,

    /// Clear operand bits (`CSRRC`, `CSRRCI`).
    Clear,
}

/// System instruction class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SystemOp {
    /// Not a system instruction.
    #[default]
    None,

    /// `ECALL`.
    Ecall,

    /// `EBREAK`.
    Ebreak,

    /// `MRET`.
    Mret,

    /// `DRET`.
    Dret,

    /// `FENCE.I` (no instruction cache, so it only retires).
    FenceI,
}

/// Control signals for one instruction.
///
/// The `Default` value is the inert set used for unrecognised encodings:
/// no register, memory, or CSR side effect and `pc += 4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
    /// Memory operation.
    pub mem: MemOp,
    /// Writeback source.
    pub wb: WbSel,
    /// PC update selection.
    pub pc_sel: PcSel,
    /// CSR command.
    pub csr_op: CsrOp,
    /// CSR operand comes from the 5-bit `zimm` field instead of `rs1`.
    pub csr_imm: bool,
    /// CSR address for CSR operations.
    pub csr_addr: u32,
    /// System instruction class.
    pub system: SystemOp,
}
