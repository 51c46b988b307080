//! Decode Table.
//!
//! Maps a 32-bit instruction to the control signals that drive the ALU, data
//! port, register writeback, CSR command, and PC update. The table covers:
//! 1. **RV32I:** register-register and register-immediate ALU ops, loads, stores,
//!    branches, `jal`/`jalr`, `lui`/`auipc`, and `fence`.
//! 2. **Zicsr:** all six CSR instructions.
//! 3. **System:** `ecall`, `ebreak`, `mret`, `dret`, and `fence.i`.
//!
//! Anything else is reported as a `DecodeError`; the FSM replaces it with the
//! inert `ControlSignals::default()`.

use crate::common::error::DecodeError;
use crate::core::fsm::signals::{
    AluOp, ControlSignals, CsrOp, MemOp, MemWidth, OpASrc, OpBSrc, PcSel, SystemOp, WbSel,
};
use crate::isa::decode::decode as instruction_decode;
use crate::isa::privileged::opcodes as sys_ops;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Decodes an instruction into its control signals.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction.
///
/// # Returns
///
/// The control signals, or a `DecodeError` describing why the encoding is not
/// part of the implemented table.
pub fn control_signals(inst: u32) -> Result<ControlSignals, DecodeError> {
    let d = instruction_decode(inst);
    let mut c = ControlSignals::default();

    match d.opcode {
        opcodes::OP_LUI => {
            c.reg_write = true;
            c.a_src = OpASrc::Zero;
        }
        opcodes::OP_AUIPC => {
            c.reg_write = true;
            c.a_src = OpASrc::Pc;
        }
        opcodes::OP_JAL => {
            c.reg_write = true;
            c.a_src = OpASrc::Pc;
            c.wb = WbSel::PcPlus4;
            c.pc_sel = PcSel::Alu;
        }
        opcodes::OP_JALR => {
            if d.funct3 != funct3::JALR {
                return Err(DecodeError::UnknownFunction(inst));
            }
            c.reg_write = true;
            c.alu = AluOp::Jalr;
            c.wb = WbSel::PcPlus4;
            c.pc_sel = PcSel::Alu;
        }
        opcodes::OP_BRANCH => {
            c.b_src = OpBSrc::Reg2;
            c.pc_sel = PcSel::Branch;
            c.alu = match d.funct3 {
                funct3::BEQ => AluOp::Beq,
                funct3::BNE => AluOp::Bne,
                funct3::BLT => AluOp::Blt,
                funct3::BGE => AluOp::Bge,
                funct3::BLTU => AluOp::Bltu,
                funct3::BGEU => AluOp::Bgeu,
                _ => return Err(DecodeError::UnknownFunction(inst)),
            };
        }
        opcodes::OP_LOAD => {
            c.reg_write = true;
            c.wb = WbSel::Mem;
            let (width, signed) = match d.funct3 {
                funct3::LB => (MemWidth::Byte, true),
                funct3::LH => (MemWidth::Half, true),
                funct3::LW => (MemWidth::Word, true),
                funct3::LBU => (MemWidth::Byte, false),
                funct3::LHU => (MemWidth::Half, false),
                _ => return Err(DecodeError::UnknownFunction(inst)),
            };
            c.mem = MemOp::Load { width, signed };
        }
        opcodes::OP_STORE => {
            let width = match d.funct3 {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                _ => return Err(DecodeError::UnknownFunction(inst)),
            };
            c.mem = MemOp::Store { width };
        }
        opcodes::OP_IMM => {
            c.reg_write = true;
            c.alu = match d.funct3 {
                funct3::ADD_SUB => AluOp::Add,
                funct3::SLT => AluOp::Slt,
                funct3::SLTU => AluOp::Sltu,
                funct3::XOR => AluOp::Xor,
                funct3::OR => AluOp::Or,
                funct3::AND => AluOp::And,
                funct3::SLL if d.funct7 == funct7::DEFAULT => AluOp::Sll,
                funct3::SRL_SRA if d.funct7 == funct7::DEFAULT => AluOp::Srl,
                funct3::SRL_SRA if d.funct7 == funct7::SRA => AluOp::Sra,
                _ => return Err(DecodeError::UnknownFunction(inst)),
            };
        }
        opcodes::OP_REG => {
            c.reg_write = true;
            c.b_src = OpBSrc::Reg2;
            c.alu = match (d.funct3, d.funct7) {
                (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
                (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
                (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
                (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
                (funct3::OR, funct7::DEFAULT) => AluOp::Or,
                (funct3::AND, funct7::DEFAULT) => AluOp::And,
                _ => return Err(DecodeError::UnknownFunction(inst)),
            };
        }
        opcodes::OP_MISC_MEM => match d.funct3 {
            // Single hart, no store buffer: FENCE only retires.
            funct3::FENCE => {}
            funct3::FENCE_I => c.system = SystemOp::FenceI,
            _ => return Err(DecodeError::UnknownFunction(inst)),
        },
        sys_ops::OP_SYSTEM => decode_system(inst, d.funct3, &mut c)?,
        _ => return Err(DecodeError::UnknownOpcode(inst)),
    }

    Ok(c)
}

/// Decodes the SYSTEM opcode space (privileged instructions and Zicsr).
fn decode_system(inst: u32, f3: u32, c: &mut ControlSignals) -> Result<(), DecodeError> {
    if f3 == sys_ops::PRIV {
        c.system = match inst {
            sys_ops::ECALL => SystemOp::Ecall,
            sys_ops::EBREAK => SystemOp::Ebreak,
            sys_ops::MRET => SystemOp::Mret,
            sys_ops::DRET => SystemOp::Dret,
            // Interrupts are sampled every fetch, so WFI completes as a no-op.
            sys_ops::WFI => SystemOp::None,
            _ => return Err(DecodeError::UnknownFunction(inst)),
        };
        return Ok(());
    }

    let (op, imm) = match f3 {
        sys_ops::CSRRW => (CsrOp::Write, false),
        sys_ops::CSRRS => (CsrOp::Set, false),
        sys_ops::CSRRC => (CsrOp::Clear, false),
        sys_ops::CSRRWI => (CsrOp::Write, true),
        sys_ops::CSRRSI => (CsrOp::Set, true),
        sys_ops::CSRRCI => (CsrOp::Clear, true),
        _ => return Err(DecodeError::UnknownFunction(inst)),
    };
    c.reg_write = true;
    c.wb = WbSel::Csr;
    c.csr_op = op;
    c.csr_imm = imm;
    c.csr_addr = inst >> 20;
    Ok(())
}
