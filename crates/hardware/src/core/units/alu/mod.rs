//! Arithmetic Logic Unit (ALU) and branch comparator.
//!
//! This module implements the integer ALU of the hart. It is a pure function
//! over two 32-bit operands and an operation code, producing a 32-bit result
//! and a branch-taken flag. Arithmetic wraps (no overflow trap).
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Jalr target
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra
//! - [`branch`]:     Beq, Bne, Blt, Bge, Bltu, Bgeu

/// Integer arithmetic operations (add, subtract, jump target).
pub mod arithmetic;

/// Branch comparisons (taken flag).
pub mod branch;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::core::fsm::signals::AluOp;

/// Result of one ALU evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluOutput {
    /// 32-bit result (zero for branch comparisons).
    pub result: u32,
    /// Branch-taken flag (false for non-branch operations).
    pub taken: bool,
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (low 5 bits are the shift amount)
    ///
    /// # Returns
    ///
    /// The result word and the branch-taken flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvdbg_core::core::units::alu::Alu;
    /// use rvdbg_core::core::fsm::signals::AluOp;
    ///
    /// // Wraparound addition
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1).result, 0);
    ///
    /// // Signed comparison
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10).result, 1);
    ///
    /// // Branch flag
    /// assert!(Alu::execute(AluOp::Bltu, 0x7FFF_FFFF, 0x8000_0000).taken);
    ///
    /// // jalr clears bit 0 of the target
    /// assert_eq!(Alu::execute(AluOp::Jalr, 0x1001, 0x10).result, 0x1010);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> AluOutput {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Jalr => AluOutput {
                result: arithmetic::execute(op, a, b),
                taken: false,
            },

            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => AluOutput {
                result: logic::execute(op, a, b),
                taken: false,
            },

            AluOp::Sll | AluOp::Srl | AluOp::Sra => AluOutput {
                result: shifts::execute(op, a, b),
                taken: false,
            },

            AluOp::Beq | AluOp::Bne | AluOp::Blt | AluOp::Bge | AluOp::Bltu | AluOp::Bgeu => {
                AluOutput {
                    result: 0,
                    taken: branch::taken(op, a, b),
                }
            }
        }
    }
}
