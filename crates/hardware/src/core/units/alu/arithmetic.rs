//! ALU arithmetic operations.
//!
//! Two's-complement wraparound addition and subtraction, plus the `jalr`
//! target computation which clears bit 0 of the sum.

use crate::core::fsm::signals::AluOp;

/// Mask that clears the least-significant bit of a jump target.
const JALR_TARGET_MASK: u32 = !1;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 32-bit result. Returns `0` for non-arithmetic opcodes.
pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Jalr => a.wrapping_add(b) & JALR_TARGET_MASK,
        _ => 0,
    }
}
