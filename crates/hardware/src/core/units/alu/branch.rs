//! Branch comparator.
//!
//! Produces the taken flag for the six conditional branches. Signed
//! comparisons interpret both operands as `i32`, unsigned ones as `u32`.

use crate::core::fsm::signals::AluOp;

/// Evaluates a branch condition.
///
/// # Arguments
///
/// * `op` - One of the branch variants of `AluOp`.
/// * `a`  - Value of `rs1`.
/// * `b`  - Value of `rs2`.
///
/// # Returns
///
/// `true` if the branch is taken. Non-branch opcodes are never taken.
pub const fn taken(op: AluOp, a: u32, b: u32) -> bool {
    match op {
        AluOp::Beq => a == b,
        AluOp::Bne => a != b,
        AluOp::Blt => (a as i32) < (b as i32),
        AluOp::Bge => (a as i32) >= (b as i32),
        AluOp::Bltu => a < b,
        AluOp::Bgeu => a >= b,
        _ => false,
    }
}
