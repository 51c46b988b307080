//! ALU Tests
//!
//! Deterministic edge cases for the RV32I arithmetic, shift, and branch
//! operations, plus property checks for wrap-around and comparison.

use proptest::prelude::*;
use rstest::rstest;
use rvdbg_core::core::fsm::signals::AluOp;
use rvdbg_core::core::units::alu::Alu;

const I32_MIN: u32 = 0x8000_0000;
const I32_MAX: u32 = 0x7FFF_FFFF;

fn alu(op: AluOp, a: u32, b: u32) -> u32 {
    Alu::execute(op, a, b).result
}

fn taken(op: AluOp, a: u32, b: u32) -> bool {
    Alu::execute(op, a, b).taken
}

#[test]
fn add_wraps_at_32_bits() {
    assert_eq!(alu(AluOp::Add, u32::MAX, 1), 0);
    assert_eq!(alu(AluOp::Add, I32_MAX, 1), I32_MIN);
}

#[test]
fn sub_wraps_below_zero() {
    assert_eq!(alu(AluOp::Sub, 0, 1), u32::MAX);
}

#[test]
fn shifts_use_low_five_bits() {
    assert_eq!(alu(AluOp::Sll, 1, 33), 2);
    assert_eq!(alu(AluOp::Srl, I32_MIN, 31), 1);
    assert_eq!(alu(AluOp::Sra, I32_MIN, 31), u32::MAX);
}

#[test]
fn set_less_than_signed_and_unsigned() {
    assert_eq!(alu(AluOp::Slt, I32_MIN, I32_MAX), 1);
    assert_eq!(alu(AluOp::Sltu, I32_MIN, I32_MAX), 0);
}

#[test]
fn jalr_clears_bit_zero() {
    assert_eq!(alu(AluOp::Jalr, 0x1_0001, 2), 0x1_0002);
}

#[rstest]
#[case(AluOp::Beq, 5, 5, true)]
#[case(AluOp::Beq, 5, 6, false)]
#[case(AluOp::Bne, 5, 6, true)]
#[case(AluOp::Bne, 5, 5, false)]
#[case(AluOp::Blt, I32_MIN, I32_MAX, true)]
#[case(AluOp::Blt, I32_MAX, I32_MIN, false)]
#[case(AluOp::Bge, I32_MAX, I32_MIN, true)]
#[case(AluOp::Bge, I32_MIN, I32_MAX, false)]
#[case(AluOp::Bge, 7, 7, true)]
#[case(AluOp::Bltu, I32_MAX, I32_MIN, true)]
#[case(AluOp::Bltu, I32_MIN, I32_MAX, false)]
#[case(AluOp::Bgeu, I32_MIN, I32_MAX, true)]
#[case(AluOp::Bgeu, I32_MAX, I32_MIN, false)]
#[case(AluOp::Bgeu, 0, 0, true)]
fn branch_comparisons(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: bool) {
    assert_eq!(taken(op, a, b), expected);
}

#[test]
fn non_branch_ops_never_take() {
    assert!(!taken(AluOp::Add, 1, 1));
    assert!(!taken(AluOp::Jalr, 1, 1));
}

proptest! {
    #[test]
    fn add_is_modular(a: u32, b: u32) {
        prop_assert_eq!(alu(AluOp::Add, a, b), ((u64::from(a) + u64::from(b)) % (1 << 32)) as u32);
    }

    #[test]
    fn sub_inverts_add(a: u32, b: u32) {
        prop_assert_eq!(alu(AluOp::Sub, alu(AluOp::Add, a, b), b), a);
    }

    #[test]
    fn branch_flags_match_comparisons(a: u32, b: u32) {
        prop_assert_eq!(taken(AluOp::Beq, a, b), a == b);
        prop_assert_eq!(taken(AluOp::Bne, a, b), a != b);
        prop_assert_eq!(taken(AluOp::Blt, a, b), (a as i32) < (b as i32));
        prop_assert_eq!(taken(AluOp::Bge, a, b), (a as i32) >= (b as i32));
        prop_assert_eq!(taken(AluOp::Bltu, a, b), a < b);
        prop_assert_eq!(taken(AluOp::Bgeu, a, b), a >= b);
    }
}
