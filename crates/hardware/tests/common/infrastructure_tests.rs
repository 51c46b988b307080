use super::builder::instruction::InstructionBuilder;
use super::harness::TestContext;
use rvdbg_core::isa::decode::decode;
use rvdbg_core::isa::rv32i::opcodes::*;

// ─── InstructionBuilder encodings ──────────────────────────────────────────

#[test]
fn builder_add_encodes_r_type() {
    let inst = InstructionBuilder::new().add(1, 2, 3).build();
    assert_eq!(inst & 0x7F, OP_REG);
    assert_eq!((inst >> 7) & 0x1F, 1);
    assert_eq!((inst >> 15) & 0x1F, 2);
    assert_eq!((inst >> 20) & 0x1F, 3);
    assert_eq!(inst >> 25, 0);
}

#[test]
fn builder_immediates_survive_decode() {
    let cases = [
        (InstructionBuilder::new().addi(1, 0, -7).build(), -7),
        (InstructionBuilder::new().sw(2, 1, -12).build(), -12),
        (InstructionBuilder::new().beq(1, 2, -4).build(), -4),
        (InstructionBuilder::new().jal(0, 2048).build(), 2048),
    ];
    for (inst, imm) in cases {
        assert_eq!(decode(inst).imm, imm, "inst {inst:#010x}");
    }
}

#[test]
fn builder_known_encodings() {
    assert_eq!(InstructionBuilder::new().addi(1, 0, 10).build(), 0x00A0_0093);
    assert_eq!(InstructionBuilder::new().csrrs(5, 0x340, 0).build(), 0x3400_22F3);
}

// ─── TestContext ───────────────────────────────────────────────────────────

#[test]
fn context_loads_at_reset_pc() {
    let inst = InstructionBuilder::new().addi(1, 0, 1).build();
    let mut ctx = TestContext::new().load_program(&[inst]);
    let base = ctx.base();
    assert_eq!(ctx.read_word(base), inst);
    assert_eq!(ctx.hart().pc(), base);
}
