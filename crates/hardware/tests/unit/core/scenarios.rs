//! # Program Scenarios
//!
//! Short programs run end to end on hart 0 with a zero-latency bus.

use rstest::rstest;
use rvdbg_core::core::arch::csr::{MSTATUS, MSTATUS_MIE, MSTATUS_MPIE, MTVEC, TDATA1};
use rvdbg_core::core::debug::dcsr::DebugCause;
use rvdbg_core::core::fsm::FsmState;
use rvdbg_core::isa::privileged::opcodes::{DRET, ECALL, MRET};

use crate::common::builder::instruction::InstructionBuilder as I;
use crate::common::harness::TestContext;

#[test]
fn scenario_a_straight_line_arithmetic() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().addi(1, 0, 10).build(),
        I::new().addi(2, 0, 20).build(),
        I::new().add(3, 1, 2).build(),
    ]);
    let _ = ctx.run_until_retired(3);

    assert_eq!(ctx.get_reg(3), 30);
    assert_eq!(ctx.hart().stats().instructions_retired, 3);
    assert_eq!(ctx.hart().pc(), ctx.base() + 12);
    assert_eq!(ctx.hart().state(), FsmState::Fetch);
}

#[rstest]
#[case(0, 0x1122_33AB)]
#[case(1, 0x1122_AB44)]
#[case(2, 0x11AB_3344)]
#[case(3, 0xAB22_3344)]
fn scenario_b_byte_store_merges_one_lane(#[case] offset: i32, #[case] expected: u32) {
    let mut ctx = TestContext::new().load_program(&[
        I::new().sb(2, 1, offset).build(),
        I::new().lw(3, 2, 0).build(),
    ]);
    let data = ctx.base() + 0x100;
    ctx.write_words(data, &[0x1122_3344]);
    ctx.set_reg(1, 0xFFFF_FFAB);
    ctx.set_reg(2, data);
    let _ = ctx.run_until_retired(2);

    assert_eq!(ctx.get_reg(3), expected);
    assert_eq!(ctx.read_word(data), expected);
}

#[test]
fn scenario_c_halt_request_and_dret() {
    let addi = I::new().addi(1, 1, 1).build();
    let mut ctx = TestContext::new()
        .load_program(&[addi, addi, addi, addi])
        .program_buffer(&[DRET]);
    let base = ctx.base();

    let _ = ctx.run_until_retired(1);
    ctx.lines().haltreq = true;
    let out = ctx.run_until_retired(1);

    assert!(out.debug_mode);
    assert!(ctx.hart().in_debug_mode());
    assert_eq!(ctx.hart().debug().dcsr.cause, Some(DebugCause::HaltReq));
    assert_eq!(ctx.hart().debug().dpc, base + 8);
    assert_eq!(ctx.hart().pc(), ctx.sim.config().core.debug_entry);
    assert_eq!(ctx.get_reg(1), 2);

    ctx.lines().haltreq = false;
    let _ = ctx.run_until_retired(1);

    assert!(!ctx.hart().in_debug_mode());
    assert_eq!(ctx.hart().pc(), base + 8);

    let _ = ctx.run_until_retired(2);
    assert_eq!(ctx.get_reg(1), 4);
}

#[test]
fn scenario_d_icount_fires_after_nth_retirement() {
    const N: u32 = 3;
    let addi = I::new().addi(1, 1, 1).build();
    let mut ctx = TestContext::new().load_program(&[
        I::new().csrrw(0, TDATA1, 5).build(),
        addi,
        addi,
        addi,
        addi,
        addi,
    ]);
    let base = ctx.base();
    // icount, count = N, action = debug.
    ctx.set_reg(5, (3 << 28) | (N << 10) | (1 << 6));

    let out = ctx.run_until_retired(1);
    assert!(!out.trigger.fire);

    let mut retired = 0;
    let mut fired_at = None;
    for _ in 0..200 {
        let out = ctx.tick();
        if out.instruction_retired {
            retired += 1;
        }
        if out.trigger.fire && fired_at.is_none() {
            assert!(out.instruction_retired, "fire must coincide with a retirement");
            fired_at = Some(retired);
        }
        if ctx.hart().in_debug_mode() {
            break;
        }
    }

    assert_eq!(fired_at, Some(N));
    assert_eq!(ctx.get_reg(1), N);
    assert_eq!(ctx.hart().debug().dcsr.cause, Some(DebugCause::Trigger));
    assert_eq!(ctx.hart().debug().dpc, base + 4 * (N + 1));
    assert!(!ctx.hart().triggers().slots[0].icount_pending);
}

#[test]
fn scenario_e_ecall_and_mret() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().csrrw(0, MTVEC, 6).build(),
        I::new().csrrsi(0, MSTATUS, MSTATUS_MIE).build(),
        ECALL,
        I::new().addi(1, 0, 7).build(),
    ]);
    let base = ctx.base();
    let handler = base + 0x200;
    ctx.write_words(handler, &[MRET]);
    ctx.set_reg(6, handler);

    let _ = ctx.run_until_retired(3);
    let csrs = ctx.hart().csrs();
    assert_eq!(csrs.mcause, 11);
    assert_eq!(csrs.mepc, base + 8 + 4);
    assert_eq!(csrs.mstatus & MSTATUS_MIE, 0);
    assert_eq!(csrs.mstatus & MSTATUS_MPIE, MSTATUS_MPIE);
    assert_eq!(ctx.hart().pc(), handler);

    let _ = ctx.run_until_retired(1);
    let csrs = ctx.hart().csrs();
    assert_eq!(csrs.mstatus & MSTATUS_MIE, MSTATUS_MIE);
    assert_eq!(ctx.hart().pc(), base + 12);

    let _ = ctx.run_until_retired(1);
    assert_eq!(ctx.get_reg(1), 7);
}
