//! # CSR Tests
//!
//! Access control and storage semantics of the CSR file, checked both at the
//! unit level (`Csrs`, `Hart::csr_read`/`csr_write`) and through executed
//! Zicsr instructions.

use pretty_assertions::assert_eq;
use rvdbg_core::common::error::CsrError;
use rvdbg_core::core::arch::csr::*;
use rvdbg_core::core::hart::Hart;
use rvdbg_core::config::CoreConfig;

use crate::common::builder::instruction::InstructionBuilder as I;
use crate::common::harness::TestContext;

#[test]
fn unsupported_address_reads_as_error() {
    let csrs = Csrs::new(0);
    assert_eq!(csrs.read(0x123), Err(CsrError::Unsupported(0x123)));
}

#[test]
fn misa_and_mhartid_are_read_only() {
    let mut csrs = Csrs::new(3);
    assert_eq!(csrs.read(MISA), Ok(MISA_RV32I));
    assert_eq!(csrs.read(MHARTID), Ok(3));
    assert_eq!(csrs.write(MHARTID, 0), Err(CsrError::ReadOnly(MHARTID)));
    assert_eq!(csrs.read(MHARTID), Ok(3));
}

#[test]
fn mie_keeps_machine_interrupt_bits() {
    let mut csrs = Csrs::new(0);
    csrs.write(MIE, 0xFFFF_FFFF).unwrap();
    assert_eq!(csrs.read(MIE), Ok(MIP_MSIP | MIP_MTIP | MIP_MEIP));
}

#[test]
fn cycle_counter_splits_into_halves() {
    let mut csrs = Csrs::new(0);
    csrs.mcycle = 0x0000_0002_FFFF_FFFF;
    assert_eq!(csrs.read(CYCLE), Ok(0xFFFF_FFFF));
    assert_eq!(csrs.read(CYCLEH), Ok(2));
    assert_eq!(csrs.read(MCYCLE), csrs.read(CYCLE));
}

#[test]
fn debug_csrs_hidden_outside_debug_mode() {
    let mut hart = Hart::new(&CoreConfig::default(), 0);
    for addr in [DCSR, DPC, DSCRATCH0, DSCRATCH1] {
        assert_eq!(hart.csr_read(addr), Err(CsrError::DebugOnly(addr)));
        assert_eq!(hart.csr_write(addr, 1), Err(CsrError::DebugOnly(addr)));
    }
}

#[test]
fn reset_halt_exposes_debug_csrs() {
    let config = CoreConfig::default();
    let mut hart = Hart::new(&config, 0);
    hart.reset(true);
    assert_eq!(hart.csr_read(DPC), Ok(config.reset_pc));
    assert_eq!(hart.csr_read(DCSR), Ok(0x4000_0000 | (5 << 6) | 3));
    hart.csr_write(DSCRATCH1, 0x55).unwrap();
    assert_eq!(hart.csr_read(DSCRATCH1), Ok(0x55));
}

#[test]
fn tinfo_reports_supported_types() {
    let mut hart = Hart::new(&CoreConfig::default(), 0);
    assert_eq!(hart.csr_read(TINFO), Ok(0xFC));
    assert_eq!(hart.csr_write(TINFO, 0), Err(CsrError::ReadOnly(TINFO)));
}

#[test]
fn tselect_wraps_to_slot_count() {
    let mut hart = Hart::new(&CoreConfig::default(), 0);
    hart.csr_write(TSELECT, 6).unwrap();
    assert_eq!(hart.csr_read(TSELECT), Ok(2));
}

// ─── Executed Zicsr ────────────────────────────────────────────────────────

#[test]
fn mscratch_round_trip() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().csrrw(0, MSCRATCH, 1).build(),
        I::new().csrrs(2, MSCRATCH, 0).build(),
    ]);
    ctx.set_reg(1, 0xDEAD_BEEF);
    let _ = ctx.run_until_retired(2);

    assert_eq!(ctx.get_reg(2), 0xDEAD_BEEF);
    assert_eq!(ctx.hart().csrs().mscratch, 0xDEAD_BEEF);
}

#[test]
fn set_and_clear_with_x0_only_read() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().csrrw(0, MSCRATCH, 1).build(),
        I::new().csrrc(2, MSCRATCH, 0).build(),
        I::new().csrrsi(3, MSCRATCH, 0).build(),
        I::new().csrrci(4, MSCRATCH, 0x3).build(),
    ]);
    ctx.set_reg(1, 0xF);
    let _ = ctx.run_until_retired(4);

    assert_eq!(ctx.get_reg(2), 0xF);
    assert_eq!(ctx.get_reg(3), 0xF);
    assert_eq!(ctx.get_reg(4), 0xF);
    assert_eq!(ctx.hart().csrs().mscratch, 0xC);
}

#[test]
fn dpc_write_outside_debug_is_dropped() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().csrrw(0, DPC, 1).build(),
        I::new().csrrs(2, DCSR, 0).build(),
        I::new().csrrs(3, 0x7C0, 0).build(),
    ]);
    ctx.set_reg(1, 0x1234);
    ctx.set_reg(2, 0xFFFF);
    ctx.set_reg(3, 0xFFFF);
    let _ = ctx.run_until_retired(3);

    assert_eq!(ctx.hart().debug().dpc, 0);
    assert_eq!(ctx.get_reg(2), 0);
    assert_eq!(ctx.get_reg(3), 0);
}

#[test]
fn minstret_counts_retirements() {
    let nop = I::new().addi(0, 0, 0).build();
    let mut ctx = TestContext::new().load_program(&[
        nop,
        nop,
        nop,
        I::new().csrrs(1, INSTRET, 0).build(),
    ]);
    let _ = ctx.run_until_retired(4);
    assert_eq!(ctx.get_reg(1), 3);
    assert_eq!(ctx.hart().csrs().minstret, 4);
}

#[test]
fn mhartid_matches_hart_index() {
    let mut ctx = TestContext::new().load_program(&[I::new().csrrs(1, MHARTID, 0).build()]);
    ctx.set_reg(1, 0xFF);
    let _ = ctx.run_until_retired(1);
    assert_eq!(ctx.get_reg(1), 0);
}
