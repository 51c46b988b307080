//! Statistics Tests
//!
//! Counters collected while a program runs and their report formats.

use pretty_assertions::assert_eq;
use rvdbg_core::core::debug::dcsr::DebugCause;
use rvdbg_core::stats::HartStats;

use crate::common::builder::instruction::InstructionBuilder as I;
use crate::common::harness::TestContext;

#[test]
fn instruction_mix_is_classified() {
    let mut ctx = TestContext::new().load_program(&[
        I::new().addi(1, 0, 4).build(),
        I::new().sw(5, 1, 0x100).build(),
        I::new().lw(2, 5, 0x100).build(),
        I::new().beq(0, 0, 8).build(),
        0xFFFF_FFFF,
        I::new().csrrs(3, 0xF14, 0).build(),
    ]);
    let base = ctx.base();
    ctx.set_reg(5, base);
    let _ = ctx.run_until_retired(5);
    assert_eq!(ctx.get_reg(2), 4);

    let stats = ctx.hart().stats();
    assert_eq!(stats.instructions_retired, 5);
    assert_eq!(stats.inst_alu, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(stats.inst_system, 1);
    assert_eq!(ctx.hart().csrs().minstret, 5);
}

#[test]
fn cpi_of_idle_hart_is_zero() {
    assert!(HartStats::default().cpi().abs() < f64::EPSILON);
}

#[test]
fn cpi_counts_fsm_steps() {
    let stats = HartStats {
        cycles: 30,
        instructions_retired: 10,
        ..HartStats::default()
    };
    assert!((stats.cpi() - 3.0).abs() < f64::EPSILON);
}

#[test]
fn debug_entries_are_counted_per_cause() {
    let mut stats = HartStats::default();
    stats.record_debug_entry(DebugCause::Ebreak);
    stats.record_debug_entry(DebugCause::Step);
    stats.record_debug_entry(DebugCause::Step);

    assert_eq!(stats.debug_entries.ebreak, 1);
    assert_eq!(stats.debug_entries.step, 2);
    assert_eq!(stats.debug_entries.total(), 3);
}

#[test]
fn json_report_includes_debug_entries() {
    let mut stats = HartStats::default();
    stats.record_debug_entry(DebugCause::Trigger);

    let json: serde_json::Value = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["debug_entries"]["trigger"], 1);
    assert_eq!(json["instructions_retired"], 0);
}

#[test]
fn text_report_lists_every_section() {
    let report = HartStats::default().to_string();
    for heading in ["sim_cycles", "INSTRUCTION MIX", "STALLS", "DEBUG", "entries.resethaltreq"] {
        assert!(report.contains(heading), "missing {heading}");
    }
}
