//! Execution units.
//!
//! This module contains the pure functional units the hart FSM calls once
//! per step: the ALU/branch comparator and the load/store lane logic.

/// Arithmetic Logic Unit for integer operations and branch compares.
pub mod alu;

/// Load/Store Unit lane extraction and merge.
pub mod lsu;
