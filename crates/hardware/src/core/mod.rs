//! Core hart implementation.
//!
//! This module contains the hart model: its architectural state, the FSM and
//! decode table, the pure functional units, the debug and trigger logic, and
//! the `Hart` orchestrator that ties them together.

/// Architectural register state (GPRs, CSR map and storage).
pub mod arch;

/// Debug mode (Sdext) and triggers (Sdtrig).
pub mod debug;

/// FSM states, control signals, decode table, and latches.
pub mod fsm;

/// Hart orchestration: step, retirement, traps, and CSR dispatch.
pub mod hart;

/// Execution units (ALU, LSU lane logic).
pub mod units;

pub use self::hart::{BusRequest, Hart, HartInputs, HartOutputs};
