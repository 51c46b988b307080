//! Simulation driver and program loading.
//!
//! Provides the multi-hart `Simulator` and the loaders that place test
//! programs into memory.

/// ELF, Verilog hex, and raw binary loading.
pub mod loader;

/// Multi-hart tick driver.
pub mod simulator;

pub use simulator::{ControlLines, RunOutcome, Simulator};
