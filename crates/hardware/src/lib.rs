//! RV32I hart model with RISC-V external debug support.
//!
//! This crate implements a cycle-stepped RV32I hart with Sdext/Sdtrig debug support:
//! 1. **Core:** A multi-cycle fetch/execute/memory FSM, GPRs, and machine-mode CSRs.
//! 2. **Debug:** Debug mode (`dcsr`, `dpc`, `dret`), halt requests, single-step, and four trigger slots.
//! 3. **ISA:** Decoding for RV32I, Zicsr, and the privileged/debug return instructions.
//! 4. **SoC:** Bus interconnect, RAM, the debug ROM, the `tohost` sink, and the handshake adapter.
//! 5. **Simulation:** Multi-hart driver, program loader, configuration, and statistics.

/// Common types and constants (memory map, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Hart core (FSM, arch state, debug, execution units).
pub mod core;
/// Instruction set (decode, instruction fields, RV32I and privileged encodings).
pub mod isa;
/// Multi-hart simulator and program loader.
pub mod sim;
/// System-on-chip (builder, bus, devices, memory, traits).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// One hardware thread; advance it with `Hart::step`.
pub use crate::core::Hart;
/// Multi-hart driver over a shared bus.
pub use crate::sim::Simulator;
/// Top-level system (bus and devices); construct with `System::new`.
pub use crate::soc::System;
