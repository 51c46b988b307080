//! # Hart Core
//!
//! Tests for the ALU and load/store lanes, the CSR file, the FSM's step
//! sequencing, the debug-mode priority chain, traps, and triggers.

/// ALU arithmetic and branch comparison tests.
pub mod alu;

/// Byte/halfword lane extraction and merge tests.
pub mod lsu;

/// CSR access control and counter tests.
pub mod csr;

/// End-to-end program scenarios on one hart.
pub mod scenarios;
