//! RISC-V architecture-specific components.
//!
//! This module contains the architectural register state of a hart.
//! It includes the following modules:
//! 1. **CSRs:** Control and Status Register map and machine-mode storage.
//! 2. **GPRs:** General-Purpose Register file implementation.

/// Control and Status Register (CSR) definitions and access logic.
pub mod csr;

/// General-Purpose Register file implementation.
pub mod gpr;
