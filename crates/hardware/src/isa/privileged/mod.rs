//! Privileged Architecture Definitions.
//!
//! Defines constants for the RISC-V Privileged and Debug Specifications,
//! including trap causes and system opcodes.
//!
//! # Modules
//!
//! - `cause`: Exception and interrupt cause codes.
//! - `opcodes`: System instruction encodings (ECALL, EBREAK, MRET, DRET, CSR*).

/// Exception and interrupt cause code definitions.
pub mod cause;

/// System instruction opcodes (ECALL, EBREAK, MRET, DRET, CSR).
pub mod opcodes;
