//! Common utilities and types used throughout the hart model.
//!
//! This module provides fundamental building blocks that are shared across all
//! components. It includes:
//! 1. **Constants:** Memory map, debug entry, and instruction field constants.
//! 2. **Error Handling:** CSR/decode outcomes and host-side errors.

/// Common constants used throughout the model.
pub mod constants;

/// Error types and silent-outcome definitions.
pub mod error;

pub use constants::{DEBUG_ENTRY_POINT, RAM_BASE, RAM_SIZE, RESET_PC, TOHOST_ADDR};
pub use error::{CsrError, DecodeError, SimError};
