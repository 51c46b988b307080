//! Error and outcome types.
//!
//! The hart itself never aborts: unsupported CSRs, unrecognised encodings and
//! protected debug registers all resolve to silent hardware behaviour. This
//! module still models those outcomes explicitly so unit-level callers (and
//! the test-suite) can tell them apart:
//! 1. **CSR access:** `CsrError` for unsupported, read-only, or debug-only addresses.
//! 2. **Decode:** `DecodeError` for encodings outside the implemented RV32I table.
//! 3. **Host side:** `SimError` for loader, configuration, and I/O failures.

use std::io;

use thiserror::Error;

/// Outcome of a CSR access that the hardware silently ignores.
///
/// Reads that fail are observed as `0`; writes that fail are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CsrError {
    /// No CSR is implemented at this address.
    #[error("unsupported CSR {0:#05x}")]
    Unsupported(u32),

    /// The CSR exists but is read-only (counters, `mhartid`, `misa`, `mip`, `tinfo`).
    #[error("CSR {0:#05x} is read-only")]
    ReadOnly(u32),

    /// The CSR is only visible while the hart is in debug mode.
    #[error("CSR {0:#05x} is only accessible in debug mode")]
    DebugOnly(u32),
}

/// Outcome of decoding an instruction outside the implemented table.
///
/// The control unit replaces these with an inert control-signal set rather
/// than raising an illegal-instruction trap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The major opcode is not part of RV32I/Zicsr/privileged.
    #[error("unrecognised opcode in {0:#010x}")]
    UnknownOpcode(u32),

    /// The opcode is known but the funct3/funct7 combination is not.
    #[error("unrecognised function field in {0:#010x}")]
    UnknownFunction(u32),
}

/// Host-side failures: program loading, configuration, and I/O.
#[derive(Debug, Error)]
pub enum SimError {
    /// Reading a program or configuration file failed.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The ELF image could not be parsed.
    #[error("invalid ELF image: {0}")]
    Elf(#[from] object::Error),

    /// The ELF image targets something other than little-endian RV32.
    #[error("unsupported ELF image: {0}")]
    UnsupportedElf(&'static str),

    /// A Verilog hex file contained an unparsable token.
    #[error("hex file line {line}: invalid token '{token}'")]
    Hex {
        /// One-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// A loaded segment does not fit into any device on the bus.
    #[error("segment at {addr:#010x} ({len} bytes) is not backed by memory")]
    Unmapped {
        /// Segment start address.
        addr: u32,
        /// Segment length in bytes.
        len: usize,
    },

    /// The JSON configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
