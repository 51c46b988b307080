//! RISC-V Trap Cause Codes.
//!
//! This module defines the cause codes written to `mcause`. The most
//! significant bit indicates whether the trap is an interrupt (1) or an
//! exception (0).

/// Bit 31 of `mcause`: set for interrupts.
pub const INTERRUPT_BIT: u32 = 0x8000_0000;

/// Interrupt definitions (MSB = 1).
pub mod interrupt {
    /// Machine software interrupt.
    pub const MACHINE_SOFTWARE: u32 = 0x8000_0003;

    /// Machine timer interrupt.
    pub const MACHINE_TIMER: u32 = 0x8000_0007;

    /// Machine external interrupt.
    pub const MACHINE_EXTERNAL: u32 = 0x8000_000B;
}

/// Exception definitions (MSB = 0).
pub mod exception {
    /// Illegal instruction (2). Never raised: unknown encodings are inert.
    pub const ILLEGAL_INSTRUCTION: u32 = 2;
    /// Breakpoint (3), raised by trigger action 0.
    pub const BREAKPOINT: u32 = 3;
    /// Environment call from M-mode (11).
    pub const ENVIRONMENT_CALL_FROM_M_MODE: u32 = 11;
}
