//! Core finite-state machine.
//!
//! The hart sequences every instruction through a small set of states. This
//! module provides:
//! 1. **States:** `FsmState`, one per hart at any time.
//! 2. **Signals:** the control-signal types produced by decode.
//! 3. **Decode table:** the pure instruction-to-signals mapping.
//! 4. **Latches:** instruction and memory-operation latches.

/// Pure instruction-to-control-signal decode table.
pub mod control;

/// Instruction and memory-operation latches.
pub mod latches;

/// Control-signal types.
pub mod signals;

/// FSM state of a hart.
///
/// The reset state is `Fetch`. Bus handshakes are modelled by holding a
/// state across steps until the adapter signals completion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FsmState {
    /// Issue an instruction fetch for `pc`.
    #[default]
    Fetch,

    /// Fetch outstanding; waits for the fetch-valid handshake.
    WaitFetch,

    /// Instruction latched; decode, execute, and resolve or dispatch a memory access.
    FetchDone,

    /// Data read outstanding (load, or read half of a sub-word store).
    MemRead,

    /// Data write outstanding; waits for the write-ready handshake.
    MemWrite,

    /// One-step landing state for load writeback.
    MemDone,
}
