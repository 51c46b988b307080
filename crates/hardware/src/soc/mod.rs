//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components that make up the simulated system:
//! the shared bus, RAM, the debug ROM, the `tohost` sink, the per-hart
//! handshake adapter, and the builder that assembles them.

/// System builder for assembling SoC components.
pub mod builder;

/// Memory-mapped device implementations.
pub mod devices;

/// System bus interconnect and routing.
pub mod interconnect;

/// On-chip RAM.
pub mod memory;

/// Hart-to-bus handshake adapter.
pub mod port;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use builder::System;
pub use port::BusPort;
