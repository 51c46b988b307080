//! Mock components.

/// Mocked bus device.
pub mod bus;
