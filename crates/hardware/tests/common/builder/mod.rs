//! Fluent builders for test inputs.
