//! Infrastructure implementations.
//!
//! Contains port traits and their implementations for external dependencies.

pub mod clock;
pub mod handles;
pub mod in_memory;
pub mod ports;
pub mod scheduler;
pub mod settings;
