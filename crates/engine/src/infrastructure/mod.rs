//! Infrastructure boundaries: port traits and adapters.

pub mod persistence;
pub mod ports;
