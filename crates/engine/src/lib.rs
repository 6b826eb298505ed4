//! Prism GM engine - the thin service layer over the domain crate.
//!
//! Storage, the external spell-content source, and the clock are
//! reached only through the port traits in [`infrastructure::ports`];
//! every use case receives its ports by constructor injection.

pub mod infrastructure;
pub mod use_cases;

pub use infrastructure::ports;
