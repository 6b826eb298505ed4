//! Persistence adapters.
//!
//! The hosted backend lives behind the repo ports; this module provides
//! the in-memory implementation used by tests and as the generic
//! key/value fallback.

pub mod memory;

pub use memory::{
    InMemoryClassRepo, InMemoryNpcRepo, InMemoryPlayerRepo, InMemoryPrismTableRepo,
    InMemorySpellRepo,
};
