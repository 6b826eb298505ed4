//! Use cases - the operations the UI routes call.
//!
//! Each use case wraps the ports it needs and exposes typed operations
//! with its own error enum.

pub mod classes;
pub mod npc_generation;
pub mod players;
pub mod prism_assignment;
pub mod spell_catalog;

pub use classes::{ClassError, ClassOps, CreateClassInput};
pub use npc_generation::{GenerateNpcInput, NpcError, NpcOps};
pub use players::{CreatePlayerInput, PlayerError, PlayerOps, UpdatePlayerInput};
pub use prism_assignment::{PrismError, PrismOps};
pub use spell_catalog::{CatalogError, SpellCatalogOps};
