//! Domain entities - objects with identity and lifecycle

pub mod character_class;
pub mod npc;
pub mod player;
pub mod spell;

pub use character_class::CharacterClass;
pub use npc::Npc;
pub use player::{Player, MAX_SPELL_LEVEL};
pub use spell::{Spell, SpellLevel};
