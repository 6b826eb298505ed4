extern crate self as prismgm_domain;

pub mod catalog;
pub mod entities;
pub mod error;
pub mod ids;
pub mod prisms;
pub mod value_objects;

pub use entities::{CharacterClass, Npc, Player, Spell, SpellLevel};
pub use error::DomainError;
pub use ids::{ClassId, NpcId, PlayerId};

pub use catalog::{aggregate, filter_for_player, CatalogSpell, SpellCache, SpellSource};
pub use prisms::{normalize_name, strict_key, PrismAssignment, PrismTable};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    ability_modifier, armor_class, generate_scores, max_hp, max_strain, proficiency_bonus,
    roll_expression, spell_save_dc, strain_cost, Ability, AbilityScores, DerivedStats,
    DiceExpression, DiceParseError, DiceRollResult, DiceTerm, GenerationMethod, HitDie, Sign,
    TermRoll, DEFAULT_ABILITY_SCORE, POINT_BUY_ARRAY, STANDARD_ARRAY, STRAIN_COSTS,
};
