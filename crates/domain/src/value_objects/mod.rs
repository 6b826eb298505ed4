//! Value objects - immutable domain values with no identity

pub mod ability;
pub mod derivation;
pub mod dice;
pub mod strain;

pub use ability::{
    generate_scores, roll_ability_score, Ability, AbilityScores, GenerationMethod,
    DEFAULT_ABILITY_SCORE, POINT_BUY_ARRAY, STANDARD_ARRAY,
};
pub use derivation::{
    ability_modifier, armor_class, max_hp, max_strain, proficiency_bonus, spell_save_dc,
    DerivedStats, HitDie, MAX_LEVEL, MIN_LEVEL,
};
pub use dice::{
    roll_expression, DiceExpression, DiceParseError, DiceRollResult, DiceTerm, Sign, TermRoll,
    MAX_DICE_PER_GROUP, MAX_DIE_SIDES, MAX_FLAT_MODIFIER,
};
pub use strain::{strain_cost, STRAIN_COSTS};
