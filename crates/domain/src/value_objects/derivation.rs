//! Derived character statistics
//!
//! Hit points, armor class, spell-save DC, and maximum Strain, computed
//! from ability scores, a class hit die, and a level. All pure functions.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Ability, AbilityScores};

/// Minimum and maximum character level.
pub const MIN_LEVEL: i32 = 1;
pub const MAX_LEVEL: i32 = 20;

/// Hit die size of a character class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitDie {
    D6,
    D8,
    D10,
    D12,
}

impl HitDie {
    pub fn sides(self) -> i32 {
        match self {
            HitDie::D6 => 6,
            HitDie::D8 => 8,
            HitDie::D10 => 10,
            HitDie::D12 => 12,
        }
    }

    /// Average-roll HP gained per level past the first, before the
    /// constitution modifier: `floor(sides / 2) + 1`.
    pub fn average_roll(self) -> i32 {
        self.sides() / 2 + 1
    }
}

impl TryFrom<i32> for HitDie {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(HitDie::D6),
            8 => Ok(HitDie::D8),
            10 => Ok(HitDie::D10),
            12 => Ok(HitDie::D12),
            other => Err(DomainError::validation(format!(
                "Hit die must be 6, 8, 10, or 12, got {other}"
            ))),
        }
    }
}

/// The modifier for an ability score: `floor((score - 10) / 2)`.
///
/// `div_euclid` floors toward negative infinity, so a score of 9 gives -1
/// rather than the 0 that truncating division would produce.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Proficiency bonus for a level: `ceil(level / 4) + 1`.
/// 2 at levels 1-4, 3 at 5-8, up to 6 at 17-20.
pub fn proficiency_bonus(level: i32) -> i32 {
    (level + 3) / 4 + 1
}

/// Maximum hit points: the full hit die plus constitution modifier at
/// level 1, then the average roll plus constitution modifier per further
/// level. Never below 1, however negative the modifier.
pub fn max_hp(hit_die: HitDie, con_modifier: i32, level: i32) -> i32 {
    let first_level = hit_die.sides() + con_modifier;
    let per_level = hit_die.average_roll() + con_modifier;
    (first_level + (level - 1) * per_level).max(1)
}

/// Armor class: `10 + dexterity modifier`. No equipment modeling.
pub fn armor_class(dex_modifier: i32) -> i32 {
    10 + dex_modifier
}

/// Spell-save DC: `8 + proficiency bonus + primary ability modifier`.
pub fn spell_save_dc(level: i32, primary_modifier: i32) -> i32 {
    8 + proficiency_bonus(level) + primary_modifier
}

/// Maximum Strain pool: `constitution modifier + level`.
///
/// Deliberately unfloored; a sickly low-level caster can have a zero or
/// negative pool.
pub fn max_strain(con_modifier: i32, level: i32) -> i32 {
    con_modifier + level
}

/// Derived statistics of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub hp: i32,
    pub ac: i32,
    pub dc: i32,
    pub max_strain: i32,
}

impl DerivedStats {
    /// Compute all derived stats in one pass.
    ///
    /// The primary ability is the first entry of the class's stat
    /// priority; a class with an empty priority list has no primary
    /// ability and contributes a modifier of 0 to the DC.
    pub fn derive(
        abilities: &AbilityScores,
        hit_die: HitDie,
        stat_priority: &[Ability],
        level: i32,
    ) -> Self {
        let con = abilities.modifier(Ability::Constitution);
        let dex = abilities.modifier(Ability::Dexterity);
        let primary = stat_priority
            .first()
            .map(|ability| abilities.modifier(*ability))
            .unwrap_or(0);

        Self {
            hp: max_hp(hit_die, con, level),
            ac: armor_class(dex),
            dc: spell_save_dc(level, primary),
            max_strain: max_strain(con, level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_floors_toward_negative_infinity() {
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(1), -5);
    }

    #[test]
    fn modifier_matches_floor_formula_over_full_range() {
        for score in 1..=30 {
            let expected = ((f64::from(score) - 10.0) / 2.0).floor() as i32;
            assert_eq!(ability_modifier(score), expected, "score {score}");
        }
    }

    #[test]
    fn proficiency_bonus_tiers() {
        for (level, expected) in [(1, 2), (4, 2), (5, 3), (8, 3), (9, 4), (13, 5), (17, 6), (20, 6)]
        {
            assert_eq!(proficiency_bonus(level), expected, "level {level}");
        }
    }

    #[test]
    fn hp_at_level_one() {
        assert_eq!(max_hp(HitDie::D8, 2, 1), 10);
    }

    #[test]
    fn hp_uses_average_roll_per_level() {
        // 10 at level 1, then 3 levels of (4 + 1 + 2)
        assert_eq!(max_hp(HitDie::D8, 2, 4), 31);
        assert_eq!(max_hp(HitDie::D12, 0, 5), 12 + 4 * 7);
    }

    #[test]
    fn hp_floors_at_one() {
        assert_eq!(max_hp(HitDie::D6, -5, 1), 1);
        assert_eq!(max_hp(HitDie::D6, -5, 3), 1);
    }

    #[test]
    fn armor_class_is_ten_plus_dex() {
        assert_eq!(armor_class(3), 13);
        assert_eq!(armor_class(-1), 9);
    }

    #[test]
    fn spell_save_dc_uses_proficiency_and_primary() {
        assert_eq!(spell_save_dc(1, 3), 8 + 2 + 3);
        assert_eq!(spell_save_dc(9, 4), 8 + 4 + 4);
    }

    #[test]
    fn max_strain_may_go_negative() {
        // Documented homebrew behavior: no floor is applied.
        assert_eq!(max_strain(-3, 1), -2);
        assert_eq!(max_strain(-1, 1), 0);
        assert_eq!(max_strain(2, 5), 7);
    }

    #[test]
    fn hit_die_try_from() {
        assert_eq!(HitDie::try_from(8).unwrap(), HitDie::D8);
        assert!(HitDie::try_from(7).is_err());
        assert!(HitDie::try_from(20).is_err());
    }

    #[test]
    fn derive_combines_all_stats() {
        let mut abilities = AbilityScores::default();
        abilities.set(Ability::Constitution, 14);
        abilities.set(Ability::Dexterity, 16);
        abilities.set(Ability::Charisma, 18);

        let stats = DerivedStats::derive(&abilities, HitDie::D8, &[Ability::Charisma], 5);
        assert_eq!(stats.hp, 10 + 4 * 7);
        assert_eq!(stats.ac, 13);
        assert_eq!(stats.dc, 8 + 3 + 4);
        assert_eq!(stats.max_strain, 7);
    }

    #[test]
    fn derive_with_empty_priority_has_zero_primary_modifier() {
        let abilities = AbilityScores::default();
        let stats = DerivedStats::derive(&abilities, HitDie::D6, &[], 1);
        assert_eq!(stats.dc, 8 + 2);
    }
}
