//! Ability scores, generation methods, and priority assignment
//!
//! Scores are generated as a raw array of six values and then distributed
//! over the six canonical abilities according to a class's stat priority:
//! highest value to the first-listed ability, and so on. Abilities missing
//! from a short priority list stay at the default score of 10.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Score an ability holds when no generated value is assigned to it.
pub const DEFAULT_ABILITY_SCORE: i32 = 10;

/// The fixed array used by the "standard" generation method.
pub const STANDARD_ARRAY: [i32; 6] = [15, 14, 13, 12, 10, 8];

/// The base-cost array used by the "pointbuy" generation method.
/// Further point allocation happens elsewhere; generation only supplies
/// the base.
pub const POINT_BUY_ARRAY: [i32; 6] = [8, 8, 8, 8, 8, 8];

/// One of the six canonical D&D abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// The six abilities in canonical order.
    pub const CANONICAL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "str" => Ok(Ability::Strength),
            "dexterity" | "dex" => Ok(Ability::Dexterity),
            "constitution" | "con" => Ok(Ability::Constitution),
            "intelligence" | "int" => Ok(Ability::Intelligence),
            "wisdom" | "wis" => Ok(Ability::Wisdom),
            "charisma" | "cha" => Ok(Ability::Charisma),
            other => Err(DomainError::parse(format!("Unknown ability: {other}"))),
        }
    }
}

/// How the six raw ability scores are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    /// 4d6-drop-lowest, six times
    Roll,
    /// The fixed standard array {15, 14, 13, 12, 10, 8}
    Standard,
    /// The point-buy base array {8, 8, 8, 8, 8, 8}
    #[serde(rename = "pointbuy")]
    PointBuy,
}

/// Roll one ability score: four six-sided dice, drop the lowest, sum the
/// remaining three. Result is always in `[3, 18]`.
pub fn roll_ability_score<R: Rng>(rng: &mut R) -> i32 {
    let mut dice = [0i32; 4];
    for die in &mut dice {
        *die = rng.gen_range(1..=6);
    }
    let total: i32 = dice.iter().sum();
    let lowest = dice.iter().copied().min().unwrap_or(0);
    total - lowest
}

/// Produce six raw scores by the given method. Never fails.
pub fn generate_scores<R: Rng>(method: GenerationMethod, rng: &mut R) -> [i32; 6] {
    match method {
        GenerationMethod::Roll => {
            let mut scores = [0i32; 6];
            for score in &mut scores {
                *score = roll_ability_score(rng);
            }
            scores
        }
        GenerationMethod::Standard => STANDARD_ARRAY,
        GenerationMethod::PointBuy => POINT_BUY_ARRAY,
    }
}

/// The six ability scores of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: DEFAULT_ABILITY_SCORE,
            dexterity: DEFAULT_ABILITY_SCORE,
            constitution: DEFAULT_ABILITY_SCORE,
            intelligence: DEFAULT_ABILITY_SCORE,
            wisdom: DEFAULT_ABILITY_SCORE,
            charisma: DEFAULT_ABILITY_SCORE,
        }
    }
}

impl AbilityScores {
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: i32) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }

    /// The modifier of one ability, `floor((score - 10) / 2)`.
    pub fn modifier(&self, ability: Ability) -> i32 {
        super::derivation::ability_modifier(self.get(ability))
    }

    /// Distribute raw scores over a class's priority list.
    ///
    /// Values are sorted descending (stable, so ties keep their roll
    /// order) and paired with the priority list in order. Abilities not
    /// listed keep the default score of 10.
    pub fn assign_by_priority(scores: [i32; 6], priority: &[Ability]) -> Self {
        let mut sorted = scores;
        sorted.sort_by(|a, b| b.cmp(a));

        let mut assigned = Self::default();
        for (ability, value) in priority.iter().zip(sorted) {
            assigned.set(*ability, value);
        }
        assigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn ability_parses_full_and_short_names() {
        assert_eq!("strength".parse::<Ability>().unwrap(), Ability::Strength);
        assert_eq!("DEX".parse::<Ability>().unwrap(), Ability::Dexterity);
        assert_eq!(" Wisdom ".parse::<Ability>().unwrap(), Ability::Wisdom);
        assert!("luck".parse::<Ability>().is_err());
    }

    #[test]
    fn ability_display_round_trips() {
        for ability in Ability::CANONICAL {
            assert_eq!(ability.name().parse::<Ability>().unwrap(), ability);
        }
    }

    #[test]
    fn rolled_score_is_in_range() {
        let mut rng = rng();
        for _ in 0..1000 {
            let score = roll_ability_score(&mut rng);
            assert!((3..=18).contains(&score));
        }
    }

    #[test]
    fn roll_method_produces_six_scores_in_range() {
        let scores = generate_scores(GenerationMethod::Roll, &mut rng());
        assert_eq!(scores.len(), 6);
        for score in scores {
            assert!((3..=18).contains(&score));
        }
    }

    #[test]
    fn standard_method_is_the_fixed_array() {
        let scores = generate_scores(GenerationMethod::Standard, &mut rng());
        assert_eq!(scores, [15, 14, 13, 12, 10, 8]);
    }

    #[test]
    fn point_buy_method_is_the_base_array() {
        let scores = generate_scores(GenerationMethod::PointBuy, &mut rng());
        assert_eq!(scores, [8, 8, 8, 8, 8, 8]);
    }

    #[test]
    fn assign_by_priority_orders_descending() {
        let priority = [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ];
        let scores = AbilityScores::assign_by_priority([18, 16, 14, 12, 10, 8], &priority);
        assert_eq!(scores.strength, 18);
        assert_eq!(scores.dexterity, 16);
        assert_eq!(scores.constitution, 14);
        assert_eq!(scores.intelligence, 12);
        assert_eq!(scores.wisdom, 10);
        assert_eq!(scores.charisma, 8);
    }

    #[test]
    fn assign_by_priority_sorts_before_assigning() {
        let priority = [Ability::Intelligence, Ability::Constitution];
        let scores = AbilityScores::assign_by_priority([8, 15, 10, 14, 12, 13], &priority);
        assert_eq!(scores.intelligence, 15);
        assert_eq!(scores.constitution, 14);
    }

    #[test]
    fn short_priority_leaves_defaults() {
        let priority = [Ability::Charisma];
        let scores = AbilityScores::assign_by_priority([15, 14, 13, 12, 10, 8], &priority);
        assert_eq!(scores.charisma, 15);
        assert_eq!(scores.strength, DEFAULT_ABILITY_SCORE);
        assert_eq!(scores.dexterity, DEFAULT_ABILITY_SCORE);
        assert_eq!(scores.wisdom, DEFAULT_ABILITY_SCORE);
    }

    #[test]
    fn empty_priority_is_all_defaults() {
        let scores = AbilityScores::assign_by_priority([15, 14, 13, 12, 10, 8], &[]);
        assert_eq!(scores, AbilityScores::default());
    }

    #[test]
    fn generation_method_serializes_as_lowercase_tags() {
        assert_eq!(
            serde_json::to_string(&GenerationMethod::Roll).unwrap(),
            "\"roll\""
        );
        assert_eq!(
            serde_json::to_string(&GenerationMethod::PointBuy).unwrap(),
            "\"pointbuy\""
        );
        let parsed: GenerationMethod = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(parsed, GenerationMethod::Standard);
    }
}
