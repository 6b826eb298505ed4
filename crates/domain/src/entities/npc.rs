//! NPC entity
//!
//! A generated character instance. The owning class is embedded rather
//! than referenced so the NPC survives later edits to the class.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::CharacterClass;
use crate::error::DomainError;
use crate::ids::NpcId;
use crate::value_objects::{
    generate_scores, AbilityScores, DerivedStats, GenerationMethod, MAX_LEVEL, MIN_LEVEL,
};

/// A generated non-player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Npc {
    id: NpcId,
    name: String,
    /// Owning class, embedded (not referenced)
    class: CharacterClass,
    level: i32,
    abilities: AbilityScores,
    max_hp: i32,
    current_hp: i32,
    ac: i32,
    dc: i32,
    max_strain: i32,
    created_at: DateTime<Utc>,
}

impl Npc {
    /// Run the full generation pipeline: produce raw scores by the given
    /// method, assign them along the class's stat priority, derive combat
    /// statistics, and stamp the creation time.
    pub fn generate<R: Rng>(
        name: impl Into<String>,
        class: CharacterClass,
        level: i32,
        method: GenerationMethod,
        rng: &mut R,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("NPC name cannot be empty"));
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(DomainError::validation(format!(
                "Level must be between {MIN_LEVEL} and {MAX_LEVEL}, got {level}"
            )));
        }

        let raw = generate_scores(method, rng);
        let abilities = AbilityScores::assign_by_priority(raw, class.stat_priority());
        let derived = DerivedStats::derive(&abilities, class.hit_die(), class.stat_priority(), level);

        Ok(Self {
            id: NpcId::new(),
            name,
            class,
            level,
            abilities,
            max_hp: derived.hp,
            current_hp: derived.hp,
            ac: derived.ac,
            dc: derived.dc,
            max_strain: derived.max_strain,
            created_at,
        })
    }

    pub fn id(&self) -> NpcId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &CharacterClass {
        &self.class
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    pub fn ac(&self) -> i32 {
        self.ac
    }

    pub fn dc(&self) -> i32 {
        self.dc
    }

    pub fn max_strain(&self) -> i32 {
        self.max_strain
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Reduce current HP, clamped at 0.
    pub fn apply_damage(&mut self, amount: i32) {
        self.set_current_hp(self.current_hp - amount.max(0));
    }

    /// Restore current HP, clamped at max HP.
    pub fn heal(&mut self, amount: i32) {
        self.set_current_hp(self.current_hp + amount.max(0));
    }

    /// Set current HP directly (manual edits during play), clamped to
    /// `[0, max_hp]` so `current_hp <= max_hp` always holds.
    pub fn set_current_hp(&mut self, hp: i32) {
        self.current_hp = hp.clamp(0, self.max_hp);
    }
}
