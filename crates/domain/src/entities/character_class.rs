//! CharacterClass entity
//!
//! A playable archetype: hit die, stat priority for generated scores,
//! saving throws, and descriptive notes. Built-in classes ship with the
//! system; custom classes are authored by a game master and are the only
//! ones that may be deleted.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ClassId;
use crate::value_objects::{Ability, HitDie};

/// A playable character archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterClass {
    id: ClassId,
    name: String,
    hit_die: HitDie,
    /// Ability names in priority order; the highest generated score goes
    /// to the first entry. At most six entries, each ability at most once.
    stat_priority: Vec<Ability>,
    saving_throws: Vec<Ability>,
    description: String,
    /// Thematic prism tag, if the class is tied to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prism: Option<String>,
    /// Narrative archetype note (e.g. "half-caster skirmisher")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    archetype: Option<String>,
    /// Which spell list the class draws from, as free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spell_list: Option<String>,
    #[serde(default)]
    features: Vec<String>,
    /// Whether this class was authored by a game master
    #[serde(default)]
    custom: bool,
}

impl CharacterClass {
    /// Create a class, validating the stat priority: at most six entries
    /// and no ability listed twice.
    pub fn new(
        name: impl Into<String>,
        hit_die: HitDie,
        stat_priority: Vec<Ability>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Class name cannot be empty"));
        }
        if stat_priority.len() > 6 {
            return Err(DomainError::validation(
                "Stat priority cannot list more than six abilities",
            ));
        }
        for (index, ability) in stat_priority.iter().enumerate() {
            if stat_priority[..index].contains(ability) {
                return Err(DomainError::validation(format!(
                    "Stat priority lists {ability} more than once"
                )));
            }
        }
        Ok(Self {
            id: ClassId::new(),
            name,
            hit_die,
            stat_priority,
            saving_throws: Vec::new(),
            description: String::new(),
            prism: None,
            archetype: None,
            spell_list: None,
            features: Vec::new(),
            custom: false,
        })
    }

    pub fn with_id(mut self, id: ClassId) -> Self {
        self.id = id;
        self
    }

    pub fn with_saving_throws(mut self, saving_throws: Vec<Ability>) -> Self {
        self.saving_throws = saving_throws;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_prism(mut self, prism: impl Into<String>) -> Self {
        self.prism = Some(prism.into());
        self
    }

    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(archetype.into());
        self
    }

    pub fn with_spell_list(mut self, spell_list: impl Into<String>) -> Self {
        self.spell_list = Some(spell_list.into());
        self
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    pub fn with_custom(mut self, custom: bool) -> Self {
        self.custom = custom;
        self
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hit_die(&self) -> HitDie {
        self.hit_die
    }

    pub fn stat_priority(&self) -> &[Ability] {
        &self.stat_priority
    }

    pub fn saving_throws(&self) -> &[Ability] {
        &self.saving_throws
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn prism(&self) -> Option<&str> {
        self.prism.as_deref()
    }

    pub fn archetype(&self) -> Option<&str> {
        self.archetype.as_deref()
    }

    pub fn spell_list(&self) -> Option<&str> {
        self.spell_list.as_deref()
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn is_custom(&self) -> bool {
        self.custom
    }

    /// The class's primary ability: the first of the stat priority, if
    /// any. Drives the spell-save DC.
    pub fn primary_ability(&self) -> Option<Ability> {
        self.stat_priority.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priority() -> Vec<Ability> {
        vec![Ability::Charisma, Ability::Constitution, Ability::Dexterity]
    }

    #[test]
    fn new_class_validates_name() {
        assert!(CharacterClass::new("  ", HitDie::D8, priority()).is_err());
        assert!(CharacterClass::new("Prismatic Adept", HitDie::D8, priority()).is_ok());
    }

    #[test]
    fn stat_priority_rejects_duplicates() {
        let result = CharacterClass::new(
            "Bad",
            HitDie::D8,
            vec![Ability::Strength, Ability::Strength],
        );
        assert!(result.is_err());
    }

    #[test]
    fn stat_priority_accepts_up_to_six() {
        let full: Vec<Ability> = Ability::CANONICAL.to_vec();
        assert!(CharacterClass::new("Full", HitDie::D10, full).is_ok());
        assert!(CharacterClass::new("Empty", HitDie::D6, vec![]).is_ok());
    }

    #[test]
    fn primary_ability_is_first_priority() {
        let class = CharacterClass::new("Adept", HitDie::D8, priority()).unwrap();
        assert_eq!(class.primary_ability(), Some(Ability::Charisma));

        let empty = CharacterClass::new("Blank", HitDie::D6, vec![]).unwrap();
        assert_eq!(empty.primary_ability(), None);
    }

    #[test]
    fn builder_fields_round_trip_through_json() {
        let class = CharacterClass::new("Prismatic Adept", HitDie::D8, priority())
            .unwrap()
            .with_saving_throws(vec![Ability::Charisma, Ability::Constitution])
            .with_description("Channels refracted light.")
            .with_prism("LIGHT PRISM")
            .with_archetype("full caster")
            .with_spell_list("arcane")
            .with_features(vec!["Refraction".into()])
            .with_custom(true);

        let json = serde_json::to_string(&class).unwrap();
        let parsed: CharacterClass = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, class);
        assert!(parsed.is_custom());
        assert_eq!(parsed.prism(), Some("LIGHT PRISM"));
    }
}
