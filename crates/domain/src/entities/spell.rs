//! Spell entity
//!
//! One spell definition, whether bulk-loaded from the external content
//! source or authored by a game master. The name is the storage key
//! (case-sensitive), but prism resolution matches it case-insensitively.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::prisms::PrismAssignment;
use crate::value_objects::strain_cost;

/// Spell level representation (cantrip = level 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SpellLevel {
    /// Cantrip (level 0, castable at will, zero Strain)
    Cantrip,
    /// Leveled spell, 1-9
    Level(u8),
}

impl SpellLevel {
    /// Build a level, validating the 0-9 range.
    pub fn new(level: i32) -> Result<Self, DomainError> {
        match level {
            0 => Ok(SpellLevel::Cantrip),
            1..=9 => Ok(SpellLevel::Level(level as u8)),
            other => Err(DomainError::validation(format!(
                "Spell level must be 0-9, got {other}"
            ))),
        }
    }

    /// Convert to numeric level (cantrip = 0).
    pub fn as_number(self) -> u8 {
        match self {
            SpellLevel::Cantrip => 0,
            SpellLevel::Level(n) => n,
        }
    }

    /// Check if this is a cantrip.
    pub fn is_cantrip(self) -> bool {
        matches!(self, SpellLevel::Cantrip)
    }
}

impl From<SpellLevel> for u8 {
    fn from(level: SpellLevel) -> Self {
        level.as_number()
    }
}

impl TryFrom<u8> for SpellLevel {
    type Error = DomainError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        SpellLevel::new(i32::from(level))
    }
}

/// A spell, bulk-loaded or custom-authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    /// Display name and storage key
    pub name: String,
    /// Spell level, 0 (cantrip) through 9
    pub level: SpellLevel,
    /// School of magic (e.g., "Evocation")
    pub school: String,
    /// How long it takes to cast (free text from the content source)
    pub casting_time: String,
    /// Range of the spell
    pub range: String,
    /// Required components, as the content source renders them ("V, S, M")
    pub components: String,
    /// How long the spell lasts
    pub duration: String,
    /// Full description of the spell's effects
    pub description: String,
    /// Prisms authored directly on the spell. Takes precedence over the
    /// mapping table; absent means "resolve through the table".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prisms: Option<PrismAssignment>,
    /// Whether this spell was authored by a game master
    #[serde(default)]
    pub custom: bool,
}

impl Spell {
    /// Create a bulk-catalog spell with empty detail fields.
    pub fn bulk(name: impl Into<String>, level: SpellLevel) -> Self {
        Self {
            name: name.into(),
            level,
            school: String::new(),
            casting_time: String::new(),
            range: String::new(),
            components: String::new(),
            duration: String::new(),
            description: String::new(),
            prisms: None,
            custom: false,
        }
    }

    /// Create a custom (game-master-authored) spell.
    pub fn custom(name: impl Into<String>, level: SpellLevel) -> Self {
        Self {
            custom: true,
            ..Self::bulk(name, level)
        }
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = school.into();
        self
    }

    pub fn with_casting_time(mut self, casting_time: impl Into<String>) -> Self {
        self.casting_time = casting_time.into();
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    pub fn with_components(mut self, components: impl Into<String>) -> Self {
        self.components = components.into();
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_prisms(mut self, prisms: PrismAssignment) -> Self {
        self.prisms = Some(prisms);
        self
    }

    /// Strain cost to cast this spell.
    pub fn strain_cost(&self) -> i32 {
        strain_cost(i32::from(self.level.as_number()))
    }
}
