//! Player entity
//!
//! A named participant with an access ceiling: a maximum castable spell
//! level and a list of accessible prisms. The filtering UI and the
//! AI-assistant context builder both read these bounds.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::PlayerId;

/// Maximum castable spell level any player can be granted.
pub const MAX_SPELL_LEVEL: i32 = 9;

/// A player and their spell-access ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    id: PlayerId,
    /// Unique case-insensitively; uniqueness is enforced by the service
    /// layer, which sees the full roster.
    name: String,
    max_spell_level: i32,
    /// Prism names this player may browse
    prisms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_notes: Option<String>,
}

impl Player {
    pub fn new(name: impl Into<String>, max_spell_level: i32) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Player name cannot be empty"));
        }
        validate_spell_level(max_spell_level)?;
        Ok(Self {
            id: PlayerId::new(),
            name,
            max_spell_level,
            prisms: Vec::new(),
            class_name: None,
            class_notes: None,
        })
    }

    pub fn with_id(mut self, id: PlayerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_prisms(mut self, prisms: Vec<String>) -> Self {
        self.prisms = prisms;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_class_notes(mut self, class_notes: impl Into<String>) -> Self {
        self.class_notes = Some(class_notes.into());
        self
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_spell_level(&self) -> i32 {
        self.max_spell_level
    }

    pub fn prisms(&self) -> &[String] {
        &self.prisms
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn class_notes(&self) -> Option<&str> {
        self.class_notes.as_deref()
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Player name cannot be empty"));
        }
        self.name = name;
        Ok(())
    }

    pub fn set_max_spell_level(&mut self, level: i32) -> Result<(), DomainError> {
        validate_spell_level(level)?;
        self.max_spell_level = level;
        Ok(())
    }

    pub fn set_class(&mut self, class_name: Option<String>, class_notes: Option<String>) {
        self.class_name = class_name;
        self.class_notes = class_notes;
    }

    pub fn has_prism(&self, prism: &str) -> bool {
        self.prisms.iter().any(|p| p == prism)
    }

    /// Grant access to a prism; granting an already-held prism is a no-op.
    pub fn grant_prism(&mut self, prism: impl Into<String>) {
        let prism = prism.into();
        if !self.has_prism(&prism) {
            self.prisms.push(prism);
        }
    }

    /// Revoke access to a prism. Returns whether it was held.
    pub fn revoke_prism(&mut self, prism: &str) -> bool {
        let before = self.prisms.len();
        self.prisms.retain(|p| p != prism);
        self.prisms.len() < before
    }
}

fn validate_spell_level(level: i32) -> Result<(), DomainError> {
    if (0..=MAX_SPELL_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "Max spell level must be 0-{MAX_SPELL_LEVEL}, got {level}"
        )))
    }
}
