//! Character class management.
//!
//! Built-in classes are seeded by the host and are read-only; only custom
//! classes authored by a game master may be deleted. Ability names in
//! inputs arrive as free text and are parsed into [`Ability`] values, so
//! both full names and three-letter abbreviations work.

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use prismgm_domain::{Ability, CharacterClass, ClassId, DomainError, HitDie};

use crate::infrastructure::ports::{ClassRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum ClassError {
    #[error("Class not found: {0}")]
    NotFound(ClassId),
    #[error("A class named '{0}' already exists")]
    DuplicateName(String),
    #[error("Built-in class '{0}' cannot be deleted")]
    NotCustom(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassInput {
    pub name: String,
    /// Hit die size: 6, 8, 10 or 12
    pub hit_die: i32,
    /// Ability names in priority order ("charisma", "cha", ...)
    pub stat_priority: Vec<String>,
    #[serde(default)]
    pub saving_throws: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prism: Option<String>,
    #[serde(default)]
    pub archetype: Option<String>,
    #[serde(default)]
    pub spell_list: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

pub struct ClassOps {
    classes: Arc<dyn ClassRepo>,
}

impl ClassOps {
    pub fn new(classes: Arc<dyn ClassRepo>) -> Self {
        Self { classes }
    }

    /// Author a custom class. Names are unique case-insensitively across
    /// built-in and custom classes alike.
    pub async fn create(&self, input: CreateClassInput) -> Result<CharacterClass, ClassError> {
        let taken = self
            .classes
            .list_all()
            .await?
            .iter()
            .any(|existing| existing.name().eq_ignore_ascii_case(&input.name));
        if taken {
            return Err(ClassError::DuplicateName(input.name));
        }

        let hit_die = HitDie::try_from(input.hit_die)?;
        let stat_priority = parse_abilities(&input.stat_priority)?;
        let saving_throws = parse_abilities(&input.saving_throws)?;

        let mut class = CharacterClass::new(input.name, hit_die, stat_priority)?
            .with_saving_throws(saving_throws)
            .with_description(input.description)
            .with_features(input.features)
            .with_custom(true);
        if let Some(prism) = input.prism {
            class = class.with_prism(prism);
        }
        if let Some(archetype) = input.archetype {
            class = class.with_archetype(archetype);
        }
        if let Some(spell_list) = input.spell_list {
            class = class.with_spell_list(spell_list);
        }

        self.classes.save(&class).await?;
        tracing::info!(class = %class.name(), "created custom class");
        Ok(class)
    }

    /// Seed a built-in class, bypassing the custom flag. Intended for host
    /// startup; idempotence is the caller's concern.
    pub async fn seed(&self, class: &CharacterClass) -> Result<(), ClassError> {
        self.classes.save(class).await?;
        Ok(())
    }

    pub async fn get(&self, id: ClassId) -> Result<CharacterClass, ClassError> {
        self.classes
            .get(id)
            .await?
            .ok_or(ClassError::NotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<CharacterClass>, ClassError> {
        Ok(self.classes.list_all().await?)
    }

    /// Delete a custom class. Built-in classes are refused.
    pub async fn delete(&self, id: ClassId) -> Result<(), ClassError> {
        let class = self.get(id).await?;
        if !class.is_custom() {
            return Err(ClassError::NotCustom(class.name().to_string()));
        }
        self.classes.delete(id).await?;
        tracing::info!(class = %class.name(), "deleted custom class");
        Ok(())
    }
}

fn parse_abilities(names: &[String]) -> Result<Vec<Ability>, DomainError> {
    names.iter().map(|name| Ability::from_str(name)).collect()
}
