//! Prism table management.
//!
//! The table maps spell names to prism assignments. Assignments replace
//! wholesale; assigning an empty list removes the entry, so "no prisms"
//! is only ever represented by absence. Deleting a prism cascades: it is
//! stripped from every table entry and revoked from every player.

use std::collections::BTreeSet;
use std::sync::Arc;

use prismgm_domain::{PrismAssignment, PrismTable};

use crate::infrastructure::ports::{PlayerRepo, PrismTableRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum PrismError {
    #[error("No prism assignment for spell: {0}")]
    NotAssigned(String),
    #[error("Spell name cannot be empty")]
    EmptySpellName,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct PrismOps {
    prisms: Arc<dyn PrismTableRepo>,
    players: Arc<dyn PlayerRepo>,
}

impl PrismOps {
    pub fn new(prisms: Arc<dyn PrismTableRepo>, players: Arc<dyn PlayerRepo>) -> Self {
        Self { prisms, players }
    }

    pub async fn table(&self) -> Result<PrismTable, PrismError> {
        Ok(self.prisms.get().await?)
    }

    /// Every prism name mentioned anywhere in the table, deduplicated and
    /// sorted.
    pub async fn prism_names(&self) -> Result<Vec<String>, PrismError> {
        let table = self.prisms.get().await?;
        let names: BTreeSet<String> = table
            .iter()
            .flat_map(|(_, assignment)| assignment.names().iter().cloned())
            .collect();
        Ok(names.into_iter().collect())
    }

    /// Resolve a free-text spell name through the table's fuzzy matching.
    pub async fn resolve(&self, query: &str) -> Result<Option<PrismAssignment>, PrismError> {
        let table = self.prisms.get().await?;
        Ok(table.resolve(query).cloned())
    }

    /// Set the assignment for a spell name, replacing any previous one.
    /// An empty prism list removes the entry instead.
    pub async fn assign(&self, spell_name: &str, prisms: Vec<String>) -> Result<(), PrismError> {
        if spell_name.trim().is_empty() {
            return Err(PrismError::EmptySpellName);
        }
        let mut table = self.prisms.get().await?;
        match PrismAssignment::new(prisms) {
            Some(assignment) => {
                table.assign(spell_name, assignment);
            }
            None => {
                table.remove_spell(spell_name);
            }
        }
        self.prisms.save(&table).await?;
        Ok(())
    }

    /// Drop the assignment for a spell name.
    pub async fn unassign(&self, spell_name: &str) -> Result<(), PrismError> {
        let mut table = self.prisms.get().await?;
        if table.remove_spell(spell_name).is_none() {
            return Err(PrismError::NotAssigned(spell_name.to_string()));
        }
        self.prisms.save(&table).await?;
        Ok(())
    }

    /// Delete a prism everywhere: strip it from every table entry and
    /// revoke it from every player who holds it.
    pub async fn delete_prism(&self, prism: &str) -> Result<(), PrismError> {
        let mut table = self.prisms.get().await?;
        table.remove_prism(prism);
        self.prisms.save(&table).await?;

        for mut player in self.players.list_all().await? {
            if player.revoke_prism(prism) {
                self.players.save(&player).await?;
            }
        }
        tracing::info!(prism = %prism, "deleted prism");
        Ok(())
    }
}
