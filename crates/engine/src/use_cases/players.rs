//! Player roster management.
//!
//! Players are the audience for the filtered catalog: each carries a
//! spell-level ceiling and a prism access list. Names are unique
//! case-insensitively across the roster.

use std::sync::Arc;

use serde::Deserialize;

use prismgm_domain::{DomainError, Player, PlayerId};

use crate::infrastructure::ports::{PlayerRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Player not found: {0}")]
    NotFound(PlayerId),
    #[error("A player named '{0}' already exists")]
    DuplicateName(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerInput {
    pub name: String,
    pub max_spell_level: i32,
    #[serde(default)]
    pub prisms: Vec<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub class_notes: Option<String>,
}

/// Partial update; `None` fields are left untouched. Class fields update
/// together so notes can be cleared alongside a class change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub max_spell_level: Option<i32>,
    #[serde(default)]
    pub class: Option<(Option<String>, Option<String>)>,
}

pub struct PlayerOps {
    players: Arc<dyn PlayerRepo>,
}

impl PlayerOps {
    pub fn new(players: Arc<dyn PlayerRepo>) -> Self {
        Self { players }
    }

    pub async fn create(&self, input: CreatePlayerInput) -> Result<Player, PlayerError> {
        self.ensure_name_free(&input.name, None).await?;
        let mut player = Player::new(input.name, input.max_spell_level)?
            .with_prisms(input.prisms);
        player.set_class(input.class_name, input.class_notes);
        self.players.save(&player).await?;
        tracing::info!(player = %player.name(), "created player");
        Ok(player)
    }

    pub async fn get(&self, id: PlayerId) -> Result<Player, PlayerError> {
        self.players
            .get(id)
            .await?
            .ok_or(PlayerError::NotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Player>, PlayerError> {
        Ok(self.players.list_all().await?)
    }

    pub async fn update(
        &self,
        id: PlayerId,
        input: UpdatePlayerInput,
    ) -> Result<Player, PlayerError> {
        let mut player = self.get(id).await?;
        if let Some(name) = input.name {
            if !name.eq_ignore_ascii_case(player.name()) {
                self.ensure_name_free(&name, Some(id)).await?;
            }
            player.rename(name)?;
        }
        if let Some(level) = input.max_spell_level {
            player.set_max_spell_level(level)?;
        }
        if let Some((class_name, class_notes)) = input.class {
            player.set_class(class_name, class_notes);
        }
        self.players.save(&player).await?;
        Ok(player)
    }

    pub async fn delete(&self, id: PlayerId) -> Result<(), PlayerError> {
        // Existence check so the caller gets NotFound instead of silence
        self.get(id).await?;
        self.players.delete(id).await?;
        Ok(())
    }

    pub async fn grant_prism(&self, id: PlayerId, prism: &str) -> Result<Player, PlayerError> {
        let mut player = self.get(id).await?;
        player.grant_prism(prism);
        self.players.save(&player).await?;
        Ok(player)
    }

    pub async fn revoke_prism(&self, id: PlayerId, prism: &str) -> Result<Player, PlayerError> {
        let mut player = self.get(id).await?;
        if player.revoke_prism(prism) {
            self.players.save(&player).await?;
        }
        Ok(player)
    }

    async fn ensure_name_free(
        &self,
        name: &str,
        exclude: Option<PlayerId>,
    ) -> Result<(), PlayerError> {
        let taken = self.players.list_all().await?.into_iter().any(|existing| {
            Some(existing.id()) != exclude && existing.name().eq_ignore_ascii_case(name)
        });
        if taken {
            return Err(PlayerError::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}
