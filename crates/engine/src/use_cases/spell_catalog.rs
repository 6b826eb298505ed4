//! The unified spell catalog.
//!
//! Bulk spells come from the external content source through a cached
//! snapshot with a staleness check; custom spells and the prism table
//! come from storage. When a refresh fails and a stale cache exists, the
//! stale cache is served rather than failing the listing.

use std::sync::Arc;

use prismgm_domain::{
    self as domain, aggregate, filter_for_player, CatalogSpell, DomainError, PlayerId, SpellCache,
};

use crate::infrastructure::ports::{
    ClockPort, ContentError, ContentPort, PlayerRepo, PrismTableRepo, RepoError, SpellRepo,
};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Spell not found: {0}")]
    NotFound(String),
    #[error("A spell named '{0}' already exists")]
    DuplicateName(String),
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("No spell catalog available: {0}")]
    Unavailable(#[from] ContentError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct SpellCatalogOps {
    spells: Arc<dyn SpellRepo>,
    prisms: Arc<dyn PrismTableRepo>,
    players: Arc<dyn PlayerRepo>,
    content: Arc<dyn ContentPort>,
    clock: Arc<dyn ClockPort>,
}

impl SpellCatalogOps {
    pub fn new(
        spells: Arc<dyn SpellRepo>,
        prisms: Arc<dyn PrismTableRepo>,
        players: Arc<dyn PlayerRepo>,
        content: Arc<dyn ContentPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            spells,
            prisms,
            players,
            content,
            clock,
        }
    }

    /// The bulk catalog, refreshed through the content port when the
    /// cached snapshot is stale or missing.
    async fn bulk_spells(&self) -> Result<Vec<domain::Spell>, CatalogError> {
        let now = self.clock.now();
        let cached = self.spells.get_cache().await?;
        if let Some(cache) = &cached {
            if !cache.is_stale(now) {
                return Ok(cache.spells.clone());
            }
        }

        match self.content.fetch_spells().await {
            Ok(spells) => {
                let cache = SpellCache::new(spells, now);
                self.spells.save_cache(&cache).await?;
                tracing::info!(count = cache.spells.len(), "refreshed bulk spell catalog");
                Ok(cache.spells)
            }
            Err(err) => match cached {
                Some(stale) => {
                    tracing::warn!(error = %err, "catalog refresh failed, serving stale cache");
                    Ok(stale.spells)
                }
                None => Err(CatalogError::Unavailable(err)),
            },
        }
    }

    /// The full unified listing: bulk spells first, then custom, each
    /// entry with provenance and resolved prisms.
    pub async fn listing(&self) -> Result<Vec<CatalogSpell>, CatalogError> {
        let bulk = self.bulk_spells().await?;
        let custom = self.spells.list_custom().await?;
        let table = self.prisms.get().await?;
        Ok(aggregate(&bulk, &custom, &table))
    }

    /// The listing one player may see, bounded by their spell-level
    /// ceiling and prism access.
    pub async fn listing_for_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<CatalogSpell>, CatalogError> {
        let player = self
            .players
            .get(player_id)
            .await?
            .ok_or(CatalogError::PlayerNotFound(player_id))?;
        let listing = self.listing().await?;
        Ok(filter_for_player(&listing, &player))
    }

    /// Author a custom spell. Names that collide case-insensitively with
    /// an existing bulk or custom spell are rejected rather than
    /// producing a duplicate listing entry.
    pub async fn create_custom(&self, spell: domain::Spell) -> Result<domain::Spell, CatalogError> {
        let spell = domain::Spell {
            custom: true,
            ..spell
        };
        self.ensure_name_free(&spell.name, None).await?;
        self.spells.save_custom(&spell).await?;
        tracing::info!(spell = %spell.name, "created custom spell");
        Ok(spell)
    }

    /// Replace an existing custom spell. A rename goes through the same
    /// collision check as creation, except against the spell itself, so a
    /// case-only rename is allowed; its prism-table entry follows it to
    /// the new name.
    pub async fn update_custom(
        &self,
        name: &str,
        spell: domain::Spell,
    ) -> Result<domain::Spell, CatalogError> {
        if self.spells.get_custom(name).await?.is_none() {
            return Err(CatalogError::NotFound(name.to_string()));
        }
        let spell = domain::Spell {
            custom: true,
            ..spell
        };
        if spell.name != name {
            self.ensure_name_free(&spell.name, Some(name)).await?;
            // Old key goes first so a failure cannot leave both entries
            self.spells.delete_custom(name).await?;
            self.spells.save_custom(&spell).await?;
            let mut table = self.prisms.get().await?;
            if let Some(assignment) = table.remove_spell(name) {
                table.assign(spell.name.clone(), assignment);
                self.prisms.save(&table).await?;
            }
            return Ok(spell);
        }
        self.spells.save_custom(&spell).await?;
        Ok(spell)
    }

    /// Delete a custom spell along with its prism-table entry; the
    /// mapping's lifecycle is tied to the spell's.
    pub async fn delete_custom(&self, name: &str) -> Result<(), CatalogError> {
        if self.spells.get_custom(name).await?.is_none() {
            return Err(CatalogError::NotFound(name.to_string()));
        }
        self.spells.delete_custom(name).await?;
        let mut table = self.prisms.get().await?;
        if table.remove_spell(name).is_some() {
            self.prisms.save(&table).await?;
        }
        tracing::info!(spell = %name, "deleted custom spell");
        Ok(())
    }

    /// Reject a name already taken by a bulk or custom spell,
    /// case-insensitively. `exclude` skips the stored record under that
    /// exact key, so a rename never collides with the spell itself.
    async fn ensure_name_free(
        &self,
        name: &str,
        exclude: Option<&str>,
    ) -> Result<(), CatalogError> {
        let custom = self.spells.list_custom().await?;
        let bulk = self.bulk_spells().await?;
        let taken = custom.iter().chain(bulk.iter()).any(|existing| {
            Some(existing.name.as_str()) != exclude && existing.name.eq_ignore_ascii_case(name)
        });
        if taken {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }
        Ok(())
    }
}
