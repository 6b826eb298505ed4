//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Record storage (the hosted backend, or a key/value fallback)
//! - The external spell-content source
//! - Clock (for testing staleness and timestamps)
//!
//! Every port is injected through a constructor as `Arc<dyn ...>`; there
//! are no module-level singletons.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use prismgm_domain::{
    CharacterClass, ClassId, Npc, NpcId, Player, PlayerId, PrismTable, Spell, SpellCache,
};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Not found")]
    NotFound,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Content request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// Storage Ports
// =============================================================================

#[async_trait]
pub trait ClassRepo: Send + Sync {
    async fn get(&self, id: ClassId) -> Result<Option<CharacterClass>, RepoError>;
    async fn save(&self, class: &CharacterClass) -> Result<(), RepoError>;
    async fn delete(&self, id: ClassId) -> Result<(), RepoError>;
    async fn list_all(&self) -> Result<Vec<CharacterClass>, RepoError>;
}

#[async_trait]
pub trait NpcRepo: Send + Sync {
    async fn get(&self, id: NpcId) -> Result<Option<Npc>, RepoError>;
    async fn save(&self, npc: &Npc) -> Result<(), RepoError>;
    async fn delete(&self, id: NpcId) -> Result<(), RepoError>;
    async fn list_all(&self) -> Result<Vec<Npc>, RepoError>;
}

#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError>;
    async fn save(&self, player: &Player) -> Result<(), RepoError>;
    async fn delete(&self, id: PlayerId) -> Result<(), RepoError>;
    async fn list_all(&self) -> Result<Vec<Player>, RepoError>;
}

#[async_trait]
pub trait SpellRepo: Send + Sync {
    /// The cached bulk catalog, if one has ever been fetched.
    async fn get_cache(&self) -> Result<Option<SpellCache>, RepoError>;
    async fn save_cache(&self, cache: &SpellCache) -> Result<(), RepoError>;

    // Custom spells, keyed by name
    async fn get_custom(&self, name: &str) -> Result<Option<Spell>, RepoError>;
    async fn save_custom(&self, spell: &Spell) -> Result<(), RepoError>;
    async fn delete_custom(&self, name: &str) -> Result<(), RepoError>;
    async fn list_custom(&self) -> Result<Vec<Spell>, RepoError>;
}

#[async_trait]
pub trait PrismTableRepo: Send + Sync {
    /// The whole mapping table; an empty table when none is stored yet.
    async fn get(&self) -> Result<PrismTable, RepoError>;
    async fn save(&self, table: &PrismTable) -> Result<(), RepoError>;
}

// =============================================================================
// External Collaborators
// =============================================================================

/// The third-party spell-content API, reduced to the one call the engine
/// needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentPort: Send + Sync {
    async fn fetch_spells(&self) -> Result<Vec<Spell>, ContentError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock.
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
