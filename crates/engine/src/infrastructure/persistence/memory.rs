//! In-memory repo adapters backed by `tokio::sync::RwLock`.
//!
//! Deletes are idempotent: removing an absent record is a successful
//! no-op, matching the semantics of the hosted backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use prismgm_domain::{
    CharacterClass, ClassId, Npc, NpcId, Player, PlayerId, PrismTable, Spell, SpellCache,
};

use super::super::ports::{
    ClassRepo, NpcRepo, PlayerRepo, PrismTableRepo, RepoError, SpellRepo,
};

#[derive(Default)]
pub struct InMemoryClassRepo {
    classes: RwLock<HashMap<ClassId, CharacterClass>>,
}

impl InMemoryClassRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClassRepo for InMemoryClassRepo {
    async fn get(&self, id: ClassId) -> Result<Option<CharacterClass>, RepoError> {
        Ok(self.classes.read().await.get(&id).cloned())
    }

    async fn save(&self, class: &CharacterClass) -> Result<(), RepoError> {
        self.classes.write().await.insert(class.id(), class.clone());
        Ok(())
    }

    async fn delete(&self, id: ClassId) -> Result<(), RepoError> {
        self.classes.write().await.remove(&id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<CharacterClass>, RepoError> {
        let mut classes: Vec<CharacterClass> = self.classes.read().await.values().cloned().collect();
        classes.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(classes)
    }
}

#[derive(Default)]
pub struct InMemoryNpcRepo {
    npcs: RwLock<HashMap<NpcId, Npc>>,
}

impl InMemoryNpcRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NpcRepo for InMemoryNpcRepo {
    async fn get(&self, id: NpcId) -> Result<Option<Npc>, RepoError> {
        Ok(self.npcs.read().await.get(&id).cloned())
    }

    async fn save(&self, npc: &Npc) -> Result<(), RepoError> {
        self.npcs.write().await.insert(npc.id(), npc.clone());
        Ok(())
    }

    async fn delete(&self, id: NpcId) -> Result<(), RepoError> {
        self.npcs.write().await.remove(&id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Npc>, RepoError> {
        let mut npcs: Vec<Npc> = self.npcs.read().await.values().cloned().collect();
        npcs.sort_by_key(|npc| npc.created_at());
        Ok(npcs)
    }
}

#[derive(Default)]
pub struct InMemoryPlayerRepo {
    players: RwLock<HashMap<PlayerId, Player>>,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepo for InMemoryPlayerRepo {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        Ok(self.players.read().await.get(&id).cloned())
    }

    async fn save(&self, player: &Player) -> Result<(), RepoError> {
        self.players.write().await.insert(player.id(), player.clone());
        Ok(())
    }

    async fn delete(&self, id: PlayerId) -> Result<(), RepoError> {
        self.players.write().await.remove(&id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Player>, RepoError> {
        let mut players: Vec<Player> = self.players.read().await.values().cloned().collect();
        players.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(players)
    }
}

#[derive(Default)]
pub struct InMemorySpellRepo {
    cache: RwLock<Option<SpellCache>>,
    custom: RwLock<HashMap<String, Spell>>,
}

impl InMemorySpellRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpellRepo for InMemorySpellRepo {
    async fn get_cache(&self) -> Result<Option<SpellCache>, RepoError> {
        Ok(self.cache.read().await.clone())
    }

    async fn save_cache(&self, cache: &SpellCache) -> Result<(), RepoError> {
        *self.cache.write().await = Some(cache.clone());
        Ok(())
    }

    async fn get_custom(&self, name: &str) -> Result<Option<Spell>, RepoError> {
        Ok(self.custom.read().await.get(name).cloned())
    }

    async fn save_custom(&self, spell: &Spell) -> Result<(), RepoError> {
        self.custom
            .write()
            .await
            .insert(spell.name.clone(), spell.clone());
        Ok(())
    }

    async fn delete_custom(&self, name: &str) -> Result<(), RepoError> {
        self.custom.write().await.remove(name);
        Ok(())
    }

    async fn list_custom(&self) -> Result<Vec<Spell>, RepoError> {
        let mut spells: Vec<Spell> = self.custom.read().await.values().cloned().collect();
        spells.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(spells)
    }
}

#[derive(Default)]
pub struct InMemoryPrismTableRepo {
    table: RwLock<PrismTable>,
}

impl InMemoryPrismTableRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrismTableRepo for InMemoryPrismTableRepo {
    async fn get(&self) -> Result<PrismTable, RepoError> {
        Ok(self.table.read().await.clone())
    }

    async fn save(&self, table: &PrismTable) -> Result<(), RepoError> {
        *self.table.write().await = table.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prismgm_domain::value_objects::HitDie;

    #[tokio::test]
    async fn class_repo_round_trips() {
        let repo = InMemoryClassRepo::new();
        let class = CharacterClass::new("Adept", HitDie::D8, vec![]).expect("valid");
        repo.save(&class).await.expect("save");
        assert_eq!(repo.get(class.id()).await.expect("get"), Some(class.clone()));
        repo.delete(class.id()).await.expect("delete");
        assert_eq!(repo.get(class.id()).await.expect("get"), None);
        // Idempotent delete
        repo.delete(class.id()).await.expect("delete again");
    }

    #[tokio::test]
    async fn spell_repo_keys_custom_spells_by_name() {
        use prismgm_domain::SpellLevel;
        let repo = InMemorySpellRepo::new();
        let spell = Spell::custom("Prismatic Lance", SpellLevel::Level(4));
        repo.save_custom(&spell).await.expect("save");
        assert!(repo
            .get_custom("Prismatic Lance")
            .await
            .expect("get")
            .is_some());
        assert!(repo.get_custom("prismatic lance").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn prism_table_repo_defaults_to_empty() {
        let repo = InMemoryPrismTableRepo::new();
        assert!(repo.get().await.expect("get").is_empty());
    }
}
