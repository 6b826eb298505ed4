//! NPC generation and play-time HP tracking.
//!
//! Generation runs the domain pipeline (ability scores by the chosen
//! method, priority assignment, derivation) against a class loaded from
//! storage, then persists the result.

use std::sync::Arc;

use prismgm_domain::{self as domain, ClassId, DomainError, GenerationMethod, NpcId};

use crate::infrastructure::ports::{ClassRepo, ClockPort, NpcRepo, RepoError};

/// Input for generating an NPC.
pub struct GenerateNpcInput {
    /// Display name; defaults to the class name when absent
    pub name: Option<String>,
    pub class_id: ClassId,
    pub level: i32,
    pub method: GenerationMethod,
}

#[derive(Debug, thiserror::Error)]
pub enum NpcError {
    #[error("NPC not found: {0}")]
    NotFound(NpcId),
    #[error("Class not found: {0}")]
    ClassNotFound(ClassId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct NpcOps {
    npcs: Arc<dyn NpcRepo>,
    classes: Arc<dyn ClassRepo>,
    clock: Arc<dyn ClockPort>,
}

impl NpcOps {
    pub fn new(npcs: Arc<dyn NpcRepo>, classes: Arc<dyn ClassRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            npcs,
            classes,
            clock,
        }
    }

    pub async fn generate(&self, input: GenerateNpcInput) -> Result<domain::Npc, NpcError> {
        let class = self
            .classes
            .get(input.class_id)
            .await?
            .ok_or(NpcError::ClassNotFound(input.class_id))?;
        let name = input
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| class.name().to_string());

        let mut rng = rand::thread_rng();
        let npc = domain::Npc::generate(
            name,
            class,
            input.level,
            input.method,
            &mut rng,
            self.clock.now(),
        )?;
        self.npcs.save(&npc).await?;
        tracing::info!(npc = %npc.id(), level = npc.level(), "generated NPC");
        Ok(npc)
    }

    pub async fn get(&self, id: NpcId) -> Result<Option<domain::Npc>, NpcError> {
        Ok(self.npcs.get(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<domain::Npc>, NpcError> {
        Ok(self.npcs.list_all().await?)
    }

    pub async fn delete(&self, id: NpcId) -> Result<(), NpcError> {
        self.npcs.delete(id).await?;
        tracing::info!(npc = %id, "deleted NPC");
        Ok(())
    }

    pub async fn apply_damage(&self, id: NpcId, amount: i32) -> Result<domain::Npc, NpcError> {
        self.edit_hp(id, |npc| npc.apply_damage(amount)).await
    }

    pub async fn heal(&self, id: NpcId, amount: i32) -> Result<domain::Npc, NpcError> {
        self.edit_hp(id, |npc| npc.heal(amount)).await
    }

    pub async fn set_current_hp(&self, id: NpcId, hp: i32) -> Result<domain::Npc, NpcError> {
        self.edit_hp(id, |npc| npc.set_current_hp(hp)).await
    }

    async fn edit_hp(
        &self,
        id: NpcId,
        edit: impl FnOnce(&mut domain::Npc),
    ) -> Result<domain::Npc, NpcError> {
        let mut npc = self.npcs.get(id).await?.ok_or(NpcError::NotFound(id))?;
        edit(&mut npc);
        self.npcs.save(&npc).await?;
        Ok(npc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::{InMemoryClassRepo, InMemoryNpcRepo};
    use crate::infrastructure::ports::SystemClock;
    use prismgm_domain::value_objects::{Ability, HitDie};
    use prismgm_domain::CharacterClass;

    async fn ops_with_class() -> (NpcOps, ClassId) {
        let classes = Arc::new(InMemoryClassRepo::new());
        let class = CharacterClass::new(
            "Prismatic Adept",
            HitDie::D8,
            vec![Ability::Charisma, Ability::Constitution],
        )
        .expect("valid class");
        let class_id = class.id();
        classes.save(&class).await.expect("save class");

        let ops = NpcOps::new(
            Arc::new(InMemoryNpcRepo::new()),
            classes,
            Arc::new(SystemClock),
        );
        (ops, class_id)
    }

    #[tokio::test]
    async fn generate_persists_the_npc() {
        let (ops, class_id) = ops_with_class().await;
        let npc = ops
            .generate(GenerateNpcInput {
                name: Some("Iris".into()),
                class_id,
                level: 3,
                method: GenerationMethod::Standard,
            })
            .await
            .expect("generated");

        assert_eq!(npc.name(), "Iris");
        assert_eq!(npc.level(), 3);
        let stored = ops.get(npc.id()).await.expect("get").expect("present");
        assert_eq!(stored, npc);
    }

    #[tokio::test]
    async fn generate_defaults_name_to_class_name() {
        let (ops, class_id) = ops_with_class().await;
        let npc = ops
            .generate(GenerateNpcInput {
                name: None,
                class_id,
                level: 1,
                method: GenerationMethod::Standard,
            })
            .await
            .expect("generated");
        assert_eq!(npc.name(), "Prismatic Adept");
    }

    #[tokio::test]
    async fn generate_rejects_unknown_class() {
        let (ops, _) = ops_with_class().await;
        let result = ops
            .generate(GenerateNpcInput {
                name: None,
                class_id: ClassId::new(),
                level: 1,
                method: GenerationMethod::Roll,
            })
            .await;
        assert!(matches!(result, Err(NpcError::ClassNotFound(_))));
    }

    #[tokio::test]
    async fn generate_rejects_invalid_level() {
        let (ops, class_id) = ops_with_class().await;
        let result = ops
            .generate(GenerateNpcInput {
                name: None,
                class_id,
                level: 21,
                method: GenerationMethod::Roll,
            })
            .await;
        assert!(matches!(result, Err(NpcError::Domain(_))));
    }

    #[tokio::test]
    async fn hp_edits_persist_and_clamp() {
        let (ops, class_id) = ops_with_class().await;
        let npc = ops
            .generate(GenerateNpcInput {
                name: None,
                class_id,
                level: 2,
                method: GenerationMethod::Standard,
            })
            .await
            .expect("generated");

        let hurt = ops.apply_damage(npc.id(), 4).await.expect("damaged");
        assert_eq!(hurt.current_hp(), npc.max_hp() - 4);

        let healed = ops.heal(npc.id(), 100).await.expect("healed");
        assert_eq!(healed.current_hp(), npc.max_hp());

        let set = ops.set_current_hp(npc.id(), -2).await.expect("set");
        assert_eq!(set.current_hp(), 0);
    }

    #[tokio::test]
    async fn hp_edit_on_missing_npc_is_not_found() {
        let (ops, _) = ops_with_class().await;
        let result = ops.apply_damage(NpcId::new(), 1).await;
        assert!(matches!(result, Err(NpcError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_the_npc() {
        let (ops, class_id) = ops_with_class().await;
        let npc = ops
            .generate(GenerateNpcInput {
                name: None,
                class_id,
                level: 1,
                method: GenerationMethod::PointBuy,
            })
            .await
            .expect("generated");
        ops.delete(npc.id()).await.expect("deleted");
        assert!(ops.get(npc.id()).await.expect("get").is_none());
    }
}
