//! Spell catalog aggregation
//!
//! Merges the cached bulk catalog with custom spells and the prism table
//! into one unified listing. Every entry carries a provenance flag and a
//! resolved prism assignment (or none, for unmapped spells).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Player, Spell};
use crate::prisms::{PrismAssignment, PrismTable};

/// How long a cached bulk catalog stays fresh.
pub const CACHE_TTL_HOURS: i64 = 24;

/// Where a catalog entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpellSource {
    /// Bulk-loaded from the external content source
    Bulk,
    /// Authored by a game master
    Custom,
}

/// One entry of the unified spell listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSpell {
    pub spell: Spell,
    pub source: SpellSource,
    /// Resolved prisms; `None` means "no prism assigned", a valid
    /// terminal state surfaced to the UI as such
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prisms: Option<PrismAssignment>,
}

/// Build the unified listing: bulk spells first, then custom spells, each
/// group in source order.
///
/// A prism assignment authored directly on a custom spell takes precedence
/// over the table lookup. Name collisions between a bulk and a custom
/// spell are not collapsed here; the service layer refuses to create the
/// collision in the first place, but this pure function renders whatever
/// it is handed.
pub fn aggregate(bulk: &[Spell], custom: &[Spell], table: &PrismTable) -> Vec<CatalogSpell> {
    let mut listing = Vec::with_capacity(bulk.len() + custom.len());
    for spell in bulk {
        listing.push(CatalogSpell {
            prisms: table.resolve(&spell.name).cloned(),
            spell: spell.clone(),
            source: SpellSource::Bulk,
        });
    }
    for spell in custom {
        let prisms = spell
            .prisms
            .clone()
            .or_else(|| table.resolve(&spell.name).cloned());
        listing.push(CatalogSpell {
            prisms,
            spell: spell.clone(),
            source: SpellSource::Custom,
        });
    }
    listing
}

/// Filter a listing down to what one player may see: spells at or below
/// their level ceiling whose resolved prisms intersect the player's
/// accessible prisms. Unmapped spells never reach a player.
pub fn filter_for_player(listing: &[CatalogSpell], player: &Player) -> Vec<CatalogSpell> {
    listing
        .iter()
        .filter(|entry| {
            i32::from(entry.spell.level.as_number()) <= player.max_spell_level()
                && entry
                    .prisms
                    .as_ref()
                    .is_some_and(|prisms| prisms.names().iter().any(|p| player.has_prism(p)))
        })
        .cloned()
        .collect()
}

/// The cached bulk catalog with its fetch timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCache {
    pub spells: Vec<Spell>,
    pub fetched_at: DateTime<Utc>,
}

impl SpellCache {
    pub fn new(spells: Vec<Spell>, fetched_at: DateTime<Utc>) -> Self {
        Self { spells, fetched_at }
    }

    /// The staleness check: true once the cache is older than
    /// [`CACHE_TTL_HOURS`].
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.fetched_at > Duration::hours(CACHE_TTL_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SpellLevel;

    fn table() -> PrismTable {
        let mut table = PrismTable::new();
        table.assign("Misty Step", PrismAssignment::single("FEY PRISM"));
        table.assign("Fireball", PrismAssignment::single("FIRE PRISM"));
        table
    }

    fn bulk() -> Vec<Spell> {
        vec![
            Spell::bulk("Misty Step", SpellLevel::Level(2)),
            Spell::bulk("Fireball", SpellLevel::Level(3)),
            Spell::bulk("Wish", SpellLevel::Level(9)),
        ]
    }

    #[test]
    fn aggregate_orders_bulk_then_custom() {
        let custom = vec![Spell::custom("Prismatic Lance", SpellLevel::Level(4))];
        let listing = aggregate(&bulk(), &custom, &table());
        assert_eq!(listing.len(), 4);
        assert_eq!(listing[0].source, SpellSource::Bulk);
        assert_eq!(listing[3].source, SpellSource::Custom);
        assert_eq!(listing[3].spell.name, "Prismatic Lance");
    }

    #[test]
    fn aggregate_resolves_through_table() {
        let listing = aggregate(&bulk(), &[], &table());
        assert_eq!(
            listing[0].prisms.as_ref().map(PrismAssignment::names),
            Some(["FEY PRISM".to_string()].as_slice())
        );
        // Wish is unmapped: absent, not an empty list
        assert!(listing[2].prisms.is_none());
    }

    #[test]
    fn authored_prisms_take_precedence_over_table() {
        let mut table = table();
        table.assign("Prismatic Lance", PrismAssignment::single("TABLE PRISM"));
        let custom = vec![Spell::custom("Prismatic Lance", SpellLevel::Level(4))
            .with_prisms(PrismAssignment::single("AUTHORED PRISM"))];
        let listing = aggregate(&[], &custom, &table);
        assert_eq!(
            listing[0].prisms.as_ref().expect("mapped").names(),
            ["AUTHORED PRISM"]
        );
    }

    #[test]
    fn custom_spell_without_authored_prisms_uses_table() {
        let mut table = PrismTable::new();
        table.assign("Prismatic Lance", PrismAssignment::single("LIGHT PRISM"));
        let custom = vec![Spell::custom("Prismatic Lance", SpellLevel::Level(4))];
        let listing = aggregate(&[], &custom, &table);
        assert_eq!(
            listing[0].prisms.as_ref().expect("mapped").names(),
            ["LIGHT PRISM"]
        );
    }

    #[test]
    fn name_collisions_render_both_entries() {
        // The pure aggregation keeps both; creation-time rejection is the
        // service layer's policy.
        let custom = vec![Spell::custom("Fireball", SpellLevel::Level(3))];
        let listing = aggregate(&bulk(), &custom, &table());
        let fireballs: Vec<_> = listing
            .iter()
            .filter(|entry| entry.spell.name == "Fireball")
            .collect();
        assert_eq!(fireballs.len(), 2);
        assert_eq!(fireballs[0].source, SpellSource::Bulk);
        assert_eq!(fireballs[1].source, SpellSource::Custom);
    }

    #[test]
    fn filter_respects_level_ceiling_and_prism_access() {
        let listing = aggregate(&bulk(), &[], &table());
        let player = Player::new("Rowan", 2)
            .expect("valid player")
            .with_prisms(vec!["FEY PRISM".into(), "FIRE PRISM".into()]);
        let visible = filter_for_player(&listing, &player);
        // Fireball is level 3 (above ceiling), Wish is unmapped
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].spell.name, "Misty Step");
    }

    #[test]
    fn filter_hides_unmapped_spells() {
        let listing = aggregate(&bulk(), &[], &table());
        let player = Player::new("Rowan", 9)
            .expect("valid player")
            .with_prisms(vec!["FEY PRISM".into()]);
        let visible = filter_for_player(&listing, &player);
        assert!(visible.iter().all(|entry| entry.spell.name != "Wish"));
    }

    #[test]
    fn cache_staleness_boundary() {
        let fetched = Utc::now();
        let cache = SpellCache::new(vec![], fetched);
        assert!(!cache.is_stale(fetched));
        assert!(!cache.is_stale(fetched + Duration::hours(CACHE_TTL_HOURS)));
        assert!(cache.is_stale(fetched + Duration::hours(CACHE_TTL_HOURS) + Duration::seconds(1)));
    }
}
