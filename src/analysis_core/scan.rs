//! Sequential scans over a source set of catalog members
//!
//! A source set is either a category's membership list or a contiguous
//! id range. Each member is resolved one request at a time, in source
//! order, and fed to a reduction. Members that fail to resolve are
//! skipped without trace in the result.

use super::reduce::Reduction;
use crate::catalog::{Creature, CreatureRef, EntityResolver, Species, SpeciesRef};
use std::ops::RangeInclusive;

/// What to scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSet {
    /// Every member of the named category, in source order
    Category(String),
    /// Creatures (and species) addressed by id
    IdRange(RangeInclusive<u32>),
}

impl SourceSet {
    pub fn category(name: impl Into<String>) -> Self {
        SourceSet::Category(name.into())
    }

    pub fn ids(range: RangeInclusive<u32>) -> Self {
        SourceSet::IdRange(range)
    }
}

/// One member before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
enum Member {
    Id(u32),
    Url(String),
}

impl Member {
    fn creature_ref(&self) -> CreatureRef<'_> {
        match self {
            Member::Id(id) => CreatureRef::Id(*id),
            Member::Url(url) => CreatureRef::Url(url),
        }
    }

    fn species_ref(&self) -> SpeciesRef<'_> {
        match self {
            Member::Id(id) => SpeciesRef::Id(*id),
            Member::Url(url) => SpeciesRef::FromCreatureUrl(url),
        }
    }
}

/// Drives the resolver over a source set
///
/// Holds no state between calls; every scan re-fetches from scratch.
pub struct AggregationEngine<'a> {
    resolver: &'a EntityResolver,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(resolver: &'a EntityResolver) -> Self {
        Self { resolver }
    }

    /// Expand a source set into its members
    ///
    /// `None` when the category itself cannot be resolved.
    async fn members(&self, source: &SourceSet) -> Option<Vec<Member>> {
        match source {
            SourceSet::IdRange(range) => Some(range.clone().map(Member::Id).collect()),
            SourceSet::Category(name) => {
                let Some(category) = self.resolver.resolve_category(name).await else {
                    log::warn!("⚠️  Category '{}' unavailable, scan aborted", name);
                    return None;
                };
                Some(
                    category
                        .member_urls()
                        .map(|url| Member::Url(url.to_string()))
                        .collect(),
                )
            }
        }
    }

    /// Resolve every member to a creature and reduce
    pub async fn scan_creatures<R>(&self, source: &SourceSet, mut reduction: R) -> Option<R::Output>
    where
        R: Reduction<Creature>,
    {
        let members = self.members(source).await?;
        let mut resolved = 0usize;

        for member in &members {
            match self.resolver.resolve_creature(member.creature_ref()).await {
                Some(creature) => {
                    resolved += 1;
                    reduction.observe(&creature);
                }
                None => log::debug!("Skipping unresolved member {:?}", member),
            }
        }

        log::info!("📊 Creature scan: {}/{} members resolved", resolved, members.len());
        Some(reduction.finish())
    }

    /// Resolve every member to its species record and reduce
    ///
    /// Category members are addressed through the creature-to-species URL
    /// substitution, range members by shared id.
    pub async fn scan_species<R>(&self, source: &SourceSet, mut reduction: R) -> Option<R::Output>
    where
        R: Reduction<Species>,
    {
        let members = self.members(source).await?;
        let mut resolved = 0usize;

        for member in &members {
            match self.resolver.resolve_species(member.species_ref()).await {
                Some(species) => {
                    resolved += 1;
                    reduction.observe(&species);
                }
                None => log::debug!("Skipping unresolved species for {:?}", member),
            }
        }

        log::info!("📊 Species scan: {}/{} members resolved", resolved, members.len());
        Some(reduction.finish())
    }

    /// Resolve creature then species for every member and reduce the pair
    ///
    /// The species is only requested when the creature resolved.
    pub async fn scan_pairs<R>(&self, source: &SourceSet, mut reduction: R) -> Option<R::Output>
    where
        R: Reduction<(Creature, Species)>,
    {
        let members = self.members(source).await?;
        let mut resolved = 0usize;

        for member in &members {
            let Some(creature) = self.resolver.resolve_creature(member.creature_ref()).await else {
                log::debug!("Skipping unresolved member {:?}", member);
                continue;
            };
            let Some(species) = self.resolver.resolve_species(member.species_ref()).await else {
                log::debug!("Skipping {}: species unresolved", creature.name);
                continue;
            };

            resolved += 1;
            reduction.observe(&(creature, species));
        }

        log::info!("📊 Pair scan: {}/{} members resolved", resolved, members.len());
        Some(reduction.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis_core::reduce::{Collect, Count, Extremum, ExtremumResult, GroupTally};
    use crate::fetch_core::{ResilientFetcher, RetryPolicy};
    use crate::tests::{creature_json, species_json, ScriptedTransport, BASE_URL};
    use serde_json::json;
    use std::sync::Arc;

    fn resolver(transport: &Arc<ScriptedTransport>) -> EntityResolver {
        let fetcher = ResilientFetcher::new(transport.clone(), RetryPolicy::immediate(3));
        EntityResolver::new(fetcher, BASE_URL)
    }

    fn script_creature(transport: &ScriptedTransport, id: u32, name: &str, attack: u32, weight: u32) {
        transport.respond(
            &format!("{}/pokemon/{}", BASE_URL, id),
            creature_json(id, name, 10, weight, &[("attack", attack)]),
        );
    }

    #[tokio::test]
    async fn test_range_extremum_skips_missing_ids() {
        let transport = Arc::new(ScriptedTransport::new());
        script_creature(&transport, 1, "a", 10, 5);
        script_creature(&transport, 2, "b", 30, 5);
        // id 3 never resolves
        script_creature(&transport, 4, "c", 30, 5);
        script_creature(&transport, 5, "d", 20, 5);

        let resolver = resolver(&transport);
        let engine = AggregationEngine::new(&resolver);

        let result = engine
            .scan_creatures(
                &SourceSet::ids(1..=5),
                Extremum::highest(|c: &Creature| c.stat("attack").map(i64::from), 0),
            )
            .await;

        assert_eq!(
            result,
            Some(ExtremumResult {
                name: Some("b".to_string()),
                value: 30
            })
        );
        assert_eq!(transport.calls(&format!("{}/pokemon/3", BASE_URL)), 3);
    }

    #[tokio::test]
    async fn test_category_count_over_id_window() {
        let transport = Arc::new(ScriptedTransport::new());
        let member_ids = [4u32, 5, 6, 200, 150];
        transport.respond(
            &format!("{}/type/fire", BASE_URL),
            json!({
                "name": "fire",
                "pokemon": member_ids
                    .iter()
                    .map(|id| json!({
                        "slot": 1,
                        "pokemon": { "name": format!("p{}", id), "url": format!("{}/pokemon/{}/", BASE_URL, id) }
                    }))
                    .collect::<Vec<_>>()
            }),
        );
        for id in [4u32, 6, 200, 150] {
            transport.respond(
                &format!("{}/pokemon/{}/", BASE_URL, id),
                creature_json(id, &format!("p{}", id), 10, 10, &[]),
            );
        }
        // id 5 is a member inside the window but fails to resolve

        let resolver = resolver(&transport);
        let engine = AggregationEngine::new(&resolver);

        let count = engine
            .scan_creatures(
                &SourceSet::category("fire"),
                Count::new(|c: &Creature| (1..=151).contains(&c.id)),
            )
            .await;

        assert_eq!(count, Some(3));
    }

    #[tokio::test]
    async fn test_missing_category_is_absent() {
        let transport = Arc::new(ScriptedTransport::new());
        let resolver = resolver(&transport);
        let engine = AggregationEngine::new(&resolver);

        let names = engine
            .scan_creatures(&SourceSet::category("shadow"), Collect::new(|_: &Creature| true))
            .await;

        assert_eq!(names, None);
    }

    #[tokio::test]
    async fn test_empty_range_scans_nothing() {
        let transport = Arc::new(ScriptedTransport::new());
        let resolver = resolver(&transport);
        let engine = AggregationEngine::new(&resolver);

        #[allow(clippy::reversed_empty_ranges)]
        let empty = SourceSet::ids(10..=1);

        assert_eq!(
            engine.scan_creatures(&empty, Count::new(|_: &Creature| true)).await,
            Some(0)
        );
        assert_eq!(transport.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_category_species_tally_uses_substituted_urls() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            &format!("{}/type/grass", BASE_URL),
            json!({
                "name": "grass",
                "pokemon": (1..=4u32)
                    .map(|id| json!({
                        "slot": 1,
                        "pokemon": { "name": format!("p{}", id), "url": format!("{}/pokemon/{}/", BASE_URL, id) }
                    }))
                    .collect::<Vec<_>>()
            }),
        );
        let habitats = [Some("grassland"), Some("grassland"), Some("cave"), None];
        for (i, habitat) in habitats.iter().enumerate() {
            let id = i as u32 + 1;
            transport.respond(
                &format!("{}/pokemon-species/{}/", BASE_URL, id),
                species_json(id, &format!("p{}", id), false, None, *habitat),
            );
        }

        let resolver = resolver(&transport);
        let engine = AggregationEngine::new(&resolver);

        let tally = engine
            .scan_species(
                &SourceSet::category("grass"),
                GroupTally::new(|s: &Species| s.habitat_name().map(str::to_string)),
            )
            .await
            .unwrap();

        assert_eq!(tally.top, ("grassland".to_string(), 2));
        assert_eq!(transport.calls(&format!("{}/pokemon/1/", BASE_URL)), 0);
    }

    #[tokio::test]
    async fn test_pair_scan_skips_species_fetch_for_missing_creature() {
        let transport = Arc::new(ScriptedTransport::new());
        script_creature(&transport, 1, "a", 10, 5);
        transport.respond(
            &format!("{}/pokemon-species/1", BASE_URL),
            species_json(1, "a", false, None, None),
        );

        let resolver = resolver(&transport);
        let engine = AggregationEngine::new(&resolver);

        let names = engine
            .scan_pairs(&SourceSet::ids(1..=2), Collect::new(|_: &(Creature, Species)| true))
            .await;

        assert_eq!(names, Some(vec!["a".to_string()]));
        assert_eq!(transport.calls(&format!("{}/pokemon-species/2", BASE_URL)), 0);
    }
}
