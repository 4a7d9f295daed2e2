//! Canned catalog reports
//!
//! Eight fixed questions, each composed from the scan engine, the
//! reductions and the chain traverser:
//!
//! 1. Fire-type creatures inside the Kanto id window
//! 2. Water-type creatures taller than a threshold
//! 3. Evolution chain of a named species
//! 4. Electric-type species with no evolutions
//! 5. Highest base attack in the Johto id window
//! 6. Highest base speed among non-legendary creatures
//! 7. Most common habitat among grass-type species
//! 8. Lightest creature by weight

use crate::analysis_core::{
    AggregationEngine, ChainTraverser, Collect, Count, Extremum, ExtremumResult, Gather,
    GroupTally, SourceSet,
};
use crate::catalog::{Creature, EntityResolver, Species, SpeciesRef};
use std::ops::RangeInclusive;

pub const KANTO_IDS: RangeInclusive<u32> = 1..=151;
pub const JOHTO_IDS: RangeInclusive<u32> = 152..=251;
pub const NATIONAL_IDS: RangeInclusive<u32> = 1..=1010;
pub const DEFAULT_MIN_HEIGHT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A base-stage species carries no evolution-chain link, so whether it
    /// evolves cannot be decided
    MissingEvolutionChain(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::MissingEvolutionChain(species) => {
                write!(f, "Species '{}' has no evolution chain link", species)
            }
        }
    }
}

impl std::error::Error for ReportError {}

/// How many fire-type creatures have an id inside the Kanto window
///
/// `None` when the category cannot be fetched.
pub async fn fire_in_kanto(resolver: &EntityResolver) -> Option<usize> {
    AggregationEngine::new(resolver)
        .scan_creatures(
            &SourceSet::category("fire"),
            Count::new(|c: &Creature| KANTO_IDS.contains(&c.id)),
        )
        .await
}

/// Names of water-type creatures with height strictly above `min_height`
pub async fn water_taller_than(resolver: &EntityResolver, min_height: u32) -> Vec<String> {
    AggregationEngine::new(resolver)
        .scan_creatures(
            &SourceSet::category("water"),
            Collect::new(move |c: &Creature| c.height > min_height),
        )
        .await
        .unwrap_or_default()
}

/// Pre-order species names of the evolution chain containing `name`
pub async fn evolution_chain(resolver: &EntityResolver, name: &str) -> Vec<String> {
    let Some(species) = resolver.resolve_species(SpeciesRef::Name(name)).await else {
        return Vec::new();
    };
    ChainTraverser::new(resolver).linearize(&species).await
}

/// Electric-type species that neither evolve from nor into anything
///
/// A base-stage candidate without an evolution-chain link fails the whole
/// query; such records cannot be classified either way. Candidates whose
/// chain cannot be fetched are skipped like any unresolved member.
pub async fn electric_without_evolutions(resolver: &EntityResolver) -> Result<Vec<String>, ReportError> {
    let Some(candidates) = AggregationEngine::new(resolver)
        .scan_species(&SourceSet::category("electric"), Gather::new())
        .await
    else {
        return Ok(Vec::new());
    };

    let mut names = Vec::new();
    for species in candidates {
        if species.evolves_from_species.is_some() {
            continue;
        }

        let Some(link) = species.evolution_chain.as_ref() else {
            return Err(ReportError::MissingEvolutionChain(species.name));
        };

        match resolver.resolve_evolution_chain(&link.url).await {
            Some(chain) if chain.chain.evolves_to.is_empty() => names.push(species.name),
            Some(_) => {}
            None => log::debug!("Skipping {}: evolution chain unresolved", species.name),
        }
    }

    Ok(names)
}

/// Creature with the highest base attack in the Johto window
pub async fn strongest_attack_in_johto(resolver: &EntityResolver) -> ExtremumResult {
    AggregationEngine::new(resolver)
        .scan_creatures(
            &SourceSet::ids(JOHTO_IDS),
            Extremum::highest(|c: &Creature| c.stat("attack").map(i64::from), 0),
        )
        .await
        .unwrap_or(ExtremumResult { name: None, value: 0 })
}

/// Non-legendary creature with the highest base speed
///
/// Creatures whose species record cannot be fetched are skipped.
pub async fn fastest_non_legendary(resolver: &EntityResolver) -> ExtremumResult {
    AggregationEngine::new(resolver)
        .scan_pairs(
            &SourceSet::ids(NATIONAL_IDS),
            Extremum::highest(
                |(creature, species): &(Creature, Species)| {
                    if species.is_legendary {
                        None
                    } else {
                        creature.stat("speed").map(i64::from)
                    }
                },
                0,
            ),
        )
        .await
        .unwrap_or(ExtremumResult { name: None, value: 0 })
}

/// Most common habitat among grass-type species, with its count
///
/// Species without a habitat count as `"unknown"`.
pub async fn most_common_grass_habitat(resolver: &EntityResolver) -> (String, usize) {
    AggregationEngine::new(resolver)
        .scan_species(
            &SourceSet::category("grass"),
            GroupTally::new(|s: &Species| s.habitat_name().map(str::to_string)),
        )
        .await
        .map(|tally| tally.top)
        .unwrap_or_else(|| (crate::analysis_core::UNKNOWN_BUCKET.to_string(), 0))
}

/// Creature with the lowest recorded weight
pub async fn lightest(resolver: &EntityResolver) -> ExtremumResult {
    AggregationEngine::new(resolver)
        .scan_creatures(
            &SourceSet::ids(NATIONAL_IDS),
            Extremum::lowest(|c: &Creature| Some(i64::from(c.weight))),
        )
        .await
        .unwrap_or(ExtremumResult { name: None, value: i64::MAX })
}

/// Results of all eight reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReport {
    pub fire_in_kanto: Option<usize>,
    pub water_taller_than: Vec<String>,
    pub bulbasaur_chain: Vec<String>,
    pub electric_without_evolutions: Result<Vec<String>, ReportError>,
    pub strongest_attack_in_johto: ExtremumResult,
    pub fastest_non_legendary: ExtremumResult,
    pub most_common_grass_habitat: (String, usize),
    pub lightest: ExtremumResult,
}

impl CatalogReport {
    /// Run every report, one after another
    pub async fn run(resolver: &EntityResolver) -> Self {
        log::info!("🔥 Counting fire types in Kanto...");
        let fire_in_kanto = fire_in_kanto(resolver).await;

        log::info!("💧 Collecting tall water types...");
        let water_taller_than = water_taller_than(resolver, DEFAULT_MIN_HEIGHT).await;

        log::info!("🌱 Tracing the bulbasaur chain...");
        let bulbasaur_chain = evolution_chain(resolver, "bulbasaur").await;

        log::info!("⚡ Finding electric types without evolutions...");
        let electric_without_evolutions = electric_without_evolutions(resolver).await;
        if let Err(e) = &electric_without_evolutions {
            log::error!("❌ Electric report failed: {}", e);
        }

        log::info!("💪 Scanning Johto for the strongest attack...");
        let strongest_attack_in_johto = strongest_attack_in_johto(resolver).await;

        log::info!("⚡ Scanning for the fastest non-legendary...");
        let fastest_non_legendary = fastest_non_legendary(resolver).await;

        log::info!("🌿 Tallying grass-type habitats...");
        let most_common_grass_habitat = most_common_grass_habitat(resolver).await;

        log::info!("🏋️ Scanning for the lightest creature...");
        let lightest = lightest(resolver).await;

        Self {
            fire_in_kanto,
            water_taller_than,
            bulbasaur_chain,
            electric_without_evolutions,
            strongest_attack_in_johto,
            fastest_non_legendary,
            most_common_grass_habitat,
            lightest,
        }
    }

    /// One labeled line per report; absent values render as `None`
    pub fn lines(&self) -> Vec<String> {
        let electric = match &self.electric_without_evolutions {
            Ok(names) => render_names(names),
            Err(e) => format!("error: {}", e),
        };

        vec![
            format!(
                "🔥 Fire types in Kanto: {}",
                self.fire_in_kanto
                    .map(|count| count.to_string())
                    .unwrap_or_else(|| "None".to_string())
            ),
            format!(
                "💧 Water types taller than {}: {}",
                DEFAULT_MIN_HEIGHT,
                render_names(&self.water_taller_than)
            ),
            format!("🌱 Bulbasaur evolution chain: {}", render_names(&self.bulbasaur_chain)),
            format!("⚡ Electric types without evolutions: {}", electric),
            format!(
                "💪 Strongest attack in Johto: {}",
                render_extremum(&self.strongest_attack_in_johto)
            ),
            format!(
                "⚡ Fastest non-legendary: {}",
                render_extremum(&self.fastest_non_legendary)
            ),
            format!(
                "🌿 Most common grass habitat: ({}, {})",
                self.most_common_grass_habitat.0, self.most_common_grass_habitat.1
            ),
            format!("🏋️ Lightest creature: {}", render_extremum(&self.lightest)),
        ]
    }
}

fn render_names(names: &[String]) -> String {
    format!("[{}]", names.join(", "))
}

fn render_extremum(result: &ExtremumResult) -> String {
    let value = if result.name.is_none() && result.value == i64::MAX {
        "inf".to_string()
    } else {
        result.value.to_string()
    };
    format!("({}, {})", result.name.as_deref().unwrap_or("None"), value)
}
