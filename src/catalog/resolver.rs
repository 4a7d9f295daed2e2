use super::model::{Creature, CreatureType, EvolutionChain, Species};
use crate::fetch_core::ResilientFetcher;

const CREATURE_SEGMENT: &str = "/pokemon/";
const SPECIES_SEGMENT: &str = "/pokemon-species/";

/// How to address a creature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatureRef<'a> {
    Id(u32),
    /// Absolute URL embedded in another record
    Url(&'a str),
}

/// How to address a species (taxonomy) record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesRef<'a> {
    /// Shares the numeric id of the creature it classifies
    Id(u32),
    Name(&'a str),
    Url(&'a str),
    /// Derived from a creature URL by swapping the path segment
    FromCreatureUrl(&'a str),
}

/// Swap the creature path segment for the species one
///
/// `.../pokemon/25/` becomes `.../pokemon-species/25/`. URLs without the
/// creature segment are returned unchanged.
pub fn species_url_from_creature_url(url: &str) -> String {
    url.replace(CREATURE_SEGMENT, SPECIES_SEGMENT)
}

/// Typed read paths over the catalog
///
/// Each call is exactly one logical fetch; absence from the fetcher
/// propagates as `None`.
#[derive(Clone)]
pub struct EntityResolver {
    fetcher: ResilientFetcher,
    base_url: String,
}

impl EntityResolver {
    pub fn new(fetcher: ResilientFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn category_url(&self, name: &str) -> String {
        format!("{}/type/{}", self.base_url, name)
    }

    pub fn creature_url(&self, id: u32) -> String {
        format!("{}{}{}", self.base_url, CREATURE_SEGMENT, id)
    }

    pub fn species_url(&self, id_or_name: &str) -> String {
        format!("{}{}{}", self.base_url, SPECIES_SEGMENT, id_or_name)
    }

    pub async fn resolve_category(&self, name: &str) -> Option<CreatureType> {
        self.fetcher.fetch_as(&self.category_url(name)).await
    }

    pub async fn resolve_creature(&self, creature: CreatureRef<'_>) -> Option<Creature> {
        let url = match creature {
            CreatureRef::Id(id) => self.creature_url(id),
            CreatureRef::Url(url) => url.to_string(),
        };
        self.fetcher.fetch_as(&url).await
    }

    pub async fn resolve_species(&self, species: SpeciesRef<'_>) -> Option<Species> {
        let url = match species {
            SpeciesRef::Id(id) => self.species_url(&id.to_string()),
            SpeciesRef::Name(name) => self.species_url(&name.to_lowercase()),
            SpeciesRef::Url(url) => url.to_string(),
            SpeciesRef::FromCreatureUrl(url) => species_url_from_creature_url(url),
        };
        self.fetcher.fetch_as(&url).await
    }

    /// Follow the evolution-chain link embedded in a species record
    pub async fn resolve_evolution_chain(&self, url: &str) -> Option<EvolutionChain> {
        self.fetcher.fetch_as(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch_core::RetryPolicy;
    use crate::tests::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "https://pokeapi.co/api/v2";

    fn resolver(transport: &Arc<ScriptedTransport>) -> EntityResolver {
        let fetcher = ResilientFetcher::new(transport.clone(), RetryPolicy::immediate(3));
        EntityResolver::new(fetcher, format!("{}/", BASE))
    }

    #[test]
    fn test_species_url_substitution() {
        assert_eq!(
            species_url_from_creature_url("https://pokeapi.co/api/v2/pokemon/25/"),
            "https://pokeapi.co/api/v2/pokemon-species/25/"
        );
        // Already a species URL: the creature segment does not occur
        assert_eq!(
            species_url_from_creature_url("https://pokeapi.co/api/v2/pokemon-species/25/"),
            "https://pokeapi.co/api/v2/pokemon-species/25/"
        );
    }

    #[test]
    fn test_canonical_paths() {
        let transport = Arc::new(ScriptedTransport::new());
        let resolver = resolver(&transport);

        assert_eq!(resolver.category_url("fire"), "https://pokeapi.co/api/v2/type/fire");
        assert_eq!(resolver.creature_url(4), "https://pokeapi.co/api/v2/pokemon/4");
        assert_eq!(
            resolver.species_url("bulbasaur"),
            "https://pokeapi.co/api/v2/pokemon-species/bulbasaur"
        );
    }

    #[tokio::test]
    async fn test_resolve_species_by_name_is_lowercased() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            &format!("{}/pokemon-species/bulbasaur", BASE),
            json!({ "id": 1, "name": "bulbasaur", "is_legendary": false }),
        );

        let species = resolver(&transport)
            .resolve_species(SpeciesRef::Name("Bulbasaur"))
            .await
            .unwrap();
        assert_eq!(species.id, 1);
    }

    #[tokio::test]
    async fn test_resolve_species_from_creature_url() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            &format!("{}/pokemon-species/25/", BASE),
            json!({ "id": 25, "name": "pikachu", "is_legendary": false }),
        );

        let species = resolver(&transport)
            .resolve_species(SpeciesRef::FromCreatureUrl(&format!("{}/pokemon/25/", BASE)))
            .await;
        assert_eq!(species.map(|s| s.name), Some("pikachu".to_string()));
    }

    #[tokio::test]
    async fn test_missing_creature_is_absent() {
        let transport = Arc::new(ScriptedTransport::new());

        let creature = resolver(&transport).resolve_creature(CreatureRef::Id(99_999)).await;

        assert!(creature.is_none());
        assert_eq!(transport.calls(&format!("{}/pokemon/99999", BASE)), 3);
    }
}
