//! Catalog record types (PokeAPI JSON shapes)
//!
//! Only the fields the analytics read are modelled; unknown fields are
//! ignored by serde.

use serde::{Deserialize, Serialize};

/// `{ name, url }` link embedded in most records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedLink {
    pub name: String,
    pub url: String,
}

/// Link carrying only a URL (e.g. `evolution_chain` on a species)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlLink {
    pub url: String,
}

/// One `(statistic-name, base value)` entry on a creature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedLink,
}

/// Creature record (`/pokemon/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    pub species: NamedLink,
}

impl Creature {
    /// Base value of the named statistic, first entry wins
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|entry| entry.stat.name == name)
            .map(|entry| entry.base_stat)
    }
}

/// Taxonomy record (`/pokemon-species/{id-or-name}`)
///
/// `evolution_chain` is `None` both when the field is null and when it is
/// missing from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub evolves_from_species: Option<NamedLink>,
    #[serde(default)]
    pub evolution_chain: Option<UrlLink>,
    #[serde(default)]
    pub habitat: Option<NamedLink>,
}

impl Species {
    pub fn habitat_name(&self) -> Option<&str> {
        self.habitat.as_ref().map(|h| h.name.as_str())
    }
}

/// Member slot of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMember {
    #[serde(default)]
    pub slot: u32,
    pub pokemon: NamedLink,
}

/// Category membership record (`/type/{name}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureType {
    pub name: String,
    #[serde(default)]
    pub pokemon: Vec<TypeMember>,
}

impl CreatureType {
    /// Member creature URLs in source order
    pub fn member_urls(&self) -> impl Iterator<Item = &str> {
        self.pokemon.iter().map(|member| member.pokemon.url.as_str())
    }
}

/// Node of an evolution graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedLink,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

/// Evolution graph record, reached only through a species' `evolution_chain`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionChain {
    #[serde(default)]
    pub id: u32,
    pub chain: ChainLink,
}

/// Anything a reduction can report by name
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Creature {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Species {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Pair scans report the creature's name
impl Named for (Creature, Species) {
    fn name(&self) -> &str {
        &self.0.name
    }
}
