//! Typed catalog access
//!
//! - `model` - record types as returned by the API
//! - `resolver` - category / creature / species / evolution-chain lookups

pub mod model;
pub mod resolver;

pub use model::{
    ChainLink, Creature, CreatureType, EvolutionChain, NamedLink, Named, Species, StatEntry,
    TypeMember, UrlLink,
};
pub use resolver::{species_url_from_creature_url, CreatureRef, EntityResolver, SpeciesRef};
