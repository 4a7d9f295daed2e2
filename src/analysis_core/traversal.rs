//! Evolution-chain linearization

use crate::catalog::{ChainLink, EntityResolver, Species};

/// Pre-order names of an evolution tree
///
/// Parent before children, children in listed order. Uses an explicit
/// stack so deep chains cannot exhaust the call stack.
pub fn linearize_chain(root: &ChainLink) -> Vec<String> {
    let mut order = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        order.push(node.species.name.clone());
        // Reversed so the first child is popped next
        stack.extend(node.evolves_to.iter().rev());
    }

    order
}

/// Walks the evolution graph linked from a species record
pub struct ChainTraverser<'a> {
    resolver: &'a EntityResolver,
}

impl<'a> ChainTraverser<'a> {
    pub fn new(resolver: &'a EntityResolver) -> Self {
        Self { resolver }
    }

    /// Names along the species' evolution graph, pre-order
    ///
    /// Empty when the species has no chain link or the chain cannot be
    /// fetched. Re-fetches on every call.
    pub async fn linearize(&self, species: &Species) -> Vec<String> {
        let Some(link) = species.evolution_chain.as_ref() else {
            return Vec::new();
        };

        match self.resolver.resolve_evolution_chain(&link.url).await {
            Some(chain) => linearize_chain(&chain.chain),
            None => {
                log::debug!("Evolution chain for {} unavailable", species.name);
                Vec::new()
            }
        }
    }
}
