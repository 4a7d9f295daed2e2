//! Shared test fixtures: an in-memory transport and JSON builders

use crate::fetch_core::{FetchOutcome, Transport};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub(crate) const BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Transport that replays scripted outcomes per URL
///
/// Queued outcomes are consumed first, then a fixed response (if any)
/// is returned on every call. Unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    state: Mutex<ScriptState>,
}

#[derive(Default)]
struct ScriptState {
    queued: HashMap<String, VecDeque<FetchOutcome>>,
    fixed: HashMap<String, Value>,
    calls: HashMap<String, usize>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn script(&self, url: &str, outcomes: Vec<FetchOutcome>) {
        let mut state = self.state.lock().unwrap();
        state
            .queued
            .entry(url.to_string())
            .or_default()
            .extend(outcomes);
    }

    pub(crate) fn respond(&self, url: &str, body: Value) {
        self.state.lock().unwrap().fixed.insert(url.to_string(), body);
    }

    pub(crate) fn calls(&self, url: &str) -> usize {
        self.state.lock().unwrap().calls.get(url).copied().unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.values().sum()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> FetchOutcome {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(url.to_string()).or_insert(0) += 1;

        if let Some(outcome) = state.queued.get_mut(url).and_then(VecDeque::pop_front) {
            return outcome;
        }

        match state.fixed.get(url) {
            Some(body) => FetchOutcome::Success(body.clone()),
            None => FetchOutcome::LogicalFailure(StatusCode::NOT_FOUND),
        }
    }
}

pub(crate) fn creature_json(id: u32, name: &str, height: u32, weight: u32, stats: &[(&str, u32)]) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": height,
        "weight": weight,
        "stats": stats
            .iter()
            .map(|(stat, value)| json!({
                "base_stat": value,
                "stat": { "name": stat, "url": format!("{}/stat/{}/", BASE_URL, stat) }
            }))
            .collect::<Vec<_>>(),
        "species": { "name": name, "url": format!("{}/pokemon-species/{}/", BASE_URL, id) }
    })
}

pub(crate) fn species_json(
    id: u32,
    name: &str,
    is_legendary: bool,
    evolution_chain_url: Option<&str>,
    habitat: Option<&str>,
) -> Value {
    json!({
        "id": id,
        "name": name,
        "is_legendary": is_legendary,
        "evolves_from_species": null,
        "evolution_chain": evolution_chain_url.map(|url| json!({ "url": url })),
        "habitat": habitat.map(|h| json!({ "name": h, "url": format!("{}/pokemon-habitat/{}/", BASE_URL, h) })),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_transport_replay_order() {
        let transport = ScriptedTransport::new();
        transport.script(
            "u",
            vec![FetchOutcome::LogicalFailure(StatusCode::BAD_GATEWAY)],
        );
        transport.respond("u", json!({ "ok": true }));

        assert_eq!(
            transport.get("u").await,
            FetchOutcome::LogicalFailure(StatusCode::BAD_GATEWAY)
        );
        assert_eq!(transport.get("u").await, FetchOutcome::Success(json!({ "ok": true })));
        assert_eq!(
            transport.get("other").await,
            FetchOutcome::LogicalFailure(StatusCode::NOT_FOUND)
        );
        assert_eq!(transport.calls("u"), 2);
        assert_eq!(transport.total_calls(), 3);
    }
}
