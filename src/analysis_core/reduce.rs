//! Reductions applied to resolved scan members
//!
//! Every reduction observes members in scan order and is finished once.
//! Members that failed to resolve never reach `observe`.

use crate::catalog::Named;
use std::collections::HashMap;

/// Bucket label used when a member has no grouping key
pub const UNKNOWN_BUCKET: &str = "unknown";

pub trait Reduction<T> {
    type Output;

    fn observe(&mut self, item: &T);
    fn finish(self) -> Self::Output;
}

/// Tally of predicate-true members
pub struct Count<P> {
    predicate: P,
    count: usize,
}

impl<P> Count<P> {
    pub fn new(predicate: P) -> Self {
        Self { predicate, count: 0 }
    }
}

impl<T, P> Reduction<T> for Count<P>
where
    P: Fn(&T) -> bool,
{
    type Output = usize;

    fn observe(&mut self, item: &T) {
        if (self.predicate)(item) {
            self.count += 1;
        }
    }

    fn finish(self) -> usize {
        self.count
    }
}

/// Names of predicate-true members, in scan order
pub struct Collect<P> {
    predicate: P,
    names: Vec<String>,
}

impl<P> Collect<P> {
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            names: Vec::new(),
        }
    }
}

impl<T, P> Reduction<T> for Collect<P>
where
    T: Named,
    P: Fn(&T) -> bool,
{
    type Output = Vec<String>;

    fn observe(&mut self, item: &T) {
        if (self.predicate)(item) {
            self.names.push(item.name().to_string());
        }
    }

    fn finish(self) -> Vec<String> {
        self.names
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Highest,
    Lowest,
}

/// Holder of the extreme value, or `None` with the starting bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtremumResult {
    pub name: Option<String>,
    pub value: i64,
}

/// Highest/lowest value of a key, first-encountered holder wins ties
///
/// Comparison is strict, so a later equal value never replaces the holder.
/// Members for which the key yields `None` are ignored.
pub struct Extremum<K> {
    direction: Direction,
    key: K,
    holder: Option<String>,
    value: i64,
}

impl<K> Extremum<K> {
    /// A candidate must strictly exceed `floor` to become the holder
    pub fn highest(key: K, floor: i64) -> Self {
        Self {
            direction: Direction::Highest,
            key,
            holder: None,
            value: floor,
        }
    }

    /// Starts from `i64::MAX` as the sentinel bound
    pub fn lowest(key: K) -> Self {
        Self {
            direction: Direction::Lowest,
            key,
            holder: None,
            value: i64::MAX,
        }
    }
}

impl<T, K> Reduction<T> for Extremum<K>
where
    T: Named,
    K: Fn(&T) -> Option<i64>,
{
    type Output = ExtremumResult;

    fn observe(&mut self, item: &T) {
        let Some(value) = (self.key)(item) else {
            return;
        };

        let better = match self.direction {
            Direction::Highest => value > self.value,
            Direction::Lowest => value < self.value,
        };

        if better {
            self.value = value;
            self.holder = Some(item.name().to_string());
        }
    }

    fn finish(self) -> ExtremumResult {
        ExtremumResult {
            name: self.holder,
            value: self.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyResult {
    /// Largest bucket; `("unknown", 0)` for an empty scan
    pub top: (String, usize),
    /// All buckets by descending count, first-seen order among equals
    pub buckets: Vec<(String, usize)>,
}

/// Occurrence count per derived key
///
/// Equal-count buckets are ordered by when they were first seen, so the
/// earliest bucket wins a tie for the top spot.
pub struct GroupTally<K> {
    key: K,
    index: HashMap<String, usize>,
    buckets: Vec<(String, usize)>,
}

impl<K> GroupTally<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            index: HashMap::new(),
            buckets: Vec::new(),
        }
    }
}

impl<T, K> Reduction<T> for GroupTally<K>
where
    K: Fn(&T) -> Option<String>,
{
    type Output = TallyResult;

    fn observe(&mut self, item: &T) {
        let label = (self.key)(item).unwrap_or_else(|| UNKNOWN_BUCKET.to_string());

        match self.index.get(&label) {
            Some(&slot) => self.buckets[slot].1 += 1,
            None => {
                self.index.insert(label.clone(), self.buckets.len());
                self.buckets.push((label, 1));
            }
        }
    }

    fn finish(mut self) -> TallyResult {
        // sort_by is stable: ties keep first-seen order
        self.buckets.sort_by(|a, b| b.1.cmp(&a.1));

        let top = self
            .buckets
            .first()
            .cloned()
            .unwrap_or_else(|| (UNKNOWN_BUCKET.to_string(), 0));

        TallyResult {
            top,
            buckets: self.buckets,
        }
    }
}

/// Resolved records themselves, for queries that need more than one pass
pub struct Gather<T> {
    records: Vec<T>,
}

impl<T> Gather<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T> Default for Gather<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Reduction<T> for Gather<T> {
    type Output = Vec<T>;

    fn observe(&mut self, item: &T) {
        self.records.push(item.clone());
    }

    fn finish(self) -> Vec<T> {
        self.records
    }
}

/// Feed members through a reduction in order
pub fn reduce_all<'a, T, R, I>(items: I, mut reduction: R) -> R::Output
where
    T: 'a,
    R: Reduction<T>,
    I: IntoIterator<Item = &'a T>,
{
    for item in items {
        reduction.observe(item);
    }
    reduction.finish()
}
