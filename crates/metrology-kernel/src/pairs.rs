//! Candidate pair enumeration.
//!
//! Sphere-to-sphere and line-to-line work is driven by unordered pairs of
//! entity names; sphere-to-line work by ordered (point, line) pairs.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Which strategy produced a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionStrategy {
    Default,
    Sequential,
    Custom,
}

/// Unordered pair of entity names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPair {
    pub first: String,
    pub second: String,
    pub strategy: SelectionStrategy,
}

impl EntityPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>, strategy: SelectionStrategy) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            strategy,
        }
    }

    /// Order-independent identity: the two names sorted.
    pub fn key(&self) -> (&str, &str) {
        let (a, b) = (self.first.as_str(), self.second.as_str());
        if a <= b { (a, b) } else { (b, a) }
    }

    pub fn is_self_pair(&self) -> bool {
        self.first == self.second
    }
}

/// Operator-toggled index pairs `(i, j)` with `i < j`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairToggles {
    enabled: BTreeSet<(usize, usize)>,
}

impl PairToggles {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(i: usize, j: usize) -> Option<(usize, usize)> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some((i, j)),
            std::cmp::Ordering::Greater => Some((j, i)),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Flip a pair and return its new state. Diagonal pairs stay off.
    pub fn toggle(&mut self, i: usize, j: usize) -> bool {
        let Some(key) = Self::normalize(i, j) else {
            return false;
        };
        if self.enabled.remove(&key) {
            false
        } else {
            self.enabled.insert(key);
            true
        }
    }

    pub fn enable(&mut self, i: usize, j: usize) {
        if let Some(key) = Self::normalize(i, j) {
            self.enabled.insert(key);
        }
    }

    pub fn disable(&mut self, i: usize, j: usize) {
        if let Some(key) = Self::normalize(i, j) {
            self.enabled.remove(&key);
        }
    }

    pub fn is_enabled(&self, i: usize, j: usize) -> bool {
        Self::normalize(i, j).is_some_and(|key| self.enabled.contains(&key))
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

impl FromIterator<(usize, usize)> for PairToggles {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut toggles = Self::new();
        for (i, j) in iter {
            toggles.enable(i, j);
        }
        toggles
    }
}

/// How pairs are drawn from an entity list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PairStrategy {
    /// Curated name pairs, kept when both names are present.
    Default(Vec<(String, String)>),
    /// Consecutive entities `(e[i], e[i + 1])`.
    Sequential,
    /// Toggled entries of the upper triangle `{(i, j) : i < j}`.
    Custom(PairToggles),
}

impl PairStrategy {
    fn kind(&self) -> SelectionStrategy {
        match self {
            Self::Default(_) => SelectionStrategy::Default,
            Self::Sequential => SelectionStrategy::Sequential,
            Self::Custom(_) => SelectionStrategy::Custom,
        }
    }
}

/// Every candidate `(i, j)` with `i < j < n`, row by row. This is the grid
/// a custom selection toggles over.
pub fn upper_triangle(n: usize) -> Vec<(usize, usize)> {
    (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).collect()
}

/// Produce the pairs selected by `strategy` over `entities`.
///
/// Output keeps the strategy's order, drops self pairs and drops repeats of
/// a pair already emitted in either orientation.
pub fn enumerate_pairs<S: AsRef<str>>(entities: &[S], strategy: &PairStrategy) -> Vec<EntityPair> {
    let names: Vec<&str> = entities.iter().map(|e| e.as_ref()).collect();
    let kind = strategy.kind();

    let raw: Vec<(&str, &str)> = match strategy {
        PairStrategy::Default(curated) => {
            let present: HashSet<&str> = names.iter().copied().collect();
            curated
                .iter()
                .filter(|(a, b)| present.contains(a.as_str()) && present.contains(b.as_str()))
                .map(|(a, b)| (a.as_str(), b.as_str()))
                .collect()
        }
        PairStrategy::Sequential => names.windows(2).map(|w| (w[0], w[1])).collect(),
        PairStrategy::Custom(toggles) => upper_triangle(names.len())
            .into_iter()
            .filter(|&(i, j)| toggles.is_enabled(i, j))
            .map(|(i, j)| (names[i], names[j]))
            .collect(),
    };

    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|(a, b)| EntityPair::new(a, b, kind))
        .filter(|pair| !pair.is_self_pair())
        .filter(|pair| {
            let (a, b) = pair.key();
            seen.insert((a.to_string(), b.to_string()))
        })
        .collect()
}

/// Ordered point-to-line pair for perpendicular measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossPair {
    pub point: String,
    pub line: String,
}

/// How point-to-line pairs are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CrossStrategy {
    /// The first `points` points against the first `lines` lines.
    Leading { points: usize, lines: usize },
    /// Every point against the first line.
    AllToFirstLine,
    /// Explicit `(point_index, line_index)` selections.
    Custom(BTreeSet<(usize, usize)>),
}

impl Default for CrossStrategy {
    fn default() -> Self {
        Self::Leading { points: 3, lines: 2 }
    }
}

/// Produce point-to-line pairs, point-major. Out-of-range indices are
/// ignored.
pub fn enumerate_cross_pairs<P: AsRef<str>, L: AsRef<str>>(
    points: &[P],
    lines: &[L],
    strategy: &CrossStrategy,
) -> Vec<CrossPair> {
    let indices: Vec<(usize, usize)> = match strategy {
        CrossStrategy::Leading { points: np, lines: nl } => {
            let np = (*np).min(points.len());
            let nl = (*nl).min(lines.len());
            (0..np).flat_map(|i| (0..nl).map(move |j| (i, j))).collect()
        }
        CrossStrategy::AllToFirstLine if lines.is_empty() => Vec::new(),
        CrossStrategy::AllToFirstLine => (0..points.len()).map(|i| (i, 0)).collect(),
        CrossStrategy::Custom(selected) => selected
            .iter()
            .copied()
            .filter(|&(i, j)| i < points.len() && j < lines.len())
            .collect(),
    };

    indices
        .into_iter()
        .map(|(i, j)| CrossPair {
            point: points[i].as_ref().to_string(),
            line: lines[j].as_ref().to_string(),
        })
        .collect()
}
