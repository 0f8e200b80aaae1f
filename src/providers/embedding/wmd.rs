//! Word Mover's Distance between two token sequences.
//!
//! Each document becomes a normalised bag of words over its in-vocabulary
//! tokens. The distance is the cheapest way to move one histogram onto the
//! other when moving mass between two words costs the Euclidean distance of
//! their vectors. Identical bags are at distance zero; distinct bags whose
//! vectors all coincide cannot be told apart and are infinitely far.

use std::collections::HashMap;

use tracing::debug;

use super::{WmdError, WordEmbeddings};
use crate::providers::SemanticDistance;

/// Masses below this are treated as exhausted.
const EPSILON: f64 = 1e-12;

/// [`SemanticDistance`] backed by word2vec vectors.
#[derive(Debug, Clone)]
pub struct WordMoversDistance {
    embeddings: WordEmbeddings,
}

impl WordMoversDistance {
    #[must_use]
    pub fn new(embeddings: WordEmbeddings) -> Self {
        Self { embeddings }
    }

    #[must_use]
    pub fn embeddings(&self) -> &WordEmbeddings {
        &self.embeddings
    }

    fn histogram<'t>(&self, tokens: &[&'t str]) -> Histogram<'t, '_> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut histogram = Histogram::default();
        for &token in tokens {
            let Some(vector) = self.embeddings.get(token) else {
                histogram.dropped += 1;
                continue;
            };
            let slot = *positions.entry(token).or_insert_with(|| {
                histogram.words.push((token, vector));
                histogram.counts.push(0);
                histogram.words.len() - 1
            });
            if let Some(count) = histogram.counts.get_mut(slot) {
                *count += 1;
            }
        }
        histogram
    }
}

/// Distinct in-vocabulary words in first-seen order with their counts.
#[derive(Default)]
struct Histogram<'t, 'e> {
    words: Vec<(&'t str, &'e [f32])>,
    counts: Vec<usize>,
    dropped: usize,
}

impl Histogram<'_, '_> {
    fn count_of(&self, word: &str) -> Option<usize> {
        let slot = self.words.iter().position(|&(seen, _)| seen == word)?;
        self.counts.get(slot).copied()
    }

    /// Whether both bags hold the same words in the same proportions.
    fn same_proportions(&self, other: &Self) -> bool {
        let total = self.counts.iter().sum::<usize>();
        let other_total = other.counts.iter().sum::<usize>();
        self.words.len() == other.words.len()
            && self
                .words
                .iter()
                .zip(&self.counts)
                .all(|(&(word, _), &count)| {
                    other.count_of(word).is_some_and(|other_count| {
                        count.checked_mul(other_total) == other_count.checked_mul(total)
                    })
                })
    }

    #[expect(clippy::float_arithmetic, reason = "normalising word frequencies")]
    #[expect(
        clippy::cast_precision_loss,
        reason = "token counts stay far below 2^52"
    )]
    fn weights(&self) -> Vec<f64> {
        let total = self.counts.iter().sum::<usize>() as f64;
        self.counts.iter().map(|&count| count as f64 / total).collect()
    }
}

impl SemanticDistance for WordMoversDistance {
    type Error = WmdError;

    fn distance(&self, left: &[&str], right: &[&str]) -> Result<f64, Self::Error> {
        let left = self.histogram(left);
        let right = self.histogram(right);
        if left.dropped + right.dropped > 0 {
            debug!(
                dropped = left.dropped + right.dropped,
                "ignoring out-of-vocabulary tokens"
            );
        }
        if left.words.is_empty() || right.words.is_empty() {
            debug!("no in-vocabulary tokens on one side; distance is infinite");
            return Ok(f64::INFINITY);
        }

        // Covers the single-word vocabulary too.
        if left.same_proportions(&right) {
            return Ok(0.0);
        }

        let cost: Vec<Vec<f64>> = left
            .words
            .iter()
            .map(|(_, a)| right.words.iter().map(|(_, b)| euclidean(a, b)).collect())
            .collect();
        if cost.iter().flatten().all(|&c| c == 0.0) {
            debug!("all word vectors coincide; distance is infinite");
            return Ok(f64::INFINITY);
        }
        earth_movers(&left.weights(), &right.weights(), &cost)
    }
}

#[expect(clippy::float_arithmetic, reason = "Euclidean norm")]
fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

#[derive(Clone, Copy)]
enum Node {
    Source(usize),
    Sink(usize),
}

struct Paths {
    source_dist: Vec<f64>,
    sink_dist: Vec<f64>,
    source_prev: Vec<Option<usize>>,
    sink_prev: Vec<Option<usize>>,
}

/// Bellman-Ford over the residual transport network, seeded from every
/// source that still has mass to ship.
#[expect(clippy::float_arithmetic, reason = "path lengths over real costs")]
fn shortest_paths(supply: &[f64], cost: &[Vec<f64>], flow: &[Vec<f64>]) -> Paths {
    let sinks = cost.first().map_or(0, Vec::len);
    let mut paths = Paths {
        source_dist: supply
            .iter()
            .map(|&s| if s > EPSILON { 0.0 } else { f64::INFINITY })
            .collect(),
        sink_dist: vec![f64::INFINITY; sinks],
        source_prev: vec![None; supply.len()],
        sink_prev: vec![None; sinks],
    };
    for _ in 0..=supply.len() + sinks {
        let mut changed = false;
        for (i, row) in cost.iter().enumerate() {
            let from = paths.source_dist[i];
            if !from.is_finite() {
                continue;
            }
            for (j, &c) in row.iter().enumerate() {
                if from + c < paths.sink_dist[j] - EPSILON {
                    paths.sink_dist[j] = from + c;
                    paths.sink_prev[j] = Some(i);
                    changed = true;
                }
            }
        }
        for (i, (row, costs)) in flow.iter().zip(cost).enumerate() {
            for (j, (&f, &c)) in row.iter().zip(costs).enumerate() {
                if f <= EPSILON {
                    continue;
                }
                let back = paths.sink_dist[j] - c;
                if back < paths.source_dist[i] - EPSILON {
                    paths.source_dist[i] = back;
                    paths.source_prev[i] = Some(j);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    paths
}

/// Minimum cost of shipping `supply` onto `demand` where moving one unit
/// from source `i` to sink `j` costs `cost[i][j]`.
///
/// Solved exactly by successive shortest augmenting paths. Both sides are
/// expected to carry the same total mass; shipping stops when either runs
/// out.
///
/// # Errors
///
/// Returns [`WmdError::NoConvergence`] if augmentation fails to finish.
#[expect(clippy::float_arithmetic, reason = "min-cost flow over real masses")]
pub fn earth_movers(supply: &[f64], demand: &[f64], cost: &[Vec<f64>]) -> Result<f64, WmdError> {
    let sources = supply.len();
    let sinks = demand.len();
    let mut supply = supply.to_vec();
    let mut demand = demand.to_vec();
    let mut flow = vec![vec![0.0_f64; sinks]; sources];
    let limit = 4 * (sources + 1) * (sinks + 1);
    let mut iterations = 0;

    while supply.iter().any(|&s| s > EPSILON) && demand.iter().any(|&d| d > EPSILON) {
        if iterations == limit {
            return Err(WmdError::NoConvergence { iterations });
        }
        iterations += 1;

        let paths = shortest_paths(&supply, cost, &flow);
        let target = (0..sinks)
            .filter(|&j| demand[j] > EPSILON && paths.sink_dist[j].is_finite())
            .min_by(|&a, &b| paths.sink_dist[a].total_cmp(&paths.sink_dist[b]));
        let Some(target) = target else {
            return Err(WmdError::NoConvergence { iterations });
        };

        // (source, sink, forward)
        let mut edges: Vec<(usize, usize, bool)> = Vec::new();
        let mut node = Node::Sink(target);
        let origin = loop {
            if edges.len() > 2 * (sources + sinks) {
                return Err(WmdError::NoConvergence { iterations });
            }
            match node {
                Node::Sink(j) => {
                    let Some(i) = paths.sink_prev[j] else {
                        return Err(WmdError::NoConvergence { iterations });
                    };
                    edges.push((i, j, true));
                    node = Node::Source(i);
                }
                Node::Source(i) => match paths.source_prev[i] {
                    Some(j) => {
                        edges.push((i, j, false));
                        node = Node::Sink(j);
                    }
                    None => break i,
                },
            }
        };

        let amount = edges
            .iter()
            .filter(|&&(_, _, forward)| !forward)
            .fold(supply[origin].min(demand[target]), |amount, &(i, j, _)| {
                amount.min(flow[i][j])
            });
        for (i, j, forward) in edges {
            if forward {
                flow[i][j] += amount;
            } else {
                flow[i][j] -= amount;
            }
        }
        supply[origin] -= amount;
        demand[target] -= amount;
    }

    Ok(flow
        .iter()
        .zip(cost)
        .flat_map(|(row, costs)| row.iter().zip(costs).map(|(f, c)| f * c))
        .sum())
}
