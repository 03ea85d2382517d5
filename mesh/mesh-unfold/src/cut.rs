//! Cut resolution: choose tree edges to sever so every conflict is split.
//!
//! Each overlapping face pair is mapped to the unique tree path between the
//! two faces. A cut set is valid when every such path contains at least one
//! cut edge (an edge multicut). Finding the smallest one is NP-hard, so the
//! default strategy is a greedy set cover; an exhaustive search is kept for
//! checking the greedy result on small inputs.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{UnfoldError, UnfoldResult};
use crate::overlap::Conflict;
use crate::spanning_tree::SpanningTree;

/// Chooses which tree edges to cut.
///
/// `paths` holds one entry per conflict: the dual edge indices of the tree
/// path between the two overlapping faces. The returned edges must hit
/// every non-empty path.
pub trait CutStrategy {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Select the dual edges to remove.
    ///
    /// # Errors
    ///
    /// Strategies may refuse inputs they cannot handle.
    fn select_cuts(&self, paths: &[Vec<usize>]) -> UnfoldResult<Vec<usize>>;
}

/// Greedy weighted set cover.
///
/// Repeatedly cuts the edge shared by the most still-unresolved paths
/// (cost `1 / occurrences`), breaking ties by the lowest dual edge index,
/// until every path is hit. Not optimal, but never cuts an edge that
/// resolves nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyCut;

impl CutStrategy for GreedyCut {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn select_cuts(&self, paths: &[Vec<usize>]) -> UnfoldResult<Vec<usize>> {
        let mut resolved: Vec<bool> = paths.iter().map(Vec::is_empty).collect();
        let mut cuts = Vec::new();

        loop {
            // BTreeMap keeps the scan in edge order, so the first maximum
            // is the lowest index.
            let mut occurrences: BTreeMap<usize, usize> = BTreeMap::new();
            for (path, _) in paths.iter().zip(&resolved).filter(|(_, done)| !**done) {
                for &edge in path {
                    *occurrences.entry(edge).or_default() += 1;
                }
            }

            let mut best: Option<(usize, usize)> = None;
            for (&edge, &count) in &occurrences {
                if best.is_none_or(|(_, top)| count > top) {
                    best = Some((edge, count));
                }
            }
            let Some((edge, count)) = best else {
                break;
            };

            debug!(edge, covers = count, "Greedy cut");
            cuts.push(edge);
            for (path, done) in paths.iter().zip(resolved.iter_mut()) {
                if !*done && path.contains(&edge) {
                    *done = true;
                }
            }
        }

        Ok(cuts)
    }
}

/// Exhaustive minimum multicut, for small inputs only.
///
/// Tries every subset of the candidate edges in order of increasing size
/// and returns the first that hits all paths, so the result has minimum
/// cardinality. Runtime is exponential in the number of distinct edges
/// appearing in the paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustiveCut {
    /// Largest number of candidate edges the search accepts.
    pub max_candidates: usize,
}

impl Default for ExhaustiveCut {
    fn default() -> Self {
        Self { max_candidates: 20 }
    }
}

impl ExhaustiveCut {
    /// Create a search with a custom candidate limit.
    #[must_use]
    pub const fn with_max_candidates(max_candidates: usize) -> Self {
        Self { max_candidates }
    }
}

impl CutStrategy for ExhaustiveCut {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn select_cuts(&self, paths: &[Vec<usize>]) -> UnfoldResult<Vec<usize>> {
        let paths: Vec<&Vec<usize>> = paths.iter().filter(|p| !p.is_empty()).collect();
        let mut candidates: Vec<usize> = paths.iter().flat_map(|p| p.iter().copied()).collect();
        candidates.sort_unstable();
        candidates.dedup();

        if candidates.len() > self.max_candidates {
            return Err(UnfoldError::CutSearchTooLarge {
                candidates: candidates.len(),
                limit: self.max_candidates,
            });
        }

        let hits_all = |chosen: &[usize]| {
            paths
                .iter()
                .all(|p| chosen.iter().any(|&i| p.contains(&candidates[i])))
        };

        for size in 0..=candidates.len() {
            // Lexicographic k-combinations of candidate positions.
            let mut chosen: Vec<usize> = (0..size).collect();
            loop {
                if hits_all(&chosen) {
                    return Ok(chosen.iter().map(|&i| candidates[i]).collect());
                }
                let Some(pos) = (0..size).rev().find(|&k| chosen[k] < candidates.len() - size + k)
                else {
                    break;
                };
                chosen[pos] += 1;
                for k in pos + 1..size {
                    chosen[k] = chosen[k - 1] + 1;
                }
            }
        }

        // Cutting every candidate always hits every non-empty path.
        Ok(candidates)
    }
}

/// Map conflicts to tree paths and let `strategy` pick the cut edges.
///
/// Conflicts whose faces are already in different components have no path
/// and need no cut; they are skipped with a warning.
///
/// # Errors
///
/// Propagates any error from the strategy.
pub fn resolve_conflicts(
    tree: &SpanningTree,
    conflicts: &[Conflict],
    strategy: &dyn CutStrategy,
) -> UnfoldResult<Vec<usize>> {
    let mut paths = Vec::with_capacity(conflicts.len());
    let mut unreachable = 0usize;
    for conflict in conflicts {
        match tree.path(conflict.a, conflict.b) {
            Some(path) => paths.push(path),
            None => unreachable += 1,
        }
    }
    if unreachable > 0 {
        warn!(
            unreachable,
            "Conflicting faces are not connected in the spanning tree"
        );
    }

    let cuts = strategy.select_cuts(&paths)?;
    debug!(
        strategy = strategy.name(),
        paths = paths.len(),
        cuts = cuts.len(),
        "Selected cut edges"
    );
    Ok(cuts)
}
