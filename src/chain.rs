use log::{debug, trace};

use crate::alignment::{AlignmentRecord, VALID_THRESHOLD};
use crate::graph::AssemblyGraph;
use crate::parser::ChainError;

/// Tunables for chain building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainConfig {
    /// How far past the projected node boundary, in subject bases, a
    /// continuation hit may start
    pub window_slack: i64,
    /// Hits whose coverage identity is not above this are dropped
    /// before chaining
    pub min_coverage_identity: f64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            window_slack: 50,
            min_coverage_identity: VALID_THRESHOLD,
        }
    }
}

impl ChainConfig {
    pub fn with_window_slack(mut self, window_slack: i64) -> Self {
        self.window_slack = window_slack;
        self
    }

    pub fn with_min_coverage_identity(mut self, threshold: f64) -> Self {
        self.min_coverage_identity = threshold;
        self
    }
}

/// The links found between hits. Indices refer to positions in the
/// slice that was passed to `add_connections`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connections {
    order: Vec<usize>,
    children: Vec<Vec<usize>>,
}

impl Connections {
    /// Record indices sorted on subject start; equal starts keep
    /// input order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The hits that directly continue hit `ix`, in the order they
    /// were found
    pub fn children(&self, ix: usize) -> &[usize] {
        self.children.get(ix).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Each record index with its children, in sorted order
    pub fn iter_sorted(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.order
            .iter()
            .map(move |&ix| (ix, self.children[ix].as_slice()))
    }

    /// Whether any hit lists `ix` as a child
    pub fn is_child(&self, ix: usize) -> bool {
        self.children.iter().any(|c| c.contains(&ix))
    }

    pub fn link_count(&self) -> usize {
        self.children.iter().map(|c| c.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Keep the hits that can take part in chaining: forward strand, with
/// coverage identity above the configured threshold. Input order is
/// preserved.
pub fn select_chainable(
    records: Vec<AlignmentRecord>,
    config: &ChainConfig,
) -> Vec<AlignmentRecord> {
    records
        .into_iter()
        .filter(|r| r.is_forward() && r.is_valid_with(config.min_coverage_identity))
        .collect()
}

/// Link each hit to the hits that continue it across an edge of the
/// assembly graph.
///
/// Hits are visited in order of subject start. For every successor
/// edge of a hit's node, the hits that start before
/// `subject_end - (overlap - 1) + window_slack` are scanned, and any
/// on the successor node that the hit is `adjacent_before` become its
/// children. Only later hits are scanned, so no hit can reach itself.
///
/// All `records` are expected to be forward-strand; every node they
/// are anchored to must be in `graph`.
pub fn add_connections(
    records: &[AlignmentRecord],
    graph: &AssemblyGraph,
    config: &ChainConfig,
) -> Result<Connections, ChainError> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by_key(|&ix| records[ix].subject_start());

    let mut children = vec![Vec::new(); records.len()];

    for (pos, &parent_ix) in order.iter().enumerate() {
        let parent = &records[parent_ix];
        let node = graph.node(&parent.query_id())?;

        for (child_node, overlap) in node.successors() {
            let stop = parent.subject_end() - (overlap as i64 - 1)
                + config.window_slack;

            for &cand_ix in order[pos + 1..]
                .iter()
                .take_while(|&&ix| records[ix].subject_start() < stop)
            {
                let cand = &records[cand_ix];
                if cand.query_id() == child_node
                    && parent.adjacent_before(cand, overlap)
                {
                    trace!(
                        "linked {} at {} -> {} at {}",
                        parent.query_id(),
                        parent.subject_start(),
                        cand.query_id(),
                        cand.subject_start()
                    );
                    children[parent_ix].push(cand_ix);
                }
            }
        }
    }

    let connections = Connections { order, children };
    debug!(
        "made {} links between {} hits",
        connections.link_count(),
        connections.len()
    );

    Ok(connections)
}
