use indexmap::IndexMap;

use std::hash::Hash;

use crate::alignment::AlignmentRecord;
use crate::graph::NodeId;

/// A key that hits can be grouped on. Each implementor picks one
/// typed field of `AlignmentRecord`.
pub trait IndexKey {
    type Key: Hash + Eq + Copy;

    fn key(record: &AlignmentRecord) -> Self::Key;
}

/// Group hits by the node they're anchored to
#[derive(Debug, Clone, Copy)]
pub struct ByNodeId;

impl IndexKey for ByNodeId {
    type Key = NodeId;

    #[inline]
    fn key(record: &AlignmentRecord) -> NodeId {
        record.query_id()
    }
}

/// Group hits by their reported start on the subject
#[derive(Debug, Clone, Copy)]
pub struct BySubjectStart;

impl IndexKey for BySubjectStart {
    type Key = i64;

    #[inline]
    fn key(record: &AlignmentRecord) -> i64 {
        record.subject_start()
    }
}

pub type RecordIndex<'a, K> =
    IndexMap<<K as IndexKey>::Key, Vec<&'a AlignmentRecord>>;

/// Bucket `records` on the key `K`. Keys are kept in the order they
/// were first seen, and each bucket keeps input order.
pub fn index_by<'a, K, I>(records: I) -> RecordIndex<'a, K>
where
    K: IndexKey,
    I: IntoIterator<Item = &'a AlignmentRecord>,
{
    let mut index: RecordIndex<'a, K> = IndexMap::new();
    for record in records {
        index.entry(K::key(record)).or_default().push(record);
    }
    index
}

/// True if some hit on `node_a` is directly followed by some hit on
/// `node_b`, given the overlap of the edge between them.
pub fn is_adjacent(
    node_a: NodeId,
    node_b: NodeId,
    index: &RecordIndex<'_, ByNodeId>,
    overlap: usize,
) -> bool {
    let (hits_a, hits_b) = match (index.get(&node_a), index.get(&node_b)) {
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };

    hits_a
        .iter()
        .any(|a| hits_b.iter().any(|b| a.adjacent_before(b, overlap)))
}
