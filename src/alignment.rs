use bstr::{BStr, BString, ByteSlice};

use std::fmt::Display;

use crate::graph::{decode_query_name, NodeId, Orientation};
use crate::parser::{FieldResult, ParseFieldError};

/// Number of tab-separated columns in a tabular BLAST hit
pub const HIT_FIELDS: usize = 12;

/// A hit only takes part in chaining if its identity, normalized by
/// the whole node length, is above this
pub const VALID_THRESHOLD: f64 = 0.95;

/// One tabular alignment hit between an assembly node (the query)
/// and a reference sequence (the subject). Coordinates are kept as
/// reported: 1-based, with the subject end less than the start for
/// hits on the reverse strand.
///
/// Records are created once from their source line and never
/// modified; chain links live in `chain::Connections`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentRecord {
    line: BString,
    query_id: NodeId,
    query_length: usize,
    subject_id: BString,
    percent_identity: f64,
    alignment_length: i64,
    mismatches: i64,
    gap_openings: i64,
    query_start: i64,
    query_end: i64,
    subject_start: i64,
    subject_end: i64,
    e_value: f64,
    bit_score: f64,
}

impl Display for AlignmentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.line)
    }
}

fn parse_next<'a, I, T>(input: &mut I, field: &'static str) -> FieldResult<T>
where
    I: Iterator<Item = &'a [u8]>,
    T: std::str::FromStr,
{
    let bytes = input.next().ok_or(ParseFieldError::MissingFields)?;
    let s = bytes.to_str()?;
    s.parse().map_err(|_| ParseFieldError::InvalidField(field))
}

impl AlignmentRecord {
    /// Parse one tab-delimited hit line: query name, subject name,
    /// percent identity, alignment length, mismatches, gap openings,
    /// query start/end, subject start/end, e-value and bit score.
    /// Columns past the twelfth are kept in the line but not parsed.
    pub fn from_line(line: &[u8]) -> FieldResult<Self> {
        let line = line.trim_end_with(|c| c == '\n' || c == '\r');

        if line.split_str("\t").take(HIT_FIELDS).count() < HIT_FIELDS {
            return Err(ParseFieldError::MissingFields);
        }

        let mut fields = line.split_str("\t");

        let query_name = fields.next().ok_or(ParseFieldError::MissingFields)?;
        let (query_id, query_length) = decode_query_name(query_name)?;
        if query_length == 0 {
            return Err(ParseFieldError::InvalidField("query length"));
        }

        let subject_id = fields
            .next()
            .ok_or(ParseFieldError::MissingFields)?
            .into();

        let percent: f64 = parse_next(&mut fields, "percent identity")?;
        let alignment_length = parse_next(&mut fields, "alignment length")?;
        let mismatches = parse_next(&mut fields, "mismatches")?;
        let gap_openings = parse_next(&mut fields, "gap openings")?;
        let query_start = parse_next(&mut fields, "query start")?;
        let query_end = parse_next(&mut fields, "query end")?;
        let subject_start = parse_next(&mut fields, "subject start")?;
        let subject_end = parse_next(&mut fields, "subject end")?;
        let e_value = parse_next(&mut fields, "e-value")?;
        let bit_score = parse_next(&mut fields, "bit score")?;

        Ok(AlignmentRecord {
            line: line.into(),
            query_id,
            query_length,
            subject_id,
            percent_identity: percent / 100.0,
            alignment_length,
            mismatches,
            gap_openings,
            query_start,
            query_end,
            subject_start,
            subject_end,
            e_value,
            bit_score,
        })
    }

    /// The source line, without its line terminator
    #[inline]
    pub fn line(&self) -> &BStr {
        self.line.as_bstr()
    }

    #[inline]
    pub fn query_id(&self) -> NodeId {
        self.query_id
    }

    #[inline]
    pub fn query_length(&self) -> usize {
        self.query_length
    }

    #[inline]
    pub fn subject_id(&self) -> &BStr {
        self.subject_id.as_bstr()
    }

    /// Identity over the aligned columns, as a fraction
    #[inline]
    pub fn percent_identity(&self) -> f64 {
        self.percent_identity
    }

    #[inline]
    pub fn alignment_length(&self) -> i64 {
        self.alignment_length
    }

    #[inline]
    pub fn mismatches(&self) -> i64 {
        self.mismatches
    }

    #[inline]
    pub fn gap_openings(&self) -> i64 {
        self.gap_openings
    }

    #[inline]
    pub fn query_start(&self) -> i64 {
        self.query_start
    }

    #[inline]
    pub fn query_end(&self) -> i64 {
        self.query_end
    }

    #[inline]
    pub fn subject_start(&self) -> i64 {
        self.subject_start
    }

    #[inline]
    pub fn subject_end(&self) -> i64 {
        self.subject_end
    }

    #[inline]
    pub fn left_bound(&self) -> i64 {
        self.subject_start.min(self.subject_end)
    }

    #[inline]
    pub fn right_bound(&self) -> i64 {
        self.subject_start.max(self.subject_end)
    }

    #[inline]
    pub fn e_value(&self) -> f64 {
        self.e_value
    }

    #[inline]
    pub fn bit_score(&self) -> f64 {
        self.bit_score
    }

    /// Bases of the node before the aligned part
    #[inline]
    pub fn leading_unaligned(&self) -> i64 {
        self.query_start - 1
    }

    /// Bases of the node after the aligned part
    #[inline]
    pub fn trailing_unaligned(&self) -> i64 {
        self.query_length as i64 - self.query_end
    }

    /// Alignment columns not accounted for by the subject span
    #[inline]
    pub fn num_insertions(&self) -> i64 {
        self.alignment_length
            - ((self.subject_start - self.subject_end).abs() + 1)
    }

    /// Alignment columns not accounted for by the query span
    #[inline]
    pub fn num_deletions(&self) -> i64 {
        self.alignment_length - ((self.query_start - self.query_end).abs() + 1)
    }

    /// Identity scaled by the fraction of the node that takes part in
    /// the alignment, so that partial hits score lower.
    #[inline]
    pub fn coverage_identity(&self) -> f64 {
        self.alignment_length as f64 * self.percent_identity
            / self.query_length as f64
    }

    #[inline]
    pub fn is_valid_with(&self, threshold: f64) -> bool {
        self.coverage_identity() > threshold
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid_with(VALID_THRESHOLD)
    }

    #[inline]
    pub fn strand(&self) -> Orientation {
        Orientation::from_subject_span(self.subject_start, self.subject_end)
    }

    #[inline]
    pub fn is_forward(&self) -> bool {
        self.strand() == Orientation::Forward
    }

    /// Whether `self` runs directly into `other` across a graph edge
    /// whose two nodes overlap by `overlap` bases, with `self`
    /// upstream.
    ///
    /// The end of `self` is extended by its unaligned tail to where
    /// its node ends on the subject, and the start of `other` is
    /// pulled back by its unaligned head. The node boundary, moved
    /// back by the shared bases, must then fall within the indel
    /// slack of both hits. Hits on different strands are never
    /// adjacent.
    pub fn adjacent_before(&self, other: &Self, overlap: usize) -> bool {
        if self.strand() != other.strand() {
            return false;
        }

        let min_insert = self.num_insertions().min(other.num_insertions());
        let min_delete = self.num_deletions().min(other.num_deletions());
        let shift = overlap as i64 - 1;

        if self.is_forward() {
            let real_self_end = self.subject_end + self.trailing_unaligned();
            let other_start = other.subject_start - other.leading_unaligned();
            let boundary = real_self_end - shift;
            other_start - min_insert <= boundary
                && boundary <= other_start + min_delete
        } else {
            let real_self_end = self.subject_end - self.trailing_unaligned();
            let other_start = other.subject_start + other.leading_unaligned();
            let boundary = real_self_end + shift;
            other_start - min_delete <= boundary
                && boundary <= other_start + min_insert
        }
    }
}
