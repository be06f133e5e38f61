use bstr::ByteSlice;
use lazy_static::lazy_static;
use nom::{bytes::complete::*, IResult};
use regex::bytes::Regex;

use crate::graph::{NodeId, Orientation};
use crate::parser::{FieldResult, ParseFieldError};

/// A decoded FASTG node name, e.g.
/// `EDGE_12_length_5032_cov_18.5'`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeName {
    pub node: NodeId,
    pub length: usize,
    pub coverage: f64,
}

fn parse_field<T: std::str::FromStr>(bytes: &[u8]) -> FieldResult<T> {
    let s = bytes.to_str()?;
    s.parse().map_err(|_| ParseFieldError::ParseFromStringError)
}

/// Decode a short node name. The whole input must match; the
/// segment number, length, coverage and reversal marker are all
/// taken from the name.
pub fn parse_short_name(input: &[u8]) -> FieldResult<NodeName> {
    lazy_static! {
        static ref RE: Regex = Regex::new(
            r"(?-u)^(?:EDGE|NODE)_([0-9]+)_length_([0-9]+)_cov_([0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)('?)$"
        )
        .unwrap();
    }

    let caps = RE
        .captures(input)
        .ok_or(ParseFieldError::InvalidField("node name"))?;

    let id = parse_field(&caps[1])?;
    let length = parse_field(&caps[2])?;
    let coverage = parse_field(&caps[3])?;
    let orientation = Orientation::from_fastg_marker(&caps[4])
        .ok_or(ParseFieldError::InvalidField("node name"))?;

    Ok(NodeName {
        node: NodeId::new(id, orientation),
        length,
        coverage,
    })
}

fn short_name_token(i: &[u8]) -> IResult<&[u8], &[u8]> {
    is_not(":,; \t\r\n")(i)
}

// The header of a FASTG record: `>name:succ1,succ2;`, where the
// successor list and the trailing semicolon are both optional.
fn long_name_tokens(i: &[u8]) -> IResult<&[u8], (&[u8], Vec<&[u8]>)> {
    use nom::{
        combinator::opt,
        multi::separated_nonempty_list,
        sequence::preceded,
    };

    let (i, _) = opt(tag(">"))(i)?;
    let (i, name) = short_name_token(i)?;
    let (i, succs) = opt(preceded(
        tag(":"),
        separated_nonempty_list(tag(","), short_name_token),
    ))(i)?;
    let (i, _) = opt(tag(";"))(i)?;

    Ok((i, (name, succs.unwrap_or_default())))
}

/// Decode a FASTG record header into the node it names and the
/// nodes it links to, in the order they're listed.
pub fn parse_long_name(
    input: &[u8],
) -> FieldResult<(NodeName, Vec<NodeName>)> {
    let input = input.trim_end();
    let (rest, (name, succs)) = long_name_tokens(input)
        .map_err(|_| ParseFieldError::InvalidField("node name"))?;

    if !rest.is_empty() {
        return Err(ParseFieldError::InvalidField("node name"));
    }

    let node = parse_short_name(name)?;
    let succs = succs
        .into_iter()
        .map(parse_short_name)
        .collect::<FieldResult<Vec<_>>>()?;

    Ok((node, succs))
}

/// Decode the query name of an alignment hit into the node it is
/// anchored to and that node's length. Accepts either a bare short
/// name or a full FASTG header.
pub fn decode_query_name(input: &[u8]) -> FieldResult<(NodeId, usize)> {
    let (name, _) = parse_long_name(input)?;
    Ok((name.node, name.length))
}
