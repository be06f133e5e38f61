use bstr::io::*;
use bstr::ByteSlice;
use log::{debug, warn};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::graph::{parse_long_name, AssemblyGraph, NodeId};
use crate::parser::{ParseError, ParseFieldError, ParseResult};

/// Builds an `AssemblyGraph` from FASTG. Every record header names a
/// node and, after a `:`, the nodes it links to; each of those links
/// becomes an edge with the same overlap, the k-mer overlap of the
/// assembler that produced the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastgParser {
    overlap: usize,
}

// Running state for the record currently being read, used to compare
// the sequence length with the one in the node name.
struct OpenRecord {
    node: NodeId,
    name_length: usize,
    seq_length: usize,
}

impl OpenRecord {
    fn close(self) {
        if self.seq_length != self.name_length {
            warn!(
                "node {} is named with length {} but has {} bases",
                self.node, self.name_length, self.seq_length
            );
        }
    }
}

impl FastgParser {
    pub fn new(overlap: usize) -> ParseResult<Self> {
        if overlap == 0 {
            return Err(ParseError::InvalidOverlap);
        }
        Ok(FastgParser { overlap })
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    fn parse_header(
        &self,
        graph: &mut AssemblyGraph,
        line: &[u8],
    ) -> Result<OpenRecord, ParseFieldError> {
        let (name, succs) = parse_long_name(line)?;
        graph.insert(name.node, name.length);

        for succ in succs {
            if !graph.contains(&succ.node) {
                graph.insert(succ.node, succ.length);
            }
            graph
                .add_edge(name.node, succ.node, self.overlap)
                .map_err(|_| ParseFieldError::InvalidField("overlap"))?;
        }

        Ok(OpenRecord {
            node: name.node,
            name_length: name.length,
            seq_length: 0,
        })
    }

    pub fn parse_lines<I>(&self, lines: I) -> ParseResult<AssemblyGraph>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>,
    {
        let mut graph = AssemblyGraph::new();
        let mut current: Option<OpenRecord> = None;

        for (ix, line) in lines.enumerate() {
            let line = line.as_ref().trim_end();
            if line.is_empty() {
                continue;
            }

            if line.starts_with(b">") {
                if let Some(record) = current.take() {
                    record.close();
                }
                let record = self
                    .parse_header(&mut graph, line)
                    .map_err(|err| ParseError::invalid_line(err, line, ix + 1))?;
                current = Some(record);
            } else {
                match current.as_mut() {
                    Some(record) => record.seq_length += line.len(),
                    None => {
                        return Err(ParseError::invalid_line(
                            ParseFieldError::InvalidField("header"),
                            line,
                            ix + 1,
                        ))
                    }
                }
            }
        }

        if let Some(record) = current {
            record.close();
        }

        debug!(
            "loaded {} nodes and {} edges with overlap {}",
            graph.len(),
            graph.edge_count(),
            self.overlap
        );

        Ok(graph)
    }

    pub fn parse_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> ParseResult<AssemblyGraph> {
        let file = File::open(path)?;
        let lines = BufReader::new(file)
            .byte_lines()
            .collect::<std::io::Result<Vec<_>>>()?;
        self.parse_lines(lines.iter())
    }
}

/// Load a FASTG file as an assembly graph whose edges all overlap by
/// `overlap` bases
pub fn load_fastg<P: AsRef<Path>>(
    path: P,
    overlap: usize,
) -> ParseResult<AssemblyGraph> {
    FastgParser::new(overlap)?.parse_file(path)
}
