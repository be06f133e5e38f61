//! Chain tabular alignment hits across the edges of a FASTG assembly
//! graph.
//!
//! Hits are read with [`parser::HitParser`], the graph with
//! [`fastg::load_fastg`]; [`chain::add_connections`] then links every
//! hit to the hits that continue it on a successor node, and
//! [`writer::write_chains`] prints the result.

pub mod alignment;
pub mod chain;
pub mod fastg;
pub mod graph;
pub mod index;
pub mod parser;
pub mod writer;
