use std::io::{self, Write};

use crate::alignment::AlignmentRecord;
use crate::chain::Connections;

/// Write one line per hit, in subject-start order: the hit's source
/// line followed by the source line of each of its children, all
/// tab-separated.
pub fn write_chains<W: Write>(
    stream: &mut W,
    records: &[AlignmentRecord],
    connections: &Connections,
) -> io::Result<()> {
    for (ix, children) in connections.iter_sorted() {
        stream.write_all(records[ix].line())?;
        for &child in children {
            stream.write_all(b"\t")?;
            stream.write_all(records[child].line())?;
        }
        stream.write_all(b"\n")?;
    }
    Ok(())
}

pub fn chains_string(
    records: &[AlignmentRecord],
    connections: &Connections,
) -> String {
    let mut result = Vec::new();
    write_chains(&mut result, records, connections)
        .expect("Writing to a Vec can't fail");
    String::from_utf8_lossy(&result).into_owned()
}

/// Write the chains as JSON lines, one object per hit in subject
/// start order, with children given as input indices.
#[cfg(feature = "serde1")]
pub fn write_chains_json<W: Write>(
    stream: &mut W,
    records: &[AlignmentRecord],
    connections: &Connections,
) -> io::Result<()> {
    use bstr::ByteSlice;
    use serde_json::json;

    for (ix, children) in connections.iter_sorted() {
        let record = &records[ix];
        let obj = json!({
            "index": ix,
            "query": record.query_id().to_string(),
            "subject": record.subject_id().to_str_lossy(),
            "subject_start": record.subject_start(),
            "subject_end": record.subject_end(),
            "children": children,
        });
        serde_json::to_writer(&mut *stream, &obj)?;
        stream.write_all(b"\n")?;
    }
    Ok(())
}
