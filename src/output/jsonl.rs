use serde::Serialize;
use std::io::Write;

/// Write records as JSONL (one JSON object per line), then flush.
pub fn write_jsonl<T: Serialize>(out: &mut dyn Write, records: &[T]) -> Result<(), String> {
    for record in records {
        write_line(out, record)?;
    }

    out.flush()
        .map_err(|error| format!("failed to flush JSONL output: {error}"))?;

    Ok(())
}

/// Write and flush a single JSONL line.
pub fn write_jsonl_line<T: Serialize>(out: &mut dyn Write, record: &T) -> Result<(), String> {
    write_jsonl(out, std::slice::from_ref(record))
}

fn write_line<T: Serialize>(out: &mut dyn Write, record: &T) -> Result<(), String> {
    serde_json::to_writer(&mut *out, record)
        .map_err(|error| format!("failed to serialize JSON record: {error}"))?;
    out.write_all(b"\n")
        .map_err(|error| format!("failed to write JSONL newline: {error}"))
}
