use serde::Serialize;
use std::io::{self, Write};
use std::time::Instant;

const TOOL: &str = "match-report";

/// Attachment could not be opened or its text extracted.
pub const W_UNREADABLE: &str = "W_UNREADABLE";
/// Document text is empty, e.g. a scanned PDF without a text layer.
pub const W_SPARSE_TEXT: &str = "W_SPARSE_TEXT";
/// Parsed record has no identity and was not sent to the store.
pub const W_NO_IDENTITY: &str = "W_NO_IDENTITY";
/// Store call failed for this record.
pub const W_STORE: &str = "W_STORE";

/// Structured progress event emitted to stderr.
#[derive(Debug, Serialize)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub tool: String,
    pub processed: u64,
    pub total: Option<u64>,
    pub percent: Option<f64>,
    pub elapsed_ms: u64,
}

impl ProgressEvent {
    pub fn new(processed: u64, total: Option<u64>, started: Instant) -> Self {
        let percent = total
            .filter(|total| *total > 0)
            .map(|total| (processed as f64 / total as f64) * 100.0);
        Self {
            event_type: "progress".to_owned(),
            tool: TOOL.to_owned(),
            processed,
            total,
            percent,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Structured warning about one attachment, emitted to stderr.
#[derive(Debug, Serialize)]
pub struct WarningEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub tool: String,
    pub attachment: String,
    pub code: String,
    pub message: String,
}

impl WarningEvent {
    pub fn new(attachment: &str, code: &str, message: &str) -> Self {
        Self {
            event_type: "warning".to_owned(),
            tool: TOOL.to_owned(),
            attachment: attachment.to_owned(),
            code: code.to_owned(),
            message: message.to_owned(),
        }
    }
}

/// Report progress to stderr as JSONL.
pub fn report_progress(event: &ProgressEvent) {
    let mut stderr = io::stderr().lock();
    let _ = write_event_line(&mut stderr, event);
}

/// Report a per-attachment warning to stderr as JSONL.
pub fn report_warning(attachment: &str, code: &str, message: &str) {
    let warning = WarningEvent::new(attachment, code, message);
    let mut stderr = io::stderr().lock();
    let _ = write_event_line(&mut stderr, &warning);
}

fn write_event_line<T: Serialize>(out: &mut dyn Write, event: &T) -> Result<(), String> {
    serde_json::to_writer(&mut *out, event)
        .map_err(|error| format!("failed to serialize progress event: {error}"))?;
    out.write_all(b"\n")
        .map_err(|error| format!("failed to write progress event newline: {error}"))?;
    out.flush()
        .map_err(|error| format!("failed to flush progress event output: {error}"))?;
    Ok(())
}
