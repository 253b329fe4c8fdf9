use crate::document::open_attachment;
use crate::progress::reporter::{
    ProgressEvent, W_NO_IDENTITY, W_SPARSE_TEXT, W_STORE, W_UNREADABLE, report_progress,
    report_warning,
};
use crate::report::{MatchRecord, parse_with_year};
use crate::source::Attachment;
use crate::store::IndexStore;
use serde::Serialize;
use std::time::Instant;

/// What happened to one record under the exists-then-index protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// New id; the document was written.
    Indexed,
    /// The id was already present; nothing was written.
    Duplicate,
    /// The record has no id and was never sent to the store.
    Skipped,
    /// The store rejected the existence check or the write.
    Failed(String),
}

/// Apply the dedup protocol for one record.
///
/// Records without an id never reach the store. Otherwise the store is asked
/// whether the id exists in the record's index and written only when it does
/// not.
pub fn ingest_record(store: &mut dyn IndexStore, record: &MatchRecord) -> IngestOutcome {
    let Some(id) = record.id.as_deref() else {
        return IngestOutcome::Skipped;
    };

    match store.exists(&record.index, id) {
        Ok(true) => IngestOutcome::Duplicate,
        Ok(false) => match store.index(&record.index, id, &record.document()) {
            Ok(()) => IngestOutcome::Indexed,
            Err(error) => IngestOutcome::Failed(error),
        },
        Err(error) => IngestOutcome::Failed(error),
    }
}

/// Per-attachment status reported on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentStatus {
    Indexed,
    Duplicate,
    Skipped,
    Unreadable,
    Failed,
}

/// One stdout line per processed attachment.
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentReport {
    #[serde(rename = "type")]
    pub event_type: String,
    pub attachment: String,
    pub sender: Option<String>,
    pub status: AttachmentStatus,
    pub index: Option<String>,
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AttachmentReport {
    fn new(attachment: &Attachment, status: AttachmentStatus) -> Self {
        Self {
            event_type: "attachment".to_owned(),
            attachment: attachment.name.clone(),
            sender: attachment.sender.clone(),
            status,
            index: None,
            id: None,
            message: None,
        }
    }
}

/// Counts over a whole run, printed as the final stdout line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    #[serde(rename = "type")]
    pub event_type: String,
    pub total: u64,
    pub indexed: u64,
    pub duplicate: u64,
    pub skipped: u64,
    pub unreadable: u64,
    pub failed: u64,
    pub dry_run: bool,
}

impl IngestSummary {
    fn new(dry_run: bool) -> Self {
        Self {
            event_type: "summary".to_owned(),
            dry_run,
            ..Self::default()
        }
    }

    fn record(&mut self, status: AttachmentStatus) {
        self.total += 1;
        match status {
            AttachmentStatus::Indexed => self.indexed += 1,
            AttachmentStatus::Duplicate => self.duplicate += 1,
            AttachmentStatus::Skipped => self.skipped += 1,
            AttachmentStatus::Unreadable => self.unreadable += 1,
            AttachmentStatus::Failed => self.failed += 1,
        }
    }

    /// True when every attachment ended up in the store.
    pub fn all_stored(&self) -> bool {
        self.indexed + self.duplicate == self.total
    }
}

/// Knobs for one ingest run.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Year that month/day report dates resolve into.
    pub year: i32,
    pub dry_run: bool,
    pub progress: bool,
}

/// Open, parse and store one attachment.
pub fn process_attachment(
    attachment: &Attachment,
    store: &mut dyn IndexStore,
    year: i32,
) -> AttachmentReport {
    let document = match open_attachment(&attachment.name, &attachment.bytes) {
        Ok(document) => document,
        Err(error) => {
            report_warning(&attachment.name, W_UNREADABLE, &format!("skipped: {error}"));
            let mut report = AttachmentReport::new(attachment, AttachmentStatus::Unreadable);
            report.message = Some(error);
            return report;
        }
    };

    if document.text().trim().is_empty() {
        report_warning(
            document.name(),
            W_SPARSE_TEXT,
            &format!("no text extracted from {} document", document.format()),
        );
    }

    let record = parse_with_year(document.text(), year);
    let outcome = ingest_record(store, &record);

    let status = match &outcome {
        IngestOutcome::Indexed => AttachmentStatus::Indexed,
        IngestOutcome::Duplicate => AttachmentStatus::Duplicate,
        IngestOutcome::Skipped => AttachmentStatus::Skipped,
        IngestOutcome::Failed(_) => AttachmentStatus::Failed,
    };
    let mut report = AttachmentReport::new(attachment, status);
    report.index = Some(record.index.clone());
    report.id = record.id.clone();

    match outcome {
        IngestOutcome::Skipped => {
            let message = missing_identity_message(&record);
            report_warning(&attachment.name, W_NO_IDENTITY, &message);
            report.message = Some(message);
        }
        IngestOutcome::Failed(error) => {
            report_warning(&attachment.name, W_STORE, &error);
            report.message = Some(error);
        }
        IngestOutcome::Indexed | IngestOutcome::Duplicate => {}
    }

    report
}

/// Run every attachment through the pipeline, in order.
///
/// Failures are confined to the attachment they occur on.
pub fn ingest_attachments(
    attachments: &[Attachment],
    store: &mut dyn IndexStore,
    options: IngestOptions,
) -> (Vec<AttachmentReport>, IngestSummary) {
    let started = Instant::now();
    let total = attachments.len() as u64;
    let mut summary = IngestSummary::new(options.dry_run);
    let mut reports = Vec::with_capacity(attachments.len());

    for attachment in attachments {
        let report = process_attachment(attachment, store, options.year);
        summary.record(report.status);
        reports.push(report);

        if options.progress {
            report_progress(&ProgressEvent::new(summary.total, Some(total), started));
        }
    }

    (reports, summary)
}

fn missing_identity_message(record: &MatchRecord) -> String {
    let mut missing = Vec::new();
    if record.player_name.is_none() {
        missing.push("player_name");
    }
    if record.timestamp.is_none() {
        missing.push(if record.date.is_some() {
            "parseable date"
        } else {
            "date"
        });
    }
    format!("record has no _id (missing {})", missing.join(", "))
}
