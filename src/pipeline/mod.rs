pub mod ingest;

pub use ingest::{
    AttachmentReport, AttachmentStatus, IngestOptions, IngestOutcome, IngestSummary,
    ingest_attachments, ingest_record, process_attachment,
};
