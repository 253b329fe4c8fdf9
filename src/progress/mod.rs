pub mod reporter;

pub use reporter::{report_progress, report_warning};
