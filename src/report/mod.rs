pub mod fields;
pub mod record;

pub use fields::{ExtractedFields, PlayerLine, ScoreLine};
pub use record::{MATCH_INDEX, MatchRecord, resolve_date};

use chrono::Datelike;

/// Parse one report's text into a match record dated in the current year.
///
/// Never fails: anything the rules cannot find is left as `None`.
pub fn parse(report_text: &str) -> MatchRecord {
    parse_with_year(report_text, chrono::Local::now().year())
}

/// Parse one report's text, resolving its month/day date against `year`.
pub fn parse_with_year(report_text: &str, year: i32) -> MatchRecord {
    MatchRecord::build(ExtractedFields::extract(report_text), year)
}
