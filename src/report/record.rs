use crate::report::fields::ExtractedFields;
use chrono::{Month, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Destination index for match records.
pub const MATCH_INDEX: &str = "cityplay_match";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One flat, indexable record built from a single report.
///
/// Every key is always serialized; absent values serialize as `null`, except
/// `score`, which reads `"None - None"` when the score group is absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "@timestamp")]
    pub timestamp: Option<String>,
    pub my_team: Option<String>,
    pub vs_team: Option<String>,
    pub score: String,
    pub player_name: Option<String>,
    pub position: Option<String>,
    pub date: Option<String>,
    pub playing_time_minutes: Option<u32>,
    pub ball_possessions: Option<u32>,
    pub one_touch: Option<u32>,
    pub short_possessions: Option<u32>,
    pub long_possessions: Option<u32>,
    pub total_releases: Option<u32>,
    pub distance_covered_km: Option<f64>,
    pub sprint_distance_m: Option<f64>,
    pub accl_decl_count: Option<u32>,
    pub work_rate_m_per_min: Option<f64>,
}

impl MatchRecord {
    /// Assemble a record, resolving `date` against `year`.
    pub fn build(fields: ExtractedFields, year: i32) -> Self {
        let timestamp = fields
            .date
            .as_deref()
            .and_then(|date| resolve_date(date, year))
            .map(|resolved| resolved.format(TIMESTAMP_FORMAT).to_string());
        let id = match (fields.player_name(), timestamp.as_deref()) {
            (Some(player_name), Some(timestamp)) => {
                Some(record_id(player_name, timestamp, &fields))
            }
            _ => None,
        };

        let score_line = &fields.score_line;
        Self {
            index: MATCH_INDEX.to_owned(),
            id,
            timestamp,
            my_team: score_line.my_team().map(str::to_owned),
            vs_team: score_line.vs_team().map(str::to_owned),
            score: score_line.score_display(),
            player_name: fields.player_name().map(str::to_owned),
            position: fields.position().map(str::to_owned),
            date: fields.date,
            playing_time_minutes: fields.playing_time_minutes,
            ball_possessions: fields.ball_possessions,
            one_touch: fields.one_touch,
            short_possessions: fields.short_possessions,
            long_possessions: fields.long_possessions,
            total_releases: fields.total_releases,
            distance_covered_km: fields.distance_covered_km,
            sprint_distance_m: fields.sprint_distance_m,
            accl_decl_count: fields.accl_decl_count,
            work_rate_m_per_min: fields.work_rate_m_per_min,
        }
    }

    /// Full record as a JSON object, metadata keys included.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Body sent to the store: the record without `_index` and `_id`,
    /// which travel as the store call's own arguments.
    pub fn document(&self) -> Value {
        let mut body = match self.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        body.remove("_index");
        body.remove("_id");
        Value::Object(body)
    }
}

/// Resolve a month-and-day token such as `Mar 14` to midnight of that day in `year`.
///
/// The month is a three-letter abbreviation in any case, separated from a one
/// or two digit day by whitespace. Full month names and `MAR14` do not resolve.
/// Days that do not exist in `year` (e.g. `Feb 29` outside leap years) resolve
/// to `None`.
pub fn resolve_date(date: &str, year: i32) -> Option<NaiveDateTime> {
    static DATE_TOKEN: OnceLock<Regex> = OnceLock::new();
    let regex = DATE_TOKEN.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z]{3})\s+([0-9]{1,2})\s*$").expect("date token regex compiles")
    });

    let captures = regex.captures(date)?;
    let month: Month = captures[1].parse().ok()?;
    let day: u32 = captures[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month.number_from_month(), day)?.and_hms_opt(0, 0, 0)
}

// Absent score parts render as `None` to keep ids stable with previously indexed records.
fn record_id(player_name: &str, timestamp: &str, fields: &ExtractedFields) -> String {
    let score_line = &fields.score_line;
    let (my_score, vs_score) = match score_line.scores() {
        Some((my_score, vs_score)) => (my_score.to_string(), vs_score.to_string()),
        None => ("None".to_owned(), "None".to_owned()),
    };

    format!(
        "{}_{}_{}_{}_{}_{}",
        player_name,
        timestamp,
        score_line.my_team().unwrap_or("None"),
        score_line.vs_team().unwrap_or("None"),
        my_score,
        vs_score
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fields::{PlayerLine, ScoreLine};
    use serde_json::json;

    fn fields_with(date: Option<&str>, player: Option<&str>) -> ExtractedFields {
        ExtractedFields {
            score_line: ScoreLine::Present {
                my_team: "Arsenal".to_owned(),
                vs_team: "Chelsea".to_owned(),
                my_score: 3,
                vs_score: 1,
            },
            date: date.map(str::to_owned),
            playing_time_minutes: Some(90),
            ball_possessions: None,
            one_touch: None,
            short_possessions: None,
            long_possessions: None,
            total_releases: None,
            accl_decl_count: None,
            distance_covered_km: Some(10.5),
            sprint_distance_m: None,
            work_rate_m_per_min: None,
            player: player.map(|name| PlayerLine {
                name: name.to_owned(),
                position: Some("Center Back".to_owned()),
            }),
        }
    }

    #[test]
    fn resolves_abbreviated_month_in_any_case() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid date");

        assert_eq!(resolve_date("Mar 14", 2025), Some(expected));
        assert_eq!(resolve_date("mar  14", 2025), Some(expected));
        assert_eq!(resolve_date("MAR 14", 2025), Some(expected));
    }

    #[test]
    fn rejects_full_month_names_and_missing_separator() {
        assert_eq!(resolve_date("March 14", 2025), None);
        assert_eq!(resolve_date("MAR14", 2025), None);
    }

    #[test]
    fn rejects_unknown_months_and_impossible_days() {
        assert_eq!(resolve_date("Foo 14", 2025), None);
        assert_eq!(resolve_date("Apr 31", 2025), None);
        assert_eq!(resolve_date("Mar 0", 2025), None);
        assert_eq!(resolve_date("Mar 140", 2025), None);
    }

    #[test]
    fn leap_day_depends_on_reference_year() {
        assert!(resolve_date("Feb 29", 2024).is_some());
        assert!(resolve_date("Feb 29", 2025).is_none());
    }

    #[test]
    fn builds_identity_from_player_timestamp_and_matchup() {
        let record = MatchRecord::build(fields_with(Some("Mar 14"), Some("John Smith")), 2025);

        assert_eq!(record.timestamp.as_deref(), Some("2025-03-14T00:00:00"));
        assert_eq!(
            record.id.as_deref(),
            Some("John Smith_2025-03-14T00:00:00_Arsenal_Chelsea_3_1")
        );
        assert_eq!(record.score, "3 - 1");
        assert_eq!(record.index, MATCH_INDEX);
    }

    #[test]
    fn identity_requires_player_name() {
        let record = MatchRecord::build(fields_with(Some("Mar 14"), None), 2025);

        assert!(record.timestamp.is_some());
        assert!(record.id.is_none());
    }

    #[test]
    fn unparsable_date_keeps_rest_of_record() {
        let record = MatchRecord::build(fields_with(Some("Smarch 14"), Some("John Smith")), 2025);

        assert_eq!(record.date.as_deref(), Some("Smarch 14"));
        assert!(record.timestamp.is_none());
        assert!(record.id.is_none());
        assert_eq!(record.player_name.as_deref(), Some("John Smith"));
        assert_eq!(record.playing_time_minutes, Some(90));
    }

    #[test]
    fn identity_renders_missing_matchup_as_none() {
        let mut fields = fields_with(Some("Mar 14"), Some("John Smith"));
        fields.score_line = ScoreLine::Absent;
        let record = MatchRecord::build(fields, 2025);

        assert_eq!(
            record.id.as_deref(),
            Some("John Smith_2025-03-14T00:00:00_None_None_None_None")
        );
        assert_eq!(record.score, "None - None");
        assert!(record.my_team.is_none());
        assert!(record.vs_team.is_none());
    }

    #[test]
    fn serializes_every_key_with_nulls() {
        let record = MatchRecord::build(ExtractedFields::extract(""), 2025);
        let value = record.to_value();

        assert_eq!(
            value,
            json!({
                "_index": "cityplay_match",
                "_id": null,
                "@timestamp": null,
                "my_team": null,
                "vs_team": null,
                "score": "None - None",
                "player_name": null,
                "position": null,
                "date": null,
                "playing_time_minutes": null,
                "ball_possessions": null,
                "one_touch": null,
                "short_possessions": null,
                "long_possessions": null,
                "total_releases": null,
                "distance_covered_km": null,
                "sprint_distance_m": null,
                "accl_decl_count": null,
                "work_rate_m_per_min": null
            })
        );
    }

    #[test]
    fn document_body_drops_metadata_keys() {
        let record = MatchRecord::build(fields_with(Some("Mar 14"), Some("John Smith")), 2025);
        let document = record.document();
        let body = document.as_object().expect("document is an object");

        assert!(!body.contains_key("_index"));
        assert!(!body.contains_key("_id"));
        assert_eq!(body["@timestamp"], json!("2025-03-14T00:00:00"));
        assert_eq!(body["distance_covered_km"], json!(10.5));
        assert_eq!(body.len(), 17);
    }
}
