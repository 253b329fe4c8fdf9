use match_report::report::{MATCH_INDEX, parse_with_year};
use serde_json::{Value, json};

const YEAR: i32 = 2025;

const REPORT: &str = "CITYPLAY Performance\n\
Match Report\n\
Lisbon United\n\
2 : 2\n\
Porto Athletic\n\
Technical Summary\n\
DATE Oct 5\n\
PLAYING TIME 76 Min\n\
48 Ball Possessions (#)\n\
17 One-Touch (#)\n\
29 Short Possessions (#)\n\
2 Long Possessions (#)\n\
33 Total Releases (#)\n\
8.7 Distance Covered (km)\n\
402.5 Sprint Distance (m)\n\
55 Accl/Decl (#)\n\
114.5 Work Rate (m/min)\n\
Work Rate (m/min) \n\
114.5\n\
Rui Costa\n\
Attacking\n\
Midfielder\n\
DATE Oct 5\n";

fn parsed(text: &str) -> Value {
    parse_with_year(text, YEAR).to_value()
}

fn full_record() -> Value {
    json!({
        "_index": MATCH_INDEX,
        "_id": "Rui Costa_2025-10-05T00:00:00_Lisbon United_Porto Athletic_2_2",
        "@timestamp": "2025-10-05T00:00:00",
        "my_team": "Lisbon United",
        "vs_team": "Porto Athletic",
        "score": "2 - 2",
        "player_name": "Rui Costa",
        "position": "Attacking\nMidfielder",
        "date": "Oct 5",
        "playing_time_minutes": 76,
        "ball_possessions": 48,
        "one_touch": 17,
        "short_possessions": 29,
        "long_possessions": 2,
        "total_releases": 33,
        "distance_covered_km": 8.7,
        "sprint_distance_m": 402.5,
        "accl_decl_count": 55,
        "work_rate_m_per_min": 114.5
    })
}

/// Remove `without` once and check that exactly the `nulled` keys went null.
fn assert_only_fields_nulled(without: &str, nulled: &[&str]) {
    let text = REPORT.replacen(without, "", 1);
    assert_ne!(text, REPORT, "anchor '{without}' must occur in the report");

    let record = parsed(&text);
    let expected_full = full_record();
    let record_map = record.as_object().expect("record object");
    let expected_map = expected_full.as_object().expect("expected object");
    assert_eq!(record_map.len(), expected_map.len());

    for (key, expected) in expected_map {
        if nulled.contains(&key.as_str()) {
            assert_eq!(record[key], Value::Null, "'{key}' should be null without '{without}'");
        } else {
            assert_eq!(&record[key], expected, "'{key}' should survive removing '{without}'");
        }
    }
}

#[test]
fn well_formed_report_yields_every_field() {
    assert_eq!(parsed(REPORT), full_record());
}

#[test]
fn parsing_twice_yields_identical_records() {
    assert_eq!(parse_with_year(REPORT, YEAR), parse_with_year(REPORT, YEAR));
}

#[test]
fn removing_count_anchors_nulls_only_that_count() {
    assert_only_fields_nulled("Ball Possessions (#)", &["ball_possessions"]);
    assert_only_fields_nulled("One-Touch (#)", &["one_touch"]);
    assert_only_fields_nulled("Short Possessions (#)", &["short_possessions"]);
    assert_only_fields_nulled("Long Possessions (#)", &["long_possessions"]);
    assert_only_fields_nulled("Total Releases (#)", &["total_releases"]);
    assert_only_fields_nulled("Accl/Decl (#)", &["accl_decl_count"]);
    assert_only_fields_nulled("PLAYING TIME", &["playing_time_minutes"]);
}

#[test]
fn removing_measure_anchors_nulls_only_that_measure() {
    assert_only_fields_nulled("Distance Covered (km)", &["distance_covered_km"]);
    assert_only_fields_nulled("Sprint Distance (m)", &["sprint_distance_m"]);
    assert_only_fields_nulled("114.5 Work Rate (m/min)\n", &["work_rate_m_per_min"]);
}

#[test]
fn removing_score_window_drops_team_group_together() {
    let id_without_matchup = "Rui Costa_2025-10-05T00:00:00_None_None_None_None";
    let text = REPORT.replacen("Technical Summary", "", 1);
    let record = parsed(&text);

    assert_eq!(record["my_team"], Value::Null);
    assert_eq!(record["vs_team"], Value::Null);
    assert_eq!(record["score"], json!("None - None"));
    assert_eq!(record["_id"], json!(id_without_matchup));
    assert_eq!(record["player_name"], json!("Rui Costa"));
}

#[test]
fn malformed_score_drops_team_group_together() {
    let text = REPORT.replacen("2 : 2", "two : 2", 1);
    let record = parsed(&text);

    assert_eq!(record["my_team"], Value::Null);
    assert_eq!(record["vs_team"], Value::Null);
    assert_eq!(record["score"], json!("None - None"));
    assert_eq!(record["date"], json!("Oct 5"));
}

#[test]
fn removing_work_rate_anchor_drops_player_and_identity() {
    let text = REPORT.replacen("Work Rate (m/min) \n", "", 1);
    let record = parsed(&text);

    assert_eq!(record["player_name"], Value::Null);
    assert_eq!(record["position"], Value::Null);
    assert_eq!(record["_id"], Value::Null);
    assert_eq!(record["my_team"], json!("Lisbon United"));
    assert_eq!(record["work_rate_m_per_min"], json!(114.5));
}

#[test]
fn removing_date_marker_drops_timestamp_and_identity() {
    let text = REPORT.replacen("DATE Oct 5\nPLAYING", "PLAYING", 1);
    let record = parsed(&text);

    // The second DATE marker closes the player block and still supplies the date.
    assert_eq!(record["date"], json!("Oct 5"));

    let text = REPORT.replace("DATE Oct 5", "Oct 5");
    let record = parsed(&text);
    assert_eq!(record["date"], Value::Null);
    assert_eq!(record["@timestamp"], Value::Null);
    assert_eq!(record["_id"], Value::Null);
    assert_eq!(record["player_name"], Value::Null);
}

#[test]
fn identity_is_non_null_iff_player_and_parseable_date() {
    let cases = [
        (REPORT.to_owned(), true),
        (REPORT.replacen("Rui Costa\n", "", 1), true),
        (REPORT.replacen("DATE Oct 5\nPLAYING", "DATE Octember 5\nPLAYING", 1), false),
        (REPORT.replacen("Work Rate (m/min) \n", "", 1), false),
    ];

    for (text, has_id) in cases {
        let record = parse_with_year(&text, YEAR);
        let expected = record.player_name.is_some() && record.timestamp.is_some();
        assert_eq!(record.id.is_some(), expected);
        assert_eq!(record.id.is_some(), has_id, "text:\n{text}");
    }
}

#[test]
fn blank_player_name_line_yields_no_identity() {
    let text = REPORT.replacen("Rui Costa\n", "   \n", 1);
    let record = parsed(&text);

    assert_eq!(record["player_name"], Value::Null);
    assert_eq!(record["position"], Value::Null);
    assert_eq!(record["_id"], Value::Null);
    assert_eq!(record["@timestamp"], json!("2025-10-05T00:00:00"));
}

#[test]
fn full_month_name_date_yields_no_identity() {
    let text = REPORT.replace("DATE Oct 5", "DATE October 5");
    let record = parsed(&text);

    assert_eq!(record["date"], json!("October 5"));
    assert_eq!(record["@timestamp"], Value::Null);
    assert_eq!(record["_id"], Value::Null);
    assert_eq!(record["player_name"], json!("Rui Costa"));
}

#[test]
fn arbitrary_text_never_panics() {
    let inputs = [
        "",
        "DATE",
        "Match Report : Technical Summary",
        "Work Rate (m/min) \n\n\n\nDATE",
        "PLAYING TIME  Min",
        "\u{0}\u{FFFD}DATE 日本 12",
    ];

    for input in inputs {
        let record = parse_with_year(input, YEAR);
        assert_eq!(record.index, MATCH_INDEX);
    }
}
