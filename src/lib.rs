#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod document;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod refusal;
pub mod report;
pub mod source;
pub mod store;

pub use report::{MatchRecord, parse, parse_with_year};

use chrono::Datelike;

/// Run the match-report CLI. Returns an exit code (0, 1, or 2).
pub fn run() -> u8 {
    use clap::Parser;
    use cli::{Cli, Command};

    // Parse CLI args (handles --version and --help via clap, then exits)
    let cli = Cli::parse();

    if cli.describe {
        return handle_describe();
    }
    if cli.schema {
        return handle_schema();
    }

    match cli.command {
        Some(Command::Parse { files, year }) => handle_parse_command(&files, year),
        Some(Command::Ingest {
            config,
            source,
            sender,
            store,
            year,
            dry_run,
            progress,
        }) => handle_ingest_command(
            config::Overrides {
                config_path: config,
                source_dir: source,
                sender,
                store_dir: store,
            },
            year,
            dry_run,
            progress,
        ),
        None => {
            eprintln!("Error: a subcommand is required (parse or ingest); see --help");
            cli::Outcome::Refusal.exit_code()
        }
    }
}

/// Handle --describe flag: print operator.json and exit.
fn handle_describe() -> u8 {
    let operator = serde_json::json!({
        "name": "match-report",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Parse match performance reports into deduplicated index records",
        "pipeline_role": "ingester",
        "input_format": "PDF or text report attachments",
        "output_format": "JSONL",
        "index": report::MATCH_INDEX,
        "file_support": true
    });

    if let Ok(json) = serde_json::to_string_pretty(&operator) {
        println!("{}", json);
        0
    } else {
        eprintln!("Error: Failed to serialize operator metadata");
        2
    }
}

/// Handle --schema flag: print the match record JSON Schema and exit.
fn handle_schema() -> u8 {
    let nullable_string = serde_json::json!({ "type": ["string", "null"] });
    let nullable_integer = serde_json::json!({ "type": ["integer", "null"], "minimum": 0 });
    let nullable_number = serde_json::json!({ "type": ["number", "null"] });

    let schema = serde_json::json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Match Record",
        "description": "One player's match report, as printed by `parse` and stored by `ingest`",
        "type": "object",
        "properties": {
            "_index": { "const": report::MATCH_INDEX },
            "_id": nullable_string,
            "@timestamp": nullable_string,
            "my_team": nullable_string,
            "vs_team": nullable_string,
            "score": { "type": "string", "pattern": "^([0-9]+ - [0-9]+|None - None)$" },
            "player_name": nullable_string,
            "position": nullable_string,
            "date": nullable_string,
            "playing_time_minutes": nullable_integer,
            "ball_possessions": nullable_integer,
            "one_touch": nullable_integer,
            "short_possessions": nullable_integer,
            "long_possessions": nullable_integer,
            "total_releases": nullable_integer,
            "distance_covered_km": nullable_number,
            "sprint_distance_m": nullable_number,
            "accl_decl_count": nullable_integer,
            "work_rate_m_per_min": nullable_number
        },
        "required": [
            "_index", "_id", "@timestamp", "my_team", "vs_team", "score",
            "player_name", "position", "date", "playing_time_minutes",
            "ball_possessions", "one_touch", "short_possessions", "long_possessions",
            "total_releases", "distance_covered_km", "sprint_distance_m",
            "accl_decl_count", "work_rate_m_per_min"
        ],
        "additionalProperties": false
    });

    if let Ok(json) = serde_json::to_string_pretty(&schema) {
        println!("{}", json);
        0
    } else {
        eprintln!("Error: Failed to serialize schema");
        2
    }
}

/// Handle the parse subcommand: one JSONL record per file, in argument order.
fn handle_parse_command(files: &[std::path::PathBuf], year: Option<i32>) -> u8 {
    use cli::Outcome;
    use document::open_document_from_path;
    use output::write_jsonl;

    let year = year.unwrap_or_else(current_year);

    // Open everything first so a bad path refuses before any output.
    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        match open_document_from_path(path) {
            Ok(document) => documents.push(document),
            Err(error) => {
                output_refusal_envelope(&build_bad_input_refusal(path, error));
                return Outcome::Refusal.exit_code();
            }
        }
    }

    let records: Vec<MatchRecord> = documents
        .iter()
        .map(|document| parse_with_year(document.text(), year))
        .collect();

    let mut stdout = std::io::stdout();
    if let Err(error) = write_jsonl(&mut stdout, &records) {
        eprintln!("Error writing output: {}", error);
        return Outcome::Refusal.exit_code();
    }

    Outcome::from_complete(records.iter().all(|record| record.id.is_some())).exit_code()
}

/// Handle the ingest subcommand: source -> text -> parse -> store.
fn handle_ingest_command(
    overrides: config::Overrides,
    year: Option<i32>,
    dry_run: bool,
    progress: bool,
) -> u8 {
    use cli::Outcome;
    use output::write_jsonl_line;
    use pipeline::{IngestOptions, ingest_attachments};
    use refusal::{RefusalCode, build_envelope};
    use source::{AttachmentSource, DirectorySource};
    use store::{DryRunStore, JsonlStore};

    let config = match config::Config::resolve(&overrides) {
        Ok(config) => config,
        Err(error) => {
            output_refusal_envelope(&build_envelope(
                RefusalCode::BadConfig,
                "Invalid configuration",
                serde_json::json!({ "error": error }),
                Some("Check the config file against `match-report --help`".to_owned()),
            ));
            return Outcome::Refusal.exit_code();
        }
    };

    let attachments = match DirectorySource::new(&config.source_dir, &config.patterns)
        .and_then(|source| source.fetch(config.sender.as_deref()))
    {
        Ok(attachments) => attachments,
        Err(error) => {
            output_refusal_envelope(&build_envelope(
                RefusalCode::Source,
                "Cannot read attachment source",
                serde_json::json!({
                    "source_dir": config.source_dir.display().to_string(),
                    "sender": config.sender,
                    "error": error
                }),
                Some("match-report ingest --source <DIR>".to_owned()),
            ));
            return Outcome::Refusal.exit_code();
        }
    };

    let options = IngestOptions {
        year: year.unwrap_or_else(current_year),
        dry_run,
        progress,
    };
    let mut jsonl_store = JsonlStore::new(&config.store_dir);
    let (reports, summary) = if dry_run {
        let mut dry_run_store = DryRunStore::new(&jsonl_store);
        ingest_attachments(&attachments, &mut dry_run_store, options)
    } else {
        ingest_attachments(&attachments, &mut jsonl_store, options)
    };

    let mut stdout = std::io::stdout();
    let written = output::write_jsonl(&mut stdout, &reports)
        .and_then(|()| write_jsonl_line(&mut stdout, &summary));
    if let Err(error) = written {
        eprintln!("Error writing output: {}", error);
        return Outcome::Refusal.exit_code();
    }

    Outcome::from_complete(summary.all_stored()).exit_code()
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn build_bad_input_refusal(
    path: &std::path::Path,
    error: impl Into<String>,
) -> refusal::RefusalEnvelope {
    use refusal::{RefusalCode, build_envelope};

    build_envelope(
        RefusalCode::BadInput,
        "Cannot read report file",
        serde_json::json!({
            "path": path.display().to_string(),
            "error": error.into()
        }),
        None,
    )
}

/// Output a refusal envelope to stdout.
fn output_refusal_envelope(refusal: &refusal::RefusalEnvelope) {
    if let Ok(json) = serde_json::to_string(refusal) {
        println!("{}", json);
    }
}
