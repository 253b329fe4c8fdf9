use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "match-report", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Print operator.json and exit
    #[arg(long)]
    pub describe: bool,

    /// Print the match record JSON Schema and exit
    #[arg(long)]
    pub schema: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse report files (PDF or text) and print one match record per line
    Parse {
        /// Report files to parse
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Year that report dates resolve into (default: current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Fetch report attachments, parse them, and index records not yet stored
    Ingest {
        /// YAML config file (default: $MATCH_REPORT_CONFIG or ./match-report.yaml)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Attachment drop directory
        #[arg(long, value_name = "DIR")]
        source: Option<PathBuf>,

        /// Only ingest attachments from this sender
        #[arg(long)]
        sender: Option<String>,

        /// Store directory holding one JSONL file per index
        #[arg(long, value_name = "DIR")]
        store: Option<PathBuf>,

        /// Year that report dates resolve into (default: current year)
        #[arg(long)]
        year: Option<i32>,

        /// Report what would be indexed without writing to the store
        #[arg(long)]
        dry_run: bool,

        /// Emit progress to stderr
        #[arg(long)]
        progress: bool,
    },
}
