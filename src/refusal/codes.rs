use serde::Serialize;
use serde_json::Value;

/// Output schema version stamped on refusal envelopes.
pub const ENVELOPE_VERSION: &str = "match-report.v0";

/// Reasons a whole run is refused (exit 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefusalCode {
    /// Config file unreadable, malformed, or carrying unknown keys.
    #[serde(rename = "E_BAD_CONFIG")]
    BadConfig,
    /// Report file named on the command line could not be read.
    #[serde(rename = "E_BAD_INPUT")]
    BadInput,
    /// Attachment source could not be listed or read.
    #[serde(rename = "E_SOURCE")]
    Source,
}

/// Refusal envelope emitted to stdout on exit 2.
#[derive(Debug, Clone, Serialize)]
pub struct RefusalEnvelope {
    pub version: String,
    pub outcome: String,
    pub refusal: RefusalBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefusalBody {
    pub code: RefusalCode,
    pub message: String,
    pub detail: Value,
    pub next_command: Option<String>,
}

pub fn build_envelope(
    code: RefusalCode,
    message: &str,
    detail: Value,
    next_command: Option<String>,
) -> RefusalEnvelope {
    RefusalEnvelope {
        version: ENVELOPE_VERSION.to_owned(),
        outcome: "REFUSAL".to_owned(),
        refusal: RefusalBody {
            code,
            message: message.to_owned(),
            detail,
            next_command,
        },
    }
}
