/// Run outcome determining exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every report produced an indexable record (exit 0).
    Complete,
    /// Some reports were skipped, unreadable, or failed to store (exit 1).
    Partial,
    /// Configuration, input, or CLI failure (exit 2).
    Refusal,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Complete => 0,
            Outcome::Partial => 1,
            Outcome::Refusal => 2,
        }
    }

    pub fn from_complete(complete: bool) -> Self {
        if complete {
            Outcome::Complete
        } else {
            Outcome::Partial
        }
    }
}
