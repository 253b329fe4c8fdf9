use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(match_report::run())
}
