//! todomd - Checkbox todos with scheduling metadata, extracted from markdown

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todomd::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
