//! Terminal notes on stderr. Stdout is reserved for HTML and YAML output.

use chatforge_core::ServerStatus;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

pub fn note_success(msg: &str) {
    if supports_color() {
        eprintln!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        eprintln!("OK: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        eprintln!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        eprintln!("WARN: {msg}");
    }
}

pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

/// One-line status summary, e.g. `Neural Network Offline (model loading)`.
pub fn status_line(status: &ServerStatus) -> String {
    match status {
        ServerStatus::Connected | ServerStatus::ModelMissing => status.label().to_string(),
        ServerStatus::Offline(detail) | ServerStatus::Unreachable(detail) => {
            format!("{} ({detail})", status.label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_includes_detail_when_down() {
        assert_eq!(
            status_line(&ServerStatus::Unreachable("connection refused".into())),
            "Neural Network Disconnected (connection refused)"
        );
        assert_eq!(status_line(&ServerStatus::Connected), "Neural Network Connected");
    }
}
