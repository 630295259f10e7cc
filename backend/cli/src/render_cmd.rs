//! CLI Render Command
//!
//! Formats model text from a file or stdin into HTML, optionally with a
//! search-result block and the message container.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use serde::Deserialize;

use chatforge_core::{ChatMessage, SearchResult};
use chatforge_markdown::{Formatter, Renderer};

/// A results file holds either a bare array or a `/search` response body.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResultsFile {
    List(Vec<SearchResult>),
    Response { results: Vec<SearchResult> },
}

pub fn run(
    formatter: &Formatter,
    input: Option<&Path>,
    results: Option<&Path>,
    message: bool,
) -> Result<String> {
    let text = read_input(input)?;
    let results = results.map(read_results).transpose()?;
    Ok(render(
        formatter,
        &text,
        results.as_deref(),
        message,
        Local::now().time(),
    ))
}

fn render(
    formatter: &Formatter,
    text: &str,
    results: Option<&[SearchResult]>,
    message: bool,
    time: NaiveTime,
) -> String {
    if message {
        return Renderer::message(formatter, &ChatMessage::assistant(text), results, time);
    }
    let mut html = formatter.format(text);
    if let Some(results) = results {
        html.push_str(&Renderer::search_results(results));
    }
    html
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn read_results(path: &Path) -> Result<Vec<SearchResult>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_results(&raw).with_context(|| format!("Invalid search results in {}", path.display()))
}

fn parse_results(raw: &str) -> Result<Vec<SearchResult>> {
    let parsed: ResultsFile = serde_json::from_str(raw)?;
    Ok(match parsed {
        ResultsFile::List(results) | ResultsFile::Response { results } => results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 5, 0).unwrap()
    }

    #[test]
    fn accepts_both_results_shapes() {
        let list = r#"[{"title":"A","url":"https://a.example","snippet":"a"}]"#;
        let body = r#"{"results":[{"title":"A","url":"https://a.example","snippet":"a"}]}"#;
        assert_eq!(parse_results(list).unwrap(), parse_results(body).unwrap());
        assert!(parse_results(r#"{"hits":[]}"#).is_err());
    }

    #[test]
    fn plain_render_appends_results_block() {
        let results = [SearchResult::new("A", "https://a.example", "a")];
        let html = render(&Formatter::default(), "Hello", Some(&results), false, noon());
        assert!(html.starts_with("<p>Hello</p>"));
        assert!(html.ends_with("</div>"));
        assert!(html.contains("1. A"));
    }

    #[test]
    fn message_render_wraps_in_container() {
        let html = render(&Formatter::default(), "Hello", None, true, noon());
        assert!(html.starts_with(r#"<div class="message ai">"#));
        assert!(html.contains("12:05 PM"));
    }
}
