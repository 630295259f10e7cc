//! Line-level passes: headings, tables, ordered and bulleted lists, step
//! markers and paragraphs.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::formatter::FormatOptions;
use crate::inline;
use crate::ir::{InlineStore, Node};

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(#{1,3})\s+(.*)$").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)[.)]\s+(.*)$").unwrap());
static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[*\-•]\s+(.*)$").unwrap());
static TABLE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|?\s*:?-+:?\s*(?:\|\s*:?-+:?\s*)*\|?$").unwrap());
/// `**Step 3**`, `**Step 3:**`, `**Step 3: Title**` or a plain `Step 3:`.
static STEP_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*Step (\d+):?([^*\n]*)\*\*:?|\bStep (\d+):").unwrap()
});

/// Column alignment declared by a separator cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    fn from_separator(cell: &str) -> Self {
        match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Alignment::Center,
            (true, false) => Alignment::Left,
            (false, true) => Alignment::Right,
            (false, false) => Alignment::None,
        }
    }

    fn style(self) -> &'static str {
        match self {
            Alignment::None => "",
            Alignment::Left => r#" style="text-align:left""#,
            Alignment::Center => r#" style="text-align:center""#,
            Alignment::Right => r#" style="text-align:right""#,
        }
    }
}

/// Classify the lines of one prose segment and append the rendered blocks.
pub(crate) fn render_lines(
    text: &str,
    store: &mut InlineStore,
    options: &FormatOptions,
    nodes: &mut Vec<Node>,
) {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.trim().is_empty() {
            i += 1;
        } else if let Some(caps) = HEADING.captures(line) {
            render_heading(caps[1].len(), caps[2].trim_end(), store, options, nodes);
            i += 1;
        } else if let Some(consumed) = render_table(&lines[i..], store, options, nodes) {
            i += consumed;
        } else if let Some(content) = step_item(line) {
            // A list item that opens a step leaves the list and starts the step.
            render_paragraph(content, store, options, nodes);
            i += 1;
        } else if ORDERED_ITEM.is_match(line) {
            i += render_ordered_list(&lines[i..], store, options, nodes);
        } else if BULLET_ITEM.is_match(line) {
            i += render_bullet_list(&lines[i..], store, options, nodes);
        } else {
            render_paragraph(line, store, options, nodes);
            i += 1;
        }
    }
}

fn render_heading(
    level: usize,
    content: &str,
    store: &mut InlineStore,
    options: &FormatOptions,
    nodes: &mut Vec<Node>,
) {
    let content = match leading_step(content) {
        Some((caps, end)) => {
            let lead = push_step(&caps, store, options, nodes);
            join_lead(&lead, content[end..].trim_start())
        }
        None => content.to_string(),
    };
    if content.trim().is_empty() {
        return;
    }
    let content = inline::render(&content, store, options);
    nodes.push(Node::Block(format!("<h{level}>{content}</h{level}>")));
}

/// A step marker at the very start of `text`, with the byte offset where it ends.
fn leading_step(text: &str) -> Option<(Captures<'_>, usize)> {
    let caps = STEP_MARKER.captures(text)?;
    let whole = caps.get(0)?;
    (whole.start() == 0).then_some((caps, whole.end()))
}

/// Content of a numbered or bulleted item that begins with a step marker.
fn step_item(line: &str) -> Option<&str> {
    let content = ORDERED_ITEM
        .captures(line)
        .map(|c| c.get(2))
        .or_else(|| BULLET_ITEM.captures(line).map(|c| c.get(1)))??
        .as_str();
    leading_step(content).map(|_| content)
}

/// Consume a run of numbered lines into one `<ol>` starting at the first
/// item's number. Returns the number of lines consumed.
fn render_ordered_list(
    lines: &[&str],
    store: &mut InlineStore,
    options: &FormatOptions,
    nodes: &mut Vec<Node>,
) -> usize {
    let mut start = None;
    let mut items = String::new();
    let mut consumed = 0;
    for line in lines {
        if step_item(line).is_some() {
            break;
        }
        let Some(caps) = ORDERED_ITEM.captures(line) else { break };
        start.get_or_insert_with(|| caps[1].to_string());
        let content = inline::render(caps[2].trim_end(), store, options);
        items.push_str(&format!("<li>{content}</li>"));
        consumed += 1;
    }
    let start = start.unwrap_or_default();
    nodes.push(Node::Block(format!(r#"<ol start="{start}">{items}</ol>"#)));
    consumed
}

/// Consume a run of bullet lines into one `<ul>`.
fn render_bullet_list(
    lines: &[&str],
    store: &mut InlineStore,
    options: &FormatOptions,
    nodes: &mut Vec<Node>,
) -> usize {
    let mut items = String::new();
    let mut consumed = 0;
    for line in lines {
        if step_item(line).is_some() {
            break;
        }
        let Some(caps) = BULLET_ITEM.captures(line) else { break };
        let content = inline::render(caps[1].trim_end(), store, options);
        items.push_str(&format!("<li>{content}</li>"));
        consumed += 1;
    }
    nodes.push(Node::Block(format!("<ul>{items}</ul>")));
    consumed
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed[1..].contains('|')
}

fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('|') && TABLE_SEPARATOR.is_match(trimmed)
}

/// Split a pipe-delimited row into trimmed cells, dropping the empty
/// artifacts of a leading and trailing pipe.
fn split_cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.trim().split('|').map(str::trim).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

/// Render a header row, a separator row and any body rows as a table.
/// Returns `None` when the lines do not start a table.
fn render_table(
    lines: &[&str],
    store: &mut InlineStore,
    options: &FormatOptions,
    nodes: &mut Vec<Node>,
) -> Option<usize> {
    let header = *lines.first()?;
    let separator = *lines.get(1)?;
    if !is_table_row(header) || !is_table_separator(separator) {
        return None;
    }

    let alignments: Vec<Alignment> = split_cells(separator)
        .into_iter()
        .map(Alignment::from_separator)
        .collect();
    let align = |col: usize| alignments.get(col).copied().unwrap_or(Alignment::None).style();

    let headers = split_cells(header);
    let width = headers.len();

    let mut table = String::from(r#"<div class="table-container"><table class="data-table">"#);
    table.push_str("<thead><tr>");
    for (col, cell) in headers.iter().enumerate() {
        let content = inline::render(cell, store, options);
        table.push_str(&format!("<th{}>{content}</th>", align(col)));
    }
    table.push_str("</tr></thead><tbody>");

    let mut consumed = 2;
    while let Some(row) = lines.get(consumed) {
        if !is_table_row(row) {
            break;
        }
        let mut cells = split_cells(row);
        // Short rows are padded to the header width; extra cells are kept.
        if cells.len() < width {
            cells.resize(width, "");
        }
        table.push_str("<tr>");
        for (col, cell) in cells.iter().enumerate() {
            let content = inline::render(cell, store, options);
            table.push_str(&format!("<td{}>{content}</td>", align(col)));
        }
        table.push_str("</tr>");
        consumed += 1;
    }
    table.push_str("</tbody></table></div>");

    nodes.push(Node::Block(table));
    Some(consumed)
}

/// Render a plain line, splitting it at step markers. The title of a bold
/// marker opens the paragraph that follows it.
fn render_paragraph(
    line: &str,
    store: &mut InlineStore,
    options: &FormatOptions,
    nodes: &mut Vec<Node>,
) {
    let mut lead = String::new();
    let mut last = 0;
    for caps in STEP_MARKER.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        let before = if last == 0 {
            &line[..whole.start()]
        } else {
            line[last..whole.start()].trim_start()
        };
        push_paragraph(&join_lead(&lead, before.trim_end()), store, options, nodes);
        lead = push_step(&caps, store, options, nodes);
        last = whole.end();
    }
    let rest = if last == 0 { line } else { line[last..].trim_start() };
    push_paragraph(&join_lead(&lead, rest), store, options, nodes);
}

/// Emit the marker node. Returns a token for the bold title, or an empty
/// string when the marker has none.
fn push_step(
    caps: &Captures<'_>,
    store: &mut InlineStore,
    options: &FormatOptions,
    nodes: &mut Vec<Node>,
) -> String {
    let number = caps.get(1).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
    nodes.push(Node::Step(format!(
        r#"<div class="step-marker" data-step="{number}">Step {number}</div>"#
    )));
    let title = caps.get(2).map_or("", |m| m.as_str()).trim();
    if title.is_empty() {
        return String::new();
    }
    let title = inline::render(title, store, options);
    store.stash(format!(r#"<strong class="key-term">{title}</strong>"#))
}

fn join_lead(lead: &str, text: &str) -> String {
    match (lead.is_empty(), text.is_empty()) {
        (true, _) => text.to_string(),
        (false, true) => lead.to_string(),
        (false, false) => format!("{lead} {text}"),
    }
}

fn push_paragraph(
    text: &str,
    store: &mut InlineStore,
    options: &FormatOptions,
    nodes: &mut Vec<Node>,
) {
    if text.trim().is_empty() {
        return;
    }
    let content = inline::render(text, store, options);
    nodes.push(Node::Block(format!("<p>{content}</p>")));
}
