//! Response Formatter
//!
//! Turns raw model output into display-safe HTML. The passes run in a fixed
//! order over an explicit intermediate representation:
//!
//! 1. escape every character of the input
//! 2. carve out fenced code blocks (their bodies are final from here on)
//! 3. stash inline code spans
//! 4. carve out `$$` block math, then stash `$` inline math
//! 5. classify lines into headings, tables, lists, step markers and
//!    paragraphs, running bold, emphasis and definitions on their content
//! 6. group blocks into step containers and expand the stashed spans
//!
//! Only step 1 ever touches input characters; every later pass adds its own
//! tags around text that is already escaped.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::blocks;
use crate::code_block;
use crate::escape::escape_html;
use crate::ir::{InlineStore, Node, Segment};
use crate::math;

/// Knobs for the formatter. The defaults give the documented behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Label shown on fences that carry no language tag.
    pub fallback_language: String,
    /// Emit the copy button in code block headers.
    pub copy_button: bool,
    /// Highlight `Term: definition.` sentences.
    pub definitions: bool,
    /// Wrap each step and what follows it in a `div.step` container.
    pub step_containers: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            fallback_language: "code".to_string(),
            copy_button: true,
            definitions: true,
            step_containers: true,
        }
    }
}

/// Formats model responses. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Format raw model text as HTML. Total over all inputs; blank input
    /// yields an empty string.
    pub fn format(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let escaped = escape_html(&text.replace("\r\n", "\n"));
        let mut store = InlineStore::default();
        let mut nodes = Vec::new();

        for segment in code_block::split_fenced(&escaped, &self.options) {
            let prose = match segment {
                Segment::Block(html) => {
                    nodes.push(Node::Block(html));
                    continue;
                }
                Segment::Text(prose) => prose,
            };
            let prose = code_block::stash_inline_code(&prose, &mut store);
            for inner in math::split_block_math(&prose) {
                match inner {
                    Segment::Block(html) => nodes.push(Node::Block(html)),
                    Segment::Text(text) => {
                        let text = math::stash_inline_math(&text, &mut store);
                        blocks::render_lines(&text, &mut store, &self.options, &mut nodes);
                    }
                }
            }
        }

        trace!(nodes = nodes.len(), spans = store.len(), "formatted response");
        store.restore(&self.assemble(nodes))
    }

    /// Join nodes in order. Each step marker closes the previous step
    /// container and opens a new one; the last closes at end of text.
    fn assemble(&self, nodes: Vec<Node>) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(nodes.len() + 2);
        let mut step_open = false;
        for node in nodes {
            match node {
                Node::Block(html) => parts.push(html),
                Node::Step(marker) => {
                    if self.options.step_containers {
                        if step_open {
                            parts.push("</div>".to_string());
                        }
                        parts.push(r#"<div class="step">"#.to_string());
                        step_open = true;
                    }
                    parts.push(marker);
                }
            }
        }
        if step_open {
            parts.push("</div>".to_string());
        }
        parts.join("\n")
    }
}

/// Format with the default options.
pub fn format_response(text: &str) -> String {
    Formatter::default().format(text)
}
