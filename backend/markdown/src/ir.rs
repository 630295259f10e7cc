//! Formatter Intermediate Representation
//!
//! The formatter never rewrites one string in place. Escaped text is carved
//! into segments, block-level output is collected as nodes, and finished
//! inline spans live in an [`InlineStore`] behind placeholder tokens so that
//! later passes cannot re-match their contents.

/// Opens a placeholder token. Private-use code point; the escape pass
/// rewrites any occurrence in user text to a numeric entity.
pub(crate) const PLACEHOLDER_OPEN: char = '\u{E000}';
/// Closes a placeholder token.
pub(crate) const PLACEHOLDER_CLOSE: char = '\u{E001}';

/// A span of the escaped document.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Escaped prose, still open to later passes.
    Text(String),
    /// Finished block markup (fenced code, block math).
    Block(String),
}

/// A rendered unit of output, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Finished block markup, possibly containing placeholder tokens.
    Block(String),
    /// Step-start marker markup. Opens a step container during assembly.
    Step(String),
}

pub(crate) fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
}

/// Side table of rendered inline spans.
#[derive(Debug, Default)]
pub struct InlineStore {
    spans: Vec<String>,
}

impl InlineStore {
    /// Store rendered markup and return the token that stands for it.
    pub fn stash(&mut self, html: String) -> String {
        let index = self.spans.len();
        self.spans.push(html);
        format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Replace every token in `text` with its markup.
    ///
    /// A span only ever contains tokens stashed before it, so expansion
    /// always terminates.
    pub fn restore(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.restore_into(text, &mut out);
        out
    }

    fn restore_into(&self, text: &str, out: &mut String) {
        let mut rest = text;
        while let Some(start) = rest.find(PLACEHOLDER_OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + PLACEHOLDER_OPEN.len_utf8()..];
            let token = after.find(PLACEHOLDER_CLOSE).and_then(|end| {
                after[..end]
                    .parse::<usize>()
                    .ok()
                    .filter(|index| *index < self.spans.len())
                    .map(|index| (index, end))
            });
            match token {
                Some((index, end)) => {
                    self.restore_into(&self.spans[index], out);
                    rest = &after[end + PLACEHOLDER_CLOSE.len_utf8()..];
                }
                None => {
                    out.push(PLACEHOLDER_OPEN);
                    rest = after;
                }
            }
        }
        out.push_str(rest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_nested_spans() {
        let mut store = InlineStore::default();
        let code = store.stash("<code>x</code>".to_string());
        let bold = store.stash(format!("<strong>use {code}</strong>"));
        assert_eq!(
            store.restore(&format!("a {bold} b")),
            "a <strong>use <code>x</code></strong> b"
        );
    }

    #[test]
    fn unknown_token_is_left_alone() {
        let store = InlineStore::default();
        let text = format!("{PLACEHOLDER_OPEN}7{PLACEHOLDER_CLOSE}");
        assert_eq!(store.restore(&text), text);
    }

    #[test]
    fn push_text_skips_empty() {
        let mut segments = Vec::new();
        push_text(&mut segments, "");
        push_text(&mut segments, "a");
        assert_eq!(segments, vec![Segment::Text("a".into())]);
    }
}
