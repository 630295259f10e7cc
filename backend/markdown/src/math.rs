//! Math delimiters: `$$…$$` blocks and `$…$` inline spans, rendered as
//! containers without evaluation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::inline::replace_stashing;
use crate::ir::{push_text, InlineStore, Segment};

const BLOCK_DELIMITER: &str = "$$";

/// Single-dollar span on one line. The body may not start or end with
/// whitespace, so prices like "$5 and $10" stay literal.
static INLINE_MATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([^$\s](?:[^$\n]*[^$\s])?)\$").unwrap());

/// Split escaped prose into text and block math.
///
/// Pairs are matched left to right, each with the nearest following
/// delimiter, so a block never spans an intervening pair. A trailing
/// unpaired delimiter stays literal.
pub(crate) fn split_block_math(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find(BLOCK_DELIMITER) {
        let body_start = open + BLOCK_DELIMITER.len();
        let Some(body_len) = rest[body_start..].find(BLOCK_DELIMITER) else {
            break;
        };
        let body_end = body_start + body_len;
        push_text(&mut segments, &rest[..open]);
        segments.push(Segment::Block(format!(
            r#"<div class="math-block">{}</div>"#,
            rest[body_start..body_end].trim()
        )));
        rest = &rest[body_end + BLOCK_DELIMITER.len()..];
    }
    push_text(&mut segments, rest);
    segments
}

/// Replace inline math spans with tokens.
pub(crate) fn stash_inline_math(text: &str, store: &mut InlineStore) -> String {
    replace_stashing(&INLINE_MATH, text, store, |caps| {
        Some(format!(r#"<span class="math-inline">{}</span>"#, &caps[1]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_math_pairs_are_non_greedy() {
        let segments = split_block_math("a $$x^2$$ b $$y$$ c");
        assert_eq!(
            segments,
            vec![
                Segment::Text("a ".into()),
                Segment::Block(r#"<div class="math-block">x^2</div>"#.into()),
                Segment::Text(" b ".into()),
                Segment::Block(r#"<div class="math-block">y</div>"#.into()),
                Segment::Text(" c".into()),
            ]
        );
    }

    #[test]
    fn block_math_may_span_lines() {
        let segments = split_block_math("$$\n\\int_0^1 x\\,dx\n$$");
        assert_eq!(
            segments,
            vec![Segment::Block(
                r#"<div class="math-block">\int_0^1 x\,dx</div>"#.into()
            )]
        );
    }

    #[test]
    fn unpaired_block_delimiter_is_literal() {
        let segments = split_block_math("cost $$ is high");
        assert_eq!(segments, vec![Segment::Text("cost $$ is high".into())]);
    }

    #[test]
    fn inline_math_is_stashed() {
        let mut store = InlineStore::default();
        let text = stash_inline_math("where $E = mc^2$ holds", &mut store);
        assert_eq!(
            store.restore(&text),
            r#"where <span class="math-inline">E = mc^2</span> holds"#
        );
    }

    #[test]
    fn prices_are_not_math() {
        let mut store = InlineStore::default();
        let text = stash_inline_math("pay $5 and $10 today", &mut store);
        assert_eq!(text, "pay $5 and $10 today");
        assert!(store.is_empty());
    }
}
