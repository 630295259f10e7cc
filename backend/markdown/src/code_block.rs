//! Code Block Extraction
//!
//! Carves fenced code out of the escaped document before any other pass, and
//! stashes inline code spans so math and emphasis never see their contents.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::escape::escape_html;
use crate::formatter::FormatOptions;
use crate::inline::replace_stashing;
use crate::ir::{push_text, InlineStore, Segment};

/// Opening fence with an optional language tag, a newline, then the
/// shortest body up to the next fence.
static FENCED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```([\w+#.-]*)[ \t]*\n(.*?)```").unwrap());

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

const COPY_BUTTON: &str = r#"<button class="copy-button" type="button" aria-label="Copy code"><i class="fas fa-copy"></i></button>"#;

/// Split escaped text into prose and fenced code blocks.
///
/// The code body is already escaped and is emitted verbatim. An opening
/// fence without a closing one does not match and stays literal text.
pub(crate) fn split_fenced(text: &str, options: &FormatOptions) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in FENCED_CODE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut segments, &text[last..whole.start()]);
        let lang = caps.get(1).map_or("", |m| m.as_str());
        let code = caps.get(2).map_or("", |m| m.as_str());
        segments.push(Segment::Block(render_code_block(lang, code, options)));
        last = whole.end();
    }
    push_text(&mut segments, &text[last..]);
    segments
}

fn render_code_block(lang: &str, code: &str, options: &FormatOptions) -> String {
    let (label, code_open) = if lang.is_empty() {
        (escape_html(&options.fallback_language), "<code>".to_string())
    } else {
        (lang.to_string(), format!(r#"<code class="language-{lang}">"#))
    };
    let button = if options.copy_button { COPY_BUTTON } else { "" };
    format!(
        r#"<div class="code-block"><div class="code-header"><span class="code-language">{label}</span>{button}</div><pre class="code-content">{code_open}{code}</code></pre></div>"#
    )
}

/// Replace single-backtick spans with inline code tokens.
pub(crate) fn stash_inline_code(text: &str, store: &mut InlineStore) -> String {
    replace_stashing(&INLINE_CODE, text, store, |caps| {
        Some(format!(r#"<code class="inline-code">{}</code>"#, &caps[1]))
    })
}
