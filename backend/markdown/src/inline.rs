//! Inline passes over a single line of escaped text: highlight, bold,
//! emphasis (asterisk and underscore forms), then definitions. Each finished
//! span is stashed so the next pattern cannot see inside it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::formatter::FormatOptions;
use crate::ir::InlineStore;

static HIGHLIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*\*([^*\n]+)\*\*\*").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*").unwrap());
// Underscore forms need a word boundary outside the delimiters, so
// `snake_case_names` stay literal.
static UNDERSCORE_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b__([^_\s](?:[^_\n]*[^_\s])?)__\b").unwrap());
static UNDERSCORE_EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b_([^_\s](?:[^_\n]*[^_\s])?)_\b").unwrap());

/// `Term: definition.`, `Term - definition.`, `Term refers to definition.`
static DEFINITIONS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"\b([A-Z][a-z]+(?: [a-z]+)*): ([^.\n]+\.)").unwrap(),
        Regex::new(r"\b([A-Z][a-z]+(?: [a-z]+)*) - ([^.\n]+\.)").unwrap(),
        Regex::new(r"\b([A-Z][a-z]+(?: [a-z]+)*) refers to ([^.\n]+\.)").unwrap(),
    ]
});

/// Replace every match of `re` with a token for the markup `render` returns.
/// Matches for which `render` returns `None` are kept as they are.
pub(crate) fn replace_stashing<F>(
    re: &Regex,
    text: &str,
    store: &mut InlineStore,
    mut render: F,
) -> String
where
    F: FnMut(&Captures<'_>) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if let Some(html) = render(&caps) {
            out.push_str(&text[last..whole.start()]);
            out.push_str(&store.stash(html));
            last = whole.end();
        }
    }
    out.push_str(&text[last..]);
    out
}

/// Apply the inline passes to one line of content.
pub(crate) fn render(text: &str, store: &mut InlineStore, options: &FormatOptions) -> String {
    let text = replace_stashing(&HIGHLIGHT, text, store, |caps| {
        Some(format!(r#"<span class="highlight">{}</span>"#, &caps[1]))
    });
    let text = replace_stashing(&BOLD, &text, store, |caps| {
        Some(format!(r#"<strong class="key-term">{}</strong>"#, &caps[1]))
    });
    let text = replace_stashing(&UNDERSCORE_BOLD, &text, store, |caps| {
        Some(format!(r#"<strong class="key-term">{}</strong>"#, &caps[1]))
    });
    let text = [&*EMPHASIS, &*UNDERSCORE_EMPHASIS]
        .into_iter()
        .fold(text, |text, re| {
            replace_stashing(re, &text, store, |caps| Some(format!("<em>{}</em>", &caps[1])))
        });
    if !options.definitions {
        return text;
    }
    DEFINITIONS.iter().fold(text, |text, re| {
        replace_stashing(re, &text, store, |caps| {
            Some(format!(
                r#"<span class="definition"><span class="term">{}</span>: {}</span>"#,
                &caps[1], &caps[2]
            ))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(text: &str) -> String {
        let mut store = InlineStore::default();
        let out = render(text, &mut store, &FormatOptions::default());
        store.restore(&out)
    }

    #[test]
    fn bold_becomes_key_term() {
        assert_eq!(
            inline("a **big** deal"),
            r#"a <strong class="key-term">big</strong> deal"#
        );
    }

    #[test]
    fn triple_asterisks_highlight() {
        assert_eq!(
            inline("***note***"),
            r#"<span class="highlight">note</span>"#
        );
    }

    #[test]
    fn single_asterisks_emphasize() {
        assert_eq!(inline("an *odd* one"), "an <em>odd</em> one");
    }

    #[test]
    fn spaced_asterisks_are_arithmetic() {
        assert_eq!(inline("2 * 3 * 4"), "2 * 3 * 4");
    }

    #[test]
    fn underscore_forms() {
        assert_eq!(
            inline("Use __bold__ and _em_"),
            r#"Use <strong class="key-term">bold</strong> and <em>em</em>"#
        );
    }

    #[test]
    fn snake_case_stays_literal() {
        assert_eq!(
            inline("call snake_case_names or __init__ly"),
            "call snake_case_names or __init__ly"
        );
        assert_eq!(inline("set MAX_RETRY_COUNT"), "set MAX_RETRY_COUNT");
    }

    #[test]
    fn colon_definition() {
        assert_eq!(
            inline("Latency: the time a request takes."),
            r#"<span class="definition"><span class="term">Latency</span>: the time a request takes.</span>"#
        );
    }

    #[test]
    fn refers_to_definition() {
        assert_eq!(
            inline("Entropy refers to disorder."),
            r#"<span class="definition"><span class="term">Entropy</span>: disorder.</span>"#
        );
    }

    #[test]
    fn dash_definition() {
        assert_eq!(
            inline("Cache - a fast store."),
            r#"<span class="definition"><span class="term">Cache</span>: a fast store.</span>"#
        );
    }

    #[test]
    fn definition_wraps_bold_without_splitting_it() {
        let html = inline("Note: this **e.g. part** matters.");
        assert_eq!(
            html,
            r#"<span class="definition"><span class="term">Note</span>: this <strong class="key-term">e.g. part</strong> matters.</span>"#
        );
    }

    #[test]
    fn definitions_can_be_disabled() {
        let options = FormatOptions {
            definitions: false,
            ..FormatOptions::default()
        };
        let mut store = InlineStore::default();
        let out = render("Latency: the time.", &mut store, &options);
        assert_eq!(store.restore(&out), "Latency: the time.");
    }
}
