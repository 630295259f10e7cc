use crate::ir::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};

/// HTML-escape text for element content and quoted attribute values.
///
/// Placeholder code points are escaped too, so user text can never forge a
/// token for the inline store.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            PLACEHOLDER_OPEN => out.push_str("&#xE000;"),
            PLACEHOLDER_CLOSE => out.push_str("&#xE001;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn escapes_placeholder_code_points() {
        let escaped = escape_html("\u{E000}0\u{E001}");
        assert_eq!(escaped, "&#xE000;0&#xE001;");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_html("plain text, 100%"), "plain text, 100%");
    }
}
