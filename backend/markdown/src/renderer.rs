//! Renderers for search references and whole chat messages.

use chatforge_core::{ChatMessage, Role, SearchResult};
use chrono::{NaiveTime, Timelike};

use crate::escape::escape_html;
use crate::formatter::Formatter;

pub const SEARCH_HEADING: &str = "Web References";
pub const NO_RESULTS_TEXT: &str = "No relevant search results found.";

pub struct Renderer;

impl Renderer {
    /// Render search results as a reference block, one item per result in
    /// the given order. An empty slice renders the "no results" placeholder.
    pub fn search_results(results: &[SearchResult]) -> String {
        if results.is_empty() {
            return format!(
                r#"<div class="search-results empty"><p>{NO_RESULTS_TEXT}</p></div>"#
            );
        }

        let mut html = String::from(r#"<div class="search-results">"#);
        html.push_str(&format!("<h3>{SEARCH_HEADING}</h3>"));
        for (index, result) in results.iter().enumerate() {
            html.push_str(&format!(
                concat!(
                    r#"<div class="search-result-item">"#,
                    r#"<div class="search-result-title">{}. {}</div>"#,
                    r#"<div class="search-result-url">{}</div>"#,
                    r#"<div class="search-result-snippet">{}</div>"#,
                    "</div>"
                ),
                index + 1,
                escape_html(&result.title),
                escape_html(&result.url),
                escape_html(&result.snippet),
            ));
        }
        html.push_str("</div>");
        html
    }

    /// Render a conversation turn as a message container.
    ///
    /// User text is shown verbatim (escaped, never formatted). Assistant text
    /// goes through the formatter, followed by the reference block when
    /// `search_results` is given.
    pub fn message(
        formatter: &Formatter,
        message: &ChatMessage,
        search_results: Option<&[SearchResult]>,
        time: NaiveTime,
    ) -> String {
        let (class, content) = match message.role {
            Role::User => ("user", escape_html(&message.content)),
            Role::Assistant => {
                let mut content = formatter.format(&message.content);
                if let Some(results) = search_results {
                    content.push_str(&Self::search_results(results));
                }
                ("ai", content)
            }
        };
        format!(
            r#"<div class="message {class}"><div class="message-content">{content}</div><div class="message-time">{}</div></div>"#,
            time_label(time)
        )
    }
}

/// `h:mm AM|PM` on a 12-hour clock.
pub fn time_label(time: NaiveTime) -> String {
    let (pm, hour) = time.hour12();
    format!("{hour}:{:02} {}", time.minute(), if pm { "PM" } else { "AM" })
}
