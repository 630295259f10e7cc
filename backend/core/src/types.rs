use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn of the conversation history sent with every generation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The persona used to build the system prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PromptTemplate {
    #[default]
    Standard,
    Expert,
    Creative,
    Researcher,
    Educational,
    Custom,
}

impl PromptTemplate {
    pub const ALL: [PromptTemplate; 6] = [
        PromptTemplate::Standard,
        PromptTemplate::Expert,
        PromptTemplate::Creative,
        PromptTemplate::Researcher,
        PromptTemplate::Educational,
        PromptTemplate::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptTemplate::Standard => "standard",
            PromptTemplate::Expert => "expert",
            PromptTemplate::Creative => "creative",
            PromptTemplate::Researcher => "researcher",
            PromptTemplate::Educational => "educational",
            PromptTemplate::Custom => "custom",
        }
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown prompt template '{s}'. Use one of: {}",
                    Self::ALL.map(|t| t.as_str()).join(", ")
                )
            })
    }
}

/// Generation settings collected from the user.
///
/// This is an explicit value: nothing reads it from global state. Loading and
/// saving it is owned by the config crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub web_search: bool,
    pub deep_search: bool,
    pub template: PromptTemplate,
    pub custom_prompt: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 1000,
            web_search: true,
            deep_search: false,
            template: PromptTemplate::Standard,
            custom_prompt: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_case_insensitively() {
        assert_eq!("Expert".parse::<PromptTemplate>(), Ok(PromptTemplate::Expert));
        assert_eq!(" custom ".parse::<PromptTemplate>(), Ok(PromptTemplate::Custom));
    }

    #[test]
    fn unknown_template_lists_choices() {
        let err = "poet".parse::<PromptTemplate>().unwrap_err();
        assert!(err.contains("standard, expert"));
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn default_settings_match_documented_values() {
        let s = ChatSettings::default();
        assert_eq!(s.temperature, 0.7);
        assert_eq!(s.top_p, 0.9);
        assert_eq!(s.max_tokens, 1000);
        assert!(s.web_search);
        assert!(!s.deep_search);
        assert_eq!(s.template, PromptTemplate::Standard);
    }
}
