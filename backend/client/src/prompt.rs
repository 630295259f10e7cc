//! System prompts and search-augmented user prompts.

use chatforge_core::{PromptTemplate, SearchResult};

const STANDARD_PROMPT: &str = "You are Gemma 2B, a helpful AI assistant. You provide accurate, factual, and helpful information while being conversational and friendly.";

const EXPERT_PROMPT: &str = "You are Gemma 2B, an AI expert with deep knowledge across various fields. Provide detailed, nuanced, technical responses with expert-level analysis. Use formal language, cite specific concepts, and explain complex topics thoroughly.";

const CREATIVE_PROMPT: &str = "You are Gemma 2B, a creative AI writer. Craft engaging, imaginative responses with rich descriptive language. Feel free to use metaphors, storytelling techniques, and expressive language that captivates the reader's imagination.";

const RESEARCHER_PROMPT: &str = "You are Gemma 2B, a meticulous research assistant. Your responses should be thorough, balanced, and evidence-based. Analyze multiple perspectives, cite sources when possible, evaluate credibility of information, and maintain academic rigor.";

const EDUCATIONAL_PROMPT: &str = "You are Gemma 2B, an educational assistant. Present information in a structured, step-by-step format that's easy to understand. For math and science questions, show detailed working steps. For complex topics, use clear examples and visual descriptions. For code, provide well-commented solutions with explanations.";

const SEARCH_PREAMBLE: &str = "\n\nRelevant information from web search:";
const CITATION_INSTRUCTION: &str =
    "\n\nPlease answer the question based on this information and cite sources when appropriate.";

/// System prompt for a template. A blank custom prompt falls back to standard.
pub fn system_prompt(template: PromptTemplate, custom: &str) -> String {
    let fixed = match template {
        PromptTemplate::Standard => STANDARD_PROMPT,
        PromptTemplate::Expert => EXPERT_PROMPT,
        PromptTemplate::Creative => CREATIVE_PROMPT,
        PromptTemplate::Researcher => RESEARCHER_PROMPT,
        PromptTemplate::Educational => EDUCATIONAL_PROMPT,
        PromptTemplate::Custom => {
            let custom = custom.trim();
            if custom.is_empty() {
                STANDARD_PROMPT
            } else {
                return custom.to_string();
            }
        }
    };
    fixed.to_string()
}

/// Append numbered sources and a citation instruction to the user's message.
/// Without results the message is returned unchanged.
pub fn prepare_prompt(message: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return message.to_string();
    }
    let mut prompt = String::from(message);
    prompt.push_str(SEARCH_PREAMBLE);
    for (i, result) in results.iter().enumerate() {
        prompt.push_str(&format!(
            "\n\nSource {}: {} ({})\n{}",
            i + 1,
            result.title,
            result.url,
            result.snippet
        ));
    }
    prompt.push_str(CITATION_INSTRUCTION);
    prompt
}
