pub mod error;
pub mod message;
pub mod traits;
pub mod types;

pub use error::ChatError;
pub use message::{
    GenerationRequest, GenerationResponse, SearchRequest, SearchResponse, SearchResult,
    ServerStatus, StatusResponse,
};
pub use traits::ChatBackend;
pub use types::{ChatMessage, ChatSettings, PromptTemplate, Role};
