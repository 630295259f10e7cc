//! Client side of the local generation server: the HTTP backend, a mock for
//! tests, prompt construction and the chat session that ties them to the
//! formatter.

pub mod http;
pub mod mock;
pub mod prompt;
pub mod session;

pub use http::{HttpBackend, DEFAULT_BASE_URL};
pub use mock::MockBackend;
pub use prompt::{prepare_prompt, system_prompt};
pub use session::{ChatSession, Exchange};
