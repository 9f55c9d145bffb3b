// crates/seclens-server/src/llm/mod.rs
// LLM inference clients (OpenAI-compatible chat completions)

mod logging;
mod openai;
mod openai_compat;
mod provider;

pub use openai::{OpenAiClient, DEFAULT_BASE_URL};
pub use openai_compat::{ChatRequest, Message, Usage};
pub use provider::{Completion, CompletionClient};
