// crates/seclens-server/src/llm/openai_compat/mod.rs
// OpenAI-compatible request/response handling

mod request;
mod response;

pub use request::{ChatRequest, Message};
pub use response::{parse_chat_response, parse_error_reason, Usage};
