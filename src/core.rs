pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, LlmError};
pub use http::{HttpClient, HttpClientConfig, HttpResponse};
pub use traits::LlmProvider;
pub use types::{ChatRequest, ChatRole, Message, QUIT_SENTINEL, UserInput};
