//! Application-level configuration.
//!
//! - [`ServiceParams`]: limits applied by use cases (chat history size)

pub mod service_params;

pub use service_params::{DEFAULT_CHAT_HISTORY_LIMIT, ServiceParams};
