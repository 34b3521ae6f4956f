//! Presentation layer for couple-quest
//!
//! This crate contains CLI definitions and the JSON-RPC transport: wire
//! types, the request dispatcher and the TCP server loop.

pub mod cli;
pub mod rpc;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use rpc::{Dispatcher, RpcError, RpcRequest, RpcResponse, RpcServer};
