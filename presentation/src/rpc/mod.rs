//! JSON-RPC transport
//!
//! - [`protocol`]: wire types and error codes
//! - [`dispatcher`]: method routing to use cases
//! - [`server`]: TCP listener and connection loop

pub mod dispatcher;
pub mod protocol;
pub mod server;

pub use dispatcher::Dispatcher;
pub use protocol::{RpcError, RpcRequest, RpcResponse};
pub use server::RpcServer;
