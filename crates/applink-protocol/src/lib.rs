//! AppLink RPC envelope types and schema-driven validation engine.
//!
//! This crate provides:
//! - Ordered parameter storage ([`ParameterStore`])
//! - Schema declaration tables and the type validator ([`Schema`],
//!   [`validate`])
//! - The generic struct base with strict writes and lenient, lazily
//!   converting reads ([`RpcStruct`])
//! - Request/response/notification framing with function identifiers and
//!   correlation ([`RpcMessage`])
//! - A representative message vocabulary ([`messages`])
//!
//! # Wire Format
//!
//! Every struct and message serializes to a raw untyped tree
//! (`serde_json::Value`): string keys mapping to primitives, nested trees,
//! or ordered sequences thereof. Absent keys mean "not specified", not
//! "null/default". Keys a schema does not declare are preserved verbatim
//! across round trips, so newer producers and older consumers can coexist.

#![forbid(unsafe_code)]

mod envelope;
mod ids;
pub mod messages;
mod rpcstruct;
mod schema;
mod store;

pub use envelope::{MessageKind, MessageSchema, RpcMessage};
pub use ids::{FunctionId, ResultCode};
pub use rpcstruct::RpcStruct;
pub use schema::{ParamKind, ParamSpec, Schema, validate};
pub use store::{ParamValue, ParameterStore};
