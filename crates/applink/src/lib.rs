//! Typed RPC message-envelope engine for app/head-unit communication.
//!
//! AppLink bridges an untyped key-value wire representation (parsed JSON)
//! into strongly-typed, arbitrarily-nested message structures, tolerating
//! partially-populated or malformed input without crashing the host
//! process.
//!
//! This facade crate re-exports the public API:
//!
//! - [`RpcMessage`] / [`MessageKind`] / [`MessageSchema`]: protocol
//!   framing with function identifiers and correlation
//! - [`RpcStruct`]: the generic schema-typed parameter container
//! - [`Schema`] / [`ParamSpec`] / [`ParamKind`]: immutable declaration
//!   tables
//! - [`messages`]: a representative message vocabulary
//!
//! # Example
//!
//! ```
//! use applink::messages::GET_APP_SERVICE_DATA;
//! use applink::{MessageKind, RpcMessage};
//!
//! let mut request = RpcMessage::request(&GET_APP_SERVICE_DATA);
//! request.set("serviceType", "MEDIA")?;
//! request.set_correlation_id(7);
//!
//! let wire = request.to_tree();
//! let decoded = RpcMessage::from_tree(&GET_APP_SERVICE_DATA, &wire)?;
//! assert_eq!(decoded.kind(), MessageKind::Request);
//! assert_eq!(decoded.correlation_id(), Some(7));
//! # Ok::<(), applink::ProtocolError>(())
//! ```

#![forbid(unsafe_code)]

pub use applink_core::{ProtocolError, Result, logging};
pub use applink_protocol::{
    FunctionId, MessageKind, MessageSchema, ParamKind, ParamSpec, ParamValue, ParameterStore,
    ResultCode, RpcMessage, RpcStruct, Schema, messages, validate,
};
