//! RPC message envelopes.
//!
//! One envelope type covers all three message categories. Per-category
//! behavior hangs off the [`MessageKind`] tag instead of an inheritance
//! tree: concrete messages are [`MessageSchema`] tables, not types.
//!
//! The envelope only stores and exposes the correlation identifier;
//! assigning unique identifiers to outgoing requests and matching incoming
//! responses back to them is the dispatch layer's job.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use applink_core::logging::targets;
use applink_core::{ProtocolError, Result};

use crate::ids::{FunctionId, ResultCode};
use crate::rpcstruct::RpcStruct;
use crate::schema::{Schema, json_type_name};
use crate::store::ParamValue;

/// Message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Expects a correlated response.
    Request,
    /// Answers a request, carrying its correlation identifier.
    Response,
    /// Fire-and-forget; never correlated.
    Notification,
}

impl MessageKind {
    /// Wire tag for this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Request => "request",
            MessageKind::Response => "response",
            MessageKind::Notification => "notification",
        }
    }

    /// Parses a wire tag, returning `None` for unknown tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "request" => Some(MessageKind::Request),
            "response" => Some(MessageKind::Response),
            "notification" => Some(MessageKind::Notification),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration table for one concrete message: the function identifier it
/// binds, its category, and its body schema.
#[derive(Debug)]
pub struct MessageSchema {
    /// Function identifier this message binds.
    pub function: FunctionId,
    /// Message category.
    pub kind: MessageKind,
    /// Body parameter declarations.
    pub params: Schema,
}

/// A protocol message: body parameters plus framing metadata.
///
/// Function identifier and category come from the schema and are immutable
/// for the life of the message. The correlation identifier is assigned
/// later (by the dispatch layer) for requests; responses carry the
/// identifier of the request they answer.
#[derive(Debug, Clone)]
pub struct RpcMessage {
    schema: &'static MessageSchema,
    correlation_id: Option<u32>,
    success: Option<bool>,
    result_code: Option<ResultCode>,
    info: Option<String>,
    body: RpcStruct,
}

impl RpcMessage {
    /// Creates an empty REQUEST for the given message schema. The
    /// correlation identifier is unset until the dispatch layer assigns one
    /// at send time.
    #[must_use]
    pub fn request(schema: &'static MessageSchema) -> Self {
        debug_assert_eq!(schema.kind, MessageKind::Request);
        Self::empty(schema)
    }

    /// Creates an empty NOTIFICATION for the given message schema.
    #[must_use]
    pub fn notification(schema: &'static MessageSchema) -> Self {
        debug_assert_eq!(schema.kind, MessageKind::Notification);
        Self::empty(schema)
    }

    /// Creates a RESPONSE answering the request with `correlation_id`.
    /// Success flag and result code are required up front; a failed
    /// response may still carry body data.
    #[must_use]
    pub fn response(
        schema: &'static MessageSchema,
        correlation_id: u32,
        success: bool,
        result_code: ResultCode,
    ) -> Self {
        debug_assert_eq!(schema.kind, MessageKind::Response);
        Self {
            correlation_id: Some(correlation_id),
            success: Some(success),
            result_code: Some(result_code),
            ..Self::empty(schema)
        }
    }

    fn empty(schema: &'static MessageSchema) -> Self {
        Self {
            schema,
            correlation_id: None,
            success: None,
            result_code: None,
            info: None,
            body: RpcStruct::new(&schema.params),
        }
    }

    /// Decodes a raw wire tree against the given message schema.
    ///
    /// Missing framing fields are tolerated (their accessors return
    /// `None`), mirroring the lenient body-read policy: the producer may be
    /// a different protocol version. Body parameters are copied verbatim
    /// with validation deferred to first typed access.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedEnvelope`] if `tree` is not a JSON
    /// object, or if its `function` or `messageType` tag explicitly
    /// contradicts `schema`: decoding a tree against the wrong table is a
    /// dispatch bug, not version skew.
    pub fn from_tree(schema: &'static MessageSchema, tree: &Value) -> Result<Self> {
        let Some(obj) = tree.as_object() else {
            return Err(ProtocolError::MalformedEnvelope(format!(
                "message tree is {}, expected an object",
                json_type_name(tree)
            )));
        };

        if let Some(tag) = obj.get("function").and_then(Value::as_str) {
            if tag != schema.function.as_str() {
                return Err(ProtocolError::MalformedEnvelope(format!(
                    "function tag '{tag}' does not match {}",
                    schema.function
                )));
            }
        }
        if let Some(tag) = obj.get("messageType").and_then(Value::as_str) {
            if tag != schema.kind.as_str() {
                return Err(ProtocolError::MalformedEnvelope(format!(
                    "messageType tag '{tag}' does not match {}",
                    schema.kind
                )));
            }
        }

        let correlation_id = match schema.kind {
            // notifications are never correlated; drop a stray identifier
            MessageKind::Notification => None,
            _ => obj
                .get("correlationId")
                .and_then(Value::as_u64)
                .and_then(|id| u32::try_from(id).ok()),
        };

        let (success, result_code, info) = if schema.kind == MessageKind::Response {
            (
                obj.get("success").and_then(Value::as_bool),
                obj.get("resultCode")
                    .and_then(Value::as_str)
                    .and_then(ResultCode::from_tag),
                obj.get("info")
                    .and_then(Value::as_str)
                    .map(ToOwned::to_owned),
            )
        } else {
            (None, None, None)
        };

        let body = match obj.get("parameters") {
            Some(Value::Object(map)) => RpcStruct::from_object(&schema.params, map),
            Some(other) => {
                log::debug!(
                    target: targets::ENVELOPE,
                    "{} parameters is {}, not an object; treating body as empty",
                    schema.function,
                    json_type_name(other)
                );
                RpcStruct::new(&schema.params)
            }
            None => RpcStruct::new(&schema.params),
        };

        log::trace!(
            target: targets::ENVELOPE,
            "decoded {} {} (correlation: {:?})",
            schema.kind,
            schema.function,
            correlation_id
        );

        Ok(Self {
            schema,
            correlation_id,
            success,
            result_code,
            info,
            body,
        })
    }

    /// Encodes the envelope to a raw wire tree: framing fields alongside a
    /// `parameters` subtree produced by the body's recursive serialization.
    #[must_use]
    pub fn to_tree(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "function".to_string(),
            Value::String(self.schema.function.as_str().to_string()),
        );
        map.insert(
            "messageType".to_string(),
            Value::String(self.schema.kind.as_str().to_string()),
        );
        if let Some(id) = self.correlation_id {
            map.insert("correlationId".to_string(), Value::from(id));
        }
        if self.schema.kind == MessageKind::Response {
            if let Some(success) = self.success {
                map.insert("success".to_string(), Value::Bool(success));
            }
            if let Some(code) = self.result_code {
                map.insert(
                    "resultCode".to_string(),
                    Value::String(code.as_str().to_string()),
                );
            }
            if let Some(info) = &self.info {
                map.insert("info".to_string(), Value::String(info.clone()));
            }
        }
        map.insert("parameters".to_string(), self.body.to_tree());
        Value::Object(map)
    }

    /// Function identifier bound by this message.
    #[must_use]
    pub fn function(&self) -> FunctionId {
        self.schema.function
    }

    /// Message category.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        self.schema.kind
    }

    /// The message schema this envelope was built against.
    #[must_use]
    pub fn schema(&self) -> &'static MessageSchema {
        self.schema
    }

    /// Correlation identifier, if assigned. Always `None` for
    /// notifications.
    #[must_use]
    pub fn correlation_id(&self) -> Option<u32> {
        match self.schema.kind {
            MessageKind::Notification => None,
            _ => self.correlation_id,
        }
    }

    /// Assigns the correlation identifier. Uniqueness among outstanding
    /// requests is the caller's (dispatch layer's) responsibility.
    ///
    /// Notifications carry no correlation identifier; for them this call
    /// is inert and logs a warning.
    pub fn set_correlation_id(&mut self, id: u32) {
        if self.schema.kind == MessageKind::Notification {
            log::warn!(
                target: targets::ENVELOPE,
                "ignoring correlation id {id} for notification {}",
                self.schema.function
            );
            return;
        }
        self.correlation_id = Some(id);
    }

    /// Success flag (responses only; `None` elsewhere or when the wire
    /// data omitted it).
    #[must_use]
    pub fn success(&self) -> Option<bool> {
        self.success
    }

    /// Result code (responses only).
    #[must_use]
    pub fn result_code(&self) -> Option<ResultCode> {
        self.result_code
    }

    /// Human-readable info string (responses only).
    #[must_use]
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Attaches a human-readable info string. Inert (with a warning) for
    /// non-response messages.
    pub fn set_info(&mut self, info: impl Into<String>) {
        if self.schema.kind != MessageKind::Response {
            log::warn!(
                target: targets::ENVELOPE,
                "ignoring info string for {} {}",
                self.schema.kind,
                self.schema.function
            );
            return;
        }
        self.info = Some(info.into());
    }

    /// The message body.
    #[must_use]
    pub fn body(&self) -> &RpcStruct {
        &self.body
    }

    /// Mutable access to the message body.
    pub fn body_mut(&mut self) -> &mut RpcStruct {
        &mut self.body
    }

    // Body delegation: envelopes expose the same typed get/set surface as
    // the structs they carry.

    /// Typed body setter; see [`RpcStruct::set`].
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> Result<()> {
        self.body.set(key, value)
    }

    /// Unconditional body setter; see [`RpcStruct::set_parameter`].
    pub fn set_parameter(&mut self, key: impl Into<String>, value: Option<ParamValue>) {
        self.body.set_parameter(key, value);
    }

    /// See [`RpcStruct::get_bool`].
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.body.get_bool(key)
    }

    /// See [`RpcStruct::get_i64`].
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.body.get_i64(key)
    }

    /// See [`RpcStruct::get_f64`].
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.body.get_f64(key)
    }

    /// See [`RpcStruct::get_str`].
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.body.get_str(key)
    }

    /// See [`RpcStruct::get_struct`].
    pub fn get_struct(&mut self, key: &str) -> Option<&RpcStruct> {
        self.body.get_struct(key)
    }

    /// See [`RpcStruct::get_struct_array`].
    pub fn get_struct_array(&mut self, key: &str) -> Option<&[RpcStruct]> {
        self.body.get_struct_array(key)
    }
}
