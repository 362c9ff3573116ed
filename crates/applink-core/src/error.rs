//! Error types for the envelope/validation engine.
//!
//! Only write-side violations surface as errors. Malformed data encountered
//! on the read side is reported as absence by the accessors themselves, so
//! a single bad field never aborts processing of an otherwise-valid message.

/// Shared result type.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced by the envelope/validation engine.
#[derive(Debug)]
pub enum ProtocolError {
    /// A typed setter was handed a value whose shape does not match the
    /// declared kind. The store is left unchanged.
    TypeMismatch {
        /// Parameter key the value was destined for.
        key: String,
        /// Human-readable description of the declared kind.
        expected: String,
        /// Human-readable description of the supplied value's shape.
        actual: String,
    },
    /// A typed setter was handed a key the schema does not declare.
    UndeclaredKey {
        /// Schema name.
        schema: &'static str,
        /// The undeclared key.
        key: String,
    },
    /// An envelope or struct tree is not interpretable at all (not an
    /// object, or its framing tags contradict the target schema).
    MalformedEnvelope(String),
    /// JSON parsing error while reading a wire tree.
    Json(serde_json::Error),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::TypeMismatch {
                key,
                expected,
                actual,
            } => {
                write!(f, "type mismatch for key '{key}': expected {expected}, got {actual}")
            }
            ProtocolError::UndeclaredKey { schema, key } => {
                write!(f, "schema {schema} does not declare key '{key}'")
            }
            ProtocolError::MalformedEnvelope(reason) => {
                write!(f, "malformed envelope: {reason}")
            }
            ProtocolError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::Json(err)
    }
}
