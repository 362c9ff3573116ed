//! Schema declaration tables and the type validator.
//!
//! A schema is an immutable table of `(key, expected kind, array-ness)`
//! declarations, built once as a `static` and passed by reference. The
//! generic engine is polymorphic only over these tables, never over
//! runtime-introspected object shape.
//!
//! [`validate`] is the single shape check used by every typed setter. It is
//! a single pass: for struct kinds it accepts any raw object tree without
//! inspecting its contents, because deep correctness is delegated to the
//! nested struct's own accessors at read time.

use serde_json::Value;

use applink_core::{ProtocolError, Result};

use crate::store::ParamValue;

/// Expected kind of one declared parameter.
#[derive(Debug, Clone, Copy)]
pub enum ParamKind {
    /// JSON boolean.
    Bool,
    /// JSON integer (no fractional part).
    Integer,
    /// Any JSON number. Range/format checks are schema-specific and belong
    /// to the concrete accessor, not this layer.
    Float,
    /// JSON string.
    String,
    /// A nested struct conforming to the referenced schema.
    Struct(&'static Schema),
    /// Passthrough: any JSON value, carried verbatim and never validated.
    Raw,
}

impl ParamKind {
    /// Human-readable kind name used in error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Bool => "Boolean",
            ParamKind::Integer => "Integer",
            ParamKind::Float => "Float",
            ParamKind::String => "String",
            ParamKind::Struct(schema) => schema.name,
            ParamKind::Raw => "Raw",
        }
    }
}

/// Declaration of one parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Wire key.
    pub key: &'static str,
    /// Expected kind.
    pub kind: ParamKind,
    /// Whether the value is an ordered sequence of `kind`.
    pub is_array: bool,
}

impl ParamSpec {
    /// Declares a single-valued parameter.
    #[must_use]
    pub const fn new(key: &'static str, kind: ParamKind) -> Self {
        Self {
            key,
            kind,
            is_array: false,
        }
    }

    /// Declares an array-valued parameter.
    #[must_use]
    pub const fn array(key: &'static str, kind: ParamKind) -> Self {
        Self {
            key,
            kind,
            is_array: true,
        }
    }

    /// Description of the declared shape, e.g. `array of TTSChunk`.
    #[must_use]
    pub fn expected(&self) -> String {
        if self.is_array {
            format!("array of {}", self.kind.name())
        } else {
            self.kind.name().to_string()
        }
    }
}

/// Immutable declaration table for one struct or message body.
///
/// Schemas are identified by `name`; the vocabulary keeps names unique, so
/// two schema references agree exactly when their names do.
#[derive(Debug)]
pub struct Schema {
    /// Schema name, unique within the vocabulary.
    pub name: &'static str,
    /// Declared parameters.
    pub params: &'static [ParamSpec],
}

impl Schema {
    /// Looks up the declaration for `key`.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.key == key)
    }
}

/// Validates that `value` conforms to the declared kind and array-ness.
///
/// Array declarations require an ordered sequence whose every element
/// independently satisfies the non-array check; an empty sequence is valid.
/// Struct declarations accept either an already-typed struct built against
/// the same schema or a raw object tree (unknown keys are preserved, not
/// validated; forward-compatibility policy).
///
/// Never mutates `value`; returns [`ProtocolError::TypeMismatch`] on
/// incompatibility.
pub fn validate(spec: &ParamSpec, value: &ParamValue) -> Result<()> {
    let ok = if spec.is_array {
        matches_array(&spec.kind, value)
    } else {
        matches_single(&spec.kind, value)
    };

    if ok {
        Ok(())
    } else {
        Err(ProtocolError::TypeMismatch {
            key: spec.key.to_string(),
            expected: spec.expected(),
            actual: value_shape(value),
        })
    }
}

fn matches_array(kind: &ParamKind, value: &ParamValue) -> bool {
    match value {
        ParamValue::StructArray(items) => match kind {
            ParamKind::Struct(schema) => {
                items.iter().all(|item| item.schema().name == schema.name)
            }
            _ => false,
        },
        ParamValue::Raw(Value::Array(items)) => {
            items.iter().all(|item| matches_json(kind, item))
        }
        _ => false,
    }
}

fn matches_single(kind: &ParamKind, value: &ParamValue) -> bool {
    match (kind, value) {
        (ParamKind::Raw, _) => true,
        (ParamKind::Struct(schema), ParamValue::Struct(inner)) => {
            inner.schema().name == schema.name
        }
        (_, ParamValue::Raw(raw)) => matches_json(kind, raw),
        _ => false,
    }
}

fn matches_json(kind: &ParamKind, value: &Value) -> bool {
    match kind {
        ParamKind::Bool => value.is_boolean(),
        ParamKind::Integer => value.is_i64() || value.is_u64(),
        ParamKind::Float => value.is_number(),
        ParamKind::String => value.is_string(),
        ParamKind::Struct(_) => value.is_object(),
        ParamKind::Raw => true,
    }
}

/// Returns the JSON type name for a value.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Describes the shape of a stored value for error messages.
pub(crate) fn value_shape(value: &ParamValue) -> String {
    match value {
        ParamValue::Raw(raw) => json_type_name(raw).to_string(),
        ParamValue::Struct(inner) => inner.schema().name.to_string(),
        ParamValue::StructArray(items) => match items.first() {
            Some(first) => format!("array of {}", first.schema().name),
            None => "empty struct array".to_string(),
        },
    }
}
