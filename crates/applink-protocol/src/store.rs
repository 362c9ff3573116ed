//! Ordered parameter storage for one message or struct instance.

use serde_json::Value;

use applink_core::logging::targets;

use crate::rpcstruct::RpcStruct;

/// A value held by one [`ParameterStore`] slot.
///
/// `Raw` is the wire-facing form: primitives, sequences of primitives, and
/// not-yet-interpreted trees all live there. `Struct` and `StructArray` are
/// the typed forms; a raw tree stored under a struct-declared key is
/// converted to one of these on first typed read and cached in place, so
/// the conversion state is explicit rather than hidden behind the getter.
#[derive(Debug, Clone)]
pub enum ParamValue {
    /// Raw JSON-compatible value (primitive, sequence, or passthrough tree).
    Raw(Value),
    /// A typed nested struct.
    Struct(RpcStruct),
    /// An ordered sequence of typed structs.
    StructArray(Vec<RpcStruct>),
}

impl ParamValue {
    /// Returns true if this is a raw JSON `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Raw(Value::Null))
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Raw(Value::Bool(b))
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Raw(Value::from(n))
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        // Non-finite floats have no JSON form; Value::from maps them to
        // null, which the validator then rejects for a Float-declared key.
        ParamValue::Raw(Value::from(x))
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Raw(Value::String(s.to_owned()))
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Raw(Value::String(s))
    }
}

impl From<Value> for ParamValue {
    fn from(v: Value) -> Self {
        ParamValue::Raw(v)
    }
}

impl From<RpcStruct> for ParamValue {
    fn from(s: RpcStruct) -> Self {
        ParamValue::Struct(s)
    }
}

impl From<Vec<RpcStruct>> for ParamValue {
    fn from(items: Vec<RpcStruct>) -> Self {
        ParamValue::StructArray(items)
    }
}

/// Ordered key→value container backing one struct or message body.
///
/// Keys are unique. Insertion order is preserved (overwrites keep the
/// original position) so serialization is deterministic. No shape
/// validation happens here; that is [`crate::schema::validate`]'s job.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, overwriting any prior value. A nullish
    /// value (`None` or raw JSON `null`) removes the key instead.
    pub fn set(&mut self, key: impl Into<String>, value: Option<ParamValue>) {
        let key = key.into();
        match value {
            Some(value) if !value.is_null() => self.insert(key, value),
            _ => {
                if self.remove(&key).is_some() {
                    log::trace!(target: targets::STORE, "removed key '{key}'");
                }
            }
        }
    }

    /// Stores `value` under `key` verbatim, nulls included. Used when
    /// copying a raw tree wholesale so explicit `null` entries survive a
    /// round trip; [`set`](Self::set) is the nullish-removing surface.
    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Returns the stored value, or `None` if the key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
