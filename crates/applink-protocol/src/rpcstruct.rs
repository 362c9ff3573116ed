//! Schema-typed parameter containers.
//!
//! [`RpcStruct`] is the generic struct base every concrete schema runs on:
//! it owns one [`ParameterStore`] plus a reference to its declaration table,
//! and bridges the untyped wire representation into typed access.
//!
//! The write and read paths are deliberately asymmetric:
//!
//! - **Writes are strict.** A typed [`set`](RpcStruct::set) validates the
//!   value's shape against the declaration and rejects mismatches without
//!   touching the store.
//! - **Reads are lenient.** A typed getter returns `None` for absent or
//!   uninterpretable data, so a message produced by a newer or older
//!   protocol version never aborts processing of its readable fields.
//!
//! Do not unify these two paths; the asymmetry is the forward-compatibility
//! contract of the protocol.

use serde_json::{Map, Value};

use applink_core::logging::targets;
use applink_core::{ProtocolError, Result};

use crate::schema::{self, ParamKind, ParamSpec, Schema, json_type_name};
use crate::store::{ParamValue, ParameterStore};

/// A schema-typed container of parameters, possibly nested.
#[derive(Debug, Clone)]
pub struct RpcStruct {
    schema: &'static Schema,
    store: ParameterStore,
}

impl RpcStruct {
    /// Creates an empty struct of the given schema.
    #[must_use]
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            store: ParameterStore::new(),
        }
    }

    /// Builds a struct from a raw tree, copying every key verbatim into the
    /// store. No validation happens here; it is deferred to the first typed
    /// access, so unknown or not-yet-interpreted keys survive round trips
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedEnvelope`] if `tree` is not a JSON
    /// object.
    pub fn from_tree(schema: &'static Schema, tree: &Value) -> Result<Self> {
        match tree.as_object() {
            Some(map) => Ok(Self::from_object(schema, map)),
            None => Err(ProtocolError::MalformedEnvelope(format!(
                "{} tree is {}, expected an object",
                schema.name,
                json_type_name(tree)
            ))),
        }
    }

    pub(crate) fn from_object(schema: &'static Schema, map: &Map<String, Value>) -> Self {
        let mut store = ParameterStore::new();
        for (key, value) in map {
            store.insert(key.clone(), ParamValue::Raw(value.clone()));
        }
        Self { schema, store }
    }

    /// Serializes the struct back into a raw tree, recursively collapsing
    /// nested structs and struct arrays. Primitive and passthrough values
    /// are emitted as-is, in insertion order.
    #[must_use]
    pub fn to_tree(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in self.store.iter() {
            let out = match value {
                ParamValue::Raw(raw) => raw.clone(),
                ParamValue::Struct(nested) => nested.to_tree(),
                ParamValue::StructArray(items) => {
                    Value::Array(items.iter().map(RpcStruct::to_tree).collect())
                }
            };
            map.insert(key.to_string(), out);
        }
        Value::Object(map)
    }

    /// The declaration table this struct was built against.
    #[must_use]
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Read-only view of the backing store.
    #[must_use]
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// Stores `value` under `key` unconditionally, bypassing validation.
    /// A nullish value removes the key.
    ///
    /// This is the low-level surface; typed producers should go through
    /// [`set`](Self::set).
    pub fn set_parameter(&mut self, key: impl Into<String>, value: Option<ParamValue>) {
        self.store.set(key, value);
    }

    /// Validates `value` against the declared kind for `key`, then stores
    /// it. A nullish value removes the key without validation.
    ///
    /// The write is atomic: on any error the store is left unchanged,
    /// including `key`'s previous value.
    ///
    /// # Errors
    ///
    /// [`ProtocolError::UndeclaredKey`] if the schema does not declare
    /// `key`; [`ProtocolError::TypeMismatch`] if the value's shape violates
    /// the declaration.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> Result<()> {
        let value = value.into();
        let schema = self.schema;
        let Some(spec) = schema.param(key) else {
            return Err(ProtocolError::UndeclaredKey {
                schema: schema.name,
                key: key.to_string(),
            });
        };
        if value.is_null() {
            self.store.set(key, None);
            return Ok(());
        }
        schema::validate(spec, &value)?;
        self.store.set(key, Some(value));
        Ok(())
    }

    /// Removes `key` from the store.
    pub fn unset(&mut self, key: &str) {
        self.store.set(key, None);
    }

    /// Low-level read of whatever is stored under `key`.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<&ParamValue> {
        self.store.get(key)
    }

    /// Reads a boolean parameter. Absent or non-boolean data reads as `None`.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.store.get(key)? {
            ParamValue::Raw(raw) => raw.as_bool(),
            _ => None,
        }
    }

    /// Reads an integer parameter. Absent or non-integer data reads as `None`.
    #[must_use]
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.store.get(key)? {
            ParamValue::Raw(raw) => raw.as_i64(),
            _ => None,
        }
    }

    /// Reads a numeric parameter. Absent or non-numeric data reads as `None`.
    #[must_use]
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.store.get(key)? {
            ParamValue::Raw(raw) => raw.as_f64(),
            _ => None,
        }
    }

    /// Reads a string parameter. Absent or non-string data reads as `None`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.store.get(key)? {
            ParamValue::Raw(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Reads a raw sequence parameter (arrays of primitives or passthrough
    /// elements). Absent or non-array data reads as `None`.
    #[must_use]
    pub fn get_array(&self, key: &str) -> Option<&[Value]> {
        match self.store.get(key)? {
            ParamValue::Raw(Value::Array(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Reads a nested struct parameter.
    ///
    /// If the stored value is still a raw tree (e.g. freshly deserialized),
    /// it is converted against the declared schema on this first read and
    /// the typed form cached in place; subsequent reads return the cached
    /// conversion. Data that cannot be interpreted as the declared schema
    /// reads as `None`.
    pub fn get_struct(&mut self, key: &str) -> Option<&RpcStruct> {
        let target = match self.schema.param(key) {
            Some(ParamSpec {
                kind: ParamKind::Struct(schema),
                is_array: false,
                ..
            }) => *schema,
            _ => return None,
        };

        if let Some(ParamValue::Raw(raw)) = self.store.get(key) {
            let converted = match raw {
                Value::Object(map) => RpcStruct::from_object(target, map),
                other => {
                    log::debug!(
                        target: targets::STRUCT,
                        "key '{key}': expected {} object, found {}; reading as absent",
                        target.name,
                        json_type_name(other)
                    );
                    return None;
                }
            };
            log::trace!(
                target: targets::STRUCT,
                "key '{key}': cached raw tree as {}",
                target.name
            );
            self.store.insert(key.to_string(), ParamValue::Struct(converted));
        }

        match self.store.get(key)? {
            ParamValue::Struct(nested) => Some(nested),
            _ => None,
        }
    }

    /// Reads an array-of-structs parameter, lazily converting and caching a
    /// raw sequence the same way [`get_struct`](Self::get_struct) does. A
    /// sequence containing any element that is not an object reads as
    /// `None` (nothing is cached).
    pub fn get_struct_array(&mut self, key: &str) -> Option<&[RpcStruct]> {
        let target = match self.schema.param(key) {
            Some(ParamSpec {
                kind: ParamKind::Struct(schema),
                is_array: true,
                ..
            }) => *schema,
            _ => return None,
        };

        if let Some(ParamValue::Raw(raw)) = self.store.get(key) {
            let items = match raw {
                Value::Array(items) => items,
                other => {
                    log::debug!(
                        target: targets::STRUCT,
                        "key '{key}': expected array of {}, found {}; reading as absent",
                        target.name,
                        json_type_name(other)
                    );
                    return None;
                }
            };
            let mut converted = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(map) => converted.push(RpcStruct::from_object(target, map)),
                    other => {
                        log::debug!(
                            target: targets::STRUCT,
                            "key '{key}': array element is {}, not a {} object; reading as absent",
                            json_type_name(other),
                            target.name
                        );
                        return None;
                    }
                }
            }
            self.store
                .insert(key.to_string(), ParamValue::StructArray(converted));
        }

        match self.store.get(key)? {
            ParamValue::StructArray(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static ENGINE: Schema = Schema {
        name: "Engine",
        params: &[
            ParamSpec::new("name", ParamKind::String),
            ParamSpec::new("rpm", ParamKind::Integer),
        ],
    };

    static CAR: Schema = Schema {
        name: "Car",
        params: &[
            ParamSpec::new("model", ParamKind::String),
            ParamSpec::new("electric", ParamKind::Bool),
            ParamSpec::new("engine", ParamKind::Struct(&ENGINE)),
            ParamSpec::array("previousEngines", ParamKind::Struct(&ENGINE)),
            ParamSpec::new("metadata", ParamKind::Raw),
        ],
    };

    #[test]
    fn typed_set_and_get() {
        let mut car = RpcStruct::new(&CAR);
        car.set("model", "Aurora").unwrap();
        car.set("electric", true).unwrap();

        assert_eq!(car.get_str("model"), Some("Aurora"));
        assert_eq!(car.get_bool("electric"), Some(true));
        assert_eq!(car.get_str("missing"), None);
    }

    #[test]
    fn failed_set_is_atomic() {
        let mut car = RpcStruct::new(&CAR);
        car.set("model", "Aurora").unwrap();

        let err = car.set("model", 42i64).unwrap_err();
        assert!(matches!(err, ProtocolError::TypeMismatch { .. }));
        // previous value and siblings untouched
        assert_eq!(car.get_str("model"), Some("Aurora"));
        assert_eq!(car.store().len(), 1);
    }

    #[test]
    fn undeclared_key_is_rejected_loudly() {
        let mut car = RpcStruct::new(&CAR);
        let err = car.set("wings", true).unwrap_err();
        assert!(matches!(err, ProtocolError::UndeclaredKey { .. }));
        assert!(car.store().is_empty());
    }

    #[test]
    fn null_set_removes_key() {
        let mut car = RpcStruct::new(&CAR);
        car.set("model", "Aurora").unwrap();
        car.set("model", json!(null)).unwrap();
        assert_eq!(car.get_str("model"), None);
        assert!(!car.store().contains("model"));
    }

    #[test]
    fn nested_struct_set_requires_matching_schema() {
        let mut car = RpcStruct::new(&CAR);
        let mut engine = RpcStruct::new(&ENGINE);
        engine.set("name", "V6").unwrap();
        car.set("engine", engine).unwrap();
        assert_eq!(car.get_struct("engine").unwrap().get_str("name"), Some("V6"));

        let not_an_engine = RpcStruct::new(&CAR);
        assert!(car.set("engine", not_an_engine).is_err());
    }

    #[test]
    fn lazy_conversion_caches_typed_form() {
        let tree = json!({
            "model": "Aurora",
            "engine": { "name": "V6", "rpm": 4200, "futureField": "kept" }
        });
        let mut car = RpcStruct::from_tree(&CAR, &tree).unwrap();

        // still raw before the first typed read
        assert!(matches!(car.get_raw("engine"), Some(ParamValue::Raw(_))));

        let engine = car.get_struct("engine").unwrap();
        assert_eq!(engine.get_i64("rpm"), Some(4200));

        // cached after the first read, and idempotent
        assert!(matches!(car.get_raw("engine"), Some(ParamValue::Struct(_))));
        assert_eq!(car.get_struct("engine").unwrap().get_str("name"), Some("V6"));
    }

    #[test]
    fn lenient_read_of_malformed_struct_field() {
        let tree = json!({
            "model": "Aurora",
            "engine": "not a tree"
        });
        let mut car = RpcStruct::from_tree(&CAR, &tree).unwrap();

        assert!(car.get_struct("engine").is_none());
        // sibling keys remain independently readable
        assert_eq!(car.get_str("model"), Some("Aurora"));
        // the malformed raw value still round-trips untouched
        assert_eq!(car.to_tree()["engine"], json!("not a tree"));
    }

    #[test]
    fn struct_array_conversion_and_leniency() {
        let tree = json!({
            "previousEngines": [
                { "name": "I4", "rpm": 3000 },
                { "name": "V6", "rpm": 4200 }
            ]
        });
        let mut car = RpcStruct::from_tree(&CAR, &tree).unwrap();
        let engines = car.get_struct_array("previousEngines").unwrap();
        assert_eq!(engines.len(), 2);
        assert_eq!(engines[1].get_str("name"), Some("V6"));

        let bad = json!({ "previousEngines": [{ "name": "I4" }, 7] });
        let mut car = RpcStruct::from_tree(&CAR, &bad).unwrap();
        assert!(car.get_struct_array("previousEngines").is_none());
        // nothing cached for the malformed sequence
        assert!(matches!(
            car.get_raw("previousEngines"),
            Some(ParamValue::Raw(_))
        ));
    }

    #[test]
    fn round_trip_preserves_declared_and_unknown_keys() {
        let tree = json!({
            "model": "Aurora",
            "electric": false,
            "metadata": { "vin": "1XYZ", "tags": [1, 2, 3] },
            "notDeclaredAnywhere": "survives"
        });
        let car = RpcStruct::from_tree(&CAR, &tree).unwrap();
        assert_eq!(car.to_tree(), tree);
    }

    #[test]
    fn round_trip_after_lazy_conversion_is_equivalent() {
        let tree = json!({
            "engine": { "name": "V6", "rpm": 4200, "futureField": true }
        });
        let mut car = RpcStruct::from_tree(&CAR, &tree).unwrap();
        let _ = car.get_struct("engine");
        assert_eq!(car.to_tree(), tree);
    }

    #[test]
    fn from_tree_rejects_non_object() {
        let err = RpcStruct::from_tree(&CAR, &json!([1, 2])).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
    }

    #[test]
    fn set_parameter_bypasses_validation() {
        let mut car = RpcStruct::new(&CAR);
        car.set_parameter("model", Some(json!(12345).into()));
        // stored verbatim; the typed read is lenient about it
        assert!(car.store().contains("model"));
        assert_eq!(car.get_str("model"), None);
        assert_eq!(car.get_i64("model"), Some(12345));
    }
}
