//! Untyped attribute map exchanged with the host.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Diagnostic;

/// Configuration or state of one data source / resource instance.
///
/// An instance without an `id` does not exist remotely (or was never read).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self {
            id: None,
            attributes,
        }
    }

    /// Builds an instance from a JSON object of attributes.
    pub fn from_value(value: Value) -> Result<Self, Diagnostic> {
        match value {
            Value::Object(attributes) => Ok(Self::from_attributes(attributes)),
            other => Err(Diagnostic::Decode {
                detail: format!("expected an object of attributes, got {other}"),
            }),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    /// Drops the identifier and every attribute.
    pub fn clear(&mut self) {
        self.id = None;
        self.attributes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.attributes.is_empty()
    }

    /// Decodes the attributes into a typed configuration.
    ///
    /// Unknown attributes are ignored here; [`Schema::validate`](crate::Schema::validate)
    /// is responsible for rejecting them.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Diagnostic> {
        serde_json::from_value(Value::Object(self.attributes.clone())).map_err(|e| {
            Diagnostic::Decode {
                detail: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Typed {
        name: String,
        flag: bool,
    }

    #[test]
    fn decode_typed() {
        let d = ResourceData::from_value(json!({"name": "x", "flag": true})).unwrap();
        let t: Typed = d.decode().unwrap();
        assert_eq!(t.name, "x");
        assert!(t.flag);
    }

    #[test]
    fn decode_type_mismatch_is_explicit() {
        let d = ResourceData::from_value(json!({"name": "x", "flag": "true"})).unwrap();
        let err = d.decode::<Typed>().unwrap_err();
        assert!(matches!(err, Diagnostic::Decode { .. }));
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(ResourceData::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn set_get_and_clear() {
        let mut d = ResourceData::new();
        assert!(d.is_empty());
        d.set("enabled", true);
        d.set_id("abc");
        assert_eq!(d.get("enabled"), Some(&json!(true)));
        assert_eq!(d.id(), Some("abc"));
        d.clear();
        assert!(d.is_empty());
    }

    #[test]
    fn serde_shape() {
        let mut d = ResourceData::new();
        d.set("zone_id", "z");
        assert_eq!(
            serde_json::to_value(&d).unwrap(),
            json!({"attributes": {"zone_id": "z"}})
        );
        let back: ResourceData =
            serde_json::from_value(json!({"id": "i", "attributes": {"zone_id": "z"}})).unwrap();
        assert_eq!(back.id(), Some("i"));
    }
}
