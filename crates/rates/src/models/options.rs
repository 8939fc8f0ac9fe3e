use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Construction options handed to a service by the factory.
///
/// Each service decides which keys it needs; the factory passes the map
/// through without validating it. Options can be built from a JSON object,
/// from a JSON array (elements become the positional keys `"0"`, `"1"`, ...)
/// or from `null` (no options).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ServiceOptions {
    values: Map<String, Value>,
}

impl ServiceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// First present value among `keys`, used for named/positional aliases.
    pub fn get_any(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.values.get(*key))
    }

    /// Optional string option. A non-string value is an error.
    pub fn get_str(&self, service: &str, key: &str) -> Result<Option<&str>, ServiceError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(ServiceError::invalid_option(
                service,
                key,
                format!("expected a string, got {}", other),
            )),
        }
    }

    /// Required, non-empty string option.
    pub fn require_str(&self, service: &str, key: &str) -> Result<&str, ServiceError> {
        match self.get_str(service, key)? {
            Some(s) if !s.trim().is_empty() => Ok(s),
            _ => Err(ServiceError::missing_option(service, key)),
        }
    }

    /// Optional boolean flag, `false` when absent.
    pub fn get_bool(&self, service: &str, key: &str) -> Result<bool, ServiceError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(ServiceError::invalid_option(
                service,
                key,
                format!("expected a boolean, got {}", other),
            )),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<Value> for ServiceOptions {
    type Error = ServiceError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(values) => Ok(Self { values }),
            Value::Array(items) => Ok(Self {
                values: items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item))
                    .collect(),
            }),
            other => Err(ServiceError::InvalidOptions(format!(
                "expected an object, an array or null, got {}",
                other
            ))),
        }
    }
}

impl From<Map<String, Value>> for ServiceOptions {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl From<ServiceOptions> for Value {
    fn from(options: ServiceOptions) -> Self {
        Value::Object(options.values)
    }
}

/// A service name together with its options, as found in configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub service: String,

    #[serde(default)]
    pub options: ServiceOptions,
}

impl ServiceSpec {
    pub fn new(service: impl Into<String>, options: ServiceOptions) -> Self {
        Self {
            service: service.into(),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_accessors() {
        let options = ServiceOptions::new()
            .with("access_key", "secret")
            .with("enterprise", true);

        assert_eq!(options.len(), 2);
        assert_eq!(options.require_str("fixer", "access_key").unwrap(), "secret");
        assert!(options.get_bool("fixer", "enterprise").unwrap());
        assert!(!options.get_bool("fixer", "missing").unwrap());
    }

    #[test]
    fn test_require_str_missing_or_blank() {
        let options = ServiceOptions::new().with("token", "  ");
        assert!(matches!(
            options.require_str("xignite", "token"),
            Err(ServiceError::MissingOption { .. })
        ));
        assert!(matches!(
            options.require_str("xignite", "other"),
            Err(ServiceError::MissingOption { .. })
        ));
    }

    #[test]
    fn test_wrong_type_is_invalid_option() {
        let options = ServiceOptions::new().with("app_id", 42);
        match options.require_str("open_exchange_rates", "app_id") {
            Err(ServiceError::InvalidOption { option, .. }) => assert_eq!(option, "app_id"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_from_json_array_uses_positional_keys() {
        let options = ServiceOptions::try_from(json!([{"EUR/USD": 1.0}, {}])).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options.get("0"), Some(&json!({"EUR/USD": 1.0})));
        assert_eq!(options.get_any(&["latest", "0"]), Some(&json!({"EUR/USD": 1.0})));
    }

    #[test]
    fn test_from_json_null_and_scalar() {
        assert!(ServiceOptions::try_from(Value::Null).unwrap().is_empty());
        assert!(matches!(
            ServiceOptions::try_from(json!("nope")),
            Err(ServiceError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_service_spec_deserialize() {
        let spec: ServiceSpec =
            serde_json::from_str(r#"{"service": "fixer", "options": {"access_key": "k"}}"#)
                .unwrap();
        assert_eq!(spec.service, "fixer");
        assert!(spec.options.contains_key("access_key"));

        let spec: ServiceSpec =
            serde_json::from_str(r#"{"service": "european_central_bank"}"#).unwrap();
        assert!(spec.options.is_empty());
    }
}
