use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A typed process variable.
///
/// The engine tags every variable with a type name ("String", "Integer",
/// "Boolean", ...). Values without a tag are accepted; the engine infers
/// the type from the JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// The variable's value as plain JSON.
    #[serde(default)]
    pub value: serde_json::Value,

    /// Engine type tag, e.g. "String".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

/// Variables keyed by name, as carried on fetch responses and
/// completion/failure reports.
pub type VariableMap = HashMap<String, Variable>;

impl Variable {
    /// A variable tagged with the engine's "String" type.
    pub fn string(value: impl Into<String>) -> Self {
        Variable {
            value: serde_json::Value::String(value.into()),
            value_type: Some("String".to_string()),
        }
    }

    /// A variable without a type tag.
    pub fn untyped(value: serde_json::Value) -> Self {
        Variable {
            value,
            value_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_variable_wire_shape() {
        let var = Variable::string("release-1.4");
        let encoded = serde_json::to_value(&var).unwrap();

        assert_eq!(
            encoded,
            json!({ "value": "release-1.4", "type": "String" })
        );
    }

    #[test]
    fn test_untyped_variable_omits_type() {
        let var = Variable::untyped(json!(42));
        let encoded = serde_json::to_value(&var).unwrap();

        assert_eq!(encoded, json!({ "value": 42 }));
    }

    #[test]
    fn test_variable_decodes_without_value() {
        let var: Variable = serde_json::from_str(r#"{ "type": "String" }"#).unwrap();

        assert_eq!(var.value, serde_json::Value::Null);
        assert_eq!(var.value_type.as_deref(), Some("String"));
    }
}
