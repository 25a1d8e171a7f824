//! Attribute schema declarations
//!
//! A [`Schema`] lists the attributes of the provider block or of one
//! resource type, with the flags the host needs to plan changes
//! (`required`, `computed`, `force_new`, ...).

use crate::diagnostics::{Diagnostic, Diagnostics};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const REDACTED: &str = "(sensitive value)";

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int,
    Bool,
}

impl AttributeType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Int => value.is_i64() || value.is_u64(),
            AttributeType::Bool => value.is_boolean(),
        }
    }

    /// Convert a raw environment string into a value of this type
    fn parse_env(&self, raw: &str) -> Option<Value> {
        match self {
            AttributeType::String => Some(Value::String(raw.to_string())),
            AttributeType::Int => raw.trim().parse::<i64>().ok().map(Value::from),
            AttributeType::Bool => raw.trim().parse::<bool>().ok().map(Value::Bool),
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeType::String => write!(f, "string"),
            AttributeType::Int => write!(f, "number"),
            AttributeType::Bool => write!(f, "bool"),
        }
    }
}

/// A single attribute declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attr_type: AttributeType,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub computed: bool,

    /// Changing this attribute destroys and recreates the resource
    #[serde(default)]
    pub force_new: bool,

    /// Never echoed in diagnostics or displayed state
    #[serde(default)]
    pub sensitive: bool,

    /// Environment variable consulted when the attribute is not set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Allowed string values; empty means unrestricted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<String>,
}

impl Attribute {
    fn new(attr_type: AttributeType) -> Self {
        Self {
            attr_type,
            description: String::new(),
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            sensitive: false,
            env_default: None,
            default: None,
            one_of: Vec::new(),
        }
    }

    pub fn required(attr_type: AttributeType) -> Self {
        Self {
            required: true,
            ..Self::new(attr_type)
        }
    }

    pub fn optional(attr_type: AttributeType) -> Self {
        Self {
            optional: true,
            ..Self::new(attr_type)
        }
    }

    pub fn computed(attr_type: AttributeType) -> Self {
        Self {
            computed: true,
            ..Self::new(attr_type)
        }
    }

    pub fn required_string() -> Self {
        Self::required(AttributeType::String)
    }

    pub fn optional_string() -> Self {
        Self::optional(AttributeType::String)
    }

    pub fn computed_string() -> Self {
        Self::computed(AttributeType::String)
    }

    pub fn required_int() -> Self {
        Self::required(AttributeType::Int)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn env_default(mut self, var: impl Into<String>) -> Self {
        self.env_default = Some(var.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = values.into_iter().map(Into::into).collect();
        self
    }

    /// Computed attributes the user may not set
    fn is_computed_only(&self) -> bool {
        self.computed && !self.required && !self.optional
    }
}

/// Schema of the provider block or of one resource type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Fill unset attributes from their environment variable, then from their
    /// static default
    ///
    /// Empty environment values count as unset.
    pub fn apply_defaults(&self, config: &mut Map<String, Value>) {
        for (name, attribute) in &self.attributes {
            if config.get(name).is_some_and(|v| !v.is_null()) {
                continue;
            }

            let from_env = attribute
                .env_default
                .as_deref()
                .and_then(|var| std::env::var(var).ok())
                .filter(|raw| !raw.is_empty())
                .and_then(|raw| attribute.attr_type.parse_env(&raw));

            if let Some(value) = from_env {
                tracing::debug!("Attribute {} resolved from environment", name);
                config.insert(name.clone(), value);
            } else if let Some(default) = &attribute.default {
                config.insert(name.clone(), default.clone());
            }
        }
    }

    /// Check a configuration against this schema
    ///
    /// Diagnostics name the offending attribute but never include the
    /// configured value of a sensitive attribute.
    pub fn validate(&self, config: &Map<String, Value>) -> Diagnostics {
        let mut diags = Diagnostics::new();

        for (name, value) in config {
            let Some(attribute) = self.attributes.get(name) else {
                diags.push(
                    Diagnostic::error("Unsupported argument")
                        .with_attribute(name)
                        .with_detail(format!("An argument named \"{}\" is not expected here.", name)),
                );
                continue;
            };

            if value.is_null() {
                continue;
            }

            if attribute.is_computed_only() {
                diags.push(
                    Diagnostic::error("Value for unconfigurable attribute")
                        .with_attribute(name)
                        .with_detail(format!(
                            "Can't configure a value for \"{}\": its value will be decided automatically.",
                            name
                        )),
                );
                continue;
            }

            if !attribute.attr_type.matches(value) {
                diags.push(
                    Diagnostic::error("Incorrect attribute value type")
                        .with_attribute(name)
                        .with_detail(format!(
                            "Inappropriate value for attribute \"{}\": {} required.",
                            name, attribute.attr_type
                        )),
                );
                continue;
            }

            if !attribute.one_of.is_empty() {
                let allowed = value
                    .as_str()
                    .is_some_and(|s| attribute.one_of.iter().any(|v| v == s));
                if !allowed {
                    diags.push(
                        Diagnostic::error("Invalid value")
                            .with_attribute(name)
                            .with_detail(format!(
                                "Expected \"{}\" to be one of: {}.",
                                name,
                                attribute.one_of.join(", ")
                            )),
                    );
                }
            }
        }

        for (name, attribute) in &self.attributes {
            if !attribute.required || config.get(name).is_some_and(|v| !v.is_null()) {
                continue;
            }
            let mut detail = format!(
                "The argument \"{}\" is required, but no definition was found.",
                name
            );
            if let Some(var) = &attribute.env_default {
                detail.push_str(&format!(
                    " Set it in the configuration or through the {} environment variable.",
                    var
                ));
            }
            diags.push(
                Diagnostic::error("Missing required argument")
                    .with_attribute(name)
                    .with_detail(detail),
            );
        }

        diags
    }

    /// Copy of `attributes` with sensitive values masked
    pub fn redact(&self, attributes: &Map<String, Value>) -> Map<String, Value> {
        attributes
            .iter()
            .map(|(name, value)| {
                let sensitive = self.attributes.get(name).is_some_and(|a| a.sensitive);
                if sensitive && !value.is_null() {
                    (name.clone(), Value::String(REDACTED.to_string()))
                } else {
                    (name.clone(), value.clone())
                }
            })
            .collect()
    }

    /// Force-new attributes whose proposed value differs from the prior state
    pub fn requires_replace(
        &self,
        prior: &Map<String, Value>,
        proposed: &Map<String, Value>,
    ) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|(_, attribute)| attribute.force_new && !attribute.is_computed_only())
            .filter(|(name, _)| {
                let before = prior.get(name.as_str()).unwrap_or(&Value::Null);
                let after = proposed.get(name.as_str()).unwrap_or(&Value::Null);
                before != after
            })
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn credentials_schema() -> Schema {
        Schema::new("test provider")
            .with_attribute(
                "access_key",
                Attribute::required_string().env_default("TEST_PLUGIN_ACCESS_KEY"),
            )
            .with_attribute(
                "secret_key",
                Attribute::required_string()
                    .sensitive()
                    .env_default("TEST_PLUGIN_SECRET_KEY"),
            )
    }

    fn bucket_schema() -> Schema {
        Schema::new("bucket")
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("name", Attribute::required_string().force_new())
            .with_attribute("memory_quota", Attribute::required_int().force_new())
            .with_attribute(
                "conflict_resolution",
                Attribute::optional_string()
                    .force_new()
                    .one_of(["seqno", "lww"])
                    .with_default("seqno"),
            )
    }

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_env_defaults_fill_missing_values() {
        temp_env::with_vars(
            [
                ("TEST_PLUGIN_ACCESS_KEY", Some("ak")),
                ("TEST_PLUGIN_SECRET_KEY", Some("sk")),
            ],
            || {
                let schema = credentials_schema();
                let mut config = as_map(json!({ "access_key": "explicit" }));
                schema.apply_defaults(&mut config);

                assert_eq!(config["access_key"], json!("explicit"));
                assert_eq!(config["secret_key"], json!("sk"));
                assert!(schema.validate(&config).is_empty());
            },
        );
    }

    #[test]
    fn test_empty_env_counts_as_unset() {
        temp_env::with_vars(
            [
                ("TEST_PLUGIN_ACCESS_KEY", Some("")),
                ("TEST_PLUGIN_SECRET_KEY", None::<&str>),
            ],
            || {
                let schema = credentials_schema();
                let mut config = Map::new();
                schema.apply_defaults(&mut config);

                let diags = schema.validate(&config);
                assert!(diags.has_errors());
                assert_eq!(diags.len(), 2);
                let text = diags.to_string();
                assert!(text.contains("TEST_PLUGIN_ACCESS_KEY"));
                assert!(text.contains("TEST_PLUGIN_SECRET_KEY"));
            },
        );
    }

    #[test]
    fn test_static_default() {
        let schema = bucket_schema();
        let mut config = as_map(json!({ "name": "travel", "memory_quota": 256 }));
        schema.apply_defaults(&mut config);
        assert_eq!(config["conflict_resolution"], json!("seqno"));
    }

    #[test]
    fn test_validate_rejects_unknown_and_mistyped() {
        let schema = bucket_schema();
        let config = as_map(json!({
            "name": "travel",
            "memory_quota": "lots",
            "colour": "blue",
        }));

        let diags = schema.validate(&config);
        let attrs: Vec<_> = diags
            .iter()
            .filter_map(|d| d.attribute.as_deref())
            .collect();
        assert!(attrs.contains(&"colour"));
        assert!(attrs.contains(&"memory_quota"));
    }

    #[test]
    fn test_validate_one_of() {
        let schema = bucket_schema();
        let config = as_map(json!({
            "name": "travel",
            "memory_quota": 256,
            "conflict_resolution": "newest",
        }));

        let diags = schema.validate(&config);
        assert_eq!(diags.len(), 1);
        assert!(diags.to_string().contains("seqno, lww"));
    }

    #[test]
    fn test_validate_rejects_computed_only() {
        let schema = bucket_schema();
        let config = as_map(json!({
            "id": "user-chosen",
            "name": "travel",
            "memory_quota": 256,
        }));

        let diags = schema.validate(&config);
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Value for unconfigurable attribute");
        assert_eq!(diag.attribute.as_deref(), Some("id"));

        // Null means unset
        let config = as_map(json!({ "id": null, "name": "travel", "memory_quota": 256 }));
        assert!(schema.validate(&config).is_empty());
    }

    #[test]
    fn test_sensitive_value_not_in_diagnostics() {
        let schema = credentials_schema();
        let config = as_map(json!({ "access_key": "ak", "secret_key": 12345 }));

        let diags = schema.validate(&config);
        assert!(diags.has_errors());
        assert!(!diags.to_string().contains("12345"));
    }

    #[test]
    fn test_redact() {
        let schema = credentials_schema();
        let redacted = schema.redact(&as_map(json!({ "access_key": "ak", "secret_key": "sk" })));
        assert_eq!(redacted["access_key"], json!("ak"));
        assert_ne!(redacted["secret_key"], json!("sk"));
    }

    #[test]
    fn test_requires_replace() {
        let schema = bucket_schema();
        let prior = as_map(json!({
            "id": "abc",
            "name": "travel",
            "memory_quota": 256,
            "conflict_resolution": "seqno",
        }));
        let proposed = as_map(json!({
            "name": "travel",
            "memory_quota": 512,
            "conflict_resolution": "seqno",
        }));

        assert_eq!(schema.requires_replace(&prior, &proposed), vec!["memory_quota"]);
        assert!(schema.requires_replace(&prior, &prior).is_empty());
    }
}
