//! Attribute schemas for data sources and resources.
//!
//! A [`Schema`] declares the attributes a configuration may carry. Checking a
//! [`ResourceData`] against it reports every problem at once; decoding into a
//! typed configuration happens afterwards through [`ResourceData::decode`].

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::Diagnostic;
use crate::state::ResourceData;
use crate::validators::ValidationError;

/// Validator applied to string attributes.
pub type StringValidator = fn(&str) -> Result<(), ValidationError>;

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Bool,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Bool => f.write_str("bool"),
        }
    }
}

/// Who supplies an attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldMode {
    /// Must be set in configuration.
    Required,
    /// May be set in configuration.
    Optional,
    /// Set only by the provider.
    Computed,
}

/// A single attribute declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub mode: FieldMode,
    /// Changing this attribute replaces the remote object.
    pub force_new: bool,
    pub description: &'static str,
    #[serde(skip)]
    pub validate: Option<StringValidator>,
}

impl Field {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            mode: FieldMode::Optional,
            force_new: false,
            description: "",
            validate: None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub const fn bool(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    pub const fn required(mut self) -> Self {
        self.mode = FieldMode::Required;
        self
    }

    pub const fn computed(mut self) -> Self {
        self.mode = FieldMode::Computed;
        self
    }

    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn validate_with(mut self, validator: StringValidator) -> Self {
        self.validate = Some(validator);
        self
    }

    fn check(&self, value: Option<&Value>, errors: &mut Vec<FieldError>) {
        let value = match value {
            None | Some(Value::Null) => {
                if self.mode == FieldMode::Required {
                    errors.push(FieldError::Missing {
                        attribute: self.name.to_string(),
                    });
                }
                return;
            }
            Some(v) => v,
        };

        if !self.kind.matches(value) {
            errors.push(FieldError::TypeMismatch {
                attribute: self.name.to_string(),
                expected: self.kind,
                found: json_type_name(value),
            });
            return;
        }

        if let (Some(validate), Some(s)) = (self.validate, value.as_str())
            && let Err(source) = validate(s)
        {
            errors.push(FieldError::Invalid {
                attribute: self.name.to_string(),
                source,
            });
        }
    }
}

/// Attribute set of one data source or resource type.
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub description: &'static str,
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks `data` against the declared attributes.
    ///
    /// Values of computed attributes are accepted so prior state can be
    /// passed back in unchanged.
    pub fn validate(&self, data: &ResourceData) -> Result<(), Diagnostic> {
        let mut errors = Vec::new();

        for field in &self.fields {
            field.check(data.get(field.name), &mut errors);
        }

        for key in data.attributes.keys() {
            if self.field(key).is_none() {
                errors.push(FieldError::Unknown {
                    attribute: key.clone(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Diagnostic::InvalidConfig(errors))
        }
    }

    /// Names of force-new attributes whose value differs between `prior` and `planned`.
    pub fn replacement_fields(&self, prior: &ResourceData, planned: &ResourceData) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.force_new && prior.get(f.name) != planned.get(f.name))
            .map(|f| f.name)
            .collect()
    }
}

/// A problem with one attribute of a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{attribute:?}: required attribute is missing")]
    Missing { attribute: String },

    #[error("{attribute:?}: expected {expected}, got {found}")]
    TypeMismatch {
        attribute: String,
        expected: FieldKind,
        found: &'static str,
    },

    #[error("{attribute:?}: {source}")]
    Invalid {
        attribute: String,
        source: ValidationError,
    },

    #[error("{attribute:?}: unsupported attribute")]
    Unknown { attribute: String },
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
