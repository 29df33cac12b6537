//! Definitions: the value-level description of a required shape.
//!
//! Surface forms, as decoded from JSON:
//! - `"name"`                  bare kind, parameters default to `{}`
//! - `["name", parameters]`    kind with parameters (any JSON value)
//!
//! The head name is either one of the builtin kinds or a custom type name
//! looked up in the active [`Schema`](crate::schema::Schema) at check time.
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::DefinitionError;

// ------------------------------- Kind ------------------------------------ //

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Undefined,
    Anything,
    Literal,
    Enum,
    Array,
    Tuple,
    Object,
    Dictionary,
    Either,
    Restrict,
    Optional,
    Nullable,
    Custom(String),
}

impl Kind {
    /// Every builtin kind name, in declaration order.
    pub const BUILTINS: [&'static str; 17] = [
        "string", "number", "integer", "boolean", "null", "undefined", "anything",
        "literal", "enum", "array", "tuple", "object", "dictionary",
        "either", "restrict", "optional", "nullable",
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => Kind::String,
            "number" => Kind::Number,
            "integer" => Kind::Integer,
            "boolean" => Kind::Boolean,
            "null" => Kind::Null,
            "undefined" => Kind::Undefined,
            "anything" => Kind::Anything,
            "literal" => Kind::Literal,
            "enum" => Kind::Enum,
            "array" => Kind::Array,
            "tuple" => Kind::Tuple,
            "object" => Kind::Object,
            "dictionary" => Kind::Dictionary,
            "either" => Kind::Either,
            "restrict" => Kind::Restrict,
            "optional" => Kind::Optional,
            "nullable" => Kind::Nullable,
            other => Kind::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
            Kind::Undefined => "undefined",
            Kind::Anything => "anything",
            Kind::Literal => "literal",
            Kind::Enum => "enum",
            Kind::Array => "array",
            Kind::Tuple => "tuple",
            Kind::Object => "object",
            Kind::Dictionary => "dictionary",
            Kind::Either => "either",
            Kind::Restrict => "restrict",
            Kind::Optional => "optional",
            Kind::Nullable => "nullable",
            Kind::Custom(name) => name.as_str(),
        }
    }

    pub fn is_builtin(&self) -> bool { !matches!(self, Kind::Custom(_)) }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

// ----------------------------- Definition -------------------------------- //

#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    kind: Kind,
    params: Value,
}

impl Definition {
    /// Bare kind with empty parameters.
    pub fn named(name: &str) -> Self {
        Self { kind: Kind::from_name(name), params: Value::Object(Map::new()) }
    }

    pub fn with_params(name: &str, params: Value) -> Self {
        Self { kind: Kind::from_name(name), params }
    }

    pub fn kind(&self) -> &Kind { &self.kind }

    pub fn params(&self) -> Params<'_> {
        Params { kind: self.kind.name(), value: &self.params }
    }

    /// Normalize either surface form into a `Definition`.
    pub fn from_value(value: &Value) -> Result<Self, DefinitionError> {
        match value {
            Value::String(name) => Ok(Self::named(name)),
            Value::Array(pair) => match pair.as_slice() {
                [Value::String(name), params] => Ok(Self::with_params(name, params.clone())),
                _ => Err(DefinitionError::Malformed(value.to_string())),
            },
            _ => Err(DefinitionError::Malformed(value.to_string())),
        }
    }

    /// Back to the surface form; bare when parameters are `{}`.
    pub fn to_value(&self) -> Value {
        let name = Value::String(self.kind.name().to_string());
        match &self.params {
            Value::Object(m) if m.is_empty() => name,
            params => Value::Array(vec![name, params.clone()]),
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl TryFrom<&Value> for Definition {
    type Error = DefinitionError;
    fn try_from(value: &Value) -> Result<Self, Self::Error> { Self::from_value(value) }
}

impl TryFrom<Value> for Definition {
    type Error = DefinitionError;
    fn try_from(value: Value) -> Result<Self, Self::Error> { Self::from_value(&value) }
}

impl From<&str> for Definition {
    fn from(name: &str) -> Self { Self::named(name) }
}

impl Serialize for Definition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Definition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

// ------------------------------ Parameters ------------------------------- //

/// Read-only accessors over a definition's parameters.
///
/// `required_*` turns an absent key into a [`DefinitionError`]; `optional_*`
/// reports absence as `None`. A present key holding the wrong JSON type is a
/// `DefinitionError` in both modes.
#[derive(Clone, Copy, Debug)]
pub struct Params<'a> {
    kind: &'a str,
    value: &'a Value,
}

impl<'a> Params<'a> {
    /// The entire parameters value (used by `literal`, `optional`, `nullable`).
    pub fn whole(&self) -> &'a Value { self.value }

    pub fn optional(&self, key: &str) -> Option<&'a Value> {
        self.value.as_object().and_then(|m| m.get(key))
    }

    pub fn required(&self, key: &str) -> Result<&'a Value, DefinitionError> {
        self.optional(key).ok_or_else(|| DefinitionError::MissingParameter {
            kind: self.kind.to_string(),
            key: key.to_string(),
        })
    }

    /// Present and neither `false` nor `null`.
    pub fn flag(&self, key: &str) -> bool {
        !matches!(self.optional(key), None | Some(Value::Bool(false)) | Some(Value::Null))
    }

    /// Present and exactly `true`.
    pub fn is_true(&self, key: &str) -> bool {
        matches!(self.optional(key), Some(Value::Bool(true)))
    }

    pub fn optional_str(&self, key: &str) -> Result<Option<&'a str>, DefinitionError> {
        self.optional(key)
            .map(|v| v.as_str().ok_or_else(|| self.invalid(key, "a string")))
            .transpose()
    }

    pub fn optional_number(&self, key: &str) -> Result<Option<&'a Number>, DefinitionError> {
        match self.optional(key) {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(Some(n)),
            Some(_) => Err(self.invalid(key, "a number")),
        }
    }

    pub fn required_list(&self, key: &str) -> Result<&'a [Value], DefinitionError> {
        match self.required(key)? {
            Value::Array(xs) => Ok(xs),
            _ => Err(self.invalid(key, "an array")),
        }
    }

    /// An absent list reads as empty.
    pub fn optional_list(&self, key: &str) -> Result<&'a [Value], DefinitionError> {
        match self.optional(key) {
            None => Ok(&[]),
            Some(_) => self.required_list(key),
        }
    }

    pub fn optional_map(&self, key: &str) -> Result<Option<&'a Map<String, Value>>, DefinitionError> {
        match self.optional(key) {
            None => Ok(None),
            Some(Value::Object(m)) => Ok(Some(m)),
            Some(_) => Err(self.invalid(key, "an object")),
        }
    }

    pub fn optional_definition(&self, key: &str) -> Result<Option<Definition>, DefinitionError> {
        self.optional(key).map(Definition::from_value).transpose()
    }

    fn invalid(&self, key: &str, expected: &'static str) -> DefinitionError {
        DefinitionError::InvalidParameter {
            kind: self.kind.to_string(),
            key: key.to_string(),
            expected,
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
