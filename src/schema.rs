//! Named types and the resolver that maps a definition onto the rule that
//! governs it.
//!
//! Names are looked up on every check, never expanded ahead of time, so types
//! may refer to each other in any order and to themselves.
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::definition::{Definition, Kind};
use crate::error::{CheckResult, DefinitionError};

const META_SCHEMA_SOURCE: &str = include_str!("meta_schema.json");

/// Self-describing schema: its `schema` type accepts well-formed schema
/// documents, including this one.
static META_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    serde_json::from_str(META_SCHEMA_SOURCE).expect("embedded meta-schema is well-formed")
});

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    types: IndexMap<String, Definition>,
}

impl Schema {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, name: impl Into<String>, definition: impl Into<Definition>) -> Self {
        self.insert(name, definition);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, definition: impl Into<Definition>) {
        self.types.insert(name.into(), definition.into());
    }

    pub fn get(&self, name: &str) -> Option<&Definition> { self.types.get(name) }
    pub fn len(&self) -> usize { self.types.len() }
    pub fn is_empty(&self) -> bool { self.types.is_empty() }
    pub fn names(&self) -> impl Iterator<Item = &str> { self.types.keys().map(String::as_str) }

    /// Build from an already-decoded JSON object of `name -> definition`.
    pub fn from_value(value: &Value) -> Result<Self, DefinitionError> {
        Self::deserialize(value).map_err(|e| DefinitionError::Malformed(e.to_string()))
    }

    pub fn meta() -> &'static Schema { &META_SCHEMA }

    /// The meta-schema in its JSON surface form.
    pub fn meta_source() -> &'static str { META_SCHEMA_SOURCE }

    /// Check a decoded schema document for well-formedness against the
    /// meta-schema, using the same engine that checks data.
    pub fn lint(document: &Value) -> CheckResult {
        crate::check(document, &Definition::named("schema"), Self::meta())
    }

    /// Follow custom names until a builtin kind is reached.
    ///
    /// Substitution never touches the path. A chain of pure aliases that
    /// revisits a name cannot terminate on any data and is reported as a
    /// definition error.
    pub fn resolve<'a>(&'a self, definition: &'a Definition) -> Result<&'a Definition, DefinitionError> {
        let mut current = definition;
        let mut hops = 0usize;
        while let Kind::Custom(name) = current.kind() {
            let Some(next) = self.get(name) else {
                return Err(DefinitionError::Unknown(name.clone()));
            };
            hops += 1;
            if hops > self.types.len() {
                return Err(DefinitionError::Malformed(format!("cyclic type alias {name}")));
            }
            tracing::debug!(name = %name, definition = %next, "substituting custom type");
            current = next;
        }
        Ok(current)
    }
}

impl<N: Into<String>, D: Into<Definition>> FromIterator<(N, D)> for Schema {
    fn from_iter<I: IntoIterator<Item = (N, D)>>(iter: I) -> Self {
        let mut schema = Self::new();
        for (name, definition) in iter {
            schema.insert(name, definition);
        }
        schema
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_aliases_in_any_declaration_order() {
        let schema = Schema::from_value(&json!({
            "foo": "bar",
            "bar": ["integer", {"min": -1, "max": 2}]
        })).unwrap();
        let foo = Definition::named("foo");
        let resolved = schema.resolve(&foo).unwrap();
        assert_eq!(resolved.kind(), &Kind::Integer);
    }

    #[test]
    fn builtins_shadow_nothing_and_resolve_to_themselves() {
        let schema = Schema::new().with("string", "integer");
        let def = Definition::named("string");
        assert_eq!(schema.resolve(&def).unwrap().kind(), &Kind::String);
    }

    #[test]
    fn unknown_names_are_definition_errors() {
        let schema = Schema::new().with("foo", "integer");
        let bar = Definition::named("bar");
        assert_eq!(schema.resolve(&bar), Err(DefinitionError::Unknown("bar".into())));
    }

    #[test]
    fn pure_alias_cycles_are_reported() {
        let schema = Schema::new().with("a", "b").with("b", "a");
        let a = Definition::named("a");
        assert!(matches!(schema.resolve(&a), Err(DefinitionError::Malformed(_))));
    }

    #[test]
    fn meta_schema_loads_every_type() {
        let meta = Schema::meta();
        for name in ["schema", "definition", "builtin_type", "custom_type", "definition_pair"] {
            assert!(meta.get(name).is_some(), "{name}");
        }
        let builtin = meta.get("builtin_type").unwrap();
        let values = builtin.params().required_list("values").unwrap();
        assert_eq!(values.len(), Kind::BUILTINS.len());
        for name in Kind::BUILTINS {
            assert!(values.contains(&json!(name)), "{name}");
        }
    }

    #[test]
    fn schema_keeps_declaration_order() {
        let schema: Schema = [("z", "string"), ("a", "number")].into_iter().collect();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(schema.len(), 2);
    }
}
