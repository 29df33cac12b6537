use serde_json::Value;

use super::fail;
use crate::checker::{Checker, Input};
use crate::definition::{Definition, Params};
use crate::error::CheckResult;
use crate::path::Path;

/// Declared members are checked in declaration order; absent ones are checked
/// as missing unless `allow_missing` is set. Undeclared keys fail unless
/// `allow_extra` is exactly `true`.
pub fn object(checker: &Checker<'_>, input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    let Some(map) = input.as_object() else {
        return fail("not an object", path);
    };
    let Some(members) = params.optional_map("members")? else {
        return Ok(());
    };
    let allow_missing = params.flag("allow_missing");
    for (name, member) in members {
        let slot = Input::from(map.get(name));
        if slot.is_missing() && allow_missing {
            continue;
        }
        let member = Definition::from_value(member)?;
        checker.delve(slot, &member, path, name.as_str())?;
    }
    if !params.is_true("allow_extra") {
        let extras: Vec<&str> = map
            .keys()
            .filter(|k| !members.contains_key(*k))
            .map(String::as_str)
            .collect();
        if !extras.is_empty() {
            return fail(format!("{} are not valid members", Value::from(extras)), path);
        }
    }
    Ok(())
}

/// Homogeneous mapping: every value against `contents`, every key (as a
/// string) against `keys`. Both report at the entry's own path.
pub fn dictionary(checker: &Checker<'_>, input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    checker.refine(input, &Definition::named("object"), path)?;
    let Some(map) = input.as_object() else {
        return fail("not an object", path);
    };
    let contents = params.optional_definition("contents")?;
    let keys = params.optional_definition("keys")?;
    for (key, value) in map {
        if let Some(contents) = &contents {
            checker.delve(Input::Value(value), contents, path, key.as_str())?;
        }
        if let Some(keys) = &keys {
            let key_value = Value::String(key.clone());
            checker.delve(Input::Value(&key_value), keys, path, key.as_str())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::definition::Definition;
    use crate::error::CheckError;
    use crate::schema::Schema;

    fn run_in(schema: &Schema, value: Value, definition: Value) -> Result<(), CheckError> {
        crate::check(&value, &Definition::from_value(&definition).unwrap(), schema)
    }

    fn run(value: Value, definition: Value) -> Result<(), CheckError> {
        run_in(&Schema::new(), value, definition)
    }

    #[test]
    fn objects() {
        assert!(run(json!({}), json!("object")).is_ok());
        assert!(run(json!({"anything": 1}), json!("object")).is_ok());
        assert!(run(json!({"a": 1}), json!(["object", {"members": {"a": "integer"}}])).is_ok());
        assert_eq!(run(json!([]), json!("object")).unwrap_err().to_string(), "not an object");
    }

    #[test]
    fn object_members_missing_or_wrong() {
        let both = json!(["object", {"members": {"a": "integer", "b": "integer"}}]);
        assert_eq!(run(json!({"a": 1}), both).unwrap_err().to_string(), "not a number at b");

        let wrong = json!(["object", {"members": {"a": "string"}}]);
        assert_eq!(run(json!({"a": 1}), wrong).unwrap_err().to_string(), "not a string at a");
    }

    #[test]
    fn absent_members_may_be_undefined_or_optional() {
        assert!(run(json!({"a": 1}), json!(["object", {"members": {"a": "integer", "b": "undefined"}}])).is_ok());
        assert!(run(json!({"a": 1}), json!(["object", {"members": {"a": "integer", "b": ["optional", "integer"]}}])).is_ok());
        assert!(run(json!({"a": 1, "b": 2}), json!(["object", {"members": {"a": "integer", "b": ["optional", "integer"]}}])).is_ok());
    }

    #[test]
    fn allow_missing_skips_absent_members_only() {
        let def = json!(["object", {"members": {"a": "integer", "b": "integer"}, "allow_missing": true}]);
        assert!(run(json!({"a": 1}), def.clone()).is_ok());
        assert!(run(json!({}), def.clone()).is_ok());
        assert_eq!(run(json!({"b": "x"}), def).unwrap_err().to_string(), "not a number at b");
    }

    #[test]
    fn extra_members_are_rejected_unless_allowed() {
        let closed = json!(["object", {"members": {"a": "integer"}}]);
        assert_eq!(
            run(json!({"a": 1, "b": 2}), closed).unwrap_err().to_string(),
            r#"["b"] are not valid members"#
        );
        let open = json!(["object", {"members": {"a": "integer"}, "allow_extra": true}]);
        assert!(run(json!({"a": 1, "b": 2}), open).is_ok());
        let truthy = json!(["object", {"members": {"a": "integer"}, "allow_extra": "yes"}]);
        assert!(run(json!({"a": 1, "b": 2}), truthy).is_err());
    }

    #[test]
    fn dictionaries() {
        assert!(run(json!({}), json!("dictionary")).is_ok());
        assert!(run(json!({"a": 1}), json!(["dictionary", {"contents": "number"}])).is_ok());
        assert_eq!(
            run(json!({"a": []}), json!(["dictionary", {"contents": "number"}])).unwrap_err().to_string(),
            "not a number at a"
        );
        assert_eq!(run(json!("a"), json!("dictionary")).unwrap_err().to_string(), "not an object");
    }

    #[test]
    fn dictionary_contents_respect_custom_types() {
        let schema = Schema::new().with("foo", "number");
        assert!(run_in(&schema, json!({"a": 1}), json!(["dictionary", {"contents": "foo"}])).is_ok());
    }

    #[test]
    fn dictionary_keys() {
        let def = json!(["dictionary", {"keys": ["string", {"matches": "^\\w+-\\w+\\.\\w+$"}]}]);
        assert!(run(json!({"foo-bar.baz": "my_value"}), def.clone()).is_ok());
        let err = run(json!({"foo.bar-baz": "my_value"}), def).unwrap_err().to_string();
        assert!(err.contains("does not match"), "{err}");
        assert!(err.ends_with("at foo.bar-baz"), "{err}");
    }
}
