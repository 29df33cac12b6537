use std::cmp::Ordering;

use regex::Regex;
use serde_json::Value;

use super::{compare_numbers, deep_eq, fail};
use crate::checker::{Checker, Input};
use crate::definition::{Definition, Params};
use crate::error::{CheckResult, DefinitionError};
use crate::path::Path;

pub fn string(input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    let Some(Value::String(s)) = input.value() else {
        return fail("not a string", path);
    };
    if let Some(pattern) = params.optional_str("matches")? {
        let re = Regex::new(pattern).map_err(|e| DefinitionError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        if !re.is_match(s) {
            return fail(format!("does not match /{pattern}/"), path);
        }
    }
    Ok(())
}

/// Bounds are inclusive.
pub fn number(input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    let Some(Value::Number(n)) = input.value() else {
        return fail("not a number", path);
    };
    if let Some(min) = params.optional_number("min")? {
        if compare_numbers(n, min) == Ordering::Less {
            return fail(format!("less than min {min}"), path);
        }
    }
    if let Some(max) = params.optional_number("max")? {
        if compare_numbers(n, max) == Ordering::Greater {
            return fail(format!("greater than max {max}"), path);
        }
    }
    Ok(())
}

/// Refines to `number` with the same parameters, then requires an integral
/// representation (`1.0` is not an integer).
pub fn integer(checker: &Checker<'_>, input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    checker.refine(input, &Definition::with_params("number", params.whole().clone()), path)?;
    match input.value() {
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(()),
        _ => fail("is not an integer", path),
    }
}

pub fn boolean(input: Input<'_>, path: &Path) -> CheckResult {
    match input {
        Input::Value(Value::Bool(_)) => Ok(()),
        _ => fail("not a boolean", path),
    }
}

pub fn null(input: Input<'_>, path: &Path) -> CheckResult {
    match input {
        Input::Value(Value::Null) => Ok(()),
        _ => fail("not null", path),
    }
}

pub fn undefined(input: Input<'_>, path: &Path) -> CheckResult {
    if input.is_missing() { Ok(()) } else { fail("is not undefined", path) }
}

pub fn anything(input: Input<'_>, path: &Path) -> CheckResult {
    if input.is_missing() { fail("is not defined", path) } else { Ok(()) }
}

/// Compares against the whole parameters value, not a named field.
pub fn literal(input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    match input.value() {
        Some(v) if deep_eq(v, params.whole()) => Ok(()),
        _ => fail("doesn't match", path),
    }
}

pub fn enumeration(input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    let values = params.required_list("values")?;
    match input.value() {
        Some(v) if values.iter().any(|candidate| deep_eq(v, candidate)) => Ok(()),
        _ => fail("does not match any choice", path),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::definition::Definition;
    use crate::error::{CheckError, DefinitionError};
    use crate::schema::Schema;

    fn run(value: Value, definition: Value) -> Result<(), CheckError> {
        crate::check(&value, &Definition::from_value(&definition).unwrap(), &Schema::new())
    }

    fn message(value: Value, definition: Value) -> String {
        run(value, definition).unwrap_err().to_string()
    }

    #[test]
    fn strings() {
        assert!(run(json!("x"), json!("string")).is_ok());
        assert!(run(json!("x"), json!(["string", {}])).is_ok());
        for v in [json!(1), json!({}), json!(null), json!(["a"]), json!(true), json!(false)] {
            assert_eq!(message(v, json!("string")), "not a string");
        }
    }

    #[test]
    fn string_patterns_search_unanchored() {
        let def = json!(["string", {"matches": "^\\w+;\\w+-\\w+$"}]);
        assert!(run(json!("my;fancy-string"), def.clone()).is_ok());
        assert_eq!(
            message(json!("my;fancy-string with.other/characters"), def),
            "does not match /^\\w+;\\w+-\\w+$/"
        );
        assert!(run(json!("abc123"), json!(["string", {"matches": "\\d+"}])).is_ok());
    }

    #[test]
    fn bad_patterns_are_definition_errors() {
        let err = run(json!("x"), json!(["string", {"matches": "("}])).unwrap_err();
        assert!(matches!(err, CheckError::Definition(DefinitionError::InvalidPattern { .. })));
    }

    #[test]
    fn numbers_and_bounds() {
        assert!(run(json!(1), json!("number")).is_ok());
        assert!(run(json!(1.0), json!("number")).is_ok());
        assert!(run(json!(3.5), json!(["number", {"min": 0.5, "max": 5.2}])).is_ok());
        assert!(run(json!(5.2), json!(["number", {"min": 0.5, "max": 5.2}])).is_ok());
        assert_eq!(message(json!(8999.9), json!(["number", {"min": 9000}])), "less than min 9000");
        assert_eq!(message(json!(3.14), json!(["number", {"max": 3}])), "greater than max 3");
        assert_eq!(message(json!("1"), json!("number")), "not a number");
    }

    #[test]
    fn non_numeric_bounds_are_definition_errors() {
        let err = run(json!(1), json!(["number", {"min": "zero"}])).unwrap_err();
        assert!(!err.is_failure());
    }

    #[test]
    fn integers() {
        assert!(run(json!(1), json!("integer")).is_ok());
        assert!(run(json!(50), json!(["integer", {"min": 0, "max": 100}])).is_ok());
        assert_eq!(message(json!(1.0), json!("integer")), "is not an integer");
        assert_eq!(message(json!("1"), json!("integer")), "not a number");
        assert_eq!(message(json!(50), json!(["integer", {"min": 100}])), "less than min 100");
        assert_eq!(message(json!(50), json!(["integer", {"max": 0}])), "greater than max 0");
    }

    #[test]
    fn booleans_and_null() {
        assert!(run(json!(true), json!("boolean")).is_ok());
        assert!(run(json!(false), json!("boolean")).is_ok());
        assert_eq!(message(json!(1), json!("boolean")), "not a boolean");
        assert!(run(json!(null), json!("null")).is_ok());
        assert_eq!(message(json!(1), json!("null")), "not null");
        assert_eq!(message(json!(false), json!("null")), "not null");
    }

    #[test]
    fn undefined_and_anything_on_present_values() {
        assert_eq!(message(json!(null), json!("undefined")), "is not undefined");
        for v in [json!("x"), json!(1), json!([]), json!({}), json!(null)] {
            assert!(run(v, json!("anything")).is_ok());
        }
    }

    #[test]
    fn literals() {
        assert!(run(json!("x"), json!(["literal", "x"])).is_ok());
        assert!(run(json!({"x": "y"}), json!(["literal", {"x": "y"}])).is_ok());
        assert!(run(json!(false), json!(["literal", false])).is_ok());
        assert_eq!(message(json!(true), json!(["literal", false])), "doesn't match");
        assert!(run(json!("x"), json!(["literal", {"x": "y"}])).is_err());
        assert!(run(json!({"x": "y"}), json!(["literal", {"x": "z"}])).is_err());
        assert!(run(json!(1), json!(["literal", "1"])).is_err());
    }

    #[test]
    fn enums() {
        let def = json!(["enum", {"values": ["hello", "goodbye"]}]);
        assert!(run(json!("hello"), def.clone()).is_ok());
        assert!(run(json!("goodbye"), def.clone()).is_ok());
        assert_eq!(message(json!("elephant"), def.clone()), "does not match any choice");
        assert!(run(json!({}), def).is_err());
    }

    #[test]
    fn enum_requires_values() {
        let err = run(json!("x"), json!("enum")).unwrap_err();
        assert_eq!(err.to_string(), "enum: values is not defined");
        assert!(!err.is_failure());
    }
}
