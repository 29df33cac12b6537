use serde_json::Value;

use super::fail;
use crate::checker::{Checker, Input};
use crate::definition::{Definition, Params};
use crate::error::CheckResult;
use crate::path::{Path, Segment};

pub fn array(checker: &Checker<'_>, input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    let Some(items) = input.as_array() else {
        return fail("not an array", path);
    };
    if let Some(contents) = params.optional_definition("contents")? {
        for (i, item) in items.iter().enumerate() {
            checker.delve(Input::Value(item), &contents, path, i)?;
        }
    }
    if let Some(length) = params.optional_definition("length")? {
        let len = Value::from(items.len());
        checker.delve(Input::Value(&len), &length, path, Segment::Length)?;
    }
    Ok(())
}

/// Positional elements. Shorter arrays are padded with missing slots, so
/// trailing `optional` elements may be left out; longer arrays fail.
pub fn tuple(checker: &Checker<'_>, input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    checker.refine(input, &Definition::named("array"), path)?;
    let Some(items) = input.as_array() else {
        return fail("not an array", path);
    };
    let elements = params.required_list("elements")?;
    if items.len() > elements.len() {
        return fail("tuple is the wrong size", path);
    }
    for (i, element) in elements.iter().enumerate() {
        let element = Definition::from_value(element)?;
        checker.delve(Input::from(items.get(i)), &element, path, i)?;
    }
    Ok(())
}
