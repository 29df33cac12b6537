//! Composition: union, intersection with exclusions, and the two wrappers.
//!
//! `either` and `restrict` treat a nested `Failure` as an ordinary outcome,
//! but a `DefinitionError` inside any branch aborts the whole check.
use serde_json::Value;

use super::fail;
use crate::checker::{Checker, Input};
use crate::definition::{Definition, Params};
use crate::error::CheckResult;
use crate::path::Path;

/// First matching choice wins; sub-failures are discarded.
pub fn either(checker: &Checker<'_>, input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    for choice in params.required_list("choices")? {
        let choice = Definition::from_value(choice)?;
        if checker.probe(input, &choice, path)? {
            return Ok(());
        }
    }
    fail("does not match any choice", path)
}

/// Every `require` entry must hold (its own failure propagates) and no
/// `reject` entry may hold.
pub fn restrict(checker: &Checker<'_>, input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    for requirement in params.optional_list("require")? {
        let requirement = Definition::from_value(requirement)?;
        checker.refine(input, &requirement, path)?;
    }
    for rejection in params.optional_list("reject")? {
        let rejection = Definition::from_value(rejection)?;
        if checker.probe(input, &rejection, path)? {
            return fail(format!("violates {rejection}"), path);
        }
    }
    Ok(())
}

pub fn optional(checker: &Checker<'_>, input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    if input.is_missing() {
        return Ok(());
    }
    checker.refine(input, &Definition::from_value(params.whole())?, path)
}

pub fn nullable(checker: &Checker<'_>, input: Input<'_>, params: Params<'_>, path: &Path) -> CheckResult {
    if let Input::Value(Value::Null) = input {
        return Ok(());
    }
    checker.refine(input, &Definition::from_value(params.whole())?, path)
}
