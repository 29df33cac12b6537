//! Recursive descent over a value and a definition.
//!
//! The checker resolves a definition's head kind, hands the current input to
//! the matching rule, and gives rules two ways to recurse:
//! - `delve`: one level deeper, path grows by exactly one segment
//! - `refine`: same position, different definition, path unchanged
use serde_json::{Map, Value};

use crate::definition::{Definition, Kind};
use crate::error::{CheckError, CheckResult, DefinitionError};
use crate::path::{Path, Segment};
use crate::rules;
use crate::schema::Schema;

/// What sits at the position under inspection.
///
/// `Missing` stands for an object member or tuple slot that was not supplied.
/// It never appears in caller input; only the checker synthesizes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input<'a> {
    Value(&'a Value),
    Missing,
}

impl<'a> Input<'a> {
    pub fn is_missing(&self) -> bool { matches!(self, Input::Missing) }

    pub fn value(&self) -> Option<&'a Value> {
        match *self {
            Input::Value(v) => Some(v),
            Input::Missing => None,
        }
    }

    pub fn as_array(&self) -> Option<&'a Vec<Value>> { self.value().and_then(Value::as_array) }
    pub fn as_object(&self) -> Option<&'a Map<String, Value>> { self.value().and_then(Value::as_object) }
}

impl<'a> From<Option<&'a Value>> for Input<'a> {
    fn from(slot: Option<&'a Value>) -> Self { slot.map_or(Input::Missing, Input::Value) }
}

/// Checks inputs against definitions within one schema.
///
/// Holds nothing but a shared reference, so one schema can back any number of
/// checkers on any number of threads.
#[derive(Clone, Copy, Debug)]
pub struct Checker<'s> {
    schema: &'s Schema,
}

impl<'s> Checker<'s> {
    pub fn new(schema: &'s Schema) -> Self { Self { schema } }

    pub fn schema(&self) -> &'s Schema { self.schema }

    pub fn check(&self, input: Input<'_>, definition: &Definition, path: &Path) -> CheckResult {
        let resolved = self.schema.resolve(definition)?;
        let params = resolved.params();
        tracing::trace!(kind = %resolved.kind(), path = %path, "dispatch");
        match resolved.kind() {
            Kind::String => rules::scalar::string(input, params, path),
            Kind::Number => rules::scalar::number(input, params, path),
            Kind::Integer => rules::scalar::integer(self, input, params, path),
            Kind::Boolean => rules::scalar::boolean(input, path),
            Kind::Null => rules::scalar::null(input, path),
            Kind::Undefined => rules::scalar::undefined(input, path),
            Kind::Anything => rules::scalar::anything(input, path),
            Kind::Literal => rules::scalar::literal(input, params, path),
            Kind::Enum => rules::scalar::enumeration(input, params, path),
            Kind::Array => rules::arr::array(self, input, params, path),
            Kind::Tuple => rules::arr::tuple(self, input, params, path),
            Kind::Object => rules::obj::object(self, input, params, path),
            Kind::Dictionary => rules::obj::dictionary(self, input, params, path),
            Kind::Either => rules::set::either(self, input, params, path),
            Kind::Restrict => rules::set::restrict(self, input, params, path),
            Kind::Optional => rules::set::optional(self, input, params, path),
            Kind::Nullable => rules::set::nullable(self, input, params, path),
            Kind::Custom(name) => Err(DefinitionError::Unknown(name.clone()).into()),
        }
    }

    /// Check a child of the current position.
    pub fn delve(
        &self,
        input: Input<'_>,
        definition: &Definition,
        path: &Path,
        segment: impl Into<Segment>,
    ) -> CheckResult {
        self.check(input, definition, &path.child(segment))
    }

    /// Re-check the current position against another definition.
    pub fn refine(&self, input: Input<'_>, definition: &Definition, path: &Path) -> CheckResult {
        self.check(input, definition, path)
    }

    /// Like `refine`, but a `Failure` becomes `Ok(false)`. Definition errors
    /// still propagate.
    pub fn probe(&self, input: Input<'_>, definition: &Definition, path: &Path) -> Result<bool, DefinitionError> {
        match self.refine(input, definition, path) {
            Ok(()) => Ok(true),
            Err(CheckError::Failure(failure)) => {
                tracing::debug!(definition = %definition, %failure, "probe discarded");
                Ok(false)
            }
            Err(CheckError::Definition(e)) => Err(e),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
