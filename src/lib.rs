//! Structural validation of JSON values against a small definition language.
//!
//! ```
//! use json_shape::{check, Definition, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::from_value(&json!({
//!     "point": ["tuple", {"elements": ["number", "number"]}],
//!     "polyline": ["array", {"contents": "point"}]
//! })).unwrap();
//! let polyline = Definition::named("polyline");
//! assert!(check(&json!([[0, 0], [1.5, 2]]), &polyline, &schema).is_ok());
//!
//! let err = check(&json!([[0, 0], [1, "2"]]), &polyline, &schema).unwrap_err();
//! assert_eq!(err.to_string(), "not a number at 1/1");
//! ```
pub mod checker;
pub mod cli;
pub mod definition;
pub mod error;
pub mod jq_exec;
pub mod path;
pub mod path_de;
pub mod rules;
pub mod schema;

use serde_json::Value;

pub use checker::{Checker, Input};
pub use definition::{Definition, Kind, Params};
pub use error::{CheckError, CheckResult, DefinitionError, Failure};
pub use path::{Path, Segment};
pub use schema::Schema;

/// Check `value` against `definition`, resolving custom names in `schema`.
pub fn check(value: &Value, definition: &Definition, schema: &Schema) -> CheckResult {
    Checker::new(schema).check(Input::Value(value), definition, &Path::root())
}

/// Like [`check`], with the definition still in decoded JSON form.
pub fn check_value(value: &Value, definition: &Value, schema: &Schema) -> CheckResult {
    check(value, &Definition::from_value(definition)?, schema)
}
