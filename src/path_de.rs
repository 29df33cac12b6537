use serde::de::DeserializeOwned;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(render)
}

/// Same, for an already-decoded value (e.g. a schema that passed lint).
pub fn from_value_with_path<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, String> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(render)
}

fn render(err: serde_path_to_error::Error<serde_json::Error>) -> String {
    let path = err.path().to_string();
    format!("at JSON path {path} → {}", err.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn schema_errors_name_the_offending_type() {
        let err = from_str_with_path::<Schema>(r#"{"ok": "string", "bad": 42}"#).unwrap_err();
        assert!(err.starts_with("at JSON path bad"), "{err}");
        assert!(err.contains("invalid definition: 42"), "{err}");
    }

    #[test]
    fn well_formed_schema_loads() {
        let schema = from_value_with_path::<Schema>(serde_json::json!({"id": ["integer", {"min": 0}]})).unwrap();
        assert!(schema.get("id").is_some());
    }
}
