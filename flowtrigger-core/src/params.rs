//! JSON-encoded parameter decoding
//!
//! Every optional trigger argument arrives as a JSON string. Each one is
//! decoded against an explicit shape: either an object of string values or
//! an array of strings. Any syntax or shape problem maps to a single
//! [`ParamError`] so callers never have to inspect decoded values themselves.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use thiserror::Error;

/// Map-shaped parameter (notebook, pipeline and SQL parameters)
pub type ParamMap = BTreeMap<String, String>;

/// List-shaped parameter (Python/JAR arguments, dbt commands)
pub type ParamList = Vec<String>;

/// Errors raised while turning raw trigger arguments into a request
#[derive(Debug, Error)]
pub enum ParamError {
    /// job_id was absent or blank
    #[error("job_id is required and cannot be empty")]
    MissingJobId,

    /// job_id was not a positive integer
    #[error("job_id must be a positive integer, got '{0}'")]
    InvalidJobId(String),

    /// Parameter string is not valid JSON
    #[error("Invalid JSON in {param}: {source}")]
    InvalidJson {
        param: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Parameter decoded to JSON of the wrong shape
    #[error("{param} must be {expected}")]
    WrongShape {
        param: &'static str,
        expected: Shape,
    },
}

/// Declared shape of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// JSON object with string values
    StringMap,
    /// JSON array of strings
    StringList,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::StringMap => write!(f, "a JSON object of string values"),
            Shape::StringList => write!(f, "a JSON array of strings"),
        }
    }
}

/// Decode an optional map-shaped parameter
///
/// Absent and empty inputs decode to `None`.
pub fn decode_map(param: &'static str, raw: Option<&str>) -> Result<Option<ParamMap>, ParamError> {
    decode(param, raw, Shape::StringMap)
}

/// Decode an optional list-shaped parameter
///
/// Absent and empty inputs decode to `None`.
pub fn decode_list(
    param: &'static str,
    raw: Option<&str>,
) -> Result<Option<ParamList>, ParamError> {
    decode(param, raw, Shape::StringList)
}

fn decode<T: DeserializeOwned>(
    param: &'static str,
    raw: Option<&str>,
    expected: Shape,
) -> Result<Option<T>, ParamError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    // Syntax first, so malformed JSON is reported as such rather than as a
    // shape mismatch.
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|source| ParamError::InvalidJson { param, source })?;

    serde_json::from_value(value)
        .map(Some)
        .map_err(|_| ParamError::WrongShape { param, expected })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_are_none() {
        assert!(decode_map("notebook_params", None).unwrap().is_none());
        assert!(decode_list("python_params", Some("")).unwrap().is_none());
    }

    #[test]
    fn test_decode_map() {
        let map = decode_map("notebook_params", Some(r#"{"env": "test", "date": "2024-01-01"}"#))
            .unwrap()
            .unwrap();
        assert_eq!(map.get("env"), Some(&"test".to_string()));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_decode_list_keeps_order() {
        let list = decode_list("python_params", Some(r#"["--input", "data.csv", "--verbose"]"#))
            .unwrap()
            .unwrap();
        assert_eq!(list, vec!["--input", "data.csv", "--verbose"]);
    }

    #[test]
    fn test_invalid_json() {
        let err = decode_map("sql_params", Some("{not json")).unwrap_err();
        assert!(matches!(err, ParamError::InvalidJson { param: "sql_params", .. }));
        assert!(err.to_string().starts_with("Invalid JSON in sql_params"));
    }

    #[test]
    fn test_list_where_map_expected() {
        let err = decode_map("pipeline_params", Some(r#"["full_refresh"]"#)).unwrap_err();
        assert!(matches!(
            err,
            ParamError::WrongShape {
                param: "pipeline_params",
                expected: Shape::StringMap
            }
        ));
        assert_eq!(
            err.to_string(),
            "pipeline_params must be a JSON object of string values"
        );
    }

    #[test]
    fn test_map_where_list_expected() {
        let err = decode_list("dbt_commands", Some(r#"{"cmd": "dbt run"}"#)).unwrap_err();
        assert!(matches!(err, ParamError::WrongShape { .. }));
    }

    #[test]
    fn test_non_string_values_rejected() {
        let err = decode_map("notebook_params", Some(r#"{"retries": 3}"#)).unwrap_err();
        assert!(matches!(err, ParamError::WrongShape { .. }));

        let err = decode_list("jar_params", Some("[1, 2]")).unwrap_err();
        assert!(matches!(err, ParamError::WrongShape { .. }));
    }
}
