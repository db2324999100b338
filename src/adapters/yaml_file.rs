// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration file parser.

use crate::domain::{ConfigError, Result};
use crate::ports::ConfigParser;
use std::collections::HashMap;

/// YAML parser implementation.
///
/// Nested mappings are flattened into dotted keys. A sequence contributes one
/// key per element (`servers.0`, `servers.1`, ...) and, when every element is
/// a scalar, the whole list joined with `,` under the sequence's own key.
///
/// # Examples
///
/// ```rust
/// use hexbind::adapters::YamlParser;
/// use hexbind::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let values = parser
///     .parse("server:\n  port: 8080\n  hosts: [a, b]")
///     .unwrap();
/// assert_eq!(values["server.port"], "8080");
/// assert_eq!(values["server.hosts"], "a,b");
/// assert_eq!(values["server.hosts.1"], "b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn scalar(value: &serde_yaml::Value) -> Option<String> {
        match value {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            serde_yaml::Value::Null => Some(String::new()),
            _ => None,
        }
    }

    fn join(prefix: &str, key: &str) -> String {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    }

    fn flatten(value: &serde_yaml::Value, prefix: &str, result: &mut HashMap<String, String>) {
        match value {
            serde_yaml::Value::Mapping(map) => {
                for (key, val) in map {
                    // Non-scalar keys have no dotted form
                    if let Some(key) = Self::scalar(key) {
                        Self::flatten(val, &Self::join(prefix, &key), result);
                    }
                }
            }
            serde_yaml::Value::Sequence(seq) => {
                let scalars: Option<Vec<String>> = seq.iter().map(Self::scalar).collect();
                if let Some(items) = scalars {
                    result.insert(prefix.to_string(), items.join(","));
                }
                for (i, val) in seq.iter().enumerate() {
                    Self::flatten(val, &Self::join(prefix, &i.to_string()), result);
                }
            }
            serde_yaml::Value::Tagged(tagged) => Self::flatten(&tagged.value, prefix, result),
            scalar => {
                if let Some(s) = Self::scalar(scalar) {
                    result.insert(prefix.to_string(), s);
                }
            }
        }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        let mut result = HashMap::new();
        // An empty document parses as null and holds no keys
        if !value.is_null() {
            Self::flatten(&value, "", &mut result);
        }
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
