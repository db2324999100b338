// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file parser port.
//!
//! The settings backend never interprets file contents itself; it picks a
//! [`ConfigParser`] by file extension and asks it for a flat key/value map.

use crate::domain::Result;
use std::collections::HashMap;

/// Parses configuration file contents into a flat map.
///
/// Nested structures are flattened using dot notation, so
///
/// ```yaml
/// server:
///   port: 8080
/// ```
///
/// becomes `server.port -> "8080"`.
///
/// # Examples
///
/// ```rust
/// use hexbind::domain::Result;
/// use hexbind::ports::ConfigParser;
/// use std::collections::HashMap;
///
/// struct KeyValueParser;
///
/// impl ConfigParser for KeyValueParser {
///     fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["properties"]
///     }
/// }
///
/// let parser = KeyValueParser;
/// assert!(parser.supports("PROPERTIES"));
/// let values = parser.parse("server.port = 8080").unwrap();
/// assert_eq!(values["server.port"], "8080");
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses file contents into dotted keys and string values.
    fn parse(&self, content: &str) -> Result<HashMap<String, String>>;

    /// File extensions (without the leading dot) handled by this parser.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if this parser handles `extension`, ignoring case.
    fn supports(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
