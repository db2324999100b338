// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file discovery and loading.
//!
//! Search-path templates such as `$XDG_CONFIG_HOME/acme` are expanded here,
//! candidate files are located, and a located file is read through the parser
//! registered for its extension.

use crate::domain::{ConfigError, Result};
use crate::ports::ConfigParser;
use directories::BaseDirs;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size of a configuration file (10MB)
const MAX_CONFIG_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Expands `$VAR`, `${VAR}` and a leading `~` in a search-path template.
///
/// `HOME` and `XDG_CONFIG_HOME` fall back to the platform home and
/// configuration directories when unset. Any other unset variable expands to
/// the empty string.
///
/// # Examples
///
/// ```rust
/// use hexbind::adapters::config_file::expand_path;
///
/// assert_eq!(expand_path("/etc/acme").to_str(), Some("/etc/acme"));
/// assert_eq!(expand_path(".").to_str(), Some("."));
/// ```
pub fn expand_path(template: &str) -> PathBuf {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    if rest == "~" || rest.starts_with("~/") {
        out.push_str(&lookup_var("HOME"));
        rest = &rest[1..];
    }

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (name, tail) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], &braced[end + 1..]),
                None => ("", after),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], &after[end..])
        };

        if name.is_empty() {
            out.push('$');
        } else {
            out.push_str(&lookup_var(name));
        }
        rest = tail;
    }
    out.push_str(rest);
    PathBuf::from(out)
}

fn lookup_var(name: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => fallback_var(name).unwrap_or_default(),
    }
}

fn fallback_var(name: &str) -> Option<String> {
    let dirs = BaseDirs::new()?;
    let dir = match name {
        "HOME" => dirs.home_dir(),
        "XDG_CONFIG_HOME" => dirs.config_dir(),
        _ => return None,
    };
    Some(dir.to_string_lossy().into_owned())
}

/// Returns the extension of `path`, if it has one.
pub fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Finds the configuration file named `name` in each search directory.
///
/// Directories are visited in the given order and at most one candidate is
/// returned per directory: the first of `extensions` that exists as
/// `<dir>/<name>.<ext>`. The result keeps the order of `dirs`.
pub fn discover(dirs: &[PathBuf], name: &str, extensions: &[&str]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for dir in dirs {
        let candidate = extensions
            .iter()
            .map(|ext| dir.join(format!("{}.{}", name, ext)))
            .find(|path| path.is_file());

        match candidate {
            Some(path) => {
                tracing::debug!("Found config file candidate {}", path.display());
                found.push(path);
            }
            None => tracing::debug!("No '{}' config file in {}", name, dir.display()),
        }
    }
    found
}

/// Reads and parses one configuration file.
///
/// A missing file, an oversized file and an unreadable file are all reported
/// as [`ConfigError::FileRead`]; invalid contents as the parser's error.
pub fn load(path: &Path, parser: &dyn ConfigParser) -> Result<HashMap<String, String>> {
    let metadata = fs::metadata(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        message: "failed to read file metadata".to_string(),
        source: Some(Box::new(e)),
    })?;

    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileRead {
            path: path.to_path_buf(),
            message: format!(
                "file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            ),
            source: None,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        message: "failed to read file".to_string(),
        source: Some(Box::new(e)),
    })?;

    parser.parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct LineParser;

    impl ConfigParser for LineParser {
        fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
            Ok(content
                .lines()
                .filter_map(|line| line.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect())
        }

        fn supported_extensions(&self) -> &[&str] {
            &["conf"]
        }
    }

    #[test]
    fn test_expand_plain_path() {
        assert_eq!(expand_path("/etc/acme"), PathBuf::from("/etc/acme"));
    }

    #[test]
    fn test_expand_variables() {
        env::set_var("HEXBIND_TEST_EXPAND_DIR", "/opt/acme");
        assert_eq!(
            expand_path("$HEXBIND_TEST_EXPAND_DIR/conf"),
            PathBuf::from("/opt/acme/conf")
        );
        assert_eq!(
            expand_path("${HEXBIND_TEST_EXPAND_DIR}.d"),
            PathBuf::from("/opt/acme.d")
        );
        env::remove_var("HEXBIND_TEST_EXPAND_DIR");
    }

    #[test]
    fn test_expand_unset_variable_is_empty() {
        assert_eq!(
            expand_path("$HEXBIND_TEST_UNSET_VAR/acme"),
            PathBuf::from("/acme")
        );
    }

    #[test]
    fn test_expand_lone_dollar() {
        assert_eq!(expand_path("cost$"), PathBuf::from("cost$"));
        assert_eq!(expand_path("${unclosed"), PathBuf::from("${unclosed"));
    }

    #[test]
    fn test_expand_home_is_never_empty() {
        // Falls back to the platform home directory when HOME is unset
        let expanded = expand_path("$HOME/.acme");
        assert!(expanded.to_string_lossy().ends_with("/.acme"));
    }

    #[test]
    fn test_discover_keeps_search_order() {
        let low = TempDir::new().unwrap();
        let empty = TempDir::new().unwrap();
        let high = TempDir::new().unwrap();
        fs::write(low.path().join("acme.conf"), "a=1").unwrap();
        fs::write(high.path().join("acme.conf"), "a=2").unwrap();

        let dirs = vec![
            low.path().to_path_buf(),
            empty.path().to_path_buf(),
            high.path().to_path_buf(),
        ];
        let found = discover(&dirs, "acme", &["conf"]);

        assert_eq!(
            found,
            vec![low.path().join("acme.conf"), high.path().join("acme.conf")]
        );
    }

    #[test]
    fn test_discover_first_extension_wins_per_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("acme.yml"), "").unwrap();
        fs::write(dir.path().join("acme.yaml"), "").unwrap();

        let found = discover(&[dir.path().to_path_buf()], "acme", &["yaml", "yml"]);
        assert_eq!(found, vec![dir.path().join("acme.yaml")]);
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("acme.conf");
        fs::write(&path, "server.port=8080\n").unwrap();

        let values = load(&path, &LineParser).unwrap();
        assert_eq!(values.get("server.port").unwrap(), "8080");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/acme.conf"), &LineParser).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("/etc/acme/acme.yaml")), Some("yaml"));
        assert_eq!(extension_of(Path::new("/etc/acme/acme")), None);
    }
}
