// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transliteration of configuration keys into environment variable names.

/// Replaces substrings of a key, in a single left-to-right pass.
///
/// At each position the pairs are tried in order and the first match is
/// replaced; replaced text is never rescanned.
///
/// # Examples
///
/// ```
/// use hexbind::domain::KeyReplacer;
///
/// let replacer = KeyReplacer::new([(".", "_")]);
/// assert_eq!(replacer.replace("server.listen.port"), "server_listen_port");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyReplacer {
    pairs: Vec<(String, String)>,
}

impl KeyReplacer {
    /// Creates a replacer from `(from, to)` pairs. Pairs with an empty `from`
    /// are ignored.
    pub fn new<I, F, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .filter(|(from, _)| !from.is_empty())
                .collect(),
        }
    }

    /// Applies the replacements to `key`.
    pub fn replace(&self, key: &str) -> String {
        let mut out = String::with_capacity(key.len());
        let mut rest = key;
        'scan: while let Some(c) = rest.chars().next() {
            for (from, to) in &self.pairs {
                if let Some(tail) = rest.strip_prefix(from.as_str()) {
                    out.push_str(to);
                    rest = tail;
                    continue 'scan;
                }
            }
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
        out
    }
}
