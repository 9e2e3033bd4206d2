//! Parsing and formatting of key/value variable files.
//!
//! The parser accepts several line layouts seen in the wild: plain
//! `KEY=VALUE` (with optional `export ` prefix and quoting), `KEY VALUE`
//! on one line, alternating `KEY VALUE KEY VALUE ...` tokens, and the
//! legacy two-line format where a bare key is followed by its value on
//! the next line. The formatter emits shell-ready `.env` lines under a
//! configurable [`OutputPolicy`].

use std::fmt;

use indexmap::IndexMap;

/// Ordered name → value collection. Duplicate names are last-write-wins.
pub type Vars = IndexMap<String, String>;

/// Value prefixes that mark a value as a URL for quoting purposes.
const URL_PREFIXES: &[&str] = &[
    "http://",
    "https://",
    "ftp://",
    "sftp://",
    "ssh://",
    "git://",
    "file://",
    "mailto:",
    "postgres://",
    "mysql://",
    "mongodb://",
    "redis://",
];

/// A key that appeared without a value in the legacy two-line layout.
///
/// Recoverable: the caller reports it and still writes the rest of the
/// output. `line` is the 1-based position among the kept (non-empty,
/// non-comment) lines, matching the numbering users see in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingKey {
    pub line: usize,
    pub key: String,
}

impl fmt::Display for DanglingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: key '{}' has no value", self.line, self.key)
    }
}

/// Controls how [`format`] serializes a collection.
#[derive(Debug, Clone)]
pub struct OutputPolicy {
    /// Order keys alphabetically (otherwise insertion order).
    pub sort_keys: bool,
    /// Prefix each line with `export `.
    pub use_export_prefix: bool,
    /// Drop keys that contain a letter and no uppercase letters.
    pub lowercase_filter: bool,
    /// Drop keys whose value is not an http(s) URL.
    pub url_only_filter: bool,
}

impl Default for OutputPolicy {
    fn default() -> Self {
        Self {
            sort_keys: true,
            use_export_prefix: false,
            lowercase_filter: true,
            url_only_filter: false,
        }
    }
}

/// Parse variable definitions out of `text`.
///
/// Lines are trimmed; empty lines and `#` comments are skipped before
/// any pairing happens. Malformed content never fails the parse: the
/// only diagnostic is a bare key at the end of input with no value line
/// left to consume, collected as a [`DanglingKey`].
pub fn parse(text: &str) -> (Vars, Vec<DanglingKey>) {
    let kept: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let mut vars = Vars::new();
    let mut dangling = Vec::new();

    let mut i = 0;
    while i < kept.len() {
        let line = kept[i];

        if let Some((name, value)) = line
            .strip_prefix("export ")
            .unwrap_or(line)
            .split_once('=')
        {
            let name = name.trim();
            if !name.is_empty() {
                vars.insert(name.to_string(), unquote(value.trim()).to_string());
            }
            i += 1;
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.len() {
            2 => {
                vars.insert(tokens[0].to_string(), tokens[1].to_string());
                i += 1;
            }
            n if n >= 4 && n % 2 == 0 => {
                for pair in tokens.chunks(2) {
                    vars.insert(pair[0].to_string(), pair[1].to_string());
                }
                i += 1;
            }
            _ => {
                // Legacy two-line layout: this line is the key, the next
                // kept line verbatim is its value.
                if let Some(value) = kept.get(i + 1) {
                    vars.insert(line.to_string(), value.to_string());
                    i += 2;
                } else {
                    dangling.push(DanglingKey {
                        line: i + 1,
                        key: line.to_string(),
                    });
                    i += 1;
                }
            }
        }
    }

    (vars, dangling)
}

/// Serialize a collection as `.env` lines under `policy`.
///
/// Returns the empty string for an empty (or fully filtered) collection,
/// otherwise one line per key with a single trailing newline.
pub fn format(vars: &Vars, policy: &OutputPolicy) -> String {
    let mut keys: Vec<&String> = vars
        .iter()
        .filter(|(key, value)| retained(key.as_str(), value.as_str(), policy))
        .map(|(key, _)| key)
        .collect();

    if policy.sort_keys {
        keys.sort();
    }

    let mut out = String::new();
    for key in keys {
        let value = &vars[key.as_str()];
        if policy.use_export_prefix {
            out.push_str("export ");
        }
        out.push_str(key);
        out.push('=');
        out.push_str(&quoted(value));
        out.push('\n');
    }
    out
}

fn retained(key: &str, value: &str, policy: &OutputPolicy) -> bool {
    if policy.lowercase_filter
        && key.chars().any(char::is_alphabetic)
        && !key.chars().any(char::is_uppercase)
    {
        return false;
    }
    if policy.url_only_filter && !(value.starts_with("http://") || value.starts_with("https://")) {
        return false;
    }
    true
}

/// Strip exactly one outer pair of matching quotes, if present.
fn unquote(value: &str) -> &str {
    if is_quoted(value) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// True when the value starts and ends with the same quote character.
fn is_quoted(value: &str) -> bool {
    value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
}

/// Quote a value for output. Already-quoted values pass through
/// untouched; URLs and values containing spaces get double quotes.
fn quoted(value: &str) -> String {
    if is_quoted(value) {
        return value.to_string();
    }
    let is_url = URL_PREFIXES.iter().any(|prefix| value.starts_with(prefix));
    if is_url || value.contains(' ') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}
