//! Golden fixture layout:
//!
//! ```text
//! tests/fixtures/manifest.toml
//! tests/fixtures/<case>/input.html
//! tests/fixtures/<case>/tokens.txt
//! ```
//!
//! `tokens.txt` holds one formatted token per line after `# key: value`
//! headers; `format` is required, `open-tags`, `open-sections` and `errors`
//! are optional expectations on the final host output.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

pub const MANIFEST_FORMAT_V1: &str = "scanner-fixtures-v1";
pub const TOKEN_FORMAT_V1: &str = "scanner-token-v1";

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    Active,
    Xfail,
    Skip,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FixtureCase {
    pub id: String,
    #[serde(default = "default_status")]
    pub status: FixtureStatus,
    #[serde(default)]
    pub reason: Option<String>,
    /// Disable `{{=... ...=}}` directives for this case.
    #[serde(default)]
    pub fixed_delimiters: bool,
}

fn default_status() -> FixtureStatus {
    FixtureStatus::Active
}

#[derive(Clone, Debug, Deserialize)]
struct Manifest {
    format: String,
    cases: Vec<FixtureCase>,
}

pub fn load_manifest(path: &Path) -> Vec<FixtureCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture manifest {path:?}: {err}"));
    let manifest: Manifest = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse fixture manifest {path:?}: {err}"));
    assert_eq!(
        manifest.format, MANIFEST_FORMAT_V1,
        "unsupported fixture manifest format in {path:?}"
    );

    let mut seen = BTreeSet::new();
    for case in &manifest.cases {
        assert!(
            seen.insert(case.id.as_str()),
            "duplicate fixture id in {path:?}: {}",
            case.id
        );
        if case.status != FixtureStatus::Active && case.reason.as_deref().unwrap_or("").is_empty()
        {
            panic!("non-active fixture '{}' missing reason in {path:?}", case.id);
        }
    }
    manifest.cases
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedTokens {
    pub lines: Vec<String>,
    headers: BTreeMap<String, String>,
}

impl ExpectedTokens {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// Space-separated list header; `None` when the header is absent.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.header(key)
            .map(|value| value.split_whitespace().map(str::to_string).collect())
    }
}

pub fn parse_tokens_file(path: &Path) -> ExpectedTokens {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read tokens file {path:?}: {err}"));
    parse_tokens(&content, &format!("{path:?}"))
}

fn parse_tokens(content: &str, origin: &str) -> ExpectedTokens {
    let mut lines = Vec::new();
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for raw_line in content.lines() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(stripped) = line.strip_prefix('#') {
            let header = stripped.trim();
            if header.is_empty() {
                continue;
            }
            let (key, value) = header
                .split_once(':')
                .unwrap_or_else(|| panic!("invalid header in {origin}: '{line}'"));
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            if headers.insert(key.clone(), value).is_some() {
                panic!("duplicate header '{key}' in {origin}");
            }
        } else {
            lines.push(line.to_string());
        }
    }

    let format = headers
        .get("format")
        .unwrap_or_else(|| panic!("missing format header in {origin}"));
    assert_eq!(format, TOKEN_FORMAT_V1, "unsupported format in {origin}");

    ExpectedTokens { lines, headers }
}

/// Substring filter over fixture ids, read from `SCANNER_FIXTURE`.
pub struct FixtureFilter {
    raw: Option<String>,
}

impl FixtureFilter {
    pub fn from_env() -> Self {
        Self {
            raw: std::env::var("SCANNER_FIXTURE").ok(),
        }
    }

    pub fn matches(&self, id: &str) -> bool {
        let Some(filter) = &self.raw else {
            return true;
        };
        id.contains(filter)
    }
}
