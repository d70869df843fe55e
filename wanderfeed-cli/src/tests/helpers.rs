//! Test helpers for laying out catalogues, models and events on disk.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;

/// Catalogue shared by the command tests; `broken` has no tags and is skipped.
pub(super) const CATALOGUE: &str = r#"[
    {"id": "beach", "tags": ["Beach", "surf"], "engagementStats": {"saves": 1}},
    {"id": "hiking", "tags": ["hiking", "mountains"], "engagementStats": {"saves": 2}},
    {"id": "city", "tags": ["city", "food"], "engagementStats": {"reposts": 5}},
    {"id": "broken", "engagementStats": {"saves": 100}}
]"#;

pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }

    pub(super) fn catalogue(&self) -> Utf8PathBuf {
        self.write("posts.json", CATALOGUE)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture");
}

pub(super) fn read_value(path: &Utf8Path) -> Value {
    let raw = std::fs::read_to_string(path.as_std_path()).expect("read document");
    serde_json::from_str(&raw).expect("valid JSON document")
}

pub(super) fn parse_output(buffer: &[u8]) -> Value {
    serde_json::from_slice(buffer).expect("command output is JSON")
}

/// Collect the `id` field of every element in a JSON array.
pub(super) fn ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("output is an array")
        .iter()
        .map(|entry| {
            entry
                .get("id")
                .and_then(Value::as_str)
                .expect("entry has an id")
                .to_owned()
        })
        .collect()
}
