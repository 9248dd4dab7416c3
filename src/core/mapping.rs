//! Purpose: Load the tokens and characters manifests into id -> path lookup tables.
//! Exports: `RoleEntry`, `load_token_mapping`, `load_character_mapping`.
//! Role: Single decode seam for both input documents; callers never touch raw JSON.
//! Invariants: Entries without a usable id and image are dropped silently.
//! Invariants: Duplicate ids resolve last-write-wins.
//! Invariants: A missing document is `NotFound`; malformed JSON is `Parse`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use super::error::{Error, ErrorKind};

/// One validated manifest entry: a non-empty identifier and image path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleEntry {
    pub id: String,
    pub image: String,
}

impl RoleEntry {
    /// Parse a manifest value into an entry, or `None` if it does not carry
    /// both required fields. Strings are trimmed; numbers coerce to their
    /// decimal form; everything else counts as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let role = value.as_object()?;
        let id = field_string(role.get("id")?)?;
        let image = field_string(role.get("image")?)?;
        Some(Self { id, image })
    }
}

fn field_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn read_document(path: &Path) -> Result<Value, Error> {
    let text = fs::read_to_string(path).map_err(|err| {
        let kind = if err.kind() == io::ErrorKind::NotFound {
            ErrorKind::NotFound
        } else {
            ErrorKind::Io
        };
        Error::new(kind)
            .with_message("failed to read manifest")
            .with_path(path)
            .with_source(err)
    })?;
    serde_json::from_str(&text).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message("invalid JSON in manifest")
            .with_path(path)
            .with_source(err)
    })
}

/// Load the tokens document: an object of group name -> array of role
/// entries. Group values that are not arrays are ignored.
pub fn load_token_mapping(path: &Path) -> Result<BTreeMap<String, String>, Error> {
    let doc = read_document(path)?;
    let groups = doc.as_object().ok_or_else(|| {
        Error::new(ErrorKind::Parse)
            .with_message("tokens manifest must be a JSON object")
            .with_path(path)
    })?;

    let mut mapping = BTreeMap::new();
    for items in groups.values() {
        let Some(roles) = items.as_array() else {
            continue;
        };
        for role in roles {
            if let Some(entry) = RoleEntry::from_value(role) {
                mapping.insert(entry.id, entry.image);
            }
        }
    }
    Ok(mapping)
}

/// Load the characters document: a flat array of role entries. The image
/// field here is the destination path.
pub fn load_character_mapping(path: &Path) -> Result<BTreeMap<String, String>, Error> {
    let doc = read_document(path)?;
    let roles = doc.as_array().ok_or_else(|| {
        Error::new(ErrorKind::Parse)
            .with_message("characters manifest must be a JSON array")
            .with_path(path)
    })?;

    let mut mapping = BTreeMap::new();
    for role in roles {
        if let Some(entry) = RoleEntry::from_value(role) {
            mapping.insert(entry.id, entry.image);
        }
    }
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn role_entry_requires_both_fields() {
        assert!(RoleEntry::from_value(&json!({"id": "a", "image": "/x.webp"})).is_some());
        assert!(RoleEntry::from_value(&json!({"id": "a"})).is_none());
        assert!(RoleEntry::from_value(&json!({"image": "/x.webp"})).is_none());
        assert!(RoleEntry::from_value(&json!({"id": "", "image": "/x.webp"})).is_none());
        assert!(RoleEntry::from_value(&json!({"id": "  ", "image": "/x.webp"})).is_none());
        assert!(RoleEntry::from_value(&json!("not an object")).is_none());
        assert!(RoleEntry::from_value(&json!({"id": null, "image": "/x.webp"})).is_none());
    }

    #[test]
    fn role_entry_trims_and_coerces() {
        let entry = RoleEntry::from_value(&json!({"id": " 7 ", "image": " /a.webp "})).unwrap();
        assert_eq!(entry.id, "7");
        assert_eq!(entry.image, "/a.webp");

        let numeric = RoleEntry::from_value(&json!({"id": 42, "image": "/b.webp"})).unwrap();
        assert_eq!(numeric.id, "42");
    }

    #[test]
    fn tokens_loader_ignores_non_array_groups() {
        let file = write_temp(
            r#"{
                "Team": [{"id": "imp", "image": "/src/imp.webp"}],
                "meta": {"version": 3},
                "note": "ignored"
            }"#,
        );
        let mapping = load_token_mapping(file.path()).expect("load");
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["imp"], "/src/imp.webp");
    }

    #[test]
    fn tokens_loader_last_write_wins() {
        let file = write_temp(
            r#"{
                "A": [{"id": "x", "image": "/first.webp"}],
                "B": [{"id": "x", "image": "/second.webp"}]
            }"#,
        );
        let mapping = load_token_mapping(file.path()).expect("load");
        assert_eq!(mapping["x"], "/second.webp");
    }

    #[test]
    fn characters_loader_drops_invalid_entries() {
        let file = write_temp(
            r#"[
                {"id": "imp", "image": "/dst/imp.webp"},
                {"id": "baron"},
                {"image": "/dst/orphan.webp"},
                "junk"
            ]"#,
        );
        let mapping = load_character_mapping(file.path()).expect("load");
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["imp"], "/dst/imp.webp");
    }

    #[test]
    fn missing_document_is_not_found() {
        let err = load_token_mapping(Path::new("/nonexistent/tokens.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let file = write_temp("{not json");
        let err = load_token_mapping(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn wrong_top_level_shape_is_parse_error() {
        let arr = write_temp("[]");
        assert_eq!(
            load_token_mapping(arr.path()).unwrap_err().kind(),
            ErrorKind::Parse
        );
        let obj = write_temp("{}");
        assert_eq!(
            load_character_mapping(obj.path()).unwrap_err().kind(),
            ErrorKind::Parse
        );
    }
}
