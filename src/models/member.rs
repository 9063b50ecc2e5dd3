/// A member row without its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: i32,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub login_enabled: bool,
    pub disabled: bool,
    pub use_two_factor: bool,
    /// Group ids in stored order
    pub groups: Vec<i32>,
    pub login_attempts: i32,
    pub locked_until: i64,
    pub last_login: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i32,
    pub name: String,
}

/// Validated input for a member insert.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
    pub groups: Vec<i32>,
}

/// Encodes group ids as a JSON array of decimal strings, e.g. `["1","3"]`.
///
/// An empty list encodes to `None` so the column stays NULL.
#[must_use]
pub fn encode_groups(ids: &[i32]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }

    let values: Vec<String> = ids.iter().map(ToString::to_string).collect();
    serde_json::to_string(&values).ok()
}

/// Decodes the stored group column. Entries that are not ids are skipped.
#[must_use]
pub fn decode_groups(raw: Option<&str>) -> Vec<i32> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(raw) else {
        return Vec::new();
    };

    values
        .iter()
        .filter_map(|v| match v {
            serde_json::Value::String(s) => s.trim().parse().ok(),
            serde_json::Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_groups_encode_to_null() {
        assert_eq!(encode_groups(&[]), None);
    }

    #[test]
    fn groups_encode_as_string_array() {
        assert_eq!(encode_groups(&[1, 3]).as_deref(), Some(r#"["1","3"]"#));
    }

    #[test]
    fn decode_reads_back_encoded_groups() {
        let encoded = encode_groups(&[7, 2, 9]);
        assert_eq!(decode_groups(encoded.as_deref()), vec![7, 2, 9]);
    }

    #[test]
    fn decode_tolerates_missing_and_garbage() {
        assert!(decode_groups(None).is_empty());
        assert!(decode_groups(Some("")).is_empty());
        assert!(decode_groups(Some("not json")).is_empty());
        assert_eq!(decode_groups(Some(r#"["4","x",5,null]"#)), vec![4, 5]);
    }
}
