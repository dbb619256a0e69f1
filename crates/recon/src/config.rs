use serde::{Deserialize, Serialize};

/// Default key field of the inventory extracts.
pub const DEFAULT_KEY_FIELD: &str = "Ref.No";

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconOptions {
    /// Field uniquely identifying an item within a snapshot.
    pub key_field: String,
    /// How colliding non-key fields are renamed in common records.
    pub suffix: SuffixPolicy,
}

impl Default for ReconOptions {
    fn default() -> Self {
        Self {
            key_field: DEFAULT_KEY_FIELD.to_string(),
            suffix: SuffixPolicy::Label,
        }
    }
}

impl ReconOptions {
    pub fn with_key(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            ..Self::default()
        }
    }
}

/// Suffix appended to a field present on both sides of a common record.
///
/// `Label` uses `_<snapshot label>`, falling back to `Side` when the two
/// labels are equal or the suffixed name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixPolicy {
    #[default]
    Label,
    Side,
}

// ---------------------------------------------------------------------------
// Table layout
// ---------------------------------------------------------------------------

/// Names of the derived columns in the rendered reconciled table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconLayout {
    pub label_column: String,
    pub status_column: String,
}

impl Default for ReconLayout {
    fn default() -> Self {
        Self {
            label_column: "Date".to_string(),
            status_column: "Remarks".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = ReconOptions::default();
        assert_eq!(opts.key_field, "Ref.No");
        assert_eq!(opts.suffix, SuffixPolicy::Label);

        let layout = ReconLayout::default();
        assert_eq!(layout.label_column, "Date");
        assert_eq!(layout.status_column, "Remarks");
    }

    #[test]
    fn partial_deserialize_fills_defaults() {
        let opts: ReconOptions = serde_json::from_str(r#"{"suffix":"side"}"#).unwrap();
        assert_eq!(opts.key_field, DEFAULT_KEY_FIELD);
        assert_eq!(opts.suffix, SuffixPolicy::Side);

        let err = serde_json::from_str::<ReconOptions>(r#"{"suffix":"labels"}"#);
        assert!(err.is_err(), "unknown suffix policy should fail");
    }
}
