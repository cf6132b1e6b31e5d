use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ReconError;
use crate::model::Side;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Header names shared by both sources unless a source overrides them.
    #[serde(default)]
    pub columns: ColumnMapping,
    pub left: SourceConfig,
    pub right: SourceConfig,
}

fn default_name() -> String {
    "inventory recon".into()
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub label: Option<String>,
    pub file: PathBuf,
    /// Single-character field delimiter. Defaults to ",".
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(default)]
    pub columns: ColumnOverrides,
}

impl SourceConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            label: None,
            file: file.into(),
            delimiter: None,
            columns: ColumnOverrides::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Header names of the three required columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub key: String,
    pub tag: String,
    pub serial: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            key: "IP Address".into(),
            tag: "ID Tag".into(),
            serial: "Serial Number".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnOverrides {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
}

impl ColumnOverrides {
    fn apply(&self, base: &ColumnMapping) -> ColumnMapping {
        ColumnMapping {
            key: self.key.clone().unwrap_or_else(|| base.key.clone()),
            tag: self.tag.clone().unwrap_or_else(|| base.tag.clone()),
            serial: self.serial.clone().unwrap_or_else(|| base.serial.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Config for two files with default labels and column names.
    pub fn for_files(left: impl Into<PathBuf>, right: impl Into<PathBuf>) -> Self {
        Self {
            name: default_name(),
            columns: ColumnMapping::default(),
            left: SourceConfig::new(left),
            right: SourceConfig::new(right),
        }
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        for side in [Side::Left, Side::Right] {
            let source = self.source(side);

            if source.file.to_string_lossy().trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{}: file path is empty",
                    side.as_str()
                )));
            }

            if let Some(ref label) = source.label {
                if label.trim().is_empty() {
                    return Err(ReconError::ConfigValidation(format!(
                        "{}: label is empty",
                        side.as_str()
                    )));
                }
            }

            if let Some(ref delim) = source.delimiter {
                parse_delimiter(delim).ok_or_else(|| {
                    ReconError::ConfigValidation(format!(
                        "{}: delimiter must be a single ASCII character, got {delim:?}",
                        side.as_str()
                    ))
                })?;
            }

            let columns = self.columns_for(side);
            for (field, name) in [
                ("key", &columns.key),
                ("tag", &columns.tag),
                ("serial", &columns.serial),
            ] {
                if name.trim().is_empty() {
                    return Err(ReconError::ConfigValidation(format!(
                        "{}: {field} column name is empty",
                        side.as_str()
                    )));
                }
            }
        }

        // Labels are uppercased in report headers.
        let (left, right) = (self.label(Side::Left), self.label(Side::Right));
        if left.trim().to_uppercase() == right.trim().to_uppercase() {
            return Err(ReconError::ConfigValidation(format!(
                "left and right share the label '{left}' (labels are compared case-insensitively)"
            )));
        }

        Ok(())
    }

    pub fn source(&self, side: Side) -> &SourceConfig {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn label(&self, side: Side) -> &str {
        self.source(side)
            .label
            .as_deref()
            .unwrap_or_else(|| side.default_label())
    }

    /// Shared column names with this side's overrides applied.
    pub fn columns_for(&self, side: Side) -> ColumnMapping {
        self.source(side).columns.apply(&self.columns)
    }

    pub fn delimiter(&self, side: Side) -> u8 {
        self.source(side)
            .delimiter
            .as_deref()
            .and_then(parse_delimiter)
            .unwrap_or(b',')
    }

    /// Resolve a source path relative to the directory holding the config.
    pub fn resolve_path(&self, side: Side, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.source(side).file)
    }
}

/// Accepts a single ASCII character, or the escape `\t` for tab.
pub fn parse_delimiter(s: &str) -> Option<u8> {
    if s == "\\t" {
        return Some(b'\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Some(c as u8),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
name = "Printer fleet"

[columns]
key = "IP Address"
tag = "ID Tag"
serial = "Serial Number"

[left]
label = "CBS Master"
file = "cbs-master.csv"

[right]
label = "Poco Sheet"
file = "poco.csv"
delimiter = ";"

[right.columns]
serial = "Serial #"
"#;

    #[test]
    fn parse_full_config() {
        let config = ReconConfig::from_toml(FULL).unwrap();
        assert_eq!(config.name, "Printer fleet");
        assert_eq!(config.label(Side::Left), "CBS Master");
        assert_eq!(config.label(Side::Right), "Poco Sheet");
        assert_eq!(config.delimiter(Side::Left), b',');
        assert_eq!(config.delimiter(Side::Right), b';');

        let right_cols = config.columns_for(Side::Right);
        assert_eq!(right_cols.key, "IP Address");
        assert_eq!(right_cols.serial, "Serial #");
        assert_eq!(config.columns_for(Side::Left).serial, "Serial Number");
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let input = r#"
[left]
file = "a.csv"

[right]
file = "b.csv"
"#;
        let config = ReconConfig::from_toml(input).unwrap();
        assert_eq!(config.name, "inventory recon");
        assert_eq!(config.label(Side::Left), "A");
        assert_eq!(config.label(Side::Right), "B");
        assert_eq!(config.columns_for(Side::Left), ColumnMapping::default());
    }

    #[test]
    fn partial_shared_columns_keep_other_defaults() {
        let input = r#"
[columns]
key = "Address"

[left]
file = "a.csv"

[right]
file = "b.csv"
"#;
        let config = ReconConfig::from_toml(input).unwrap();
        let cols = config.columns_for(Side::Right);
        assert_eq!(cols.key, "Address");
        assert_eq!(cols.tag, "ID Tag");
    }

    #[test]
    fn tab_delimiter_escape() {
        let input = r#"
[left]
file = "a.tsv"
delimiter = "\\t"

[right]
file = "b.csv"
"#;
        let config = ReconConfig::from_toml(input).unwrap();
        assert_eq!(config.delimiter(Side::Left), b'\t');
    }

    #[test]
    fn reject_missing_right() {
        let input = r#"
[left]
file = "a.csv"
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_multi_char_delimiter() {
        let input = r#"
[left]
file = "a.csv"
delimiter = ",,"

[right]
file = "b.csv"
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("single ASCII character"));
    }

    #[test]
    fn reject_empty_column_override() {
        let input = r#"
[left]
file = "a.csv"

[right]
file = "b.csv"

[right.columns]
tag = "  "
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("right: tag column name is empty"));
    }

    #[test]
    fn reject_duplicate_labels() {
        let input = r#"
[left]
label = "Sheet"
file = "a.csv"

[right]
label = "Sheet"
file = "b.csv"
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("share the label"));
    }

    #[test]
    fn reject_labels_differing_only_in_case() {
        let mut config = ReconConfig::for_files("a.csv", "b.csv");
        config.left.label = Some("cbs".into());
        config.right.label = Some(" CBS".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("share the label"));

        config.right.label = Some("Poco".into());
        assert!(config.validate().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_path_is_kept_verbatim() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"inv\xe9.csv");
        let config = ReconConfig::for_files(PathBuf::from(raw), "b.csv");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.resolve_path(Side::Left, Path::new("/data")).as_os_str().as_bytes(),
            b"/data/inv\xe9.csv"
        );
    }

    #[test]
    fn resolve_path_relative_to_base() {
        let config = ReconConfig::for_files("a.csv", "/abs/b.csv");
        let base = Path::new("/configs");
        assert_eq!(config.resolve_path(Side::Left, base), PathBuf::from("/configs/a.csv"));
        assert_eq!(config.resolve_path(Side::Right, base), PathBuf::from("/abs/b.csv"));
    }
}
