use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty label, bad delimiter, etc.).
    ConfigValidation(String),
    /// A required column is absent from a source's header row.
    MissingColumn { source: String, column: String },
    /// File missing, unreadable, or rows that cannot be iterated.
    UnreadableSource { source: String, reason: String },
}

impl ReconError {
    pub(crate) fn unreadable(source: &str, reason: impl fmt::Display) -> Self {
        Self::UnreadableSource {
            source: source.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::UnreadableSource { source, reason } => {
                write!(f, "source '{source}': cannot read: {reason}")
            }
        }
    }
}

impl std::error::Error for ReconError {}
