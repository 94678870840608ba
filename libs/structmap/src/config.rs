use serde::Deserialize;

use crate::error::ConvertError;

/// Tuning knobs of a [`Converter`](crate::Converter).
///
/// Defaults reproduce the reference behavior exactly: exact numeric kinds
/// at field level and no depth limit.
///
/// ```toml
/// coerce_numeric_fields = true
/// max_depth = 256
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Let numeric fields of different widths (`i32` into `i64`, `u8` into
    /// `f64`) pass the per-field kind check. Root scalars always coerce.
    pub coerce_numeric_fields: bool,

    /// Maximum nesting of structures. Going deeper panics.
    pub max_depth: Option<usize>,
}

impl ConvertOptions {
    /// Load options from a TOML file.
    pub fn load(path: &str) -> Result<Self, ConvertError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConvertError::Config(format!("{path}: {e}")))?;
        Self::parse(&content)
    }

    /// Parse options from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, ConvertError> {
        toml::from_str(toml_str).map_err(|e| ConvertError::Config(e.to_string()))
    }
}
