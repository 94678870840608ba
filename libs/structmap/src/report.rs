use std::fmt;

use crate::error::ConvertError;
use crate::reflect::Kind;

/// Why a field was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Source optional is `None`. Never an error: absence does not clobber.
    Absent,
    /// No destination field with the same name.
    Unmatched,
    /// Underlying kinds differ (`str` into `i64`).
    KindMismatch { source: Kind, target: Kind },
    /// Same kind family but no conversion between the two types.
    Inconvertible {
        source: &'static str,
        target: &'static str,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Absent => f.write_str("source is absent"),
            SkipReason::Unmatched => f.write_str("no destination field with this name"),
            SkipReason::KindMismatch { source, target } => {
                write!(f, "kind mismatch: {source} into {target}")
            }
            SkipReason::Inconvertible { source, target } => {
                write!(f, "cannot convert {source} into {target}")
            }
        }
    }
}

/// One skipped field.
///
/// `path` is rooted at `$`: `$.user.first_name`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Skipped {
    pub path: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Everything a conversion left untouched, in visiting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Report {
    pub skipped: Vec<Skipped>,
}

impl Report {
    pub(crate) fn push(&mut self, path: String, reason: SkipReason) {
        self.skipped.push(Skipped { path, reason });
    }

    /// Nothing was skipped except absent source values.
    pub fn is_complete(&self) -> bool {
        self.problems().next().is_none()
    }

    /// Skips other than absent source values.
    pub fn problems(&self) -> impl Iterator<Item = &Skipped> {
        self.skipped
            .iter()
            .filter(|s| s.reason != SkipReason::Absent)
    }

    /// Look up the skip recorded for `path`.
    pub fn get(&self, path: &str) -> Option<&SkipReason> {
        self.skipped
            .iter()
            .find(|s| s.path == path)
            .map(|s| &s.reason)
    }

    pub fn into_result(self) -> Result<(), ConvertError> {
        let problems: Vec<Skipped> = self
            .skipped
            .into_iter()
            .filter(|s| s.reason != SkipReason::Absent)
            .collect();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConvertError::Incomplete(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        let mut report = Report::default();
        report.push("$.id".into(), SkipReason::Absent);
        report.push(
            "$.owner_type".into(),
            SkipReason::KindMismatch {
                source: Kind::Str,
                target: Kind::I64,
            },
        );
        report
    }

    #[test]
    fn absent_values_do_not_make_a_report_incomplete() {
        let mut only_absent = Report::default();
        only_absent.push("$.id".into(), SkipReason::Absent);
        assert!(only_absent.is_complete());
        assert!(only_absent.into_result().is_ok());

        assert!(!report().is_complete());
    }

    #[test]
    fn incomplete_error_lists_problems() {
        let err = report().into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "incomplete conversion, 1 field(s) skipped: $.owner_type: kind mismatch: str into i64"
        );
    }

    #[test]
    fn serializes_flat() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "skipped": [
                    { "path": "$.id", "reason": "absent" },
                    { "path": "$.owner_type", "reason": "kind_mismatch", "source": "str", "target": "i64" },
                ]
            })
        );
    }
}
