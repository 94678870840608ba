use crate::report::Skipped;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("config error: {0}")]
    Config(String),

    #[error("incomplete conversion, {} field(s) skipped: {}", .0.len(), list(.0))]
    Incomplete(Vec<Skipped>),
}

fn list(skipped: &[Skipped]) -> String {
    skipped
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
