use thiserror::Error;

/// Raised while turning an `ExtractionSpec` into a pattern.
///
/// The evaluator never lets one of these escape a single field: it is
/// folded into an empty value plus the [`CompileError::marker`] text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unknown extraction mode '{0}'")]
    UnknownMode(String),

    #[error("split index {index} is outside 1..={max}")]
    SplitIndexOutOfRange { index: u32, max: u32 },
}

impl CompileError {
    /// A pattern-shaped marker that is obviously not a usable pattern.
    pub fn marker(&self) -> String {
        format!("<invalid: {self}>")
    }
}

/// A compiled pattern that the regex engine refused.
#[derive(Debug, Error)]
#[error("invalid pattern '{pattern}': {source}")]
pub struct MatchError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_wraps_message() {
        let err = CompileError::SplitIndexOutOfRange { index: 0, max: 50 };
        assert_eq!(err.marker(), "<invalid: split index 0 is outside 1..=50>");
    }

    #[test]
    fn unknown_mode_names_the_input() {
        let err = CompileError::UnknownMode("Between".to_string());
        assert!(err.to_string().contains("'Between'"));
    }
}
