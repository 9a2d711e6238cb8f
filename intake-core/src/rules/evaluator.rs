use crate::error::MatchError;
use crate::types::{CompiledPattern, ExtractionResult, ExtractionSpec};
use regex::Regex;
use tracing::{debug, warn};

use super::compiler::compile;

/// Search `input` with `pattern` and return capture group 1.
///
/// `Ok(None)` covers every "nothing to return" case: no match, a pattern
/// without groups, or a group 1 that did not take part in the match.
pub fn try_evaluate(pattern: &CompiledPattern, input: &str) -> Result<Option<String>, MatchError> {
    let regex = Regex::new(pattern.as_str()).map_err(|source| MatchError {
        pattern: pattern.as_str().to_string(),
        source,
    })?;

    Ok(regex
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|group| group.as_str().to_string()))
}

/// Check that the regex engine accepts a pattern, without matching anything.
pub fn validate(pattern: &CompiledPattern) -> Result<(), MatchError> {
    Regex::new(pattern.as_str())
        .map(|_| ())
        .map_err(|source| MatchError {
            pattern: pattern.as_str().to_string(),
            source,
        })
}

/// Apply a compiled pattern to an input string.
///
/// Never fails: an unusable pattern yields an empty value with the
/// pattern text echoed back as the diagnostic.
pub fn evaluate(pattern: &CompiledPattern, input: &str) -> ExtractionResult {
    match try_evaluate(pattern, input) {
        Ok(Some(value)) => {
            debug!(pattern = %pattern, value = %value, "pattern matched");
            ExtractionResult::matched(value)
        }
        Ok(None) => {
            debug!(pattern = %pattern, "no match");
            ExtractionResult::empty()
        }
        Err(e) => {
            warn!("{e}");
            ExtractionResult::invalid(e.pattern)
        }
    }
}

/// Compile and evaluate one field spec.
///
/// Returns the attempted pattern text alongside the result so callers can
/// show it. Disabled specs short-circuit with no pattern at all; a compile
/// error fails closed to an empty value carrying the error marker.
pub fn evaluate_spec(spec: &ExtractionSpec, input: &str) -> (Option<String>, ExtractionResult) {
    if !spec.enabled {
        return (None, ExtractionResult::empty());
    }

    match compile(spec) {
        Ok(pattern) => {
            let result = evaluate(&pattern, input);
            (Some(pattern.into_string()), result)
        }
        Err(e) => {
            warn!("Failed to compile {} spec: {e}", spec.mode.kind());
            let marker = e.marker();
            (Some(marker.clone()), ExtractionResult::invalid(marker))
        }
    }
}
