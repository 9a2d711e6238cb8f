use crate::error::CompileError;
use crate::types::{CompiledPattern, ExtractionMode, ExtractionSpec, MAX_SPLIT_INDEX};
use regex::escape;

// Lazy capture shared by Regex and Suffix modes
const LAZY_CAPTURE: &str = "(.*?)";
// Greedy capture to end of input, used by Prefix mode
const GREEDY_CAPTURE: &str = "(.*)";

/// Turn a spec into a pattern string with one capture group.
///
/// Pure string construction: nothing is matched here, and a FullRegex
/// pattern is passed through without validation. Literal parameters are
/// escaped so user text is never read as pattern syntax.
pub fn compile(spec: &ExtractionSpec) -> Result<CompiledPattern, CompileError> {
    compile_mode(&spec.mode)
}

/// Same as [`compile`] but for a bare mode, ignoring the enabled flag.
pub fn compile_mode(mode: &ExtractionMode) -> Result<CompiledPattern, CompileError> {
    let pattern = match mode {
        ExtractionMode::Regex { before, after } => {
            format!("{}{LAZY_CAPTURE}{}", escape(before), escape(after))
        }
        ExtractionMode::Split { delimiter, index } => split_pattern(delimiter, *index)?,
        ExtractionMode::Prefix { anchor } => format!("{}{GREEDY_CAPTURE}", escape(anchor)),
        ExtractionMode::Suffix { anchor } => format!("{LAZY_CAPTURE}{}", escape(anchor)),
        ExtractionMode::FullRegex { pattern } => pattern.clone(),
    };

    Ok(CompiledPattern::new(pattern))
}

fn split_pattern(delimiter: &str, index: u32) -> Result<String, CompileError> {
    if !(1..=MAX_SPLIT_INDEX).contains(&index) {
        return Err(CompileError::SplitIndexOutOfRange {
            index,
            max: MAX_SPLIT_INDEX,
        });
    }

    let delimiter = escape(delimiter);
    let skip = index - 1;

    // Skip `index - 1` delimiter-terminated chunks, then capture up to the
    // next delimiter or end of input. The first field needs no skip group.
    // A single trailing newline still counts as end of input.
    let skip_group = if skip == 0 {
        String::new()
    } else {
        format!("(?:.*?{delimiter}){{{skip}}}")
    };

    Ok(format!("^{skip_group}(.*?)(?:{delimiter}|\\n?$)"))
}
