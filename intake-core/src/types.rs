use crate::error::CompileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delimiter a fresh Split field starts with.
pub const DEFAULT_SPLIT_DELIMITER: &str = " - ";

/// Largest 1-based Split index the compiler accepts.
pub const MAX_SPLIT_INDEX: u32 = 50;

// Default value functions for serde
fn default_delimiter() -> String {
    DEFAULT_SPLIT_DELIMITER.to_string()
}

fn default_index() -> u32 {
    1
}

// ===== EXTRACTION SPEC =====
// One spec per field. The mode carries only the parameters it uses, so a
// Split spec can never hold a stray `before` literal.

/// Extraction strategy plus its parameters.
///
/// Serialized with an internal `mode` tag so YAML configs read as
/// `mode: Split` next to `delimiter:` and `index:`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum ExtractionMode {
    /// Capture the shortest run between two literals.
    Regex {
        #[serde(default)]
        before: String,
        #[serde(default)]
        after: String,
    },
    /// Capture the `index`-th (1-based) delimiter-separated field.
    Split {
        #[serde(default = "default_delimiter")]
        delimiter: String,
        #[serde(default = "default_index")]
        index: u32,
    },
    /// Capture everything after a literal anchor.
    Prefix {
        #[serde(default)]
        anchor: String,
    },
    /// Capture everything before the first occurrence of a literal anchor.
    Suffix {
        #[serde(default)]
        anchor: String,
    },
    /// User-written pattern, expected to contain one capture group.
    #[serde(alias = "Full Regex")]
    FullRegex {
        #[serde(default)]
        pattern: String,
    },
}

impl ExtractionMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            ExtractionMode::Regex { .. } => ModeKind::Regex,
            ExtractionMode::Split { .. } => ModeKind::Split,
            ExtractionMode::Prefix { .. } => ModeKind::Prefix,
            ExtractionMode::Suffix { .. } => ModeKind::Suffix,
            ExtractionMode::FullRegex { .. } => ModeKind::FullRegex,
        }
    }
}

impl Default for ExtractionMode {
    fn default() -> Self {
        ModeKind::Regex.default_mode()
    }
}

/// Parameterless mode selector, as picked from a mode list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    Regex,
    Split,
    Prefix,
    Suffix,
    FullRegex,
}

impl ModeKind {
    pub const ALL: [ModeKind; 5] = [
        ModeKind::Regex,
        ModeKind::Split,
        ModeKind::Prefix,
        ModeKind::Suffix,
        ModeKind::FullRegex,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ModeKind::Regex => "Regex",
            ModeKind::Split => "Split",
            ModeKind::Prefix => "Prefix",
            ModeKind::Suffix => "Suffix",
            ModeKind::FullRegex => "Full Regex",
        }
    }

    /// The mode with the parameters a newly selected field starts with.
    pub fn default_mode(&self) -> ExtractionMode {
        match self {
            ModeKind::Regex => ExtractionMode::Regex {
                before: String::new(),
                after: String::new(),
            },
            ModeKind::Split => ExtractionMode::Split {
                delimiter: default_delimiter(),
                index: default_index(),
            },
            ModeKind::Prefix => ExtractionMode::Prefix {
                anchor: String::new(),
            },
            ModeKind::Suffix => ExtractionMode::Suffix {
                anchor: String::new(),
            },
            ModeKind::FullRegex => ExtractionMode::FullRegex {
                pattern: String::new(),
            },
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModeKind {
    type Err = CompileError;

    /// Accepts the display labels case-insensitively; spaces, dashes and
    /// underscores are ignored so "Full Regex", "full-regex" and
    /// "FullRegex" all name the same mode.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "regex" => Ok(ModeKind::Regex),
            "split" => Ok(ModeKind::Split),
            "prefix" => Ok(ModeKind::Prefix),
            "suffix" => Ok(ModeKind::Suffix),
            "fullregex" => Ok(ModeKind::FullRegex),
            _ => Err(CompileError::UnknownMode(s.to_string())),
        }
    }
}

/// Declarative extraction setup for one field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionSpec {
    /// Disabled fields are skipped and always yield an empty value
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub mode: ExtractionMode,
}

impl ExtractionSpec {
    pub fn new(mode: ExtractionMode) -> Self {
        Self {
            enabled: true,
            mode,
        }
    }

    pub fn disabled(mode: ExtractionMode) -> Self {
        Self {
            enabled: false,
            mode,
        }
    }
}

/// A named field (e.g. "Product Name") and how to extract it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(flatten)]
    pub spec: ExtractionSpec,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, spec: ExtractionSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }

    /// Result key for this field: "Product Name" -> "product_name".
    pub fn key(&self) -> String {
        field_key(&self.name)
    }

    /// Export constant for this field: "Product Name" -> "PRODUCT_NAME_PATTERN".
    pub fn constant_name(&self) -> String {
        format!("{}_PATTERN", self.key().to_ascii_uppercase())
    }
}

/// Lower-snake-case key for a display name. Runs of non-alphanumeric
/// characters collapse into one underscore.
pub fn field_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_sep = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }

    key
}

// ===== COMPILED PATTERN & RESULTS =====

/// Pattern text with (ideally) exactly one capture group.
///
/// Always derived from a spec or loaded from a saved rule set; never
/// edited on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompiledPattern(String);

impl CompiledPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of evaluating one field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Captured text, or empty on no-match, disabled or invalid pattern
    pub value: String,
    /// Set only when the pattern could not be used; echoes the pattern text
    pub diagnostic: Option<String>,
}

impl ExtractionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn matched(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            diagnostic: None,
        }
    }

    pub fn invalid(pattern: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            diagnostic: Some(pattern.into()),
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.diagnostic.is_some()
    }
}

/// Per-field row of a batch evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldResult {
    pub field: String,
    pub key: String,
    /// Pattern that was attempted; `None` when the field is disabled
    pub pattern: Option<String>,
    pub result: ExtractionResult,
}
