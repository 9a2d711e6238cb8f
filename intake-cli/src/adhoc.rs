//! One-off extraction spec assembled from command-line flags

use clap::Args;
use intake_core::types::DEFAULT_SPLIT_DELIMITER;
use intake_core::{CompileError, ExtractionMode, ExtractionSpec, ModeKind};

#[derive(Args, Debug, Clone)]
pub struct AdhocSpec {
    /// Extraction mode: Regex, Split, Prefix, Suffix or "Full Regex"
    #[arg(short, long)]
    pub mode: String,

    /// Literal text before the value (Regex mode)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub before: String,

    /// Literal text after the value (Regex mode)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub after: String,

    /// Field delimiter (Split mode)
    #[arg(short, long, default_value = DEFAULT_SPLIT_DELIMITER, allow_hyphen_values = true)]
    pub delimiter: String,

    /// 1-based field position (Split mode)
    #[arg(short, long, default_value_t = 1)]
    pub index: u32,

    /// Anchor text (Prefix / Suffix modes)
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub anchor: String,

    /// Pattern with one capture group (Full Regex mode)
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub pattern: String,
}

impl AdhocSpec {
    /// Keep only the parameters the chosen mode uses.
    pub fn to_spec(&self) -> Result<ExtractionSpec, CompileError> {
        let mode = match self.mode.parse::<ModeKind>()? {
            ModeKind::Regex => ExtractionMode::Regex {
                before: self.before.clone(),
                after: self.after.clone(),
            },
            ModeKind::Split => ExtractionMode::Split {
                delimiter: self.delimiter.clone(),
                index: self.index,
            },
            ModeKind::Prefix => ExtractionMode::Prefix {
                anchor: self.anchor.clone(),
            },
            ModeKind::Suffix => ExtractionMode::Suffix {
                anchor: self.anchor.clone(),
            },
            ModeKind::FullRegex => ExtractionMode::FullRegex {
                pattern: self.pattern.clone(),
            },
        };

        Ok(ExtractionSpec::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adhoc(mode: &str) -> AdhocSpec {
        AdhocSpec {
            mode: mode.to_string(),
            before: "SKU:".to_string(),
            after: ";".to_string(),
            delimiter: " - ".to_string(),
            index: 2,
            anchor: "Vendor: ".to_string(),
            pattern: r"(\d+)".to_string(),
        }
    }

    #[test]
    fn test_picks_mode_parameters() {
        assert_eq!(
            adhoc("split").to_spec().unwrap().mode,
            ExtractionMode::Split {
                delimiter: " - ".to_string(),
                index: 2,
            }
        );
        assert_eq!(
            adhoc("Suffix").to_spec().unwrap().mode,
            ExtractionMode::Suffix {
                anchor: "Vendor: ".to_string(),
            }
        );
        assert!(adhoc("Full Regex").to_spec().unwrap().enabled);
    }

    #[test]
    fn test_unknown_mode_is_compile_error() {
        assert_eq!(
            adhoc("Between").to_spec().unwrap_err(),
            CompileError::UnknownMode("Between".to_string())
        );
    }
}
