// Intake Core Library
//
// Compiles declarative field-extraction specs (Regex, Split, Prefix, Suffix,
// Full Regex) into single-group patterns, evaluates them against manifest
// lines, and stores the rendered patterns as per-vendor rule sets.

pub mod config;
pub mod error;
pub mod rule_set;
pub mod rules;
pub mod storage;
pub mod types;

// Re-export main types and functions for easy use
pub use config::{EngineConfig, StorageConfig};
pub use error::{CompileError, MatchError};
pub use rule_set::{RuleSet, SavedPattern};
pub use rules::{compile, evaluate, evaluate_spec, ExtractionEngine};
pub use storage::{FileStorage, NoOpStorage, RuleStorage};
pub use types::*;
