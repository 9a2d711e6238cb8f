use crate::config::EngineConfig;
use crate::rule_set::{RuleSet, SavedPattern};
use crate::types::*;
use anyhow::{anyhow, Result};
use tracing::debug;

use super::compiler::compile;
use super::evaluator::{evaluate_spec, validate};

/// Evaluates an ordered set of fields against one input string.
///
/// Fields are independent: an invalid pattern in one of them only affects
/// that field's result.
#[derive(Debug, Clone, Default)]
pub struct ExtractionEngine {
    fields: Vec<FieldSpec>,
}

impl ExtractionEngine {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.fields.clone())
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldSpec> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Run every field against `input`, in configuration order.
    pub fn evaluate_all(&self, input: &str) -> Vec<FieldResult> {
        debug!(
            "Evaluating {} fields against {} chars of input",
            self.fields.len(),
            input.len()
        );

        self.fields
            .iter()
            .map(|field| {
                let (pattern, result) = evaluate_spec(&field.spec, input);
                FieldResult {
                    field: field.name.clone(),
                    key: field.key(),
                    pattern,
                    result,
                }
            })
            .collect()
    }

    /// Compile every enabled field. Unlike evaluation this is all-or-nothing:
    /// a pattern that cannot be built must not end up in a saved rule.
    pub fn compile_all(&self) -> Result<Vec<(&FieldSpec, CompiledPattern)>> {
        let mut compiled = Vec::new();

        for field in &self.fields {
            if !field.spec.enabled {
                debug!("Skipping disabled field: {}", field.name);
                continue;
            }

            let pattern = compile(&field.spec)
                .map_err(|e| anyhow!("Field '{}' does not compile: {}", field.name, e))?;
            compiled.push((field, pattern));
        }

        Ok(compiled)
    }

    /// Build the persistable rule set for a vendor from the enabled fields.
    /// Patterns the regex engine rejects are refused here rather than saved.
    pub fn to_rule_set(&self, vendor: &str, subcategory: Option<&str>) -> Result<RuleSet> {
        let mut patterns = Vec::new();
        for (field, pattern) in self.compile_all()? {
            validate(&pattern).map_err(|e| anyhow!("Field '{}': {}", field.name, e))?;
            patterns.push(SavedPattern {
                field: field.name.clone(),
                key: field.key(),
                pattern: pattern.into_string(),
            });
        }

        if patterns.is_empty() {
            return Err(anyhow!("No enabled fields to save for vendor '{vendor}'"));
        }

        RuleSet::new(vendor, subcategory, patterns)
    }
}
