use crate::rules::evaluate;
use crate::storage::calculate_patterns_hash;
use crate::types::{CompiledPattern, FieldResult};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Version constants stamped on saved rule sets
pub mod versions {
    pub const INTAKE_VERSION: &str = env!("CARGO_PKG_VERSION");
    /// Bump this when the saved rule-set shape changes.
    pub const RULE_FORMAT_VERSION: &str = "1.0.0";
}

/// One compiled field pattern as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPattern {
    /// Display name of the field ("Product Name")
    pub field: String,
    /// Result key ("product_name")
    pub key: String,
    pub pattern: String,
}

/// Reusable parsing rule for one vendor (optionally narrowed to a
/// subcategory). Only the rendered patterns are kept, never the specs that
/// produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub id: Uuid,
    pub vendor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub patterns: Vec<SavedPattern>,
    /// SHA-256 over the patterns, used to spot hand-edited files
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
    pub format_version: String,
    pub intake_version: String,
}

impl RuleSet {
    pub fn new(vendor: &str, subcategory: Option<&str>, patterns: Vec<SavedPattern>) -> Result<Self> {
        let vendor = vendor.trim();
        let subcategory = subcategory.map(str::trim).filter(|s| !s.is_empty());
        check_identity(vendor, subcategory)?;

        let mut seen = HashSet::new();
        for saved in &patterns {
            if !seen.insert(saved.key.as_str()) {
                return Err(anyhow!(
                    "Field '{}' maps to key '{}', which is already taken",
                    saved.field,
                    saved.key
                ));
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            vendor: vendor.to_string(),
            subcategory: subcategory.map(str::to_string),
            fingerprint: calculate_patterns_hash(&patterns),
            patterns,
            created_at: Utc::now(),
            format_version: versions::RULE_FORMAT_VERSION.to_string(),
            intake_version: versions::INTAKE_VERSION.to_string(),
        })
    }

    /// File name (without extension) this rule set is stored under
    pub fn file_stem(&self) -> String {
        rule_file_stem(&self.vendor, self.subcategory.as_deref())
    }

    /// True when the patterns still hash to the stored fingerprint
    pub fn is_intact(&self) -> bool {
        calculate_patterns_hash(&self.patterns) == self.fingerprint
    }

    pub fn pattern_for(&self, key: &str) -> Option<&SavedPattern> {
        self.patterns.iter().find(|p| p.key == key)
    }

    /// Evaluate every saved pattern against `input`, in saved order.
    pub fn apply(&self, input: &str) -> Vec<FieldResult> {
        self.patterns
            .iter()
            .map(|saved| FieldResult {
                field: saved.field.clone(),
                key: saved.key.clone(),
                pattern: Some(saved.pattern.clone()),
                result: evaluate(&CompiledPattern::new(saved.pattern.as_str()), input),
            })
            .collect()
    }

    /// Captured values keyed by field key
    pub fn values(&self, input: &str) -> BTreeMap<String, String> {
        self.apply(input)
            .into_iter()
            .map(|r| (r.key, r.result.value))
            .collect()
    }
}

/// "{vendor}" or "{vendor} {subcategory}"; a blank subcategory is dropped.
pub fn rule_file_stem(vendor: &str, subcategory: Option<&str>) -> String {
    match subcategory.map(str::trim).filter(|s| !s.is_empty()) {
        Some(subcategory) => format!("{} {}", vendor.trim(), subcategory),
        None => vendor.trim().to_string(),
    }
}

/// Like [`rule_file_stem`], but refuses names that would leave the store
/// directory.
pub fn checked_file_stem(vendor: &str, subcategory: Option<&str>) -> Result<String> {
    check_identity(
        vendor.trim(),
        subcategory.map(str::trim).filter(|s| !s.is_empty()),
    )?;
    Ok(rule_file_stem(vendor, subcategory))
}

fn check_identity(vendor: &str, subcategory: Option<&str>) -> Result<()> {
    check_name("Vendor", vendor)?;
    if let Some(subcategory) = subcategory {
        check_name("Subcategory", subcategory)?;
    }
    Ok(())
}

fn check_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("{kind} name must not be empty"));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(anyhow!("{kind} name '{name}' cannot be used as a file name"));
    }
    Ok(())
}
