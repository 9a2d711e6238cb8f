use crate::rule_set::{checked_file_stem, RuleSet, SavedPattern};
use anyhow::{anyhow, Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage abstraction for saved vendor rule sets
pub trait RuleStorage {
    fn get_rule_set(&self, vendor: &str, subcategory: Option<&str>) -> Result<Option<RuleSet>>;
    fn store_rule_set(&self, rule_set: &RuleSet) -> Result<PathBuf>;
    fn list_rule_sets(&self) -> Result<Vec<RuleSet>>;
}

/// File-based storage: one pretty-printed JSON file per rule set
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create rule directory {}", root.display()))?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn rule_path(&self, stem: &str) -> PathBuf {
        self.root.join(format!("{stem}.json"))
    }

    fn read_rule_set(path: &Path) -> Result<RuleSet> {
        let json_str = fs::read_to_string(path)?;
        let rule_set: RuleSet = serde_json::from_str(&json_str)
            .map_err(|e| anyhow!("Failed to deserialize rule set {}: {}", path.display(), e))?;

        if !rule_set.is_intact() {
            warn!(
                "Rule set {} does not match its fingerprint (edited by hand?)",
                path.display()
            );
        }
        Ok(rule_set)
    }
}

impl RuleStorage for FileStorage {
    fn get_rule_set(&self, vendor: &str, subcategory: Option<&str>) -> Result<Option<RuleSet>> {
        let path = self.rule_path(&checked_file_stem(vendor, subcategory)?);
        if path.exists() {
            debug!("Loading rule set from {}", path.display());
            Ok(Some(Self::read_rule_set(&path)?))
        } else {
            Ok(None)
        }
    }

    fn store_rule_set(&self, rule_set: &RuleSet) -> Result<PathBuf> {
        let path = self.rule_path(&rule_set.file_stem());
        let json_str = serde_json::to_string_pretty(rule_set)
            .map_err(|e| anyhow!("Failed to serialize rule set: {}", e))?;
        fs::write(&path, json_str)
            .with_context(|| format!("Failed to write rule set {}", path.display()))?;
        debug!("Stored rule set {} at {}", rule_set.id, path.display());
        Ok(path)
    }

    fn list_rule_sets(&self) -> Result<Vec<RuleSet>> {
        let mut rule_sets = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            // One unreadable file should not hide the rest of the store
            match Self::read_rule_set(&path) {
                Ok(rule_set) => rule_sets.push(rule_set),
                Err(e) => warn!("Skipping {}: {e}", path.display()),
            }
        }

        rule_sets.sort_by(|a, b| {
            a.vendor
                .cmp(&b.vendor)
                .then_with(|| a.subcategory.cmp(&b.subcategory))
        });
        Ok(rule_sets)
    }
}

/// Calculate the fingerprint of a pattern list (field keys + pattern text)
pub fn calculate_patterns_hash(patterns: &[SavedPattern]) -> String {
    let mut hasher = Sha256::new();
    for saved in patterns {
        hasher.update(saved.key.as_bytes());
        hasher.update([0u8]);
        hasher.update(saved.pattern.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

/// No-op storage implementation that never keeps anything
pub struct NoOpStorage;

impl Default for NoOpStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl NoOpStorage {
    pub fn new() -> Self {
        Self
    }
}

impl RuleStorage for NoOpStorage {
    fn get_rule_set(&self, _vendor: &str, _subcategory: Option<&str>) -> Result<Option<RuleSet>> {
        Ok(None) // Always missing
    }

    fn store_rule_set(&self, rule_set: &RuleSet) -> Result<PathBuf> {
        Ok(PathBuf::from(format!("{}.json", rule_set.file_stem()))) // No-op
    }

    fn list_rule_sets(&self) -> Result<Vec<RuleSet>> {
        Ok(Vec::new())
    }
}
