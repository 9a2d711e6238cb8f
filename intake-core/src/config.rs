use crate::types::{ExtractionSpec, FieldSpec};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

// Default value functions for serde
fn default_fields() -> Vec<FieldSpec> {
    ["Product Name", "Vendor Name", "Category"]
        .into_iter()
        .map(|name| FieldSpec::new(name, ExtractionSpec::default()))
        .collect()
}

fn default_subcategories() -> Vec<String> {
    vec![
        "Beverages".to_string(),
        "Cannabis Flower".to_string(),
        "Cartridges / Pens".to_string(),
        "Concentrate".to_string(),
        "Edible".to_string(),
        "Extract".to_string(),
        "Flower".to_string(),
        "Hemp Based Products".to_string(),
        "Hemp CBD Flower".to_string(),
        "Infused Non-edible".to_string(),
        "Infused Pre-Roll".to_string(),
        "Inhalable Cannabis Product - Combined".to_string(),
        "Marijuana Pre-Roll".to_string(),
        "Paraphernalia".to_string(),
        "Pre-Rolls".to_string(),
        "Seeds".to_string(),
        "Tobacco Category".to_string(),
        "Topical".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fields to extract, evaluated in this order
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldSpec>,
    /// Where saved rule sets live
    #[serde(default)]
    pub storage: StorageConfig,
    /// Known subcategory names rule sets can be narrowed to
    #[serde(default = "default_subcategories")]
    pub subcategories: Vec<String>,
}

/// Location of the rule-set store, passed explicitly to `FileStorage`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `{vendor}[ {subcategory}].json` files.
    /// Unset means "let the host decide" (the CLI uses its data directory).
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            storage: StorageConfig::default(),
            subcategories: default_subcategories(),
        }
    }
}

impl EngineConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                warn!("Failed to load config from {p}: {e}; using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_known_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| s == name)
    }
}
