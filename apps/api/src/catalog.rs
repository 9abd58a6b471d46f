//! Static configuration: target companies, seniority levels, and résumé styles.
//!
//! This is data, not logic — it ships as JSON (`config/catalog.json`) so the
//! catalog can be swapped without a rebuild via `CATALOG_PATH`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default catalog compiled into the binary; used when `CATALOG_PATH` is unset.
const BUILTIN_CATALOG: &str = include_str!("../config/catalog.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

/// A named bundle of presentation attributes. Purely cosmetic; the server only
/// serves these to the SPA, it never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeStyle {
    pub id: String,
    pub name: String,
    pub font_family: String,
    pub container_class: String,
    pub prose_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub companies: Vec<Company>,
    pub levels: Vec<String>,
    pub styles: Vec<ResumeStyle>,
}

impl Catalog {
    /// Parses the embedded default catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).context("Built-in catalog is invalid")
    }

    /// Loads a catalog from a JSON file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid catalog file {}", path.display()))
    }

    fn from_json(raw: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Ids must be unique; everything else is free-form.
    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for company in &self.companies {
            if !seen.insert(format!("company:{}", company.id)) {
                anyhow::bail!("Duplicate company id: {}", company.id);
            }
        }
        for style in &self.styles {
            if !seen.insert(format!("style:{}", style.id)) {
                anyhow::bail!("Duplicate style id: {}", style.id);
            }
        }
        Ok(())
    }

    /// True if `name` matches a company in the catalog (the SPA submits the
    /// display name it showed in its dropdown).
    pub fn has_company(&self, name: &str) -> bool {
        self.companies.iter().any(|c| c.name == name)
    }

    pub fn has_level(&self, level: &str) -> bool {
        self.levels.iter().any(|l| l == level)
    }
}
