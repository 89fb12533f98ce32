//! On-disk form of one compilation unit handed over by the front end.

use anyhow::{anyhow, Context, Result};
use ir::{AnalysisResults, FeatureGraph, SyntaxTree};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UnitBundle {
    pub tree: SyntaxTree,
    /// Graph holding the syntactic skeleton.
    pub graph: FeatureGraph,
    #[serde(default)]
    pub analysis: AnalysisResults,
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Reads and validates a unit. JSON by default, YAML for `.yaml`/`.yml`.
pub fn load_unit(path: &Path) -> Result<UnitBundle> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let bundle: UnitBundle = if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?
    };
    bundle
        .validate()
        .with_context(|| format!("invalid unit {}", path.display()))?;
    Ok(bundle)
}

pub fn save_unit(path: &Path, bundle: &UnitBundle) -> Result<()> {
    let data = serde_json::to_string_pretty(bundle).context("failed to serialize unit")?;
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}

impl UnitBundle {
    pub fn validate(&self) -> Result<()> {
        self.tree.validate().map_err(|e| anyhow!(e))?;
        self.graph.validate().map_err(|e| anyhow!(e))?;
        anyhow::ensure!(self.tree.root.is_some(), "tree has no compilation unit root");
        let unknown = self
            .analysis
            .referenced_trees()
            .into_iter()
            .filter(|id| self.tree.get(*id).is_none())
            .count();
        if unknown > 0 {
            warn!(unknown, "analysis results reference elements outside the tree");
        }
        Ok(())
    }
}
