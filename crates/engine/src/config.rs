use serde::{Deserialize, Serialize};

/// Which `return` statements of a method feed `RETURNS_TO` edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnMode {
    /// Every return statement carrying an expression.
    #[default]
    All,
    /// Only the last return statement with an expression in source order,
    /// searching lambdas and nested classes of the body as well.
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    Dataflow,
    ReturnsTo,
}

fn default_passes() -> Vec<Pass> {
    vec![Pass::Dataflow, Pass::ReturnsTo]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkerConfig {
    #[serde(default)]
    pub return_mode: ReturnMode,
    /// Log ambiguous token resolution at `warn` instead of `debug`.
    #[serde(default)]
    pub warn_ambiguous: bool,
    #[serde(default = "default_passes")]
    pub passes: Vec<Pass>,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            return_mode: ReturnMode::default(),
            warn_ambiguous: false,
            passes: default_passes(),
        }
    }
}

impl LinkerConfig {
    pub fn runs(&self, pass: Pass) -> bool {
        self.passes.contains(&pass)
    }
}
