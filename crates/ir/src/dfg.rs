use crate::ast::TreeId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Candidate tree elements a dataflow fact points back to. Empty means the
/// analysis established nothing; several means it could not disambiguate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PossibleTreeSet {
    nodes: BTreeSet<TreeId>,
}

impl PossibleTreeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tree: TreeId) -> bool {
        self.nodes.insert(tree)
    }

    pub fn nodes(&self) -> impl Iterator<Item = TreeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<TreeId> for PossibleTreeSet {
    fn from_iter<I: IntoIterator<Item = TreeId>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactKind {
    LastWrite,
    LastUse,
}

/// Dataflow facts for one method, keyed by program point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataflowOutputs {
    #[serde(default)]
    pub last_writes: HashMap<TreeId, PossibleTreeSet>,
    #[serde(default)]
    pub last_uses: HashMap<TreeId, PossibleTreeSet>,
}

impl DataflowOutputs {
    pub fn facts(&self, kind: FactKind) -> &HashMap<TreeId, PossibleTreeSet> {
        match kind {
            FactKind::LastWrite => &self.last_writes,
            FactKind::LastUse => &self.last_uses,
        }
    }

    pub fn possibles(&self, kind: FactKind, at: TreeId) -> Option<&PossibleTreeSet> {
        self.facts(kind).get(&at)
    }
}

/// Analysis results of a compilation unit: class -> method -> facts.
/// A missing entry means the method was not analysed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResults {
    classes: HashMap<TreeId, HashMap<TreeId, DataflowOutputs>>,
}

impl AnalysisResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: TreeId, method: TreeId, outputs: DataflowOutputs) {
        self.classes.entry(class).or_default().insert(method, outputs);
    }

    pub fn get(&self, class: TreeId, method: TreeId) -> Option<&DataflowOutputs> {
        self.classes.get(&class).and_then(|m| m.get(&method))
    }

    /// Number of analysed methods.
    pub fn len(&self) -> usize {
        self.classes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every tree id mentioned as a class, method, program point or
    /// candidate.
    pub fn referenced_trees(&self) -> BTreeSet<TreeId> {
        let mut out = BTreeSet::new();
        for (class, methods) in &self.classes {
            out.insert(*class);
            for (method, outputs) in methods {
                out.insert(*method);
                for facts in [&outputs.last_writes, &outputs.last_uses] {
                    for (at, possibles) in facts {
                        out.insert(*at);
                        out.extend(possibles.nodes());
                    }
                }
            }
        }
        out
    }
}
