//! Syntax tree handed over by the parser.
//!
//! Elements live in an arena owned by [`SyntaxTree`] and are addressed by
//! [`TreeId`]. The id is the identity other layers key on: the feature graph
//! associates one node per registered element, and dataflow facts name their
//! program points and candidates by id.

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TreeId(pub usize);

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TreeKind {
    CompilationUnit {
        #[serde(default)]
        types: Vec<TreeId>,
    },
    Class {
        name: String,
        #[serde(default)]
        members: Vec<TreeId>,
    },
    Method {
        name: String,
        #[serde(default)]
        params: Vec<TreeId>,
        /// `None` for abstract and native methods.
        #[serde(default)]
        body: Option<TreeId>,
    },
    Variable {
        name: String,
        #[serde(default)]
        initializer: Option<TreeId>,
    },
    Block {
        #[serde(default)]
        statements: Vec<TreeId>,
    },
    ExpressionStatement {
        expression: TreeId,
    },
    Return {
        #[serde(default)]
        expression: Option<TreeId>,
    },
    If {
        condition: TreeId,
        then_branch: TreeId,
        #[serde(default)]
        else_branch: Option<TreeId>,
    },
    While {
        condition: TreeId,
        body: TreeId,
    },
    Assignment {
        target: TreeId,
        value: TreeId,
    },
    Binary {
        operator: String,
        left: TreeId,
        right: TreeId,
    },
    Unary {
        operator: String,
        operand: TreeId,
    },
    MethodCall {
        #[serde(default)]
        receiver: Option<TreeId>,
        name: String,
        #[serde(default)]
        arguments: Vec<TreeId>,
    },
    FieldAccess {
        target: TreeId,
        name: String,
    },
    Lambda {
        #[serde(default)]
        params: Vec<TreeId>,
        body: TreeId,
    },
    Identifier {
        name: String,
    },
    Literal {
        value: String,
    },
    /// Any construct the linkers have no special handling for.
    Other {
        label: String,
        #[serde(default)]
        children: Vec<TreeId>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub id: TreeId,
    #[serde(flatten)]
    pub kind: TreeKind,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyntaxTree {
    /// Arena of elements, indexed by `TreeId`.
    pub nodes: Vec<Tree>,
    /// Compilation unit element, if one was pushed.
    #[serde(default)]
    pub root: Option<TreeId>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new element and returns its id.
    pub fn push(&mut self, kind: TreeKind) -> TreeId {
        let id = TreeId(self.nodes.len());
        if matches!(kind, TreeKind::CompilationUnit { .. }) {
            self.root = Some(id);
        }
        self.nodes.push(Tree { id, kind });
        id
    }

    pub fn get(&self, id: TreeId) -> Option<&Tree> {
        self.nodes.get(id.0)
    }

    pub fn kind(&self, id: TreeId) -> Option<&TreeKind> {
        self.get(id).map(|t| &t.kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of `id` in source order. Unknown ids have none.
    pub fn children(&self, id: TreeId) -> Vec<TreeId> {
        let Some(tree) = self.get(id) else {
            return Vec::new();
        };
        match &tree.kind {
            TreeKind::CompilationUnit { types } => types.clone(),
            TreeKind::Class { members, .. } => members.clone(),
            TreeKind::Method { params, body, .. } => {
                params.iter().copied().chain(*body).collect()
            }
            TreeKind::Variable { initializer, .. } => initializer.iter().copied().collect(),
            TreeKind::Block { statements } => statements.clone(),
            TreeKind::ExpressionStatement { expression } => vec![*expression],
            TreeKind::Return { expression } => expression.iter().copied().collect(),
            TreeKind::If {
                condition,
                then_branch,
                else_branch,
            } => [*condition, *then_branch]
                .into_iter()
                .chain(*else_branch)
                .collect(),
            TreeKind::While { condition, body } => vec![*condition, *body],
            TreeKind::Assignment { target, value } => vec![*target, *value],
            TreeKind::Binary { left, right, .. } => vec![*left, *right],
            TreeKind::Unary { operand, .. } => vec![*operand],
            TreeKind::MethodCall {
                receiver,
                arguments,
                ..
            } => receiver.iter().chain(arguments).copied().collect(),
            TreeKind::FieldAccess { target, .. } => vec![*target],
            TreeKind::Lambda { params, body } => {
                params.iter().copied().chain([*body]).collect()
            }
            TreeKind::Identifier { .. } | TreeKind::Literal { .. } => Vec::new(),
            TreeKind::Other { children, .. } => children.clone(),
        }
    }

    /// Syntactic category of an element, used as the payload of its
    /// syntax node in the feature graph.
    pub fn label(&self, id: TreeId) -> Option<&str> {
        let label = match self.kind(id)? {
            TreeKind::CompilationUnit { .. } => "COMPILATION_UNIT",
            TreeKind::Class { .. } => "CLASS",
            TreeKind::Method { .. } => "METHOD",
            TreeKind::Variable { .. } => "VARIABLE",
            TreeKind::Block { .. } => "BLOCK",
            TreeKind::ExpressionStatement { .. } => "EXPRESSION_STATEMENT",
            TreeKind::Return { .. } => "RETURN",
            TreeKind::If { .. } => "IF",
            TreeKind::While { .. } => "WHILE_LOOP",
            TreeKind::Assignment { .. } => "ASSIGNMENT",
            TreeKind::Binary { .. } => "BINARY",
            TreeKind::Unary { .. } => "UNARY",
            TreeKind::MethodCall { .. } => "METHOD_INVOCATION",
            TreeKind::FieldAccess { .. } => "MEMBER_SELECT",
            TreeKind::Lambda { .. } => "LAMBDA_EXPRESSION",
            TreeKind::Identifier { .. } => "IDENTIFIER",
            TreeKind::Literal { .. } => "LITERAL",
            TreeKind::Other { label, .. } => label.as_str(),
        };
        Some(label)
    }

    /// Ids of the subtree rooted at `id` in depth-first pre-order.
    pub fn preorder(&self, id: TreeId) -> Vec<TreeId> {
        self.walk(id, |_, _| true)
    }

    /// Depth-first pre-order walk from `id`. Every reached element is
    /// returned; `descend` decides whether its children are walked too.
    ///
    /// Uses an explicit stack so arbitrarily deep trees do not exhaust the
    /// call stack. Ids are visited at most once even if the arena shares a
    /// child between parents.
    pub fn walk(
        &self,
        id: TreeId,
        mut descend: impl FnMut(TreeId, &TreeKind) -> bool,
    ) -> Vec<TreeId> {
        let mut out = Vec::new();
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            match seen.get_mut(next.0) {
                Some(flag) if !*flag => *flag = true,
                _ => continue,
            }
            out.push(next);
            if let Some(kind) = self.kind(next) {
                if descend(next, kind) {
                    stack.extend(self.children(next).into_iter().rev());
                }
            }
        }
        out
    }

    /// Checks that every child reference points into the arena and that
    /// ids match their arena slot.
    pub fn validate(&self) -> Result<(), String> {
        for (idx, tree) in self.nodes.iter().enumerate() {
            if tree.id.0 != idx {
                return Err(format!("tree element at slot {idx} has id {}", tree.id));
            }
            if let Some(bad) = self
                .children(tree.id)
                .into_iter()
                .find(|c| c.0 >= self.nodes.len())
            {
                return Err(format!("{} references missing child {bad}", tree.id));
            }
        }
        match self.root {
            Some(root) if root.0 >= self.nodes.len() => {
                Err(format!("root {root} is not in the tree"))
            }
            _ => Ok(()),
        }
    }
}
