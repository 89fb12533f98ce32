use ir::TreeId;

/// Innermost enclosing class and method of the element being visited.
///
/// Values are copied into each child's traversal entry, so a sibling never
/// observes a context set inside another subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanContext {
    pub class: Option<TreeId>,
    pub method: Option<TreeId>,
}

impl ScanContext {
    /// Entering a class leaves any enclosing method: field initialisers and
    /// members of a nested class are not part of the outer method's body.
    /// Sites there count as `skipped_outside_method` in [`LinkStats`] rather
    /// than being looked up under the outer method.
    ///
    /// [`LinkStats`]: crate::LinkStats
    pub fn with_class(self, class: TreeId) -> Self {
        Self {
            class: Some(class),
            method: None,
        }
    }

    pub fn with_method(self, method: TreeId) -> Self {
        Self {
            method: Some(method),
            ..self
        }
    }

    pub fn enclosing(self) -> Option<(TreeId, TreeId)> {
        self.class.zip(self.method)
    }
}
