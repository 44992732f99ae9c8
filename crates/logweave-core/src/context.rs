//! Per-operation context handed to the planner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::span::Span;
use crate::tree::{NodeId, SyntaxTree};

/// Shared cooperative cancellation flag.
///
/// Clones observe the same flag; setting it never interrupts anything
/// by force, it is polled at candidate positions and between batch
/// units.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates an unset token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Everything one user-invoked operation works on.
///
/// Owned by the caller for the duration of the operation and dropped at
/// its end; nothing here outlives the operation or leaks into the next
/// one.
#[derive(Debug, Clone)]
pub struct OperationContext {
    tree: SyntaxTree,
    resource: String,
    selection: Span,
    target: Option<NodeId>,
    cancel: CancelToken,
    project: Option<String>,
}

impl OperationContext {
    /// Creates a context over a parsed unit.
    #[must_use]
    pub fn new(tree: SyntaxTree, resource: &str) -> Self {
        Self {
            tree,
            resource: resource.to_string(),
            selection: Span::new(0, 0),
            target: None,
            cancel: CancelToken::new(),
            project: None,
        }
    }

    /// Sets the user's selection.
    #[must_use]
    pub fn with_selection(mut self, offset: usize, len: usize) -> Self {
        self.selection = Span::new(offset, len);
        self
    }

    /// Pre-resolves the target method, bypassing selection lookup.
    #[must_use]
    pub fn with_target(mut self, method: NodeId) -> Self {
        self.target = Some(method);
        self
    }

    /// Attaches a shared cancellation token.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Names the project the unit belongs to, for configuration layering.
    #[must_use]
    pub fn with_project(mut self, project: &str) -> Self {
        self.project = Some(project.to_string());
        self
    }

    /// The parsed unit.
    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Identifier of the compilation unit, used in warnings.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The user's selection within the unit.
    #[must_use]
    pub fn selection(&self) -> Span {
        self.selection
    }

    /// The pre-resolved target method, if any.
    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// The operation's cancellation token.
    #[must_use]
    pub fn cancel(&self) -> &CancelToken {
        &self.cancel
    }

    /// The owning project's identity, if known.
    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }
}
