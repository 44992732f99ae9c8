//! Position and structure queries over a [`SyntaxTree`].
//!
//! All lookups are read-only and total: a probe that matches nothing
//! returns `None` or an empty collection, never an error.

use super::{NodeId, NodeKind, StatementForm, SyntaxTree};
use crate::span::Span;

/// Innermost method whose body block fully contains `[offset, offset + len]`.
///
/// A probe over the signature or outside any body yields `None`.
#[must_use]
pub fn enclosing_method(tree: &SyntaxTree, offset: usize, len: usize) -> Option<NodeId> {
    let probe = Span::new(offset, len);
    tree.ids()
        .filter(|id| {
            tree.method(*id)
                .and_then(|data| data.body)
                .and_then(|body| tree.get(body))
                .map(|node| node.span().contains_span(probe))
                .unwrap_or(false)
        })
        .max_by_key(|id| tree.depth(*id))
}

/// Most deeply nested block whose span contains `position`.
#[must_use]
pub fn innermost_block(tree: &SyntaxTree, position: usize) -> Option<NodeId> {
    tree.ids()
        .filter(|id| matches!(tree.get(*id).map(|n| n.kind()), Some(NodeKind::Block(_))))
        .filter(|id| {
            tree.get(*id)
                .map(|node| node.span().contains(position))
                .unwrap_or(false)
        })
        .max_by_key(|id| tree.depth(*id))
}

/// Nearest type node on `node`'s parent chain, including `node` itself.
#[must_use]
pub fn enclosing_type(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let mut current = Some(node);
    while let Some(id) = current {
        if matches!(tree.get(id).map(|n| n.kind()), Some(NodeKind::Type(_))) {
            return Some(id);
        }
        current = tree.get(id).and_then(|n| n.parent());
    }
    None
}

/// All descendants of `scope`, in arena order.
///
/// The builder appends children after their parent, so arena order is
/// also a top-down traversal order.
#[must_use]
pub fn descendants(tree: &SyntaxTree, scope: NodeId) -> Vec<NodeId> {
    tree.ids()
        .filter(|id| tree.is_descendant_of(*id, scope))
        .collect()
}

/// `return` statements directly in `method`'s body block, in order.
///
/// Returns nested inside inner blocks are not reported; instrumenting
/// those would change control-flow reading more than it documents it.
#[must_use]
pub fn return_statements(tree: &SyntaxTree, method: NodeId) -> Vec<NodeId> {
    let Some(body) = tree.method(method).and_then(|data| data.body) else {
        return Vec::new();
    };
    let Some(block) = tree.block(body) else {
        return Vec::new();
    };
    block
        .statements
        .iter()
        .copied()
        .filter(|id| {
            matches!(
                tree.statement(*id).map(|data| &data.form),
                Some(StatementForm::Return { .. })
            )
        })
        .collect()
}

/// All catch clauses anywhere under `method`'s body, in span order.
#[must_use]
pub fn catch_clauses(tree: &SyntaxTree, method: NodeId) -> Vec<NodeId> {
    let Some(body) = tree.method(method).and_then(|data| data.body) else {
        return Vec::new();
    };
    descendants(tree, body)
        .into_iter()
        .filter(|id| matches!(tree.get(*id).map(|n| n.kind()), Some(NodeKind::Catch(_))))
        .collect()
}

/// First direct statement of `block`.
#[must_use]
pub fn first_statement(tree: &SyntaxTree, block: NodeId) -> Option<NodeId> {
    tree.block(block)?.statements.first().copied()
}

/// Last direct statement of `block`.
#[must_use]
pub fn last_statement(tree: &SyntaxTree, block: NodeId) -> Option<NodeId> {
    tree.block(block)?.statements.last().copied()
}

/// Whether `offset + len` is a position where a new statement may be
/// inserted.
///
/// The position must land inside some block, and must not fall strictly
/// inside any of that block's direct statements. Statement boundaries
/// are valid: the position right after a statement ends (or exactly
/// where one starts) lands between statements.
#[must_use]
pub fn is_valid_insertion_point(tree: &SyntaxTree, offset: usize, len: usize) -> bool {
    let position = offset + len;
    let Some(block) = innermost_block(tree, position) else {
        return false;
    };
    let Some(data) = tree.block(block) else {
        return false;
    };
    data.statements.iter().all(|stmt| {
        tree.get(*stmt)
            .map(|n| !n.span().strictly_contains(position))
            .unwrap_or(true)
    })
}
