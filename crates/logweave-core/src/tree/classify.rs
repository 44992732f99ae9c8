//! Method-shape classification predicates.
//!
//! Every predicate is total over node ids: a node of the wrong kind, an
//! id from another tree, or a method with missing parts simply answers
//! `false`. Policies select these by name (skip getters, skip setters,
//! ...) without knowing anything about tree shapes.

use super::{NodeId, SyntaxTree};

/// Declaration-ordered parameter projection of a method.
///
/// `types` and `names` are parallel vectors of equal length, both empty
/// for a method without parameters (or for a non-method node).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList {
    /// Declared type texts, in declaration order.
    pub types: Vec<String>,
    /// Parameter names, in declaration order.
    pub names: Vec<String>,
}

impl ParameterList {
    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true for a method without parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates `(type, name)` pairs in declaration order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types
            .iter()
            .map(String::as_str)
            .zip(self.names.iter().map(String::as_str))
    }
}

/// Projects the parameters of `method`.
#[must_use]
pub fn parameters(tree: &SyntaxTree, method: NodeId) -> ParameterList {
    let Some(data) = tree.method(method) else {
        return ParameterList::default();
    };
    ParameterList {
        types: data.params.iter().map(|p| p.type_name.clone()).collect(),
        names: data.params.iter().map(|p| p.name.clone()).collect(),
    }
}

/// A `getX()`/`isX()` accessor: prefixed name longer than its prefix,
/// zero parameters, non-void return.
#[must_use]
pub fn is_getter(tree: &SyntaxTree, method: NodeId) -> bool {
    let Some(data) = tree.method(method) else {
        return false;
    };
    let Some(name) = tree.method_name(method) else {
        return false;
    };
    let prefixed = (name.starts_with("get") && name.len() > 3)
        || (name.starts_with("is") && name.len() > 2);
    prefixed
        && data.params.is_empty()
        && tree
            .return_type_name(method)
            .map(|ty| ty != "void")
            .unwrap_or(false)
}

/// A `setX(v)` mutator: `set`-prefixed name longer than three characters,
/// exactly one parameter, void or absent return.
#[must_use]
pub fn is_setter(tree: &SyntaxTree, method: NodeId) -> bool {
    let Some(data) = tree.method(method) else {
        return false;
    };
    let Some(name) = tree.method_name(method) else {
        return false;
    };
    name.starts_with("set")
        && name.len() > 3
        && data.params.len() == 1
        && tree
            .return_type_name(method)
            .map(|ty| ty == "void")
            .unwrap_or(true)
}

/// The canonical `toString()` override.
#[must_use]
pub fn is_to_string(tree: &SyntaxTree, method: NodeId) -> bool {
    tree.method(method)
        .map(|data| data.params.is_empty())
        .unwrap_or(false)
        && tree.method_name(method) == Some("toString")
}

/// The canonical `hashCode()` override.
#[must_use]
pub fn is_hash_code(tree: &SyntaxTree, method: NodeId) -> bool {
    tree.method(method)
        .map(|data| data.params.is_empty())
        .unwrap_or(false)
        && tree.method_name(method) == Some("hashCode")
}

/// The canonical `equals(Object)` override.
#[must_use]
pub fn is_equals(tree: &SyntaxTree, method: NodeId) -> bool {
    tree.method(method)
        .map(|data| data.params.len() == 1)
        .unwrap_or(false)
        && tree.method_name(method) == Some("equals")
}

/// A constructor: a method node without a return type.
#[must_use]
pub fn is_constructor(tree: &SyntaxTree, method: NodeId) -> bool {
    tree.method(method)
        .map(|data| data.return_type.is_none())
        .unwrap_or(false)
}

/// A method with no body, or a body holding zero statements.
#[must_use]
pub fn is_empty_method(tree: &SyntaxTree, method: NodeId) -> bool {
    let Some(data) = tree.method(method) else {
        return false;
    };
    match data.body.and_then(|body| tree.block(body)) {
        Some(block) => block.statements.is_empty(),
        None => true,
    }
}

/// A catch clause whose handler block holds zero statements.
#[must_use]
pub fn is_empty_catch_block(tree: &SyntaxTree, catch: NodeId) -> bool {
    let Some(data) = tree.catch(catch) else {
        return false;
    };
    match data.body.and_then(|body| tree.block(body)) {
        Some(block) => block.statements.is_empty(),
        None => true,
    }
}

/// A bare `return;` without a value.
#[must_use]
pub fn is_empty_return_statement(tree: &SyntaxTree, statement: NodeId) -> bool {
    matches!(
        tree.statement(statement).map(|data| &data.form),
        Some(super::StatementForm::Return { value: None })
    )
}
