//! Read-only syntax-tree model for a parsed Java compilation unit.
//!
//! The external parser hands over a method (or a whole type) as a flat
//! arena of [`SyntaxNode`] records. Each record carries a kind tag with
//! kind-specific data, a byte-offset [`Span`], and a parent link. Nothing
//! in this crate mutates a built tree: every operation downstream is a
//! query, and edits are described as specifications for an external
//! applier rather than performed in place.
//!
//! Trees are constructed through [`TreeBuilder`], which validates the
//! structural invariants on [`TreeBuilder::build`]:
//!
//! - every node's span lies within its parent's span;
//! - statement spans within one block are ordered and non-overlapping;
//! - kind-specific references (a method's body, a statement's invocation)
//!   point at nodes of the expected kind.

mod classify;
mod query;

pub use classify::{
    is_constructor, is_empty_catch_block, is_empty_method, is_empty_return_statement, is_equals,
    is_getter, is_hash_code, is_setter, is_to_string, parameters, ParameterList,
};
pub use query::{
    catch_clauses, descendants, enclosing_method, enclosing_type, first_statement,
    innermost_block, is_valid_insertion_point, last_statement, return_statements,
};

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Index of a node within its [`SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A method declaration.
#[derive(Debug, Clone, Default)]
pub struct MethodData {
    /// Name node, absent when the parser could not attach one.
    pub name: Option<NodeId>,
    /// Formal parameters in declaration order.
    pub params: Vec<Parameter>,
    /// Return type node; `None` is the constructor form.
    pub return_type: Option<NodeId>,
    /// Body block; absent on abstract or native methods.
    pub body: Option<NodeId>,
}

/// One formal parameter of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Declared type text, e.g. `String`.
    pub type_name: String,
    /// Parameter name.
    pub name: String,
}

/// A `{ .. }` block holding statements in source order.
#[derive(Debug, Clone, Default)]
pub struct BlockData {
    /// Direct statements of this block, in span order.
    pub statements: Vec<NodeId>,
}

/// Shape of a statement, as far as the engine needs to distinguish.
#[derive(Debug, Clone, Default)]
pub enum StatementForm {
    /// `return;` or `return expr;` with the expression's source text.
    Return {
        /// Source text of the returned expression, if any.
        value: Option<String>,
    },
    /// An expression statement, usually wrapping an invocation node.
    Expression {
        /// The invocation, when the expression is a call.
        invocation: Option<NodeId>,
    },
    /// Any other statement (declarations, loops, try blocks, ...).
    #[default]
    Other,
}

/// A statement inside a block.
#[derive(Debug, Clone, Default)]
pub struct StatementData {
    /// The discriminated shape of the statement.
    pub form: StatementForm,
}

/// A `catch (E e) { .. }` clause.
#[derive(Debug, Clone, Default)]
pub struct CatchData {
    /// Name of the caught exception variable.
    pub variable: Option<String>,
    /// Handler block.
    pub body: Option<NodeId>,
}

/// A method invocation expression.
#[derive(Debug, Clone, Default)]
pub struct InvocationData {
    /// Source text of the receiver expression, e.g. `logger` or
    /// `System.out`; `None` for unqualified calls.
    pub receiver: Option<String>,
    /// Invoked method name.
    pub method: String,
    /// Argument source texts, verbatim.
    pub args: Vec<String>,
}

/// An identifier.
#[derive(Debug, Clone, Default)]
pub struct NameData {
    /// The identifier text.
    pub text: String,
}

/// A type reference or type declaration.
#[derive(Debug, Clone, Default)]
pub struct TypeData {
    /// Type name, e.g. `void` or `OrderService`.
    pub name: String,
    /// Declared field names; populated only on type-declaration nodes.
    pub fields: Vec<String>,
}

/// Kind tag plus kind-specific data for one node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A method declaration.
    Method(MethodData),
    /// A statement block.
    Block(BlockData),
    /// A statement.
    Statement(StatementData),
    /// A catch clause.
    Catch(CatchData),
    /// A method invocation.
    Invocation(InvocationData),
    /// An identifier.
    Name(NameData),
    /// A type reference or declaration.
    Type(TypeData),
}

impl NodeKind {
    /// Human-readable kind name for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Method(_) => "method",
            Self::Block(_) => "block",
            Self::Statement(_) => "statement",
            Self::Catch(_) => "catch",
            Self::Invocation(_) => "invocation",
            Self::Name(_) => "name",
            Self::Type(_) => "type",
        }
    }
}

/// One record in the arena.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    kind: NodeKind,
    span: Span,
    parent: Option<NodeId>,
}

impl SyntaxNode {
    /// The node's kind tag and data.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The node's source span.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The node's parent, `None` only for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A validated, immutable syntax tree.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    root: NodeId,
}

impl SyntaxTree {
    /// The root node of the unit.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    ///
    /// Cannot happen for a built tree, but keeps the container API honest.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node; `None` for an id from another tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.0)
    }

    /// Iterates all node ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Method data of `id`, if it is a method node.
    #[must_use]
    pub fn method(&self, id: NodeId) -> Option<&MethodData> {
        match self.get(id)?.kind() {
            NodeKind::Method(data) => Some(data),
            _ => None,
        }
    }

    /// Block data of `id`, if it is a block node.
    #[must_use]
    pub fn block(&self, id: NodeId) -> Option<&BlockData> {
        match self.get(id)?.kind() {
            NodeKind::Block(data) => Some(data),
            _ => None,
        }
    }

    /// Statement data of `id`, if it is a statement node.
    #[must_use]
    pub fn statement(&self, id: NodeId) -> Option<&StatementData> {
        match self.get(id)?.kind() {
            NodeKind::Statement(data) => Some(data),
            _ => None,
        }
    }

    /// Catch data of `id`, if it is a catch-clause node.
    #[must_use]
    pub fn catch(&self, id: NodeId) -> Option<&CatchData> {
        match self.get(id)?.kind() {
            NodeKind::Catch(data) => Some(data),
            _ => None,
        }
    }

    /// Invocation data of `id`, if it is an invocation node.
    #[must_use]
    pub fn invocation(&self, id: NodeId) -> Option<&InvocationData> {
        match self.get(id)?.kind() {
            NodeKind::Invocation(data) => Some(data),
            _ => None,
        }
    }

    /// Type data of `id`, if it is a type node.
    #[must_use]
    pub fn type_decl(&self, id: NodeId) -> Option<&TypeData> {
        match self.get(id)?.kind() {
            NodeKind::Type(data) => Some(data),
            _ => None,
        }
    }

    /// Identifier text of a name node.
    #[must_use]
    pub fn name_text(&self, id: NodeId) -> Option<&str> {
        match self.get(id)?.kind() {
            NodeKind::Name(data) => Some(data.text.as_str()),
            _ => None,
        }
    }

    /// Name of a method, projected through its name node.
    #[must_use]
    pub fn method_name(&self, id: NodeId) -> Option<&str> {
        self.name_text(self.method(id)?.name?)
    }

    /// Name of a type node.
    #[must_use]
    pub fn type_name(&self, id: NodeId) -> Option<&str> {
        Some(self.type_decl(id)?.name.as_str())
    }

    /// Return-type name of a method; `None` for the constructor form.
    #[must_use]
    pub fn return_type_name(&self, id: NodeId) -> Option<&str> {
        self.type_name(self.method(id)?.return_type?)
    }

    /// Exception-variable name of a catch clause.
    #[must_use]
    pub fn catch_variable(&self, id: NodeId) -> Option<&str> {
        self.catch(id)?.variable.as_deref()
    }

    /// Receiver text of an invocation.
    #[must_use]
    pub fn invocation_receiver(&self, id: NodeId) -> Option<&str> {
        self.invocation(id)?.receiver.as_deref()
    }

    /// Invoked method name of an invocation.
    #[must_use]
    pub fn invocation_name(&self, id: NodeId) -> Option<&str> {
        Some(self.invocation(id)?.method.as_str())
    }

    /// Source text of an invocation's first argument.
    #[must_use]
    pub fn first_argument(&self, id: NodeId) -> Option<&str> {
        self.invocation(id)?.args.first().map(String::as_str)
    }

    /// Nesting depth of `id`: 0 for the root.
    pub(crate) fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.get(current).and_then(SyntaxNode::parent) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Returns true if `ancestor` appears on `id`'s parent chain.
    pub(crate) fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.get(id).and_then(SyntaxNode::parent);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.get(node).and_then(SyntaxNode::parent);
        }
        false
    }
}

/// Errors detected while building a tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// A builder call addressed a node of the wrong kind.
    #[error("node #{node} is a {found} node, expected {expected}")]
    WrongKind {
        /// Offending node index.
        node: usize,
        /// Kind found at that index.
        found: &'static str,
        /// Kind the call required.
        expected: &'static str,
    },

    /// A child span is not contained in its parent's span.
    #[error("node #{child} span {child_span} extends outside parent #{parent} span {parent_span}")]
    SpanOutsideParent {
        /// Child node index.
        child: usize,
        /// Child span.
        child_span: Span,
        /// Parent node index.
        parent: usize,
        /// Parent span.
        parent_span: Span,
    },

    /// Statements of one block overlap or are out of source order.
    #[error("block #{block} has overlapping or unordered statement spans")]
    UnorderedStatements {
        /// Offending block index.
        block: usize,
    },

    /// More than one node has no parent.
    #[error("tree has {found} root nodes, expected exactly one")]
    MultipleRoots {
        /// Number of parentless nodes found.
        found: usize,
    },

    /// A builder call referenced an id this builder never produced.
    #[error("node #{node} does not exist in this tree")]
    UnknownNode {
        /// Offending node index.
        node: usize,
    },

    /// The builder produced no nodes at all.
    #[error("tree has no nodes")]
    Empty,
}

/// Incremental constructor for a [`SyntaxTree`].
///
/// Nodes are added parent-first; kind-specific links are wired with the
/// `set_*`/`make_*` calls afterwards, since a child id does not exist
/// until the child is added. All misuse is reported from [`Self::build`],
/// never by panicking.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    errors: Vec<TreeError>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, parent: Option<NodeId>, span: Span, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SyntaxNode { kind, span, parent });
        id
    }

    /// Adds a type node; root nodes pass `parent = None`.
    pub fn add_type(
        &mut self,
        parent: Option<NodeId>,
        span: Span,
        name: &str,
        fields: &[&str],
    ) -> NodeId {
        let data = TypeData {
            name: name.to_string(),
            fields: fields.iter().map(ToString::to_string).collect(),
        };
        self.add(parent, span, NodeKind::Type(data))
    }

    /// Adds a method node with empty data; wire its parts afterwards.
    pub fn add_method(&mut self, parent: Option<NodeId>, span: Span) -> NodeId {
        self.add(parent, span, NodeKind::Method(MethodData::default()))
    }

    /// Adds a name node.
    pub fn add_name(&mut self, parent: NodeId, span: Span, text: &str) -> NodeId {
        let data = NameData {
            text: text.to_string(),
        };
        self.add(Some(parent), span, NodeKind::Name(data))
    }

    /// Adds an empty block node.
    pub fn add_block(&mut self, parent: NodeId, span: Span) -> NodeId {
        self.add(Some(parent), span, NodeKind::Block(BlockData::default()))
    }

    /// Adds a statement to `block`, appending it to the block's
    /// statement list. The form starts as [`StatementForm::Other`].
    pub fn add_statement(&mut self, block: NodeId, span: Span) -> NodeId {
        let id = self.add(
            Some(block),
            span,
            NodeKind::Statement(StatementData::default()),
        );
        match self.nodes.get_mut(block.0).map(|n| &mut n.kind) {
            Some(NodeKind::Block(data)) => data.statements.push(id),
            Some(other) => {
                let found = other.name();
                self.errors.push(TreeError::WrongKind {
                    node: block.0,
                    found,
                    expected: "block",
                });
            }
            None => self.errors.push(TreeError::UnknownNode { node: block.0 }),
        }
        id
    }

    /// Adds a catch clause under `parent` (typically a try statement).
    pub fn add_catch(&mut self, parent: NodeId, span: Span, variable: Option<&str>) -> NodeId {
        let data = CatchData {
            variable: variable.map(ToString::to_string),
            body: None,
        };
        self.add(Some(parent), span, NodeKind::Catch(data))
    }

    /// Adds an invocation node.
    pub fn add_invocation(
        &mut self,
        parent: NodeId,
        span: Span,
        receiver: Option<&str>,
        method: &str,
        args: &[&str],
    ) -> NodeId {
        let data = InvocationData {
            receiver: receiver.map(ToString::to_string),
            method: method.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
        };
        self.add(Some(parent), span, NodeKind::Invocation(data))
    }

    /// Wires a method's name node.
    pub fn set_method_name(&mut self, method: NodeId, name: NodeId) {
        self.expect_kind(name, "name");
        if let Some(data) = self.method_mut(method) {
            data.name = Some(name);
        }
    }

    /// Wires a method's return-type node.
    pub fn set_method_return(&mut self, method: NodeId, return_type: NodeId) {
        self.expect_kind(return_type, "type");
        if let Some(data) = self.method_mut(method) {
            data.return_type = Some(return_type);
        }
    }

    /// Wires a method's body block.
    pub fn set_method_body(&mut self, method: NodeId, body: NodeId) {
        self.expect_kind(body, "block");
        if let Some(data) = self.method_mut(method) {
            data.body = Some(body);
        }
    }

    /// Appends a formal parameter to a method.
    pub fn add_parameter(&mut self, method: NodeId, type_name: &str, name: &str) {
        if let Some(data) = self.method_mut(method) {
            data.params.push(Parameter {
                type_name: type_name.to_string(),
                name: name.to_string(),
            });
        }
    }

    /// Marks a statement as a `return`, with the returned expression text.
    pub fn make_return(&mut self, statement: NodeId, value: Option<&str>) {
        if let Some(data) = self.statement_mut(statement) {
            data.form = StatementForm::Return {
                value: value.map(ToString::to_string),
            };
        }
    }

    /// Marks a statement as an expression statement around `invocation`.
    pub fn make_expression(&mut self, statement: NodeId, invocation: NodeId) {
        self.expect_kind(invocation, "invocation");
        if let Some(data) = self.statement_mut(statement) {
            data.form = StatementForm::Expression {
                invocation: Some(invocation),
            };
        }
    }

    /// Wires a catch clause's handler block.
    pub fn set_catch_body(&mut self, catch: NodeId, body: NodeId) {
        self.expect_kind(body, "block");
        match self.nodes.get_mut(catch.0).map(|n| &mut n.kind) {
            Some(NodeKind::Catch(data)) => data.body = Some(body),
            Some(other) => {
                let found = other.name();
                self.errors.push(TreeError::WrongKind {
                    node: catch.0,
                    found,
                    expected: "catch",
                });
            }
            None => self.errors.push(TreeError::UnknownNode { node: catch.0 }),
        }
    }

    /// Validates the invariants and produces the immutable tree.
    ///
    /// # Errors
    ///
    /// Returns the first recorded builder misuse, span-containment
    /// violation, statement-ordering violation, or root-count problem.
    pub fn build(mut self) -> Result<SyntaxTree, TreeError> {
        if let Some(error) = self.errors.drain(..).next() {
            return Err(error);
        }
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }

        let roots: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| i)
            .collect();
        if roots.len() != 1 {
            return Err(TreeError::MultipleRoots { found: roots.len() });
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                let Some(parent_span) = self.nodes.get(parent.0).map(|n| n.span) else {
                    return Err(TreeError::UnknownNode { node: parent.0 });
                };
                if !parent_span.contains_span(node.span) {
                    return Err(TreeError::SpanOutsideParent {
                        child: index,
                        child_span: node.span,
                        parent: parent.0,
                        parent_span,
                    });
                }
            }

            if let NodeKind::Block(data) = &node.kind {
                for pair in data.statements.windows(2) {
                    let first = self.nodes[pair[0].0].span;
                    let second = self.nodes[pair[1].0].span;
                    if first.end() > second.offset {
                        return Err(TreeError::UnorderedStatements { block: index });
                    }
                }
            }
        }

        Ok(SyntaxTree {
            nodes: self.nodes,
            root: NodeId(roots[0]),
        })
    }

    fn expect_kind(&mut self, id: NodeId, expected: &'static str) {
        match self.nodes.get(id.0) {
            Some(node) => {
                let found = node.kind.name();
                if found != expected {
                    self.errors.push(TreeError::WrongKind {
                        node: id.0,
                        found,
                        expected,
                    });
                }
            }
            None => self.errors.push(TreeError::UnknownNode { node: id.0 }),
        }
    }

    fn method_mut(&mut self, id: NodeId) -> Option<&mut MethodData> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Method(data)) => Some(data),
            Some(other) => {
                let found = other.name();
                self.errors.push(TreeError::WrongKind {
                    node: id.0,
                    found,
                    expected: "method",
                });
                None
            }
            None => {
                self.errors.push(TreeError::UnknownNode { node: id.0 });
                None
            }
        }
    }

    fn statement_mut(&mut self, id: NodeId) -> Option<&mut StatementData> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Statement(data)) => Some(data),
            Some(other) => {
                let found = other.name();
                self.errors.push(TreeError::WrongKind {
                    node: id.0,
                    found,
                    expected: "statement",
                });
                None
            }
            None => {
                self.errors.push(TreeError::UnknownNode { node: id.0 });
                None
            }
        }
    }
}
