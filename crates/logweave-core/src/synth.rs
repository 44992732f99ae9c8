//! Statement synthesis and detection.
//!
//! The synthesizer turns a resolved policy plus a resolved template into
//! [`StatementSpec`] values: descriptions of statements for the external
//! rewrite applier. Nothing here mutates a tree or touches source text.
//!
//! Message conventions follow the `"<method>() - <event>"` shape, with
//! policy inclusion flags folding in the signature, parameter names or
//! values, the returned value, or the caught exception.

use crate::policy::PositionPolicy;
use crate::span::Span;
use crate::template::{Framework, Level, ResolvedTemplate};
use crate::tree::{self, NodeId, StatementForm, SyntaxTree};

/// Where a synthesized statement goes, relative to existing nodes.
///
/// Anchors describe positions; actual text splicing belongs to the
/// external applier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// First statement of the given block.
    BlockStart(NodeId),
    /// Last statement of the given block.
    BlockEnd(NodeId),
    /// Immediately before the given statement.
    BeforeStatement(NodeId),
    /// Replacing the given statement.
    ReplaceStatement(NodeId),
}

/// One synthesized statement, ready for the applier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSpec {
    /// Where the statement goes.
    pub anchor: Anchor,
    /// Level it logs at.
    pub level: Level,
    /// Rendered statement text.
    pub text: String,
    /// Argument expressions bound to the message's placeholder tokens.
    pub bindings: Vec<String>,
}

/// A rendered logger field declaration plus the imports it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSpec {
    /// Rendered field declaration.
    pub text: String,
    /// Fully qualified imports the declaration requires.
    pub imports: Vec<String>,
}

/// A statement marked for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalSpec {
    /// The statement node.
    pub statement: NodeId,
    /// Its source span, for the applier.
    pub span: Span,
}

/// Replaces every `${name}` occurrence in `template` from `bindings`.
///
/// Single pass, whole tokens only: a name without a binding stays in the
/// output verbatim, and binding values are never re-scanned, so a value
/// containing `${...}` comes through untouched.
#[must_use]
pub fn substitute(template: &str, bindings: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match bindings.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated token; keep the tail as written.
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// True iff `statement` is an expression statement invoking something on
/// a receiver spelled exactly `logger_name`.
///
/// Purely syntactic: an unrelated variable sharing the name matches, and
/// a renamed or qualified logger does not.
#[must_use]
pub fn is_log_statement(syntax: &SyntaxTree, statement: NodeId, logger_name: &str) -> bool {
    let Some(StatementForm::Expression {
        invocation: Some(invocation),
    }) = syntax.statement(statement).map(|data| &data.form)
    else {
        return false;
    };
    syntax.invocation_receiver(*invocation) == Some(logger_name)
}

/// True iff the type declares a field named `logger_name`.
///
/// The field's type is not checked.
#[must_use]
pub fn logger_declared(syntax: &SyntaxTree, type_node: NodeId, logger_name: &str) -> bool {
    syntax
        .type_decl(type_node)
        .map(|data| data.fields.iter().any(|field| field == logger_name))
        .unwrap_or(false)
}

/// Marks every log statement directly in `block` for removal.
///
/// Non-recursive; nested blocks keep their statements. Planning removals
/// on a block that has none yields an empty list, so applying a removal
/// plan and planning again is idempotent.
#[must_use]
pub fn remove_log_statements(
    syntax: &SyntaxTree,
    block: NodeId,
    logger_name: &str,
) -> Vec<RemovalSpec> {
    let Some(data) = syntax.block(block) else {
        return Vec::new();
    };
    data.statements
        .iter()
        .copied()
        .filter(|id| is_log_statement(syntax, *id, logger_name))
        .filter_map(|id| {
            syntax.get(id).map(|node| RemovalSpec {
                statement: id,
                span: node.span(),
            })
        })
        .collect()
}

/// Renders statements against one resolved template and logger name.
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
    template: &'a ResolvedTemplate,
    logger: &'a str,
}

impl<'a> Synthesizer<'a> {
    /// Creates a synthesizer for `template` and the configured logger.
    #[must_use]
    pub fn new(template: &'a ResolvedTemplate, logger: &'a str) -> Self {
        Self { template, logger }
    }

    /// Statement logged on method entry, anchored at body start.
    ///
    /// `None` when the method has no body.
    #[must_use]
    pub fn entry_statement(
        &self,
        syntax: &SyntaxTree,
        method: NodeId,
        policy: &PositionPolicy,
    ) -> Option<StatementSpec> {
        let body = syntax.method(method)?.body?;
        let mut message = format!(
            "{} - {}",
            self.method_label(syntax, method, policy),
            policy.message
        );
        let mut bindings = Vec::new();

        let params = tree::parameters(syntax, method);
        if policy.include.parameter_values {
            for (index, name) in params.names.iter().enumerate() {
                let prefix = if index == 0 { " : " } else { ", " };
                message.push_str(&format!("{prefix}{name}={}", self.token(index)));
                bindings.push(name.clone());
            }
        } else if policy.include.parameter_names && !params.is_empty() {
            message.push_str(&format!(" : {}", params.names.join(", ")));
        }

        Some(self.plain_statement(Anchor::BlockStart(body), policy.level, &message, bindings))
    }

    /// Statement logged on method exit, anchored at body end, binding
    /// the value of a trailing `return` when the policy asks for it.
    ///
    /// `None` when the method has no body.
    #[must_use]
    pub fn exit_statement(
        &self,
        syntax: &SyntaxTree,
        method: NodeId,
        policy: &PositionPolicy,
    ) -> Option<StatementSpec> {
        let body = syntax.method(method)?.body?;
        let mut message = format!(
            "{} - {}",
            self.method_label(syntax, method, policy),
            policy.message
        );
        let mut bindings = Vec::new();
        if policy.include.return_value {
            let trailing = tree::last_statement(syntax, body)
                .and_then(|last| syntax.statement(last))
                .and_then(|data| match &data.form {
                    StatementForm::Return { value } => value.clone(),
                    _ => None,
                });
            if let Some(value) = trailing {
                message.push_str(&format!(" : {}", self.token(0)));
                bindings.push(value);
            }
        }
        Some(self.plain_statement(Anchor::BlockEnd(body), policy.level, &message, bindings))
    }

    /// Statement logged before a `return`, binding the returned value
    /// when the policy asks for it.
    ///
    /// `None` when `statement` is not a return statement.
    #[must_use]
    pub fn return_statement(
        &self,
        syntax: &SyntaxTree,
        method: NodeId,
        statement: NodeId,
        policy: &PositionPolicy,
    ) -> Option<StatementSpec> {
        let StatementForm::Return { value } = &syntax.statement(statement)?.form else {
            return None;
        };
        let mut message = format!(
            "{} - {}",
            self.method_label(syntax, method, policy),
            policy.message
        );
        let mut bindings = Vec::new();
        if policy.include.return_value {
            if let Some(value) = value {
                message.push_str(&format!(" : {}", self.token(0)));
                bindings.push(value.clone());
            }
        }
        Some(self.plain_statement(
            Anchor::BeforeStatement(statement),
            policy.level,
            &message,
            bindings,
        ))
    }

    /// Statement logged inside a catch handler, anchored at handler
    /// start. Carries the exception as a throwable argument when the
    /// policy's exception flag is set.
    ///
    /// `None` when the clause has no handler block.
    #[must_use]
    pub fn catch_statement(
        &self,
        syntax: &SyntaxTree,
        method: NodeId,
        catch: NodeId,
        policy: &PositionPolicy,
    ) -> Option<StatementSpec> {
        let handler = syntax.catch(catch)?.body?;
        let variable = syntax.catch_variable(catch).map(ToString::to_string);
        let event = variable.clone().unwrap_or_else(|| policy.message.clone());
        let name = syntax.method_name(method).unwrap_or("unknown");
        let message = format!("{name}() - {event}");

        let anchor = Anchor::BlockStart(handler);
        match variable.filter(|_| policy.include.exception) {
            Some(variable) => {
                let text = self.render(
                    &self.template.statement_with_throwable,
                    policy.level,
                    &quoted(&message),
                    &[("throwable", variable.as_str())],
                );
                Some(StatementSpec {
                    anchor,
                    level: policy.level,
                    text,
                    bindings: vec![variable],
                })
            }
            None => Some(self.plain_statement(anchor, policy.level, &message, Vec::new())),
        }
    }

    /// Statement reporting a single variable: the message is one
    /// placeholder token bound to the variable.
    #[must_use]
    pub fn variable_statement(&self, anchor: Anchor, variable: &str, level: Level) -> StatementSpec {
        self.plain_statement(anchor, level, &self.token(0), vec![variable.to_string()])
    }

    /// Statement carrying a fixed message, without bindings.
    #[must_use]
    pub fn message_statement(&self, anchor: Anchor, message: &str, level: Level) -> StatementSpec {
        self.plain_statement(anchor, level, message, Vec::new())
    }

    /// Renders the logger field declaration for a class.
    #[must_use]
    pub fn logger_declaration(&self, class_name: &str) -> DeclarationSpec {
        let text = substitute(
            &self.template.declaration,
            &[
                ("type", &self.template.logger_type),
                ("logger", self.logger),
                ("factory", &self.template.factory_class),
                ("factoryMethod", &self.template.factory_method),
                ("class", class_name),
            ],
        );
        DeclarationSpec {
            text,
            imports: self.template.imports.clone(),
        }
    }

    /// Replaces a `System.out`/`System.err` `print`/`println` call with
    /// a logger statement at `level`.
    ///
    /// A string-literal argument loses one layer of surrounding double
    /// quotes and becomes the message; any other argument passes through
    /// verbatim as the message expression. `None` when the invocation is
    /// not a console print or sits outside a statement.
    #[must_use]
    pub fn replace_system_println(
        &self,
        syntax: &SyntaxTree,
        invocation: NodeId,
        level: Level,
    ) -> Option<StatementSpec> {
        let data = syntax.invocation(invocation)?;
        let console = matches!(data.receiver.as_deref(), Some("System.out" | "System.err"));
        if !console || !matches!(data.method.as_str(), "print" | "println") {
            return None;
        }
        let statement = syntax.get(invocation)?.parent()?;
        syntax.statement(statement)?;

        let argument = data.args.first().map(String::as_str).unwrap_or_default();
        let message_expr = match literal_content(argument) {
            Some(content) => quoted(content),
            None => argument.to_string(),
        };
        let text = self.render(&self.template.statement, level, &message_expr, &[]);
        Some(StatementSpec {
            anchor: Anchor::ReplaceStatement(statement),
            level,
            text,
            bindings: Vec::new(),
        })
    }

    /// The method part of a message: `name()` or, with the signature
    /// flag, `name(type name, ...)`.
    fn method_label(&self, syntax: &SyntaxTree, method: NodeId, policy: &PositionPolicy) -> String {
        let name = syntax.method_name(method).unwrap_or("unknown");
        if policy.include.signature {
            let params = tree::parameters(syntax, method);
            let rendered: Vec<String> = params
                .pairs()
                .map(|(ty, name)| format!("{ty} {name}"))
                .collect();
            format!("{name}({})", rendered.join(", "))
        } else {
            format!("{name}()")
        }
    }

    /// Placeholder token for the argument at `index`, honoring indexed
    /// tokens like JUL's `{0}`.
    fn token(&self, index: usize) -> String {
        if self.template.placeholder == "{}" {
            "{}".to_string()
        } else {
            format!("{{{index}}}")
        }
    }

    fn plain_statement(
        &self,
        anchor: Anchor,
        level: Level,
        message: &str,
        bindings: Vec<String>,
    ) -> StatementSpec {
        let mut expr = quoted(message);
        for binding in &bindings {
            expr.push_str(", ");
            expr.push_str(binding);
        }
        let text = self.render(&self.template.statement, level, &expr, &[]);
        StatementSpec {
            anchor,
            level,
            text,
            bindings,
        }
    }

    fn render(
        &self,
        statement_template: &str,
        level: Level,
        message_expr: &str,
        extra: &[(&str, &str)],
    ) -> String {
        let framework = self.template.framework;
        let mut bindings = vec![
            ("logger", self.logger),
            ("level", level.method_name(framework)),
            ("constant", level.jul_constant()),
            ("message", message_expr),
        ];
        bindings.extend_from_slice(extra);
        substitute(statement_template, &bindings)
    }
}

fn quoted(message: &str) -> String {
    format!("\"{message}\"")
}

/// Content of a double-quoted literal, or `None` for anything else.
fn literal_content(argument: &str) -> Option<&str> {
    argument
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Position, PositionPolicy};
    use crate::template::TemplateRegistry;
    use crate::tree::TreeBuilder;

    fn resolved(framework: Framework) -> ResolvedTemplate {
        ResolvedTemplate::overlay(TemplateRegistry::new().get(framework), None)
    }

    /// `int pay(String from, String to)` with one return statement and a
    /// catch clause.
    fn sample() -> (SyntaxTree, NodeId, NodeId, NodeId) {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 200));
        let name = b.add_name(method, Span::new(4, 3), "pay");
        b.set_method_name(method, name);
        b.add_parameter(method, "String", "from");
        b.add_parameter(method, "String", "to");
        let ret_ty = b.add_type(Some(method), Span::new(0, 3), "int", &[]);
        b.set_method_return(method, ret_ty);
        let body = b.add_block(method, Span::new(30, 160));
        b.set_method_body(method, body);

        let tri = b.add_statement(body, Span::new(40, 100));
        let catch = b.add_catch(tri, Span::new(100, 38), Some("e"));
        let handler = b.add_block(catch, Span::new(110, 26));
        b.set_catch_body(catch, handler);

        let ret = b.add_statement(body, Span::new(150, 20));
        b.make_return(ret, Some("total"));

        let tree = b.build().expect("valid tree");
        (tree, method, catch, ret)
    }

    #[test]
    fn substitution_replaces_bound_tokens() {
        let out = substitute(
            "${logger}.${level}(${message});",
            &[("logger", "logger"), ("level", "debug"), ("message", "\"hi\"")],
        );
        assert_eq!(out, "logger.debug(\"hi\");");
    }

    #[test]
    fn unresolved_tokens_stay_verbatim() {
        let out = substitute("${logger}.${nope}(${message});", &[("logger", "log")]);
        assert_eq!(out, "log.${nope}(${message});");
    }

    #[test]
    fn substitution_is_single_pass() {
        let out = substitute("${a} ${b}", &[("a", "${b}"), ("b", "x")]);
        assert_eq!(out, "${b} x");
    }

    #[test]
    fn unterminated_token_is_kept() {
        let out = substitute("x ${oops", &[("oops", "y")]);
        assert_eq!(out, "x ${oops");
    }

    #[test]
    fn entry_statement_uses_the_convention_message() {
        let (tree, method, _, _) = sample();
        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let policy = PositionPolicy::default_for(Position::Start);

        let spec = synth.entry_statement(&tree, method, &policy).expect("spec");
        assert_eq!(spec.text, "logger.debug(\"pay() - start\");");
        assert_eq!(spec.level, Level::Debug);
        assert!(matches!(spec.anchor, Anchor::BlockStart(_)));
        assert!(spec.bindings.is_empty());
    }

    #[test]
    fn entry_statement_renders_signature_and_values() {
        let (tree, method, _, _) = sample();
        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let mut policy = PositionPolicy::default_for(Position::Start);
        policy.include.signature = true;
        policy.include.parameter_values = true;

        let spec = synth.entry_statement(&tree, method, &policy).expect("spec");
        assert_eq!(
            spec.text,
            "logger.debug(\"pay(String from, String to) - start : from={}, to={}\", from, to);"
        );
        assert_eq!(spec.bindings, vec!["from", "to"]);
    }

    #[test]
    fn entry_statement_lists_parameter_names() {
        let (tree, method, _, _) = sample();
        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let mut policy = PositionPolicy::default_for(Position::Start);
        policy.include.parameter_names = true;

        let spec = synth.entry_statement(&tree, method, &policy).expect("spec");
        assert_eq!(spec.text, "logger.debug(\"pay() - start : from, to\");");
        assert!(spec.bindings.is_empty());
    }

    #[test]
    fn exit_statement_anchors_at_block_end() {
        let (tree, method, _, _) = sample();
        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let policy = PositionPolicy::default_for(Position::End);

        let spec = synth.exit_statement(&tree, method, &policy).expect("spec");
        assert_eq!(spec.text, "logger.debug(\"pay() - end\");");
        assert!(matches!(spec.anchor, Anchor::BlockEnd(_)));
    }

    #[test]
    fn exit_statement_binds_a_trailing_return_value() {
        let (tree, method, _, _) = sample();
        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let mut policy = PositionPolicy::default_for(Position::End);
        policy.include.return_value = true;

        let spec = synth.exit_statement(&tree, method, &policy).expect("spec");
        assert_eq!(spec.text, "logger.debug(\"pay() - end : {}\", total);");
        assert_eq!(spec.bindings, vec!["total"]);
    }

    #[test]
    fn bare_trailing_return_adds_no_exit_binding() {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 60));
        let name = b.add_name(method, Span::new(4, 4), "stop");
        b.set_method_name(method, name);
        let body = b.add_block(method, Span::new(20, 30));
        b.set_method_body(method, body);
        let ret = b.add_statement(body, Span::new(25, 10));
        b.make_return(ret, None);
        let tree = b.build().expect("valid tree");

        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let mut policy = PositionPolicy::default_for(Position::End);
        policy.include.return_value = true;

        let spec = synth.exit_statement(&tree, method, &policy).expect("spec");
        assert_eq!(spec.text, "logger.debug(\"stop() - end\");");
        assert!(spec.bindings.is_empty());
    }

    #[test]
    fn return_statement_binds_the_value() {
        let (tree, method, _, ret) = sample();
        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let mut policy = PositionPolicy::default_for(Position::Return);
        policy.include.return_value = true;

        let spec = synth
            .return_statement(&tree, method, ret, &policy)
            .expect("spec");
        assert_eq!(spec.text, "logger.debug(\"pay() - return : {}\", total);");
        assert_eq!(spec.anchor, Anchor::BeforeStatement(ret));
        assert_eq!(spec.bindings, vec!["total"]);
    }

    #[test]
    fn bare_return_has_no_value_binding() {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 60));
        let name = b.add_name(method, Span::new(4, 4), "stop");
        b.set_method_name(method, name);
        let body = b.add_block(method, Span::new(20, 30));
        b.set_method_body(method, body);
        let ret = b.add_statement(body, Span::new(25, 10));
        b.make_return(ret, None);
        let tree = b.build().expect("valid tree");

        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let mut policy = PositionPolicy::default_for(Position::Return);
        policy.include.return_value = true;

        let spec = synth
            .return_statement(&tree, method, ret, &policy)
            .expect("spec");
        assert_eq!(spec.text, "logger.debug(\"stop() - return\");");
        assert!(spec.bindings.is_empty());
    }

    #[test]
    fn catch_statement_carries_the_throwable() {
        let (tree, method, catch, _) = sample();
        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let policy = PositionPolicy::default_for(Position::Catch);

        let spec = synth
            .catch_statement(&tree, method, catch, &policy)
            .expect("spec");
        assert_eq!(spec.text, "logger.error(\"pay() - e\", e);");
        assert_eq!(spec.level, Level::Error);
        assert_eq!(spec.bindings, vec!["e"]);
        assert!(matches!(spec.anchor, Anchor::BlockStart(_)));
    }

    #[test]
    fn catch_statement_without_exception_flag() {
        let (tree, method, catch, _) = sample();
        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let mut policy = PositionPolicy::default_for(Position::Catch);
        policy.include.exception = false;

        let spec = synth
            .catch_statement(&tree, method, catch, &policy)
            .expect("spec");
        assert_eq!(spec.text, "logger.error(\"pay() - e\");");
        assert!(spec.bindings.is_empty());
    }

    #[test]
    fn jul_catch_uses_the_level_constant() {
        let (tree, method, catch, _) = sample();
        let template = resolved(Framework::Jul);
        let synth = Synthesizer::new(&template, "logger");
        let policy = PositionPolicy::default_for(Position::Catch);

        let spec = synth
            .catch_statement(&tree, method, catch, &policy)
            .expect("spec");
        assert_eq!(spec.text, "logger.log(Level.SEVERE, \"pay() - e\", e);");
    }

    #[test]
    fn variable_statement_is_one_placeholder() {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 40));
        let body = b.add_block(method, Span::new(10, 20));
        b.set_method_body(method, body);
        let _ = b.build().expect("valid tree");

        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let spec = synth.variable_statement(Anchor::BlockEnd(body), "total", Level::Debug);
        assert_eq!(spec.text, "logger.debug(\"{}\", total);");
        assert_eq!(spec.bindings, vec!["total"]);

        let template = resolved(Framework::Jul);
        let synth = Synthesizer::new(&template, "logger");
        let spec = synth.variable_statement(Anchor::BlockEnd(body), "total", Level::Debug);
        assert_eq!(spec.text, "logger.fine(\"{0}\", total);");
    }

    #[test]
    fn declaration_renders_factory_and_imports() {
        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let declaration = synth.logger_declaration("OrderService");
        assert_eq!(
            declaration.text,
            "private static final Logger logger = LoggerFactory.getLogger(OrderService.class);"
        );
        assert_eq!(
            declaration.imports,
            vec!["org.slf4j.Logger", "org.slf4j.LoggerFactory"]
        );
    }

    #[test]
    fn detection_matches_receiver_text_only() {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 100));
        let body = b.add_block(method, Span::new(10, 80));
        b.set_method_body(method, body);
        let logging = b.add_statement(body, Span::new(20, 20));
        let call = b.add_invocation(logging, Span::new(21, 18), Some("logger"), "debug", &["\"x\""]);
        b.make_expression(logging, call);
        let other = b.add_statement(body, Span::new(45, 20));
        let unrelated = b.add_invocation(other, Span::new(46, 18), Some("list"), "add", &["1"]);
        b.make_expression(other, unrelated);
        let plain = b.add_statement(body, Span::new(70, 10));
        let tree = b.build().expect("valid tree");

        assert!(is_log_statement(&tree, logging, "logger"));
        assert!(!is_log_statement(&tree, logging, "log"));
        assert!(!is_log_statement(&tree, other, "logger"));
        assert!(!is_log_statement(&tree, plain, "logger"));
    }

    #[test]
    fn removal_is_direct_only_and_idempotent() {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 200));
        let body = b.add_block(method, Span::new(10, 180));
        b.set_method_body(method, body);
        let first = b.add_statement(body, Span::new(20, 20));
        let call = b.add_invocation(first, Span::new(21, 18), Some("logger"), "debug", &["\"a\""]);
        b.make_expression(first, call);
        b.add_statement(body, Span::new(45, 20));
        let nested_holder = b.add_statement(body, Span::new(70, 60));
        let inner = b.add_block(nested_holder, Span::new(75, 50));
        let hidden = b.add_statement(inner, Span::new(80, 20));
        let hidden_call =
            b.add_invocation(hidden, Span::new(81, 18), Some("logger"), "info", &["\"b\""]);
        b.make_expression(hidden, hidden_call);
        let tree = b.build().expect("valid tree");

        let removals = remove_log_statements(&tree, body, "logger");
        assert_eq!(removals.len(), 1);
        assert_eq!(removals[0].statement, first);
        assert_eq!(removals[0].span, Span::new(20, 20));

        assert_eq!(remove_log_statements(&tree, inner, "other").len(), 0);
    }

    #[test]
    fn logger_declared_checks_fields_by_name() {
        let mut b = TreeBuilder::new();
        let class = b.add_type(None, Span::new(0, 100), "OrderService", &["logger", "total"]);
        let tree = b.build().expect("valid tree");
        assert!(logger_declared(&tree, class, "logger"));
        assert!(!logger_declared(&tree, class, "log"));
    }

    #[test]
    fn println_literal_becomes_the_message() {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 100));
        let body = b.add_block(method, Span::new(10, 80));
        b.set_method_body(method, body);
        let stmt = b.add_statement(body, Span::new(20, 30));
        let call = b.add_invocation(
            stmt,
            Span::new(21, 28),
            Some("System.out"),
            "println",
            &["\"ready\""],
        );
        b.make_expression(stmt, call);
        let tree = b.build().expect("valid tree");

        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let spec = synth
            .replace_system_println(&tree, call, Level::Debug)
            .expect("spec");
        assert_eq!(spec.text, "logger.debug(\"ready\");");
        assert_eq!(spec.anchor, Anchor::ReplaceStatement(stmt));
    }

    #[test]
    fn println_expression_passes_through_verbatim() {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 100));
        let body = b.add_block(method, Span::new(10, 80));
        b.set_method_body(method, body);
        let stmt = b.add_statement(body, Span::new(20, 30));
        let call = b.add_invocation(stmt, Span::new(21, 28), Some("System.err"), "print", &["total"]);
        b.make_expression(stmt, call);
        let tree = b.build().expect("valid tree");

        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        let spec = synth
            .replace_system_println(&tree, call, Level::Warn)
            .expect("spec");
        assert_eq!(spec.text, "logger.warn(total);");
    }

    #[test]
    fn non_console_invocations_are_refused() {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 100));
        let body = b.add_block(method, Span::new(10, 80));
        b.set_method_body(method, body);
        let stmt = b.add_statement(body, Span::new(20, 30));
        let call = b.add_invocation(stmt, Span::new(21, 28), Some("writer"), "println", &["\"x\""]);
        b.make_expression(stmt, call);
        let tree = b.build().expect("valid tree");

        let template = resolved(Framework::Slf4j);
        let synth = Synthesizer::new(&template, "logger");
        assert!(synth
            .replace_system_println(&tree, call, Level::Debug)
            .is_none());
    }

    #[test]
    fn synthesized_statements_start_with_the_logger() {
        let (tree, method, catch, ret) = sample();
        let template = resolved(Framework::Log4j2);
        let synth = Synthesizer::new(&template, "audit");
        let policy = PositionPolicy::default_for(Position::Start);

        for spec in [
            synth.entry_statement(&tree, method, &policy),
            synth.exit_statement(&tree, method, &policy),
            synth.return_statement(&tree, method, ret, &policy),
            synth.catch_statement(&tree, method, catch, &policy),
        ] {
            let spec = spec.expect("spec");
            assert!(spec.text.starts_with("audit."), "{}", spec.text);
        }
    }
}
