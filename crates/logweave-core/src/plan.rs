//! Per-operation planning.
//!
//! The planner walks one method, resolves each position's policy, tests
//! eligibility, and collects synthesized statements into an [`EditPlan`]
//! for the external applier. It owns the operation's control flow:
//! target resolution, the fixed position order, cancellation polling,
//! and the logger-declaration decision.

use tracing::debug;

use crate::context::OperationContext;
use crate::policy::{self, Position};
use crate::settings::SettingsStore;
use crate::synth::{
    self, Anchor, DeclarationSpec, RemovalSpec, StatementSpec, Synthesizer,
};
use crate::template::{Profile, ResolvedTemplate, TemplateRegistry};
use crate::tree::{self, NodeId, SyntaxTree};
use crate::warnings::WarningSink;

/// Positions visited by insertion planning, in fixed order.
const INSERTION_ORDER: [Position; 4] = [
    Position::Start,
    Position::End,
    Position::Return,
    Position::Catch,
];

/// Everything one operation wants changed, for the external applier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPlan {
    /// Logger field declaration, when the unit lacks one.
    pub declaration: Option<DeclarationSpec>,
    /// Statements to insert, in planning order.
    pub insertions: Vec<StatementSpec>,
    /// Statements to delete.
    pub removals: Vec<RemovalSpec>,
    /// Imports the inserted code requires.
    pub imports: Vec<String>,
}

impl EditPlan {
    /// Returns true when the plan changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declaration.is_none() && self.insertions.is_empty() && self.removals.is_empty()
    }
}

/// Why a plan could not be produced.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlanError {
    /// The operation's cancel token was set.
    #[error("operation cancelled")]
    Cancelled,

    /// The requested position cannot take a statement.
    #[error("no insertable position at offset {offset} (length {len})")]
    InvalidInsertionPoint {
        /// Requested offset.
        offset: usize,
        /// Requested selection length.
        len: usize,
    },

    /// The unit has no target method with a body.
    #[error("no method with a body at the selection in '{resource}'")]
    MalformedUnit {
        /// Identifier of the offending unit.
        resource: String,
    },
}

/// Why the external applier rejected one edit.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("edit rejected: {reason}")]
pub struct ApplyError {
    /// Applier-supplied reason.
    pub reason: String,
}

/// The external rewrite applier.
///
/// Implementations materialize a plan into buffers or files; the engine
/// never observes the resulting text. Keeping one writer per unit is the
/// applier's duty.
pub trait RewriteSink {
    /// Applies `plan` to `resource`, answering one result per edit in
    /// plan order: declaration first, then insertions, then removals.
    fn apply(&mut self, resource: &str, plan: &EditPlan) -> Vec<Result<(), ApplyError>>;
}

/// Plans operations against one template registry.
#[derive(Clone, Copy)]
pub struct Planner<'a> {
    registry: &'a TemplateRegistry,
    profile: Option<&'a Profile>,
}

impl<'a> Planner<'a> {
    /// Creates a planner over `registry` with no profile overlay.
    #[must_use]
    pub fn new(registry: &'a TemplateRegistry) -> Self {
        Self {
            registry,
            profile: None,
        }
    }

    /// Overlays `profile` on the configured framework's template.
    #[must_use]
    pub fn with_profile(mut self, profile: &'a Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Plans statement insertions for the target method.
    ///
    /// Positions are visited in the order start, end, return, catch;
    /// each position resolves its policy, tests eligibility, and
    /// synthesizes its candidate statements. A logger declaration and
    /// its imports are appended when the enclosing type does not already
    /// declare the configured logger.
    ///
    /// # Errors
    ///
    /// [`PlanError::MalformedUnit`] when no method with a body covers
    /// the selection, [`PlanError::Cancelled`] when the token is set.
    pub fn plan_insertions(
        &self,
        ctx: &OperationContext,
        settings: &dyn SettingsStore,
        sink: &mut WarningSink,
    ) -> Result<EditPlan, PlanError> {
        debug!(resource = ctx.resource(), "planning insertions");
        let syntax = ctx.tree();
        let method = self.target_method(ctx)?;
        let logger = policy::logger_name(settings);
        let template = self.resolved_template(settings);
        let synthesizer = Synthesizer::new(&template, &logger);

        let mut plan = EditPlan::default();
        for position in INSERTION_ORDER {
            if ctx.cancel().is_cancelled() {
                return Err(PlanError::Cancelled);
            }
            let position_policy = policy::resolve(position, settings);
            if !policy::eligible(&position_policy, syntax, method) {
                debug!(%position, "position not eligible");
                continue;
            }
            match position {
                Position::Start => {
                    plan.insertions
                        .extend(synthesizer.entry_statement(syntax, method, &position_policy));
                }
                Position::End => {
                    plan.insertions
                        .extend(synthesizer.exit_statement(syntax, method, &position_policy));
                }
                Position::Return => {
                    for statement in tree::return_statements(syntax, method) {
                        if ctx.cancel().is_cancelled() {
                            return Err(PlanError::Cancelled);
                        }
                        plan.insertions.extend(synthesizer.return_statement(
                            syntax,
                            method,
                            statement,
                            &position_policy,
                        ));
                    }
                }
                Position::Catch => {
                    for catch in tree::catch_clauses(syntax, method) {
                        if ctx.cancel().is_cancelled() {
                            return Err(PlanError::Cancelled);
                        }
                        match synthesizer.catch_statement(syntax, method, catch, &position_policy)
                        {
                            Some(spec) => plan.insertions.push(spec),
                            None => sink.push_for(
                                "catch clause has no handler block",
                                ctx.resource(),
                            ),
                        }
                    }
                }
                Position::Other => {}
            }
        }

        self.attach_declaration(ctx, method, &synthesizer, &logger, &mut plan, sink);
        debug!(
            insertions = plan.insertions.len(),
            declared = plan.declaration.is_some(),
            "insertion plan ready"
        );
        Ok(plan)
    }

    /// Plans removal of the log statements directly in the target
    /// method's body.
    ///
    /// Log statements inside nested blocks stay and are reported as a
    /// warning, matching the detector's direct-statements-only scope.
    ///
    /// # Errors
    ///
    /// [`PlanError::MalformedUnit`] when no method with a body covers
    /// the selection, [`PlanError::Cancelled`] when the token is set.
    pub fn plan_removals(
        &self,
        ctx: &OperationContext,
        settings: &dyn SettingsStore,
        sink: &mut WarningSink,
    ) -> Result<EditPlan, PlanError> {
        debug!(resource = ctx.resource(), "planning removals");
        if ctx.cancel().is_cancelled() {
            return Err(PlanError::Cancelled);
        }
        let syntax = ctx.tree();
        let method = self.target_method(ctx)?;
        let Some(body) = syntax.method(method).and_then(|data| data.body) else {
            return Err(PlanError::MalformedUnit {
                resource: ctx.resource().to_string(),
            });
        };
        let logger = policy::logger_name(settings);

        let removals = synth::remove_log_statements(syntax, body, &logger);
        let nested = nested_log_statements(syntax, body, &logger);
        if nested > 0 {
            sink.push_for(
                &format!("{nested} log statement(s) in nested blocks left in place"),
                ctx.resource(),
            );
        }

        debug!(removals = removals.len(), "removal plan ready");
        Ok(EditPlan {
            removals,
            ..EditPlan::default()
        })
    }

    /// Plans one statement at an explicit position.
    ///
    /// The statement uses the fallback position policy for level and
    /// message; an explicit request does not consult the enabled flag.
    /// With `variable` set, the message is a single placeholder bound to
    /// that variable.
    ///
    /// # Errors
    ///
    /// [`PlanError::InvalidInsertionPoint`] when `offset + len` falls
    /// strictly inside a statement or outside every block,
    /// [`PlanError::MalformedUnit`] when no method with a body covers
    /// the position, [`PlanError::Cancelled`] when the token is set.
    pub fn plan_at(
        &self,
        ctx: &OperationContext,
        settings: &dyn SettingsStore,
        offset: usize,
        len: usize,
        variable: Option<&str>,
        sink: &mut WarningSink,
    ) -> Result<EditPlan, PlanError> {
        debug!(resource = ctx.resource(), offset, len, "planning at explicit position");
        if ctx.cancel().is_cancelled() {
            return Err(PlanError::Cancelled);
        }
        let syntax = ctx.tree();
        if !tree::is_valid_insertion_point(syntax, offset, len) {
            return Err(PlanError::InvalidInsertionPoint { offset, len });
        }
        let method = tree::enclosing_method(syntax, offset, len).ok_or_else(|| {
            PlanError::MalformedUnit {
                resource: ctx.resource().to_string(),
            }
        })?;
        let anchor = anchor_at(syntax, offset + len).ok_or(PlanError::InvalidInsertionPoint {
            offset,
            len,
        })?;

        let logger = policy::logger_name(settings);
        let template = self.resolved_template(settings);
        let synthesizer = Synthesizer::new(&template, &logger);
        let position_policy = policy::resolve(Position::Other, settings);

        let spec = match variable {
            Some(variable) => {
                synthesizer.variable_statement(anchor, variable, position_policy.level)
            }
            None => {
                let name = syntax.method_name(method).unwrap_or("unknown");
                let message = if position_policy.message.is_empty() {
                    format!("{name}()")
                } else {
                    format!("{name}() - {}", position_policy.message)
                };
                synthesizer.message_statement(anchor, &message, position_policy.level)
            }
        };

        let mut plan = EditPlan {
            insertions: vec![spec],
            ..EditPlan::default()
        };
        self.attach_declaration(ctx, method, &synthesizer, &logger, &mut plan, sink);
        Ok(plan)
    }

    fn target_method(&self, ctx: &OperationContext) -> Result<NodeId, PlanError> {
        let syntax = ctx.tree();
        let selection = ctx.selection();
        let method = ctx
            .target()
            .or_else(|| tree::enclosing_method(syntax, selection.offset, selection.len))
            .ok_or_else(|| PlanError::MalformedUnit {
                resource: ctx.resource().to_string(),
            })?;
        if syntax.method(method).and_then(|data| data.body).is_none() {
            return Err(PlanError::MalformedUnit {
                resource: ctx.resource().to_string(),
            });
        }
        Ok(method)
    }

    fn resolved_template(&self, settings: &dyn SettingsStore) -> ResolvedTemplate {
        let framework = policy::framework(settings);
        ResolvedTemplate::overlay(self.registry.get(framework), self.profile)
    }

    /// Appends the logger declaration when the plan inserts statements
    /// and the enclosing type does not already declare the logger.
    fn attach_declaration(
        &self,
        ctx: &OperationContext,
        method: NodeId,
        synthesizer: &Synthesizer<'_>,
        logger: &str,
        plan: &mut EditPlan,
        sink: &mut WarningSink,
    ) {
        if plan.insertions.is_empty() {
            return;
        }
        let syntax = ctx.tree();
        match tree::enclosing_type(syntax, method) {
            Some(class) => {
                if !synth::logger_declared(syntax, class, logger) {
                    let class_name = syntax.type_name(class).unwrap_or("unknown");
                    let declaration = synthesizer.logger_declaration(class_name);
                    plan.imports = declaration.imports.clone();
                    plan.declaration = Some(declaration);
                }
            }
            None => sink.push_for(
                "logger declaration skipped: no enclosing type",
                ctx.resource(),
            ),
        }
    }
}

/// Anchor for an insertion at `position`: before the first statement
/// starting at or after it, else at the block end.
fn anchor_at(syntax: &SyntaxTree, position: usize) -> Option<Anchor> {
    let block = tree::innermost_block(syntax, position)?;
    let data = syntax.block(block)?;
    let following = data.statements.iter().copied().find(|id| {
        syntax
            .get(*id)
            .map(|node| node.span().offset >= position)
            .unwrap_or(false)
    });
    Some(match following {
        Some(statement) => Anchor::BeforeStatement(statement),
        None => Anchor::BlockEnd(block),
    })
}

/// Counts log statements that sit in blocks nested below `block`.
fn nested_log_statements(syntax: &SyntaxTree, block: NodeId, logger: &str) -> usize {
    let direct: Vec<NodeId> = syntax
        .block(block)
        .map(|data| data.statements.clone())
        .unwrap_or_default();
    tree::descendants(syntax, block)
        .into_iter()
        .filter(|id| !direct.contains(id))
        .filter(|id| synth::is_log_statement(syntax, *id, logger))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;
    use crate::span::Span;
    use crate::tree::TreeBuilder;

    /// `class OrderService { int pay(String from) { try {..} catch (E e) {..}; return total; } }`
    fn unit(with_logger_field: bool) -> (SyntaxTree, NodeId) {
        let fields: &[&str] = if with_logger_field { &["logger"] } else { &[] };
        let mut b = TreeBuilder::new();
        let class = b.add_type(None, Span::new(0, 300), "OrderService", fields);
        let method = b.add_method(Some(class), Span::new(10, 250));
        let name = b.add_name(method, Span::new(14, 3), "pay");
        b.set_method_name(method, name);
        b.add_parameter(method, "String", "from");
        let ret_ty = b.add_type(Some(method), Span::new(10, 3), "int", &[]);
        b.set_method_return(method, ret_ty);
        let body = b.add_block(method, Span::new(40, 200));
        b.set_method_body(method, body);

        let tri = b.add_statement(body, Span::new(50, 120));
        let catch = b.add_catch(tri, Span::new(120, 48), Some("e"));
        let handler = b.add_block(catch, Span::new(130, 36));
        b.set_catch_body(catch, handler);
        let ret = b.add_statement(body, Span::new(180, 30));
        b.make_return(ret, Some("total"));

        (b.build().expect("valid tree"), method)
    }

    fn registry() -> TemplateRegistry {
        TemplateRegistry::new()
    }

    #[test]
    fn default_plan_covers_start_end_and_catch() {
        let (tree, method) = unit(false);
        let ctx = OperationContext::new(tree, "OrderService.java").with_target(method);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();

        let plan = planner
            .plan_insertions(&ctx, &MemoryStore::new(), &mut sink)
            .expect("plan");

        assert_eq!(plan.insertions.len(), 3);
        assert_eq!(plan.insertions[0].text, "logger.debug(\"pay() - start\");");
        assert_eq!(plan.insertions[1].text, "logger.debug(\"pay() - end\");");
        assert_eq!(plan.insertions[2].text, "logger.error(\"pay() - e\", e);");
        assert!(!sink.has_warnings());

        let declaration = plan.declaration.expect("declaration");
        assert!(declaration.text.contains("LoggerFactory.getLogger(OrderService.class)"));
        assert_eq!(plan.imports, declaration.imports);
    }

    #[test]
    fn declared_logger_suppresses_the_declaration() {
        let (tree, method) = unit(true);
        let ctx = OperationContext::new(tree, "OrderService.java").with_target(method);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();

        let plan = planner
            .plan_insertions(&ctx, &MemoryStore::new(), &mut sink)
            .expect("plan");
        assert!(plan.declaration.is_none());
        assert!(plan.imports.is_empty());
    }

    #[test]
    fn enabling_returns_orders_them_before_catches() {
        let (tree, method) = unit(false);
        let ctx = OperationContext::new(tree, "OrderService.java").with_target(method);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();
        let settings = MemoryStore::new().with("return.enabled", "true");

        let plan = planner
            .plan_insertions(&ctx, &settings, &mut sink)
            .expect("plan");
        assert_eq!(plan.insertions.len(), 4);
        assert!(plan.insertions[2].text.contains("- return"));
        assert!(plan.insertions[3].text.contains("- e"));
    }

    #[test]
    fn end_flag_binds_the_trailing_return_value() {
        let (tree, method) = unit(false);
        let ctx = OperationContext::new(tree, "OrderService.java").with_target(method);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();
        let settings = MemoryStore::new().with("end.include.return_value", "true");

        let plan = planner
            .plan_insertions(&ctx, &settings, &mut sink)
            .expect("plan");
        assert_eq!(plan.insertions[1].text, "logger.debug(\"pay() - end : {}\", total);");
        assert_eq!(plan.insertions[1].bindings, vec!["total"]);
    }

    #[test]
    fn skip_rule_drops_only_its_position() {
        let mut b = TreeBuilder::new();
        let class = b.add_type(None, Span::new(0, 200), "Order", &[]);
        let method = b.add_method(Some(class), Span::new(10, 150));
        let name = b.add_name(method, Span::new(14, 8), "getTotal");
        b.set_method_name(method, name);
        let ret_ty = b.add_type(Some(method), Span::new(10, 3), "int", &[]);
        b.set_method_return(method, ret_ty);
        let body = b.add_block(method, Span::new(40, 100));
        b.set_method_body(method, body);
        b.add_statement(body, Span::new(50, 20));
        let tree = b.build().expect("valid tree");

        let ctx = OperationContext::new(tree, "Order.java").with_target(method);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();
        let settings = MemoryStore::new().with("start.skip.getters", "true");

        let plan = planner
            .plan_insertions(&ctx, &settings, &mut sink)
            .expect("plan");
        assert_eq!(plan.insertions.len(), 1);
        assert_eq!(plan.insertions[0].text, "logger.debug(\"getTotal() - end\");");
    }

    #[test]
    fn preset_cancel_token_stops_planning() {
        let (tree, method) = unit(false);
        let ctx = OperationContext::new(tree, "OrderService.java").with_target(method);
        ctx.cancel().cancel();
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();

        let err = planner
            .plan_insertions(&ctx, &MemoryStore::new(), &mut sink)
            .expect_err("cancelled");
        assert_eq!(err, PlanError::Cancelled);
    }

    #[test]
    fn selection_outside_any_method_is_malformed() {
        let (tree, _) = unit(false);
        let ctx = OperationContext::new(tree, "OrderService.java").with_selection(2, 0);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();

        let err = planner
            .plan_insertions(&ctx, &MemoryStore::new(), &mut sink)
            .expect_err("malformed");
        assert_eq!(
            err,
            PlanError::MalformedUnit {
                resource: "OrderService.java".to_string()
            }
        );
    }

    #[test]
    fn bodyless_target_is_malformed() {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 40));
        let tree = b.build().expect("valid tree");
        let ctx = OperationContext::new(tree, "Iface.java").with_target(method);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();

        let err = planner
            .plan_removals(&ctx, &MemoryStore::new(), &mut sink)
            .expect_err("malformed");
        assert!(matches!(err, PlanError::MalformedUnit { .. }));
    }

    #[test]
    fn selection_resolves_the_method_without_a_target() {
        let (tree, _) = unit(false);
        let ctx = OperationContext::new(tree, "OrderService.java").with_selection(60, 5);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();

        let plan = planner
            .plan_insertions(&ctx, &MemoryStore::new(), &mut sink)
            .expect("plan");
        assert!(!plan.insertions.is_empty());
    }

    #[test]
    fn removal_plan_reports_nested_leftovers() {
        let mut b = TreeBuilder::new();
        let class = b.add_type(None, Span::new(0, 300), "Order", &[]);
        let method = b.add_method(Some(class), Span::new(10, 250));
        let name = b.add_name(method, Span::new(14, 3), "run");
        b.set_method_name(method, name);
        let body = b.add_block(method, Span::new(40, 200));
        b.set_method_body(method, body);

        let direct = b.add_statement(body, Span::new(50, 30));
        let call = b.add_invocation(direct, Span::new(51, 28), Some("logger"), "debug", &["\"a\""]);
        b.make_expression(direct, call);

        let holder = b.add_statement(body, Span::new(90, 100));
        let inner = b.add_block(holder, Span::new(95, 90));
        let nested = b.add_statement(inner, Span::new(100, 30));
        let nested_call =
            b.add_invocation(nested, Span::new(101, 28), Some("logger"), "info", &["\"b\""]);
        b.make_expression(nested, nested_call);
        let tree = b.build().expect("valid tree");

        let ctx = OperationContext::new(tree, "Order.java").with_target(method);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();

        let plan = planner
            .plan_removals(&ctx, &MemoryStore::new(), &mut sink)
            .expect("plan");
        assert_eq!(plan.removals.len(), 1);
        assert_eq!(plan.removals[0].statement, direct);
        assert!(sink.has_warnings());
        assert!(sink.warnings()[0].message.contains("nested"));

        // A second pass over a block with nothing left plans nothing.
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 100));
        let body = b.add_block(method, Span::new(10, 80));
        b.set_method_body(method, body);
        b.add_statement(body, Span::new(20, 20));
        let tree = b.build().expect("valid tree");
        let ctx = OperationContext::new(tree, "Order.java").with_target(method);
        let mut sink = WarningSink::new();
        let plan = planner
            .plan_removals(&ctx, &MemoryStore::new(), &mut sink)
            .expect("plan");
        assert!(plan.removals.is_empty());
        assert!(!sink.has_warnings());
    }

    #[test]
    fn explicit_position_inserts_between_statements() {
        let (tree, method) = unit(false);
        let ctx = OperationContext::new(tree, "OrderService.java").with_target(method);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();

        // Between the try statement and the return statement.
        let plan = planner
            .plan_at(&ctx, &MemoryStore::new(), 175, 0, None, &mut sink)
            .expect("plan");
        assert_eq!(plan.insertions.len(), 1);
        assert_eq!(plan.insertions[0].text, "logger.debug(\"pay()\");");
        assert!(matches!(
            plan.insertions[0].anchor,
            Anchor::BeforeStatement(_)
        ));

        // After the last statement.
        let plan = planner
            .plan_at(&ctx, &MemoryStore::new(), 220, 0, Some("total"), &mut sink)
            .expect("plan");
        assert_eq!(plan.insertions[0].text, "logger.debug(\"{}\", total);");
        assert!(matches!(plan.insertions[0].anchor, Anchor::BlockEnd(_)));
    }

    #[test]
    fn explicit_position_inside_a_statement_is_refused() {
        let (tree, method) = unit(false);
        let ctx = OperationContext::new(tree, "OrderService.java").with_target(method);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();

        let err = planner
            .plan_at(&ctx, &MemoryStore::new(), 60, 0, None, &mut sink)
            .expect_err("refused");
        assert_eq!(err, PlanError::InvalidInsertionPoint { offset: 60, len: 0 });
    }

    #[test]
    fn rootless_method_warns_about_the_declaration() {
        let mut b = TreeBuilder::new();
        let method = b.add_method(None, Span::new(0, 100));
        let name = b.add_name(method, Span::new(4, 3), "run");
        b.set_method_name(method, name);
        let body = b.add_block(method, Span::new(20, 70));
        b.set_method_body(method, body);
        b.add_statement(body, Span::new(30, 20));
        let tree = b.build().expect("valid tree");

        let ctx = OperationContext::new(tree, "Lone.java").with_target(method);
        let registry = registry();
        let planner = Planner::new(&registry);
        let mut sink = WarningSink::new();

        let plan = planner
            .plan_insertions(&ctx, &MemoryStore::new(), &mut sink)
            .expect("plan");
        assert!(plan.declaration.is_none());
        assert!(sink.has_warnings());
        assert!(sink.warnings()[0].message.contains("no enclosing type"));
    }

    #[test]
    fn profile_overlay_reaches_the_rendered_text() {
        let (tree, method) = unit(false);
        let ctx = OperationContext::new(tree, "OrderService.java").with_target(method);
        let registry = registry();
        let mut profile = Profile::user("house");
        profile
            .set("statement", "${logger}.${level}(/* audited */ ${message});")
            .expect("writable");
        let planner = Planner::new(&registry).with_profile(&profile);
        let mut sink = WarningSink::new();

        let plan = planner
            .plan_insertions(&ctx, &MemoryStore::new(), &mut sink)
            .expect("plan");
        assert!(plan.insertions[0].text.contains("/* audited */"));
    }
}
