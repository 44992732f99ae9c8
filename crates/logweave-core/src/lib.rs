//! Syntax-tree queries and log-statement synthesis for Java sources.
//!
//! The engine takes a method's syntax tree from an external parser,
//! resolves per-position logging policies from layered settings, and
//! produces edit plans (synthesized statement specifications plus
//! removal targets and logger declarations) for an external rewrite
//! applier. It never parses Java itself and never mutates source text.
//!
//! ```
//! use logweave_core::{
//!     MemoryStore, OperationContext, Planner, Span, TemplateRegistry, TreeBuilder, WarningSink,
//! };
//!
//! let mut builder = TreeBuilder::new();
//! let class = builder.add_type(None, Span::new(0, 120), "Greeter", &[]);
//! let method = builder.add_method(Some(class), Span::new(10, 100));
//! let name = builder.add_name(method, Span::new(15, 5), "greet");
//! builder.set_method_name(method, name);
//! let body = builder.add_block(method, Span::new(30, 70));
//! builder.set_method_body(method, body);
//! builder.add_statement(body, Span::new(40, 20));
//! let tree = builder.build()?;
//!
//! let ctx = OperationContext::new(tree, "Greeter.java").with_target(method);
//! let registry = TemplateRegistry::new();
//! let mut sink = WarningSink::new();
//! let plan = Planner::new(&registry).plan_insertions(&ctx, &MemoryStore::new(), &mut sink)?;
//!
//! assert_eq!(plan.insertions[0].text, "logger.debug(\"greet() - start\");");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod plan;
pub mod policy;
pub mod settings;
pub mod span;
pub mod synth;
pub mod template;
pub mod tree;
pub mod warnings;

pub use context::{CancelToken, OperationContext};
pub use plan::{ApplyError, EditPlan, PlanError, Planner, RewriteSink};
pub use policy::{IncludeFlags, Position, PositionPolicy, SkipRules};
pub use settings::{
    LayeredSettings, MemoryStore, SettingsError, SettingsStore, TomlStore, USE_PROJECT_SETTINGS,
};
pub use span::Span;
pub use synth::{Anchor, DeclarationSpec, RemovalSpec, StatementSpec, Synthesizer};
pub use template::{
    Framework, Level, LoggerTemplate, Profile, ProfileError, ResolvedTemplate, TemplateRegistry,
};
pub use tree::{NodeId, ParameterList, SyntaxTree, TreeBuilder, TreeError};
pub use warnings::{Warning, WarningSink};
