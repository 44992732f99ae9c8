//! # logweave
//!
//! Policy-driven logging-statement automation for Java sources.
//!
//! This is the main facade crate: it re-exports the core engine and adds
//! batch driving over many compilation units.
//!
//! ## Quick start
//!
//! ```
//! use logweave::batch::{BatchRunner, BatchStatus};
//! use logweave::context::OperationContext;
//! use logweave::plan::Planner;
//! use logweave::settings::MemoryStore;
//! use logweave::span::Span;
//! use logweave::template::TemplateRegistry;
//! use logweave::tree::TreeBuilder;
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
//! let registry = TemplateRegistry::new();
//! let settings = MemoryStore::new();
//! let runner = BatchRunner::new(Planner::new(&registry), &settings);
//! let result = runner.run(vec![
//!     OperationContext::new(tree, "Greeter.java").with_target(method),
//! ]);
//!
//! assert_eq!(result.status, BatchStatus::Completed);
//! let plan = result.outcomes[0].result.as_ref().map_err(|e| e.to_string())?;
//! assert_eq!(plan.insertions[0].text, "logger.debug(\"greet() - start\");");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Plans describe edits; they change no text themselves. Hand them to a
//! [`RewriteSink`] implementation (or [`BatchRunner::run_with_applier`])
//! to materialize them.

#![forbid(unsafe_code)]

pub use logweave_core::*;

pub mod batch;

pub use batch::{BatchOperation, BatchResult, BatchRunner, BatchStatus, UnitOutcome};
