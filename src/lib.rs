//! # Sherlog
//!
//! Sherlog is the inference core of a Prolog-style logic programming
//! engine, built to sit under a REPL or a browser-based visualizer: it
//! answers queries *and* hands back a structured trace of the search
//! it performed.
//!
//! ## Briefly
//!
//! Facts and rules are stored in a [knowledge
//! base](knowledge_base/index.html), indexed by predicate. Queries are
//! answered by SLD resolution with full backtracking: goals unify
//! against facts and rule heads, rule bodies are solved depth-first,
//! and solutions stream out lazily, one per pull.
//!
//! A fact means "tom is a parent of mary":
//!
//! <pre>parent(tom, mary).</pre>
//!
//! Variables start with a question mark. A rule with two clauses:
//!
//! <pre>
//! ancestor(?x, ?y) :- parent(?x, ?y).
//! ancestor(?x, ?z) :- parent(?x, ?y), ancestor(?y, ?z).
//! </pre>
//!
//! Running a query:
//!
//! ```
//! use sherlog::*;
//!
//! let kb = KnowledgeBase::new();
//! load_str(&kb, "
//!     parent(tom, mary). parent(tom, bob). parent(mary, ann).
//!     ancestor(?x, ?y) :- parent(?x, ?y).
//!     ancestor(?x, ?z) :- parent(?x, ?y), ancestor(?y, ?z).
//! ").unwrap();
//!
//! let solutions: Vec<_> = kb
//!     .query_str("ancestor(tom, ?d)", QueryOptions::default())
//!     .unwrap()
//!     .collect();
//! assert_eq!(3, solutions.len());
//! assert_eq!("mary", solutions[0]["d"].to_string());
//! ```
//!
//! The knowledge base is safe to share across threads: mutators are
//! serializable, every query runs against a consistent snapshot, and
//! registered watchers are notified of each committed change from a
//! delivery thread.
//!
//! Tracing is per query. With `QueryOptions { trace: true, .. }` the
//! returned [Solutions](query/struct.Solutions.html) handle records a
//! CALL/EXIT/FAIL/REDO log and a parent-linked inference tree, and can
//! export the tree in a node/link form for a UI. Spy points
//! ([spy()](knowledge_base/struct.KnowledgeBase.html#method.spy)) log
//! individual predicates independently of tracing.
//!
//! The `query` binary is a small REPL over this library: it loads a
//! program file and prompts for queries with `?-`.

pub mod error;
pub mod logic_var;
pub mod term;
pub mod substitution_set;
pub mod parse_terms;
pub mod parse_goals;
pub mod operator;
pub mod goal;
pub mod rule;
pub mod resolver;
pub mod built_in_predicates;
pub mod built_in_arithmetic;
pub mod built_in_comparison;
pub mod built_in_lists;
pub mod built_in_types;
pub mod built_in_control;
pub mod built_in_meta;
pub mod knowledge_base;
pub mod context;
pub mod solution_node;
pub mod solution_node_ops;
pub mod reify;
pub mod query;
pub mod trace;
pub mod spy;
pub mod wire;
pub mod load;

#[macro_use]
pub mod macros;

pub use error::*;
pub use logic_var::*;
pub use term::*;
pub use substitution_set::*;
pub use parse_terms::*;
pub use parse_goals::*;
pub use operator::*;
pub use goal::*;
pub use rule::*;
pub use resolver::*;
pub use built_in_predicates::*;
pub use built_in_arithmetic::*;
pub use built_in_comparison::*;
pub use built_in_lists::*;
pub use built_in_types::*;
pub use built_in_control::*;
pub use built_in_meta::*;
pub use knowledge_base::*;
pub use context::*;
pub use solution_node::*;
pub use solution_node_ops::*;
pub use reify::*;
pub use query::*;
pub use trace::*;
pub use spy::*;
pub use wire::*;
pub use load::*;
