//! API-level error type.
//!
//! Failure of a goal is never an error. A goal which cannot be proven
//! simply produces no solutions, and the engine backtracks. EngineError
//! covers the cases which must be reported to the caller synchronously:
//! unparsable text, malformed clauses, bad imports.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The text could not be parsed as a term, goal or rule.
    #[error("{0}")]
    Parse(String),
    /// A rule's head or body does not have the expected shape.
    /// The knowledge base rejects the clause; its state is unchanged.
    #[error("malformed clause: {0}")]
    MalformedClause(String),
    /// A term submitted as a goal cannot be resolved into one.
    #[error("malformed goal: {0}")]
    MalformedGoal(String),
    /// Imported data could not be converted back into facts and rules.
    #[error("import failed: {0}")]
    Import(String),
    /// `unwatch()` was called with an id that was never registered.
    #[error("no such watcher: {0}")]
    UnknownWatcher(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
