//! Logic variable identity and id allocation.
//!
//! A logic variable consists of a name and an id. The id is what matters
//! for identity: two variables with the same name but different ids are
//! different variables. An id of 0 means the variable has not been
//! activated yet. Clauses stored in the knowledge base keep their
//! variables at id 0; when a clause is fetched during resolution, every
//! variable is recreated with a fresh id drawn from the query's
//! [VarSupply](struct.VarSupply.html). See
//! [recreate_variables()](../term/enum.Term.html#method.recreate_variables).

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::EngineError;
use crate::term::Term;

// Global id source, used only for terms built outside of a query
// (macros, tests, the fresh() combinator). Queries rename all input
// variables into their own id space, so these ids never index a
// substitution set directly.
static GLOBAL_VAR_ID: AtomicUsize = AtomicUsize::new(0);

/// Increments and returns the global logic variable id.
pub fn next_id() -> usize {
    GLOBAL_VAR_ID.fetch_add(1, Ordering::Relaxed) + 1
}

/// Resets the global logic variable id to zero. For tests.
pub fn clear_id() {
    GLOBAL_VAR_ID.store(0, Ordering::Relaxed);
}

/// Maps variable names to the ids they were recreated with.
///
/// Used by recreate_variables() so that every occurrence of `?x` within
/// one clause or query receives the same id.
pub type VarMap = HashMap<String, usize>;

/// Per-query id allocator.
///
/// Every query owns one VarSupply. Query variables and the variables of
/// every clause fetched while solving draw their ids from it, so ids are
/// unique within the query and substitution sets stay compact. Queries
/// running concurrently cannot contaminate each other's id space.
#[derive(Debug)]
pub struct VarSupply {
    next: Cell<usize>,
}

impl VarSupply {
    pub fn new() -> Self {
        VarSupply { next: Cell::new(0) }
    }

    /// Allocates the next id. The first id handed out is 1;
    /// 0 is reserved for unactivated variables.
    pub fn next_id(&self) -> usize {
        let id = self.next.get() + 1;
        self.next.set(id);
        id
    }

    /// The highest id allocated so far.
    pub fn current(&self) -> usize {
        self.next.get()
    }
}

impl Default for VarSupply {
    fn default() -> Self {
        VarSupply::new()
    }
}

/// Creates a logic variable from a name, with validation.
///
/// The name is given without the `?` prefix used in surface syntax, and
/// must begin with a letter or an underscore. The variable is created
/// with an id of 0; ids are assigned when the enclosing clause or query
/// is activated.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let x = make_var("x").unwrap();
/// assert_eq!("?x", x.to_string());
/// assert!(make_var("9lives").is_err());
/// ```
pub fn make_var(name: &str) -> Result<Term, EngineError> {
    let trimmed = name.trim();
    let first = match trimmed.chars().next() {
        Some(ch) => ch,
        None => {
            return Err(EngineError::Parse(
                "make_var() - Variable name is empty.".to_string()));
        },
    };
    if !first.is_alphabetic() && first != '_' {
        let err = format!("make_var() - Variable name must start \
                           with a letter: >{}<", trimmed);
        return Err(EngineError::Parse(err));
    }
    Ok(Term::Var { id: 0, name: trimmed.to_string() })
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_var_supply() {
        let supply = VarSupply::new();
        assert_eq!(1, supply.next_id());
        assert_eq!(2, supply.next_id());
        assert_eq!(2, supply.current());
    }

    #[test]
    fn test_make_var() {
        let v = make_var(" who ").unwrap();
        if let Term::Var { id, name } = v {
            assert_eq!(0, id);
            assert_eq!("who", name);
        }
        else { panic!("make_var() should produce a variable."); }

        assert!(make_var("").is_err());
        assert!(make_var("7up").is_err());
    }

} // test
