//! Turns goal terms into [Goal](../goal/enum.Goal.html)s.
//!
//! The query API and rule bodies traffic in plain terms; resolve_goal()
//! decides what each term means. Built-in predicates are recognized by
//! functor and arity and shadow knowledge base entries of the same
//! name. The functors `and`, `or`, `not`, `conda` and `condu` build
//! operators, so every goal has a term encoding (the inverse of
//! [Goal::to_term()](../goal/enum.Goal.html#method.to_term)). Anything
//! else is a predicate call against the knowledge base.

use crate::built_in_predicates::make_builtin;
use crate::error::EngineError;
use crate::goal::Goal;
use crate::logic_var::next_id;
use crate::operator::Operator;
use crate::term::Term;

/// Builds a goal from a goal term.
///
/// * `and(g1, g2, ...)`, `or(...)` - conjunction / disjunction
/// * `not(g)` - negation as failure
/// * `conda(c1, c2, ...)`, `condu(...)` - soft cut over clause terms
/// * a built-in functor/arity - the built-in predicate
/// * any other compound or atom - a predicate call
///
/// Returns MalformedGoal for terms which cannot be a goal (numbers,
/// strings, lists, unbound variables).
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let term = parse_term("parent(tom, ?x)").unwrap();
/// let goal = resolve_goal(&term).unwrap();
/// assert_eq!("parent(tom, ?x)", goal.to_string());
/// ```
pub fn resolve_goal(term: &Term) -> Result<Goal, EngineError> {

    match term {

        Term::Atom(name) => {
            // Zero-arity goal, eg. `true`, `fail`, `!`.
            if let Some(bip) = make_builtin(name, &[]) {
                return Ok(Goal::BuiltInGoal(bip));
            }
            Ok(Goal::ComplexGoal(Term::Compound(vec![term.clone()])))
        },

        Term::Compound(terms) => {

            let functor = match &terms[0] {
                Term::Atom(s) => s.as_str(),
                other => {
                    let err = format!("resolve_goal() - \
                        Functor must be an atom: {}", other);
                    return Err(EngineError::MalformedGoal(err));
                },
            };
            let args = &terms[1..];

            match functor {
                "and" | "or" | "conda" | "condu" => {
                    let mut goals: Vec<Goal> = Vec::with_capacity(args.len());
                    for arg in args {
                        goals.push(resolve_goal(arg)?);
                    }
                    if goals.is_empty() {
                        let err = format!("resolve_goal() - \
                            Operator has no operands: {}", term);
                        return Err(EngineError::MalformedGoal(err));
                    }
                    let op = match functor {
                        "and" => Operator::And(goals),
                        "or" => Operator::Or(goals),
                        "conda" => Operator::Conda(goals),
                        _ => Operator::Condu(goals),
                    };
                    Ok(Goal::OperatorGoal(op))
                },
                "not" => {
                    if args.len() != 1 {
                        let err = format!("resolve_goal() - \
                            not/1 takes one goal: {}", term);
                        return Err(EngineError::MalformedGoal(err));
                    }
                    let inner = resolve_goal(&args[0])?;
                    Ok(Goal::OperatorGoal(Operator::Not(vec![inner])))
                },
                _ => {
                    if let Some(bip) = make_builtin(functor, args) {
                        return Ok(Goal::BuiltInGoal(bip));
                    }
                    Ok(Goal::ComplexGoal(term.clone()))
                },
            }
        },

        _ => {
            let err = format!("resolve_goal() - Not a goal: {}", term);
            Err(EngineError::MalformedGoal(err))
        },

    } // match

} // resolve_goal()

/// Produces a compound term from a vector of terms, with validation.
/// The first term must be an atom (the functor).
///
/// # Panics
/// * If the vector is empty.
/// * If the first term is not an atom.
pub fn make_compound(terms: Vec<Term>) -> Term {
    if terms.is_empty() { panic!("make_compound() - Vector is empty."); }
    match &terms[0] {
        Term::Atom(_) => {},
        _ => { panic!("make_compound() - First term must be an atom."); },
    }
    Term::Compound(terms)
} // make_compound()

/// Allocates `n` fresh logic variables and hands them to a goal
/// builder. Enables variable introduction in programmatically built
/// rules and meta-goals.
///
/// The variables receive unique names (`_g1`, `_g2`, ...), so they
/// remain distinct when the surrounding clause or query is renamed.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// // parent(tom, ?_g) for some fresh ?_g
/// let goal = fresh(1, |vars| {
///     Goal::ComplexGoal(compound!(atom!("parent"), atom!("tom"),
///                                 vars[0].clone()))
/// });
/// ```
pub fn fresh<F>(n: usize, body: F) -> Goal
               where F: FnOnce(&[Term]) -> Goal {
    let vars: Vec<Term> = (0..n).map(|_| {
        let id = next_id();
        Term::Var { id: 0, name: format!("_g{}", id) }
    }).collect();
    body(&vars)
} // fresh()


// test
