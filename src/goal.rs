//! A logic expression to be solved (proven true or false).
//!
//! [Operators](../operator/enum.Operator.html) (And, Or, Not, ...),
//! [built-in predicates](../built_in_predicates/struct.BuiltIn.html)
//! (member, =, findall, ...) and predicate calls (compound terms) are
//! all goals. The solver turns a goal into a
//! [solution node](../solution_node/struct.SolutionNode.html), which
//! produces solutions one at a time.

use std::fmt;

use crate::built_in_predicates::BuiltIn;
use crate::logic_var::{VarMap, VarSupply};
use crate::operator::Operator;
use crate::term::Term;

#[derive(Debug, Clone, PartialEq)]
pub enum Goal {
    /// Holds an [Operator](../operator/enum.Operator.html):
    /// And, Or, Not, Conda, Condu.
    OperatorGoal(Operator),
    /// Holds a built-in predicate, such as member() or findall().
    BuiltInGoal(BuiltIn),
    /// A predicate call. Holds a compound term which is resolved
    /// against the facts and rules of the knowledge base.
    ComplexGoal(Term),  // Must be Term::Compound.
    /// The body of a fact. Nothing to prove.
    Nil,
}

impl Goal {

    /// Recreates logic variables to give them unique ids.
    ///
    /// Clauses stored in the knowledge base keep their variables at
    /// id 0; when a clause is used during resolution, the variables
    /// must be given fresh ids from the query's id supply.
    pub fn recreate_variables(self, vars: &mut VarMap,
                              supply: &VarSupply) -> Goal {
        match self {
            Goal::OperatorGoal(op) => {
                Goal::OperatorGoal(op.recreate_variables(vars, supply))
            },
            Goal::ComplexGoal(term) => {
                Goal::ComplexGoal(term.recreate_variables(vars, supply))
            },
            Goal::BuiltInGoal(bip) => {
                Goal::BuiltInGoal(bip.recreate_variables(vars, supply))
            },
            Goal::Nil => Goal::Nil,
        }
    } // recreate_variables()

    /// Creates a key (= predicate name) for indexing into the
    /// knowledge base: functor + arity, eg. `parent/2`.
    ///
    /// # Panics
    /// * If the goal is not a ComplexGoal.
    pub fn key(&self) -> String {
        match self {
            Goal::ComplexGoal(term) => term.key(),
            _ => { panic!("Goal::key() - \
                           Valid only for ComplexGoal: {}", self); },
        }
    } // key()

    /// Encodes the goal back into term form.
    ///
    /// Operators become compound terms named `and`, `or`, `not`,
    /// `conda`, `condu`; built-ins become compounds over their surface
    /// name. This encoding is what the wire format and the rule-export
    /// path use, and
    /// [resolve_goal()](../resolver/fn.resolve_goal.html) inverts it.
    pub fn to_term(&self) -> Term {
        match self {
            Goal::ComplexGoal(term) => term.clone(),
            Goal::BuiltInGoal(bip) => {
                let mut terms = vec![Term::Atom(bip.name.as_str().to_string())];
                terms.extend(bip.args.iter().cloned());
                Term::Compound(terms)
            },
            Goal::OperatorGoal(op) => {
                let functor = match op {
                    Operator::And(_) => "and",
                    Operator::Or(_) => "or",
                    Operator::Not(_) => "not",
                    Operator::Conda(_) => "conda",
                    Operator::Condu(_) => "condu",
                };
                let mut terms = vec![Term::Atom(functor.to_string())];
                for i in 0..op.len() {
                    terms.push(op.get_subgoal(i).to_term());
                }
                Term::Compound(terms)
            },
            Goal::Nil => Term::Atom("true".to_string()),
        }
    } // to_term()

    /// Flattens a body goal into a list of goal terms.
    ///
    /// A top-level conjunction becomes one term per subgoal; any other
    /// goal becomes a single term. Nil (a fact body) is an empty list.
    pub fn body_terms(&self) -> Vec<Term> {
        match self {
            Goal::Nil => vec![],
            Goal::OperatorGoal(Operator::And(goals)) => {
                goals.iter().map(|g| g.to_term()).collect()
            },
            _ => vec![self.to_term()],
        }
    } // body_terms()

} // impl Goal

// Display trait, to display goals.
impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            Goal::OperatorGoal(operator) => { write!(f, "{}", operator) },
            Goal::ComplexGoal(term) => { write!(f, "{}", term) },
            Goal::BuiltInGoal(pred) => { write!(f, "{}", pred) },
            Goal::Nil => { write!(f, "Nil") },
        } // match
    } // fmt
} // fmt::Display


// test
