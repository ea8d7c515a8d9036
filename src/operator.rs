//! Logical operators over goals: And, Or, Not, Conda, Condu.
//!
//! An operator holds a vector of [goals](../goal/enum.Goal.html).
//! And and Or are the ordinary conjunction and disjunction of SLD
//! resolution. Not is negation as failure. Conda and Condu are the
//! soft-cut combinators: they commit to the first operand whose leading
//! test goal succeeds.

use std::fmt;

use crate::goal::Goal;
use crate::logic_var::{VarMap, VarSupply};

/// Defines logical And, Or, etc. An operator holds a vector of goals.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Logical And. All subgoals must succeed; substitutions are
    /// threaded left to right, depth-first.
    And(Vec<Goal>),
    /// Logical Or. The first operand is exhausted before the second
    /// begins.
    Or(Vec<Goal>),
    /// Negation as failure. Succeeds, with no new bindings, when the
    /// single subgoal has no solutions.
    Not(Vec<Goal>),
    /// Soft cut. Each operand is a clause whose first subgoal is its
    /// test. The first clause whose test yields a solution is
    /// committed; later clauses are dropped.
    Conda(Vec<Goal>),
    /// Like Conda, but only the first solution of the committed
    /// clause's test is used.
    Condu(Vec<Goal>),
}

impl Operator {

    /// Splits the operands into head and tail.
    ///
    /// The head is the first [Goal](../goal/enum.Goal.html). The tail
    /// is an Operator of the same variant holding the remaining goals.
    ///
    /// # Panics
    /// * If the operator is not And or Or.
    /// * If there are no operands.
    pub fn split_head_tail(&self) -> (Goal, Operator) {
        match &self {
            Operator::And(op) => {
                if op.is_empty() { panic!("split_head_tail() - No operands."); }
                let mut operands = op.clone();
                let head = operands.remove(0);
                (head, Operator::And(operands))
            },
            Operator::Or(op) => {
                if op.is_empty() { panic!("split_head_tail() - No operands."); }
                let mut operands = op.clone();
                let head = operands.remove(0);
                (head, Operator::Or(operands))
            },
            _ => { panic!("split_head_tail() - \
                           Valid for And and Or operators only."); },
        }
    } // split_head_tail()

    /// Gives logic variables unique ids.
    ///
    /// Clauses in the knowledge base keep their variables at id 0;
    /// when a clause is used, its variables must be recreated.
    pub fn recreate_variables(self, vars: &mut VarMap,
                              supply: &VarSupply) -> Operator {
        match self {
            Operator::And(goals) => {
                Operator::And(recreate_vars_goals(goals, vars, supply))
            },
            Operator::Or(goals) => {
                Operator::Or(recreate_vars_goals(goals, vars, supply))
            },
            Operator::Not(goals) => {
                Operator::Not(recreate_vars_goals(goals, vars, supply))
            },
            Operator::Conda(goals) => {
                Operator::Conda(recreate_vars_goals(goals, vars, supply))
            },
            Operator::Condu(goals) => {
                Operator::Condu(recreate_vars_goals(goals, vars, supply))
            },
        }
    } // recreate_variables()

    /// Counts the number of subgoals in the operator.
    pub fn len(&self) -> usize {
        match self {
            Operator::And(goals) |
            Operator::Or(goals) |
            Operator::Not(goals) |
            Operator::Conda(goals) |
            Operator::Condu(goals) => { goals.len() },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the indexed subgoal from the operator.
    pub fn get_subgoal(&self, index: usize) -> Goal {
        match self {
            Operator::And(goals) |
            Operator::Or(goals) |
            Operator::Not(goals) |
            Operator::Conda(goals) |
            Operator::Condu(goals) => { goals[index].clone() },
        }
    } // get_subgoal()

} // impl Operator

/// Recreates logic variables in a vector of goals.
pub fn recreate_vars_goals(goals: Vec<Goal>, vars: &mut VarMap,
                           supply: &VarSupply) -> Vec<Goal> {
    goals.into_iter()
         .map(|g| g.recreate_variables(vars, supply))
         .collect()
} // recreate_vars_goals()

/// Formats a list of goals for the Display trait.
fn format_list<T>(operands: &[T], separator: &str) -> String
                  where T: std::fmt::Display {
    let mut out = "".to_string();
    let mut first = true;
    for op in operands {
        if first { first = false; }
        else { out += separator; }
        out += &op.to_string();
    }
    out
} // format_list()

// Display trait, to display operators.
impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            Operator::And(goals) => {
                write!(f, "{}", format_list(goals, ", "))
            },
            Operator::Or(goals) => {
                write!(f, "{}", format_list(goals, "; "))
            },
            Operator::Not(goals) => {
                write!(f, "not({})", goals[0])
            },
            Operator::Conda(goals) => {
                write!(f, "conda({})", format_list(goals, "; "))
            },
            Operator::Condu(goals) => {
                write!(f, "condu({})", format_list(goals, "; "))
            },
        } // match
    } // fmt
} // fmt::Display


// test
