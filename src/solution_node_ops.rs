//! Solution nodes for the logical operators: And, Or, Not, Conda and
//! Condu.
//!
//! These functions are called by
//! [next_solution()](../solution_node/fn.next_solution.html) in
//! solution_node.rs. Borrows of a node are always released before
//! recursing into another node, so a cut firing deep in the tree can
//! reach its ancestors safely.

use std::rc::Rc;
use std::cell::RefCell;

use crate::goal::Goal;
use crate::operator::Operator;
use crate::solution_node::*;
use crate::substitution_set::SubstitutionSet;

/// Finds the next solution of an And node.
///
/// The head operand's solutions are threaded through the remaining
/// operands, left to right, depth-first. The active tail is drained
/// before a new head solution is pulled.
pub fn next_solution_and(sn: Rc<RefCell<SolutionNode>>)
                         -> Option<Rc<SubstitutionSet>> {

    // Drain the tail first: these are choice points downstream of the
    // head's current solution.
    let tail = sn.borrow().tail_sn.clone();
    if let Some(tail_sn) = tail {
        if let Some(ss) = next_solution(tail_sn) { return Some(ss); }
        sn.borrow_mut().tail_sn = None;
    }

    loop {

        // A cut in the tail forbids new head solutions.
        if sn.borrow().no_alternatives { return None; }

        let head = sn.borrow().head_sn.clone();
        let solution = match head {
            None => { return None; },
            Some(head_sn) => next_solution(head_sn),
        };

        match solution {
            None => { return None; },
            Some(ss) => {
                let (tail_opt, ctx) = {
                    let node = sn.borrow();
                    (node.operator_tail.clone(), Rc::clone(&node.ctx))
                };
                match tail_opt {
                    None => { return Some(ss); },
                    Some(tail) => {
                        if tail.len() == 0 { return Some(ss); }
                        let tail_goal = Goal::OperatorGoal(tail);
                        let tail_sn = make_solution_node(
                            Rc::new(tail_goal), ctx, ss,
                            Some(Rc::clone(&sn)));
                        sn.borrow_mut().tail_sn = Some(Rc::clone(&tail_sn));
                        if let Some(ss) = next_solution(tail_sn) {
                            return Some(ss);
                        }
                        sn.borrow_mut().tail_sn = None;
                    },
                } // match
            },
        } // match solution

    } // loop

} // next_solution_and()

/// Finds the next solution of an Or node.
///
/// The first operand is exhausted before the second begins, so answer
/// order is deterministic.
pub fn next_solution_or(sn: Rc<RefCell<SolutionNode>>)
                        -> Option<Rc<SubstitutionSet>> {

    // Once the tail node exists, it covers all remaining branches.
    let tail = sn.borrow().tail_sn.clone();
    if let Some(tail_sn) = tail {
        return next_solution(tail_sn);
    }

    let head = sn.borrow().head_sn.clone();
    match head {
        None => { return None; },
        Some(head_sn) => {
            if let Some(ss) = next_solution(head_sn) { return Some(ss); }
        },
    }

    // A cut in the first branch forbids the remaining branches.
    if sn.borrow().no_alternatives { return None; }

    let (tail_opt, ctx, ss) = {
        let node = sn.borrow();
        (node.operator_tail.clone(), Rc::clone(&node.ctx),
         Rc::clone(&node.ss))
    };
    match tail_opt {
        None => None,
        Some(tail) => {
            if tail.len() == 0 { return None; }
            let tail_goal = Goal::OperatorGoal(tail);
            let tail_sn = make_solution_node(Rc::new(tail_goal), ctx, ss,
                                             Some(Rc::clone(&sn)));
            sn.borrow_mut().tail_sn = Some(Rc::clone(&tail_sn));
            next_solution(tail_sn)
        },
    }

} // next_solution_or()

/// Finds the solution of a Not node: negation as failure.
///
/// Succeeds exactly once, with the original substitution, when the
/// inner goal has no solutions. No bindings escape the sub-proof.
pub fn next_solution_not(sn: Rc<RefCell<SolutionNode>>)
                         -> Option<Rc<SubstitutionSet>> {

    {
        let mut node = sn.borrow_mut();
        if !node.more_solutions { return None; }
        node.more_solutions = false;
    }

    let (inner, ss) = {
        let node = sn.borrow();
        (node.head_sn.clone(), Rc::clone(&node.ss))
    };
    match inner {
        Some(inner_sn) => {
            match next_solution(inner_sn) {
                Some(_) => None,
                None => Some(ss),
            }
        },
        None => None,
    }

} // next_solution_not()

/// Finds the next solution of a Conda (soft cut) node; with `unique`,
/// of a Condu node.
///
/// Operands are clauses. The test of a clause is its first subgoal.
/// The first clause whose test yields a solution is committed; later
/// clauses are dropped. Within the committed clause, conda threads
/// every test solution through the remainder, while condu keeps only
/// the first test solution.
pub fn next_solution_conda(sn: Rc<RefCell<SolutionNode>>,
                           unique: bool)
                           -> Option<Rc<SubstitutionSet>> {

    // Drain the committed clause's remainder.
    let tail = sn.borrow().tail_sn.clone();
    if let Some(tail_sn) = tail {
        if let Some(ss) = next_solution(tail_sn) { return Some(ss); }
        sn.borrow_mut().tail_sn = None;
    }

    let operands = {
        let node = sn.borrow();
        match &*node.goal {
            Goal::OperatorGoal(Operator::Conda(goals)) |
            Goal::OperatorGoal(Operator::Condu(goals)) => goals.clone(),
            _ => { panic!("next_solution_conda() - Not a conda goal."); },
        }
    };

    loop {

        if sn.borrow().no_alternatives { return None; }
        let committed = sn.borrow().committed;

        if committed {
            if unique { return None; }
            let head = sn.borrow().head_sn.clone();
            let solution = match head {
                None => { return None; },
                Some(test_sn) => next_solution(test_sn),
            };
            match solution {
                None => { return None; },
                Some(ss) => {
                    if let Some(result) = conda_remainder(&sn, ss) {
                        return Some(result);
                    }
                },
            }
        }
        else {
            let index = sn.borrow().clause_index;
            if index >= operands.len() { return None; }
            sn.borrow_mut().clause_index = index + 1;

            let clause = operands[index].clone();
            let (test, rest) = match clause {
                Goal::OperatorGoal(op) => {
                    match op {
                        Operator::And(_) => op.split_head_tail(),
                        other => {
                            (Goal::OperatorGoal(other),
                             Operator::And(vec![]))
                        },
                    }
                },
                other => (other, Operator::And(vec![])),
            };

            let (ctx, ss0) = {
                let node = sn.borrow();
                (Rc::clone(&node.ctx), Rc::clone(&node.ss))
            };
            // Tests are meta-calls: a cut inside a test stays inside.
            let test_sn = make_meta_node(Rc::new(test), ctx, ss0,
                                         Rc::clone(&sn));
            match next_solution(Rc::clone(&test_sn)) {
                None => { continue; },
                Some(ss) => {
                    {
                        let mut node = sn.borrow_mut();
                        node.committed = true;
                        node.head_sn = Some(test_sn);
                        node.operator_tail = Some(rest);
                    }
                    if let Some(result) = conda_remainder(&sn, ss) {
                        return Some(result);
                    }
                },
            }
        }

    } // loop

} // next_solution_conda()

// Builds and pulls the committed clause's remainder under one test
// solution. Returns None when the remainder has no solutions there.
fn conda_remainder(sn: &Rc<RefCell<SolutionNode>>,
                   ss: Rc<SubstitutionSet>)
                   -> Option<Rc<SubstitutionSet>> {

    let (tail_opt, ctx) = {
        let node = sn.borrow();
        (node.operator_tail.clone(), Rc::clone(&node.ctx))
    };
    match tail_opt {
        None => Some(ss),
        Some(tail) => {
            if tail.len() == 0 { return Some(ss); }
            let tail_goal = Goal::OperatorGoal(tail);
            let tail_sn = make_solution_node(Rc::new(tail_goal), ctx, ss,
                                             Some(Rc::clone(sn)));
            sn.borrow_mut().tail_sn = Some(Rc::clone(&tail_sn));
            let solution = next_solution(tail_sn);
            if solution.is_none() { sn.borrow_mut().tail_sn = None; }
            solution
        },
    }

} // conda_remainder()
