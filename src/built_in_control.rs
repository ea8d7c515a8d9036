//! Control built-ins: between/3, once/1, if/3.
//!
//! once and if are meta-calls: their goal arguments are terms which
//! are resolved and solved in a sub-proof. Sub-proofs are rooted
//! (no parent node), so a cut inside them is local.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::resolver::resolve_goal;
use crate::solution_node::{make_meta_node, next_solution, SolutionNode};
use crate::substitution_set::{walk, SubstitutionSet};
use crate::term::Term;

/// between/3: `between(low, high, x)`.
///
/// With a ground x, a bounds check; with an unbound x, enumerates
/// low..=high on backtracking. `between(5, 3, ?x)` yields nothing.
pub fn next_between(args: &[Term], ss: &Rc<SubstitutionSet>,
                    index: &mut usize) -> Option<Rc<SubstitutionSet>> {

    let low = match walk(&args[0], ss) {
        Term::SInt(i) => *i,
        _ => { return None; },
    };
    let high = match walk(&args[1], ss) {
        Term::SInt(i) => *i,
        _ => { return None; },
    };

    match walk(&args[2], ss) {
        Term::SInt(v) => {
            if *index > 0 { return None; }
            *index = 1;
            if low <= *v && *v <= high { Some(Rc::clone(ss)) }
            else { None }
        },
        Term::Var { .. } | Term::Anonymous => {
            let v = low.checked_add(*index as i64)?;
            if v > high { return None; }
            *index += 1;
            args[2].unify(&Term::SInt(v), ss)
        },
        _ => None,
    }

} // next_between()

/// once/1: the first solution of the goal argument, bindings included;
/// never a second one.
pub fn solve_once(sn: &Rc<RefCell<SolutionNode>>,
                  args: &[Term]) -> Option<Rc<SubstitutionSet>> {

    let (ss, ctx) = {
        let node = sn.borrow();
        (Rc::clone(&node.ss), Rc::clone(&node.ctx))
    };
    let goal_term = walk(&args[0], &ss).clone();
    let goal = match resolve_goal(&goal_term) {
        Ok(goal) => goal,
        Err(err) => { debug!("once/1 - {}", err); return None; },
    };
    let sub = make_meta_node(Rc::new(goal), ctx, Rc::clone(&ss),
                             Rc::clone(sn));
    next_solution(sub)

} // solve_once()

/// if/3: `if(cond, then, else)`.
///
/// The first solution of cond commits; then streams its solutions
/// under that binding. When cond has none, else streams under the
/// original substitution.
pub fn next_if(sn: &Rc<RefCell<SolutionNode>>,
               args: &[Term]) -> Option<Rc<SubstitutionSet>> {

    // The chosen branch streams through the child node.
    let child = sn.borrow().child.clone();
    if let Some(child_sn) = child {
        return next_solution(child_sn);
    }
    if sn.borrow().enum_index > 0 { return None; }
    sn.borrow_mut().enum_index = 1;

    let (ss, ctx) = {
        let node = sn.borrow();
        (Rc::clone(&node.ss), Rc::clone(&node.ctx))
    };

    let cond_term = walk(&args[0], &ss).clone();
    let cond_goal = match resolve_goal(&cond_term) {
        Ok(goal) => goal,
        Err(err) => { debug!("if/3 - {}", err); return None; },
    };
    let cond_sn = make_meta_node(Rc::new(cond_goal), Rc::clone(&ctx),
                                 Rc::clone(&ss), Rc::clone(sn));

    let (branch, branch_ss) = match next_solution(cond_sn) {
        Some(cond_ss) => (&args[1], cond_ss),
        None => (&args[2], Rc::clone(&ss)),
    };

    let branch_term = walk(branch, &branch_ss).clone();
    let branch_goal = match resolve_goal(&branch_term) {
        Ok(goal) => goal,
        Err(err) => { debug!("if/3 - {}", err); return None; },
    };
    let branch_sn = make_meta_node(Rc::new(branch_goal), ctx, branch_ss,
                                   Rc::clone(sn));
    sn.borrow_mut().child = Some(Rc::clone(&branch_sn));
    next_solution(branch_sn)

} // next_if()
