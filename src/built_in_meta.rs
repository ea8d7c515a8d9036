//! Meta built-ins: findall/3 and copy_term/2.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::logic_var::VarSupply;
use crate::resolver::resolve_goal;
use crate::solution_node::{make_meta_node, next_solution, SolutionNode};
use crate::substitution_set::{walk, walk_deep, SubstitutionSet};
use crate::term::{make_list, Term};

/// findall/3: `findall(template, goal, list)`.
///
/// Runs the goal to exhaustion, collecting the deeply walked template
/// for each solution, and unifies the collected list with the third
/// argument. Always succeeds: a goal with no solutions gives the empty
/// list. None of the goal's bindings escape.
pub fn solve_findall(sn: &Rc<RefCell<SolutionNode>>,
                     args: &[Term]) -> Option<Rc<SubstitutionSet>> {

    let (ss, ctx) = {
        let node = sn.borrow();
        (Rc::clone(&node.ss), Rc::clone(&node.ctx))
    };

    let goal_term = walk(&args[1], &ss).clone();
    let goal = match resolve_goal(&goal_term) {
        Ok(goal) => goal,
        Err(err) => { debug!("findall/3 - {}", err); return None; },
    };

    let sub = make_meta_node(Rc::new(goal), Rc::clone(&ctx),
                             Rc::clone(&ss), Rc::clone(sn));
    let mut collected: Vec<Term> = vec![];
    while let Some(solution) = next_solution(Rc::clone(&sub)) {
        collected.push(walk_deep(&args[0], &solution));
    }

    args[2].unify(&make_list(collected), &ss)

} // solve_findall()

/// copy_term/2: unifies the second argument with a copy of the first
/// in which every variable has been renamed to a fresh one.
pub fn bip_copy_term(args: &[Term], ss: &Rc<SubstitutionSet>,
                     supply: &VarSupply) -> Option<Rc<SubstitutionSet>> {
    let source = walk_deep(&args[0], ss);
    let copy = source.rename_by_id(&mut HashMap::new(), supply);
    copy.unify(&args[1], ss)
} // bip_copy_term()
