//! A SolutionNode is a node in a proof tree.
//!
//! It holds the [goal](../goal/enum.Goal.html) to be solved, the
//! [query context](../context/struct.QueryContext.html), the current
//! [substitution set](../substitution_set/index.html), and the node's
//! search state.
//!
//! The function [next_solution()](fn.next_solution.html) accepts a
//! solution node and advances the search until the next solution is
//! found, then stops. Each node preserves its state between calls, so
//! calling next_solution() again continues the search for alternative
//! solutions. The whole search is demand-driven: nothing is computed
//! until a solution is pulled.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::built_in_predicates::next_solution_builtin;
use crate::context::QueryContext;
use crate::rc_cell;
use crate::goal::Goal;
use crate::logic_var::VarMap;
use crate::operator::Operator;
use crate::solution_node_ops::*;
use crate::substitution_set::{walk_deep, SubstitutionSet};
use crate::term::Term;
use crate::trace::TraceEventKind;

/// Represents a node in a proof tree.
///
/// A solution node holds the goal to be resolved, the state of the
/// search so far, and bookkeeping for the tracer and spy instruments.
pub struct SolutionNode {

    /// The goal which this solution node seeks to resolve.
    pub goal: Rc<Goal>,
    /// The query's context: knowledge base snapshot, id supply,
    /// tracer, spy points.
    pub ctx: Rc<QueryContext>,

    /// The parent node in the proof tree. Meta-call sub-proofs (not,
    /// once, findall, ...) have no parent, so a cut inside them cannot
    /// reach the outer proof.
    pub parent_node: Option<Rc<RefCell<SolutionNode>>>,
    /// Where to hang trace nodes when parent_node is deliberately None
    /// (meta-call sub-proofs).
    pub trace_parent: Option<Rc<RefCell<SolutionNode>>>,
    /// The substitution the node starts from.
    pub ss: Rc<SubstitutionSet>,

    /// Hard prune: the node produces nothing more. Set by cut on the
    /// choice points which sit before it.
    pub no_backtracking: bool,
    /// Soft prune: active subtrees may still be drained, but no new
    /// alternative (clause, disjunct, head solution) may be opened.
    /// Set by cut on its ancestor chain up to the clause boundary.
    pub no_alternatives: bool,

    // For predicate-call (complex) nodes.
    /// The solution node of the current clause's body.
    pub child: Option<Rc<RefCell<SolutionNode>>>,
    /// Facts for this predicate in the snapshot.
    pub fact_count: usize,
    /// Rules for this predicate in the snapshot.
    pub rule_count: usize,
    /// Cursor over facts (0..fact_count) then rules.
    pub clause_index: usize,

    // For operator nodes.
    /// Solution node of the first operand.
    pub head_sn: Option<Rc<RefCell<SolutionNode>>>,
    /// Solution node of the remaining operands.
    pub tail_sn: Option<Rc<RefCell<SolutionNode>>>,
    /// The remaining operands themselves.
    pub operator_tail: Option<Operator>,

    /// Flag for single-solution built-ins.
    pub more_solutions: bool,
    /// Cursor for enumerating built-ins (member, between, append...).
    pub enum_index: usize,
    /// Set once a conda/condu clause has been committed.
    pub committed: bool,

    // Trace / spy bookkeeping, for predicate-call nodes.
    /// Has the call been observed (CALL event) yet?
    pub called: bool,
    /// Has exhaustion been observed (EXIT/FAIL event) yet?
    pub finished: bool,
    /// Solutions this node has yielded.
    pub results: usize,
    /// The trace tree node id, when this call is traced.
    pub trace_id: Option<usize>,
    /// Call depth in the trace tree.
    pub depth: usize,
    /// Is this predicate spied?
    pub spied: bool,

} // SolutionNode

impl SolutionNode {

    /// Creates a new SolutionNode with default values.
    pub fn new(goal: Rc<Goal>, ctx: Rc<QueryContext>) -> Self {
        SolutionNode {
            goal,
            ctx,
            parent_node: None,
            trace_parent: None,
            ss: Rc::new(SubstitutionSet::new()),
            no_backtracking: false,
            no_alternatives: false,
            child: None,
            fact_count: 0,
            rule_count: 0,
            clause_index: 0,
            head_sn: None,
            tail_sn: None,
            operator_tail: None,
            more_solutions: true,
            enum_index: 0,
            committed: false,
            called: false,
            finished: false,
            results: 0,
            trace_id: None,
            depth: 0,
            spied: false,
        }
    } // new()

} // impl SolutionNode

/// Produces a solution node for the given goal.
///
/// Operator nodes get their first operand's node built eagerly; the
/// rest is built on demand as the search progresses.
pub fn make_solution_node(goal: Rc<Goal>, ctx: Rc<QueryContext>,
                          ss: Rc<SubstitutionSet>,
                          parent: Option<Rc<RefCell<SolutionNode>>>)
                          -> Rc<RefCell<SolutionNode>> {

    let mut node = SolutionNode::new(Rc::clone(&goal), Rc::clone(&ctx));
    node.ss = Rc::clone(&ss);
    node.parent_node = parent;

    match &*goal {

        Goal::OperatorGoal(op) => {
            match op {
                Operator::And(_) | Operator::Or(_) => {
                    let (head, tail) = op.split_head_tail();
                    node.operator_tail = Some(tail);
                    let rc_node = rc_cell!(node);
                    let head_sn = make_solution_node(
                        Rc::new(head), ctx, ss, Some(Rc::clone(&rc_node)));
                    rc_node.borrow_mut().head_sn = Some(head_sn);
                    rc_node
                },
                Operator::Not(goals) => {
                    // The sub-proof has no parent: a cut inside a
                    // negation is local to it.
                    let rc_node = rc_cell!(node);
                    let inner = make_solution_node(
                        Rc::new(goals[0].clone()), ctx, ss, None);
                    inner.borrow_mut().trace_parent =
                        Some(Rc::clone(&rc_node));
                    rc_node.borrow_mut().head_sn = Some(inner);
                    rc_node
                },
                Operator::Conda(_) | Operator::Condu(_) => {
                    rc_cell!(node)
                },
            }
        },
        Goal::ComplexGoal(cmplx) => {
            let key = cmplx.key();
            node.fact_count = ctx.kb.count_facts(&key);
            node.rule_count = ctx.kb.count_rules(&key);
            rc_cell!(node)
        },
        Goal::BuiltInGoal(_) => { rc_cell!(node) },
        Goal::Nil => { panic!("make_solution_node() - Nil is not solvable."); },

    } // match
} // make_solution_node()

/// Creates the root solution node for a query goal.
pub fn make_base_node(goal: Rc<Goal>, ctx: Rc<QueryContext>)
                      -> Rc<RefCell<SolutionNode>> {
    make_solution_node(goal, ctx, Rc::new(SubstitutionSet::new()), None)
} // make_base_node()

/// Creates the root of a meta-call sub-proof (not, once, findall, if,
/// conda tests). The sub-proof has no parent, so a cut inside it stops
/// at its own root; the trace parent keeps the inference tree
/// connected.
pub fn make_meta_node(goal: Rc<Goal>, ctx: Rc<QueryContext>,
                      ss: Rc<SubstitutionSet>,
                      trace_parent: Rc<RefCell<SolutionNode>>)
                      -> Rc<RefCell<SolutionNode>> {
    let node = make_solution_node(goal, ctx, ss, None);
    node.borrow_mut().trace_parent = Some(trace_parent);
    node
} // make_meta_node()

/// Finds the first and next solutions for the given solution node.
///
/// For predicate calls, this method fetches facts and rules from the
/// knowledge base snapshot: facts first, in snapshot order, then rules
/// in insertion order. Each fact tuple is unified with the goal's
/// arguments; each rule is renamed, its head unified with the goal,
/// and its body solved recursively, depth-first.
///
/// Returns None when the node is exhausted. The node preserves its
/// state, so the same node can be pulled again for more solutions.
///
/// # Usage
/// ```
/// use std::rc::Rc;
/// use sherlog::*;
///
/// let kb = test_kb();
/// let query = kb.query_str("loves(leonard, ?whom)",
///                          QueryOptions::default()).unwrap();
/// for solution in query {
///     println!("{}", solution["whom"]);  // Prints: penny
/// }
/// ```
pub fn next_solution(sn: Rc<RefCell<SolutionNode>>)
                     -> Option<Rc<SubstitutionSet>> {

    let goal = { let node = sn.borrow(); Rc::clone(&node.goal) };

    if sn.borrow().no_backtracking {
        // A pruned call still closes its trace node, so every CALL
        // pairs with an EXIT or FAIL.
        if matches!(&*goal, Goal::ComplexGoal(_)) {
            observe_result(&sn, &None);
        }
        return None;
    }

    match &*goal {

        Goal::OperatorGoal(op) => {
            match op {
                Operator::And(_) => next_solution_and(sn),
                Operator::Or(_) => next_solution_or(sn),
                Operator::Not(_) => next_solution_not(sn),
                Operator::Conda(_) => next_solution_conda(sn, false),
                Operator::Condu(_) => next_solution_conda(sn, true),
            }
        },

        Goal::ComplexGoal(cmplx) => {
            observe_call(&sn, cmplx);
            let solution = solve_complex(&sn, cmplx);
            observe_result(&sn, &solution);
            solution
        },

        Goal::BuiltInGoal(bip) => next_solution_builtin(sn, bip.clone()),

        Goal::Nil => { panic!("next_solution() - Nil is not solvable."); },

    } // match
} // next_solution()

// The clause loop of a predicate call: facts first, then rules.
fn solve_complex(sn: &Rc<RefCell<SolutionNode>>,
                 cmplx: &Term) -> Option<Rc<SubstitutionSet>> {

    // Drain the active clause body first. Solutions which are still
    // flowing from the current clause survive a cut.
    let child = sn.borrow().child.clone();
    if let Some(child_sn) = child {
        let solution = next_solution(child_sn);
        if solution.is_some() { return solution; }
        sn.borrow_mut().child = None;
    }

    let key = cmplx.key();
    let args: Vec<Term> = match cmplx {
        Term::Compound(terms) => terms[1..].to_vec(),
        _ => { return None; },
    };

    loop {

        let (index, fact_count, rule_count, no_alternatives) = {
            let node = sn.borrow();
            (node.clause_index, node.fact_count, node.rule_count,
             node.no_alternatives)
        };
        if no_alternatives { return None; }
        if index >= fact_count + rule_count { return None; }
        sn.borrow_mut().clause_index = index + 1;

        let (ctx, ss) = {
            let node = sn.borrow();
            (Rc::clone(&node.ctx), Rc::clone(&node.ss))
        };

        if index < fact_count {
            // Fact stream. Tuples are recreated per use, in case a
            // fact carries variables.
            if let Some(tuple) = ctx.kb.fact_at(&key, index) {
                let tuple: Vec<Term> = {
                    let mut vars = VarMap::new();
                    tuple.into_iter()
                         .map(|t| t.recreate_variables(&mut vars,
                                                       &ctx.supply))
                         .collect()
                };
                let mut new_ss = ss;
                let mut matched = true;
                for (left, right) in args.iter().zip(tuple.iter()) {
                    match left.unify(right, &new_ss) {
                        Some(ss) => { new_ss = ss; },
                        None => { matched = false; break; },
                    }
                }
                if matched { return Some(new_ss); }
            }
        }
        else {
            // Rule stream, in insertion order. Every use of a rule
            // renames its variables, so recursive uses cannot collide.
            if let Some(rule) = ctx.kb.rule_at(&key, index - fact_count) {
                let rule = rule.recreate_variables(&mut VarMap::new(),
                                                   &ctx.supply);
                if let Some(new_ss) = rule.head.unify(cmplx, &ss) {
                    match rule.body {
                        Goal::Nil => { return Some(new_ss); },
                        body => {
                            let child = make_solution_node(
                                Rc::new(body), Rc::clone(&ctx), new_ss,
                                Some(Rc::clone(sn)));
                            sn.borrow_mut().child = Some(Rc::clone(&child));
                            let solution = next_solution(child);
                            if solution.is_some() { return solution; }
                            sn.borrow_mut().child = None;
                        },
                    }
                }
            }
        }

    } // loop

} // solve_complex()

// Records CALL / REDO with the tracer and the spy log.
fn observe_call(sn: &Rc<RefCell<SolutionNode>>, cmplx: &Term) {

    let (first_call, finished, trace_id, spied, ss, ctx) = {
        let node = sn.borrow();
        (!node.called, node.finished, node.trace_id, node.spied,
         Rc::clone(&node.ss), Rc::clone(&node.ctx))
    };
    if finished { return; }

    if first_call {
        sn.borrow_mut().called = true;

        let tracer_active = ctx.tracer.borrow().is_active();
        let spied = ctx.spies.is_spied(cmplx.functor().unwrap_or(""));
        if !tracer_active && !spied { return; }

        let key = cmplx.key();
        let args = observed_args(cmplx, &ss);

        // Tracer: create the tree node, unless the depth cap is hit.
        if tracer_active {
            let (parent_id, depth) = match nearest_traced_ancestor(sn) {
                Some((id, depth)) => (Some(id), depth + 1),
                None => (None, 0),
            };
            if depth <= ctx.tracer.borrow().max_depth() {
                let id = ctx.tracer.borrow_mut()
                            .start_node(&key, args.clone(), parent_id,
                                        depth);
                let mut node = sn.borrow_mut();
                node.trace_id = Some(id);
                node.depth = depth;
            }
            else {
                debug!("trace depth cap reached at {}", key);
            }
        }

        // Spy points are independent of tracing.
        if spied {
            sn.borrow_mut().spied = true;
            ctx.spies.record(TraceEventKind::Call, &key, args);
        }
    }
    else {
        if trace_id.is_none() && !spied { return; }
        if let Some(id) = trace_id {
            ctx.tracer.borrow_mut().redo(id);
        }
        if spied {
            let args = observed_args(cmplx, &ss);
            ctx.spies.record(TraceEventKind::Redo, &cmplx.key(), args);
        }
    }

} // observe_call()

// The deeply walked arguments of a call, as recorded by the
// instruments.
fn observed_args(cmplx: &Term, ss: &SubstitutionSet) -> Vec<Term> {
    match cmplx {
        Term::Compound(terms) => {
            terms[1..].iter().map(|t| walk_deep(t, ss)).collect()
        },
        _ => vec![],
    }
} // observed_args()

// Records yields and exhaustion with the tracer and the spy log.
fn observe_result(sn: &Rc<RefCell<SolutionNode>>,
                  solution: &Option<Rc<SubstitutionSet>>) {

    let (trace_id, spied, finished, ctx, goal) = {
        let node = sn.borrow();
        (node.trace_id, node.spied, node.finished, Rc::clone(&node.ctx),
         Rc::clone(&node.goal))
    };
    if finished { return; }

    match solution {
        Some(ss) => {
            sn.borrow_mut().results += 1;
            if let Some(id) = trace_id {
                ctx.tracer.borrow_mut().note_result(id);
            }
            if spied {
                let args = match &*goal {
                    Goal::ComplexGoal(term) => observed_args(term, ss),
                    _ => vec![],
                };
                ctx.spies.record(TraceEventKind::Exit, &goal.key(), args);
            }
        },
        None => {
            sn.borrow_mut().finished = true;
            if let Some(id) = trace_id {
                ctx.tracer.borrow_mut().finish(id);
            }
            if spied {
                // Exhaustion is a FAIL in the spy log, even after
                // earlier EXITs, as in a classic four-port trace.
                ctx.spies.record(TraceEventKind::Fail, &goal.key(),
                                 vec![]);
            }
        },
    }

} // observe_result()

// Finds the nearest ancestor which carries a trace node. Follows the
// proof tree, crossing meta-call boundaries through trace_parent.
fn nearest_traced_ancestor(sn: &Rc<RefCell<SolutionNode>>)
                           -> Option<(usize, usize)> {
    let mut current = {
        let node = sn.borrow();
        node.parent_node.clone().or_else(|| node.trace_parent.clone())
    };
    while let Some(ancestor) = current {
        let node = ancestor.borrow();
        if let Some(id) = node.trace_id {
            return Some((id, node.depth));
        }
        current = node.parent_node.clone()
                      .or_else(|| node.trace_parent.clone());
    }
    None
} // nearest_traced_ancestor()

/// Prunes the choice points which sit before a cut.
///
/// Walks the ancestor chain from the cut's node up to the nearest
/// clause boundary (a predicate-call node). Each node on the chain is
/// stopped from opening new alternatives; head subtrees which do not
/// contain the cut are stopped entirely. Choice points created after
/// the cut keep backtracking normally.
pub fn prune_alternatives(cut_node: &Rc<RefCell<SolutionNode>>) {

    let mut previous: Rc<RefCell<SolutionNode>> = Rc::clone(cut_node);
    let mut current = cut_node.borrow().parent_node.clone();

    while let Some(ancestor) = current {

        let (head_sn, is_boundary, next) = {
            let mut node = ancestor.borrow_mut();
            node.no_alternatives = true;
            let is_boundary = matches!(&*node.goal, Goal::ComplexGoal(_));
            (node.head_sn.clone(), is_boundary, node.parent_node.clone())
        };

        // A head subtree which does not contain the cut is a choice
        // point created before the cut: kill it. When the chain came
        // up through the head, the cut's continuation lives there, so
        // it must keep draining.
        if let Some(head) = head_sn {
            if !Rc::ptr_eq(&head, &previous) {
                head.borrow_mut().no_backtracking = true;
            }
        }

        if is_boundary { return; }
        previous = ancestor;
        current = next;

    } // while

} // prune_alternatives()


// Displays a summary of a solution node for debugging.
impl fmt::Display for SolutionNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut out = "----- Solution Node -----\n".to_string();
        out += &format!("\tgoal: {}\n", self.goal);
        match &self.parent_node {
            Some(parent) => {
                let parent = parent.borrow();
                out += &format!("\tparent_node (goal only): {}\n",
                                parent.goal);
            },
            None => { out += "\tparent_node: None\n"; },
        }
        out += &format!("\tno_backtracking: {}\n", self.no_backtracking);
        out += &format!("\tno_alternatives: {}\n", self.no_alternatives);
        out += &format!("\tclause_index: {}\n", self.clause_index);
        out += &format!("\tfacts/rules: {}/{}\n",
                        self.fact_count, self.rule_count);
        out += "-------------------------";
        write!(f, "{}", out)
    } // fmt
} // fmt::Display
