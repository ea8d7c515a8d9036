//! The top-level query API.
//!
//! A query is a list of goal terms. Variables written `?name` are
//! shared across the whole list: `parent(tom, ?x), male(?x)` constrains
//! one `?x`. The result is a lazy iterator of solutions; each solution
//! maps the query's variable names to reified terms. Pulling a
//! solution advances the search just far enough to produce it, so a
//! query with infinitely many answers is fine as long as the caller
//! stops pulling (or passes a limit).
//!
//! Every query runs against the knowledge base snapshot taken when it
//! was created. Mutations committed afterwards do not affect solutions
//! still being streamed.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use log::debug;

use crate::context::QueryContext;
use crate::error::EngineError;
use crate::goal::Goal;
use crate::knowledge_base::KnowledgeBase;
use crate::logic_var::{VarMap, VarSupply};
use crate::operator::Operator;
use crate::parse_goals::parse_query;
use crate::reify::{reify_bindings, Bindings};
use crate::resolver::resolve_goal;
use crate::solution_node::{make_base_node, next_solution, SolutionNode};
use crate::term::Term;
use crate::trace::{TraceEvent, TraceNode, TraceStats, TraceTreeExport,
                   Tracer, DEFAULT_TRACE_DEPTH};

/// Options for a query.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// Record a trace (log + inference tree) while the query runs.
    pub trace: bool,
    /// Stop after this many solutions.
    pub limit: Option<usize>,
    /// Calls deeper than this run untraced.
    pub max_trace_depth: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            trace: false,
            limit: None,
            max_trace_depth: DEFAULT_TRACE_DEPTH,
        }
    }
}

/// The lazy solution stream of one query.
///
/// Also the handle to the query's trace: after (or during) iteration,
/// the recorded log, tree and stats can be read here.
pub struct Solutions {
    ctx: Rc<QueryContext>,
    root: Rc<RefCell<SolutionNode>>,
    vars: Vec<(String, usize)>,
    limit: Option<usize>,
    yielded: usize,
    done: bool,
}

impl Iterator for Solutions {

    type Item = Bindings;

    fn next(&mut self) -> Option<Bindings> {
        if self.done { return None; }
        if let Some(limit) = self.limit {
            if self.yielded >= limit {
                self.done = true;
                return None;
            }
        }
        match next_solution(Rc::clone(&self.root)) {
            Some(ss) => {
                self.yielded += 1;
                Some(reify_bindings(&self.vars, &ss))
            },
            None => {
                self.done = true;
                None
            },
        }
    } // next()

} // impl Iterator

impl Solutions {

    /// The named variables of the query, in first-encounter order.
    pub fn var_names(&self) -> Vec<String> {
        self.vars.iter().map(|(name, _)| name.clone()).collect()
    }

    /// The trace log recorded so far.
    pub fn trace_log(&self) -> Vec<TraceEvent> {
        self.ctx.tracer.borrow().log().to_vec()
    }

    /// The inference tree recorded so far.
    pub fn trace_tree(&self) -> Vec<TraceNode> {
        self.ctx.tracer.borrow().nodes().to_vec()
    }

    pub fn trace_stats(&self) -> TraceStats {
        self.ctx.tracer.borrow().stats()
    }

    /// The inference tree as nodes + links, for the visualizer.
    pub fn export_trace_tree(&self) -> TraceTreeExport {
        self.ctx.tracer.borrow().export_tree()
    }

    /// Discards everything recorded so far.
    pub fn clear_trace(&self) {
        self.ctx.tracer.borrow_mut().clear();
    }

} // impl Solutions

impl KnowledgeBase {

    /// Runs a query over the given goal terms.
    ///
    /// The goals' variables are renamed into the query's private id
    /// space through one shared name map, so equal names refer to one
    /// variable across the whole list. The goals are conjoined and
    /// solved against a snapshot of the store.
    ///
    /// # Usage
    /// ```
    /// use sherlog::*;
    ///
    /// let kb = test_kb();
    /// let goals = parse_query("grandfather(?who, ?whom)").unwrap();
    /// let solutions: Vec<_> =
    ///     kb.query(&goals, QueryOptions::default()).unwrap().collect();
    /// assert_eq!(1, solutions.len());
    /// assert_eq!("alfred", solutions[0]["who"].to_string());
    /// ```
    pub fn query(&self, goals: &[Term],
                 opts: QueryOptions) -> Result<Solutions, EngineError> {

        if goals.is_empty() {
            return Err(EngineError::MalformedGoal(
                "query() - No goals given.".to_string()));
        }

        // One shared name -> variable map across all goals.
        let supply = VarSupply::new();
        let mut var_map = VarMap::new();
        let renamed: Vec<Term> = goals.iter().cloned()
            .map(|g| g.recreate_variables(&mut var_map, &supply))
            .collect();

        let mut vars: Vec<(String, usize)> = vec![];
        for term in &renamed {
            collect_query_vars(term, &mut vars);
        }

        let mut resolved: Vec<Goal> = Vec::with_capacity(renamed.len());
        for term in &renamed {
            resolved.push(resolve_goal(term)?);
        }
        let goal = match resolved.len() {
            1 => resolved.remove(0),
            _ => Goal::OperatorGoal(Operator::And(resolved)),
        };

        debug!("query: {}", goal);
        self.note_query();

        let tracer = Tracer::new(opts.trace, opts.max_trace_depth);
        let ctx = Rc::new(QueryContext::with_tracer(
            self.snapshot(), supply, self.spy_registry(), tracer));
        let root = make_base_node(Rc::new(goal), Rc::clone(&ctx));

        Ok(Solutions {
            ctx,
            root,
            vars,
            limit: opts.limit,
            yielded: 0,
            done: false,
        })

    } // query()

    /// Parses query text and runs it. See
    /// [query()](#method.query).
    pub fn query_str(&self, text: &str,
                     opts: QueryOptions) -> Result<Solutions, EngineError> {
        let goals = parse_query(text)?;
        self.query(&goals, opts)
    } // query_str()

    /// A memoized query: solutions are materialized and cached under
    /// the goal list (and limit). Any mutation of the store empties
    /// the cache, so a hit is always consistent with the current
    /// state.
    pub fn cached_query(&self, goals: &[Term], limit: Option<usize>)
                        -> Result<Arc<Vec<Bindings>>, EngineError> {

        let mut key = goals.iter()
            .map(|g| g.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        if let Some(n) = limit {
            key += &format!(" limit {}", n);
        }

        if let Some(hit) = self.cache_get(&key) {
            debug!("query cache hit: {}", key);
            return Ok(hit);
        }

        let opts = QueryOptions { limit, ..QueryOptions::default() };
        let solutions: Vec<Bindings> =
            self.query(goals, opts)?.collect();
        let solutions = Arc::new(solutions);
        self.cache_put(key, Arc::clone(&solutions));
        Ok(solutions)

    } // cached_query()

} // impl KnowledgeBase

// Collects named query variables (name, id) in first-encounter order.
// Internal names (leading underscore) and the anonymous variable are
// not part of a query's result set.
fn collect_query_vars(term: &Term, out: &mut Vec<(String, usize)>) {
    match term {
        Term::Var { id, name } => {
            if !name.starts_with('_')
               && !out.iter().any(|(_, seen)| seen == id) {
                out.push((name.clone(), *id));
            }
        },
        Term::Compound(terms) => {
            for t in terms { collect_query_vars(t, out); }
        },
        Term::List { items, tail } => {
            for t in items { collect_query_vars(t, out); }
            if let Some(t) = tail { collect_query_vars(t, out); }
        },
        Term::Map(entries) => {
            for (_, v) in entries { collect_query_vars(v, out); }
        },
        _ => {},
    }
} // collect_query_vars()

/// Formats one solution for display: `?x = a, ?y = b`, or `yes` for a
/// query without variables.
pub fn format_bindings(bindings: &Bindings) -> String {
    if bindings.is_empty() { return "yes".to_string(); }
    bindings.iter()
            .map(|(name, term)| format!("?{} = {}", name, term))
            .collect::<Vec<String>>()
            .join(", ")
} // format_bindings()


// test
