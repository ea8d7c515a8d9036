//! A transactional store of facts and rules, indexed by predicate.
//!
//! A predicate's key consists of its functor and its arity, separated
//! by a slash. For the rule
//! <blockquote>
//! grandfather(?x, ?y) :- father(?x, ?z), father(?z, ?y).
//! </blockquote>
//! the key is `grandfather/2`.
//!
//! Facts (per predicate) form an insertion-ordered set: asserting a
//! duplicate is a no-op on the store. Rules (per predicate) form an
//! ordered sequence; resolution tries them in the order they were
//! added.
//!
//! The store is copy-on-write: mutators take the write lock, clone the
//! state, apply the change, and swap the Arc pointer. Readers and
//! queries clone the Arc and operate on a consistent snapshot - a
//! mutation never changes the solutions of a query already in flight.
//! The history log is appended while the write lock is held, so it
//! reflects the true commit order. Watcher callbacks are delivered from
//! a dedicated thread, after commit, never on the mutating thread.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use log::debug;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use crate::error::EngineError;
use crate::goal::Goal;
use crate::reify::Bindings;
use crate::resolver::resolve_goal;
use crate::rule::Rule;
use crate::spy::SpyRegistry;
use crate::term::Term;

/// An immutable snapshot of the stored facts and rules.
#[derive(Debug, Clone, Default)]
pub struct KbState {
    /// predicate key -> insertion-ordered set of argument tuples
    pub facts: HashMap<String, Arc<Vec<Vec<Term>>>>,
    /// predicate key -> rules in insertion order
    pub rules: HashMap<String, Arc<Vec<Rule>>>,
}

impl KbState {

    pub fn count_facts(&self, key: &str) -> usize {
        match self.facts.get(key) {
            Some(list) => list.len(),
            None => 0,
        }
    }

    pub fn fact_at(&self, key: &str, index: usize) -> Option<Vec<Term>> {
        self.facts.get(key).and_then(|list| list.get(index).cloned())
    }

    pub fn count_rules(&self, key: &str) -> usize {
        match self.rules.get(key) {
            Some(list) => list.len(),
            None => 0,
        }
    }

    pub fn rule_at(&self, key: &str, index: usize) -> Option<Rule> {
        self.rules.get(key).and_then(|list| list.get(index).cloned())
    }

    /// All predicate keys, facts and rules combined, sorted.
    pub fn predicates(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.facts.keys().cloned().collect();
        for k in self.rules.keys() {
            if !self.facts.contains_key(k) { keys.push(k.clone()); }
        }
        keys.sort();
        keys
    }

    pub fn total_facts(&self) -> usize {
        self.facts.values().map(|v| v.len()).sum()
    }

    pub fn total_rules(&self) -> usize {
        self.rules.values().map(|v| v.len()).sum()
    }

} // impl KbState

/// What a history entry or change notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Assert,
    Retract,
    AddRule,
    Clear,
    Import,
}

/// One committed change. History entries and watcher notifications
/// share this record.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub predicate: String,
    pub args: Option<Vec<Term>>,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    fn new(kind: ChangeKind, predicate: &str,
           args: Option<Vec<Term>>) -> Self {
        ChangeEvent {
            kind,
            predicate: predicate.to_string(),
            args,
            timestamp: Utc::now(),
        }
    }
}

/// Aggregate statistics for the store.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KbStats {
    pub total_facts: usize,
    pub total_rules: usize,
    pub predicates: usize,
    pub queries: u64,
    pub facts_asserted: u64,
    pub facts_retracted: u64,
    pub rules_added: u64,
}

type WatchFn = Box<dyn Fn(&ChangeEvent) + Send + 'static>;

/// The knowledge base: facts, rules, history, query cache, statistics,
/// spy points and watchers.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let kb = KnowledgeBase::new();
/// kb.assert_fact("parent", vec![atom!("tom"), atom!("mary")]).unwrap();
/// kb.add_rule("ancestor", vec![var!("x"), var!("y")],
///             vec![parse_term("parent(?x, ?y)").unwrap()]).unwrap();
/// assert_eq!(1, kb.stats().total_facts);
/// ```
pub struct KnowledgeBase {
    state: RwLock<Arc<KbState>>,
    history: Mutex<Vec<ChangeEvent>>,
    cache: Mutex<HashMap<String, Arc<Vec<Bindings>>>>,
    next_clause_id: AtomicU64,
    queries: AtomicU64,
    facts_asserted: AtomicU64,
    facts_retracted: AtomicU64,
    rules_added: AtomicU64,
    spies: Arc<SpyRegistry>,
    watchers: Arc<Mutex<HashMap<String, WatchFn>>>,
    watch_tx: Mutex<Option<Sender<ChangeEvent>>>,
}

impl KnowledgeBase {

    pub fn new() -> Self {
        KnowledgeBase {
            state: RwLock::new(Arc::new(KbState::default())),
            history: Mutex::new(vec![]),
            cache: Mutex::new(HashMap::new()),
            next_clause_id: AtomicU64::new(1),
            queries: AtomicU64::new(0),
            facts_asserted: AtomicU64::new(0),
            facts_retracted: AtomicU64::new(0),
            rules_added: AtomicU64::new(0),
            spies: Arc::new(SpyRegistry::new()),
            watchers: Arc::new(Mutex::new(HashMap::new())),
            watch_tx: Mutex::new(None),
        }
    } // new()

    /// A consistent snapshot of the current facts and rules. Queries
    /// take one snapshot at creation and never see later mutations.
    pub fn snapshot(&self) -> Arc<KbState> {
        Arc::clone(&self.state.read())
    }

    // Applies a mutation copy-on-write and appends to history while the
    // write lock is held, so history order is commit order. The query
    // cache is invalidated and watchers are notified after commit.
    fn commit<F>(&self, mutate: F, event: ChangeEvent)
                 where F: FnOnce(&mut KbState) {
        {
            let mut guard = self.state.write();
            let mut new_state = (**guard).clone();
            mutate(&mut new_state);
            *guard = Arc::new(new_state);
            self.history.lock().push(event.clone());
        }
        self.cache.lock().clear();
        self.notify(event);
    } // commit()

    fn notify(&self, event: ChangeEvent) {
        if let Some(tx) = &*self.watch_tx.lock() {
            // The channel is unbounded; a slow watcher cannot block a
            // mutator.
            let _ = tx.send(event);
        }
    } // notify()

    /// Adds a fact to the store.
    ///
    /// Facts per predicate are a set: asserting an existing fact leaves
    /// the store unchanged, but the history entry is appended anyway,
    /// so the log records every request.
    pub fn assert_fact(&self, predicate: &str,
                       args: Vec<Term>) -> Result<(), EngineError> {
        validate_predicate(predicate, "assert_fact")?;
        let key = predicate_key(predicate, args.len());
        debug!("assert {}", key);
        let event = ChangeEvent::new(ChangeKind::Assert, predicate,
                                     Some(args.clone()));
        self.commit(|state| {
            let list = state.facts.entry(key)
                            .or_insert_with(|| Arc::new(vec![]));
            let list = Arc::make_mut(list);
            if !list.contains(&args) { list.push(args); }
        }, event);
        self.facts_asserted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    } // assert_fact()

    /// Removes a fact from the store. Retracting a fact which is not
    /// present is a no-op, not an error.
    pub fn retract_fact(&self, predicate: &str,
                        args: Vec<Term>) -> Result<(), EngineError> {
        validate_predicate(predicate, "retract_fact")?;
        let key = predicate_key(predicate, args.len());
        debug!("retract {}", key);
        let event = ChangeEvent::new(ChangeKind::Retract, predicate,
                                     Some(args.clone()));
        self.commit(|state| {
            if let Some(list) = state.facts.get_mut(&key) {
                let list = Arc::make_mut(list);
                list.retain(|t| *t != args);
            }
        }, event);
        self.facts_retracted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    } // retract_fact()

    /// Adds a rule. The head is `predicate(head_args...)`; the body is
    /// a list of goal terms, joined as a conjunction.
    ///
    /// A body term which cannot be resolved into a goal is rejected
    /// with MalformedClause and the store is left untouched.
    pub fn add_rule(&self, predicate: &str, head_args: Vec<Term>,
                    body: Vec<Term>) -> Result<(), EngineError> {
        validate_predicate(predicate, "add_rule")?;
        let mut head_terms = vec![Term::Atom(predicate.to_string())];
        head_terms.extend(head_args);
        let head = Term::Compound(head_terms);

        let mut goals: Vec<Goal> = Vec::with_capacity(body.len());
        for term in &body {
            match resolve_goal(term) {
                Ok(goal) => { goals.push(goal); },
                Err(err) => {
                    let msg = format!("add_rule() - Bad body goal \
                                       {}: {}", term, err);
                    return Err(EngineError::MalformedClause(msg));
                },
            }
        }
        let body_goal = match goals.len() {
            0 => Goal::Nil,
            1 => goals.remove(0),
            _ => Goal::OperatorGoal(crate::operator::Operator::And(goals)),
        };
        self.insert_rule(Rule { head, body: body_goal, id: 0 })
    } // add_rule()

    /// Adds an already parsed clause. Clauses without a body are stored
    /// as facts; clauses with a body as rules.
    pub fn add_clause(&self, rule: Rule) -> Result<(), EngineError> {
        let (functor, args) = match &rule.head {
            Term::Compound(terms) => {
                match &terms[0] {
                    Term::Atom(s) => (s.clone(), terms[1..].to_vec()),
                    other => {
                        let msg = format!("add_clause() - Functor must \
                                           be an atom: {}", other);
                        return Err(EngineError::MalformedClause(msg));
                    },
                }
            },
            other => {
                let msg = format!("add_clause() - Head must be a \
                                   compound term: {}", other);
                return Err(EngineError::MalformedClause(msg));
            },
        };
        if rule.body == Goal::Nil {
            return self.assert_fact(&functor, args);
        }
        self.insert_rule(rule)
    } // add_clause()

    // Stamps a clause id and appends the rule to its predicate.
    fn insert_rule(&self, mut rule: Rule) -> Result<(), EngineError> {
        let key = rule.key();
        let predicate = match rule.head.functor() {
            Some(f) => f.to_string(),
            None => {
                let msg = format!("insert_rule() - Functor must be an \
                                   atom: {}", rule.head);
                return Err(EngineError::MalformedClause(msg));
            },
        };
        rule.id = self.next_clause_id.fetch_add(1, Ordering::Relaxed);
        debug!("add rule {}", key);
        let head_args = match &rule.head {
            Term::Compound(terms) => Some(terms[1..].to_vec()),
            _ => None,
        };
        let event = ChangeEvent::new(ChangeKind::AddRule, &predicate,
                                     head_args);
        self.commit(|state| {
            let list = state.rules.entry(key)
                            .or_insert_with(|| Arc::new(vec![]));
            Arc::make_mut(list).push(rule);
        }, event);
        self.rules_added.fetch_add(1, Ordering::Relaxed);
        Ok(())
    } // insert_rule()

    /// Empties facts, rules and history, and resets the statistics
    /// counters. The clear itself is logged as the first entry of the
    /// fresh history.
    pub fn clear(&self) {
        debug!("clear knowledge base");
        let event = ChangeEvent::new(ChangeKind::Clear, "", None);
        {
            let mut guard = self.state.write();
            *guard = Arc::new(KbState::default());
            let mut history = self.history.lock();
            history.clear();
            history.push(event.clone());
        }
        self.cache.lock().clear();
        self.queries.store(0, Ordering::Relaxed);
        self.facts_asserted.store(0, Ordering::Relaxed);
        self.facts_retracted.store(0, Ordering::Relaxed);
        self.rules_added.store(0, Ordering::Relaxed);
        self.notify(event);
    } // clear()

    /// Replaces the whole store in one step (used by import).
    pub(crate) fn replace_state(&self, new_state: KbState,
                                event: ChangeEvent) {
        {
            let mut guard = self.state.write();
            *guard = Arc::new(new_state);
            self.history.lock().push(event.clone());
        }
        self.cache.lock().clear();
        self.notify(event);
    } // replace_state()

    /// Snapshot of the facts, optionally restricted to one functor.
    pub fn facts(&self, predicate: Option<&str>)
                 -> HashMap<String, Vec<Vec<Term>>> {
        let state = self.snapshot();
        state.facts.iter()
            .filter(|(key, _)| match predicate {
                Some(p) => key_functor(key) == p,
                None => true,
            })
            .map(|(key, list)| (key.clone(), (**list).clone()))
            .collect()
    } // facts()

    /// The fact tuples of one predicate key (eg. `parent/2`).
    pub fn facts_of(&self, key: &str) -> Vec<Vec<Term>> {
        match self.snapshot().facts.get(key) {
            Some(list) => (**list).clone(),
            None => vec![],
        }
    }

    /// Snapshot of the rules, optionally restricted to one functor.
    pub fn rules(&self, predicate: Option<&str>)
                 -> HashMap<String, Vec<Rule>> {
        let state = self.snapshot();
        state.rules.iter()
            .filter(|(key, _)| match predicate {
                Some(p) => key_functor(key) == p,
                None => true,
            })
            .map(|(key, list)| (key.clone(), (**list).clone()))
            .collect()
    } // rules()

    /// The rules of one predicate key, in insertion order.
    pub fn rules_of(&self, key: &str) -> Vec<Rule> {
        match self.snapshot().rules.get(key) {
            Some(list) => (**list).clone(),
            None => vec![],
        }
    }

    /// The most recent history entries, oldest first. Without a limit,
    /// the whole log.
    pub fn history(&self, limit: Option<usize>) -> Vec<ChangeEvent> {
        let history = self.history.lock();
        match limit {
            Some(n) if n < history.len() => {
                history[history.len() - n..].to_vec()
            },
            _ => history.clone(),
        }
    } // history()

    pub fn stats(&self) -> KbStats {
        let state = self.snapshot();
        KbStats {
            total_facts: state.total_facts(),
            total_rules: state.total_rules(),
            predicates: state.predicates().len(),
            queries: self.queries.load(Ordering::Relaxed),
            facts_asserted: self.facts_asserted.load(Ordering::Relaxed),
            facts_retracted: self.facts_retracted.load(Ordering::Relaxed),
            rules_added: self.rules_added.load(Ordering::Relaxed),
        }
    } // stats()

    /// Registers a watcher. The callback runs on a dedicated delivery
    /// thread for every committed change, after the transaction.
    pub fn watch<F>(&self, id: &str, callback: F)
                    where F: Fn(&ChangeEvent) + Send + 'static {
        self.watchers.lock().insert(id.to_string(), Box::new(callback));
        let mut tx_guard = self.watch_tx.lock();
        if tx_guard.is_none() {
            let (tx, rx) = crossbeam_channel::unbounded::<ChangeEvent>();
            let watchers = Arc::clone(&self.watchers);
            std::thread::spawn(move || {
                debug!("watcher delivery thread started");
                for event in rx {
                    for callback in watchers.lock().values() {
                        callback(&event);
                    }
                }
                debug!("watcher delivery thread stopped");
            });
            *tx_guard = Some(tx);
        }
    } // watch()

    /// Removes a watcher.
    pub fn unwatch(&self, id: &str) -> Result<(), EngineError> {
        match self.watchers.lock().remove(id) {
            Some(_) => Ok(()),
            None => Err(EngineError::UnknownWatcher(id.to_string())),
        }
    } // unwatch()

    // --- spy points -----------------------------------------------

    pub fn spy(&self, predicate: &str) { self.spies.spy(predicate); }

    pub fn nospy(&self, predicate: &str) { self.spies.nospy(predicate); }

    pub fn nospy_all(&self) { self.spies.nospy_all(); }

    pub fn spy_points(&self) -> Vec<String> { self.spies.spy_points() }

    pub fn spy_log(&self) -> Vec<crate::spy::SpyEvent> {
        self.spies.spy_log()
    }

    pub fn spy_stats(&self) -> crate::spy::SpyStats {
        self.spies.spy_stats()
    }

    pub fn clear_spy_log(&self) { self.spies.clear_log(); }

    pub(crate) fn spy_registry(&self) -> Arc<SpyRegistry> {
        Arc::clone(&self.spies)
    }

    // --- internals for the query layer ----------------------------

    pub(crate) fn note_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn stamp_clause_id(&self) -> u64 {
        self.next_clause_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn cache_get(&self, key: &str) -> Option<Arc<Vec<Bindings>>> {
        self.cache.lock().get(key).cloned()
    }

    pub(crate) fn cache_put(&self, key: String,
                            solutions: Arc<Vec<Bindings>>) {
        self.cache.lock().insert(key, solutions);
    }

} // impl KnowledgeBase

impl Default for KnowledgeBase {
    fn default() -> Self {
        KnowledgeBase::new()
    }
}

impl Drop for KnowledgeBase {
    fn drop(&mut self) {
        // Dropping the sender ends the delivery thread.
        self.watch_tx.lock().take();
    }
}

/// Builds a predicate key from functor and arity: `parent/2`.
pub fn predicate_key(functor: &str, arity: usize) -> String {
    format!("{}/{}", functor, arity)
}

// The functor part of a predicate key.
fn key_functor(key: &str) -> &str {
    match key.rfind('/') {
        Some(i) => &key[..i],
        None => key,
    }
}

fn validate_predicate(predicate: &str,
                      who: &str) -> Result<(), EngineError> {
    if predicate.trim().is_empty() {
        let msg = format!("{}() - Predicate name is empty.", who);
        return Err(EngineError::MalformedClause(msg));
    }
    Ok(())
}

/// Formats the knowledge base for display. Use for debugging.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let kb = test_kb();
/// println!("{}", format_kb(&kb));
/// ```
pub fn format_kb(kb: &KnowledgeBase) -> String {
    let state = kb.snapshot();
    let mut out = "_____ Contents of Knowledge Base _____\n".to_string();
    for key in state.predicates() {
        out += &format!("{}\n", key);
        if let Some(facts) = state.facts.get(&key) {
            for tuple in facts.iter() {
                let functor = key_functor(&key);
                let mut terms = vec![Term::Atom(functor.to_string())];
                terms.extend(tuple.iter().cloned());
                out += &format!("\t{}.\n", Term::Compound(terms));
            }
        }
        if let Some(rules) = state.rules.get(&key) {
            for rule in rules.iter() {
                out += &format!("\t{}\n", rule);
            }
        }
    }
    out += "______________________________________";
    out
} // format_kb()

/// Prints a formatted knowledge base. Use for debugging.
pub fn print_kb(kb: &KnowledgeBase) {
    println!("{}", format_kb(kb));
} // print_kb()

/// Creates a knowledge base with a few facts and rules for testing:
///
/// <blockquote>
/// loves(leonard, penny).<br>
/// loves(penny, leonard).<br>
/// father(alfred, edward).<br>
/// father(edward, aethelstan).<br>
/// grandfather(?x, ?y) :- father(?x, ?z), father(?z, ?y).
/// </blockquote>
pub fn test_kb() -> KnowledgeBase {

    let kb = KnowledgeBase::new();

    kb.assert_fact("loves",
        vec![Term::Atom("leonard".into()), Term::Atom("penny".into())])
      .unwrap();
    kb.assert_fact("loves",
        vec![Term::Atom("penny".into()), Term::Atom("leonard".into())])
      .unwrap();
    kb.assert_fact("father",
        vec![Term::Atom("alfred".into()), Term::Atom("edward".into())])
      .unwrap();
    kb.assert_fact("father",
        vec![Term::Atom("edward".into()), Term::Atom("aethelstan".into())])
      .unwrap();

    let rule = crate::rule::parse_rule(
        "grandfather(?x, ?y) :- father(?x, ?z), father(?z, ?y).").unwrap();
    kb.add_clause(rule).unwrap();

    kb
} // test_kb()


#[cfg(test)]
mod test {

    use crate::*;

    // Asserting a duplicate fact leaves the store unchanged but still
    // appends to history.
    #[test]
    fn test_assert_idempotent() {

        let kb = KnowledgeBase::new();
        let args = vec![atom!("anakin"), atom!("luke")];
        kb.assert_fact("father", args.clone()).unwrap();
        kb.assert_fact("father", args).unwrap();

        assert_eq!(1, kb.facts_of("father/2").len());
        assert_eq!(2, kb.history(None).len());
        assert_eq!(2, kb.stats().facts_asserted);

    } // test_assert_idempotent()

    // Retracting a missing fact is a no-op, not an error.
    #[test]
    fn test_retract() {

        let kb = KnowledgeBase::new();
        kb.assert_fact("father", vec![atom!("anakin"), atom!("luke")])
          .unwrap();
        kb.retract_fact("father", vec![atom!("anakin"), atom!("luke")])
          .unwrap();
        assert_eq!(0, kb.facts_of("father/2").len());

        // Again, now absent.
        kb.retract_fact("father", vec![atom!("anakin"), atom!("luke")])
          .unwrap();
        assert_eq!(0, kb.facts_of("father/2").len());

    } // test_retract()

    // Rule order within a predicate is the order of addition.
    #[test]
    fn test_rule_order() {

        let kb = KnowledgeBase::new();
        for name in ["first", "second", "third"] {
            kb.add_rule("pick", vec![var!("x")],
                        vec![compound!(atom!("="), var!("x"),
                                       atom!(name))])
              .unwrap();
        }
        let rules = kb.rules_of("pick/1");
        assert_eq!(3, rules.len());
        assert_eq!("pick(?x) :- ?x = first.", rules[0].to_string());
        assert_eq!("pick(?x) :- ?x = third.", rules[2].to_string());

        // Clause ids are stamped in order.
        assert!(rules[0].id < rules[1].id);
        assert!(rules[1].id < rules[2].id);

    } // test_rule_order()

    // A malformed body goal is rejected synchronously; the store is
    // unchanged.
    #[test]
    fn test_malformed_rule() {

        let kb = KnowledgeBase::new();
        let result = kb.add_rule("bad", vec![var!("x")],
                                 vec![Term::SInt(42)]);
        assert!(matches!(result, Err(EngineError::MalformedClause(_))));
        assert_eq!(0, kb.stats().total_rules);
        assert_eq!(0, kb.history(None).len());

    } // test_malformed_rule()

    #[test]
    fn test_clear_and_stats() {

        let kb = test_kb();
        let stats = kb.stats();
        assert_eq!(4, stats.total_facts);
        assert_eq!(1, stats.total_rules);
        assert_eq!(3, stats.predicates);

        kb.clear();
        let stats = kb.stats();
        assert_eq!(0, stats.total_facts);
        assert_eq!(0, stats.total_rules);
        assert_eq!(0, stats.facts_asserted);
        // The clear itself is the single remaining history entry.
        let history = kb.history(None);
        assert_eq!(1, history.len());
        assert_eq!(ChangeKind::Clear, history[0].kind);

    } // test_clear_and_stats()

    #[test]
    fn test_history_limit() {
        let kb = test_kb();
        assert_eq!(5, kb.history(None).len());
        let tail = kb.history(Some(2));
        assert_eq!(2, tail.len());
        assert_eq!(ChangeKind::AddRule, tail[1].kind);
    }

    #[test]
    fn test_format_kb() {
        let kb = KnowledgeBase::new();
        kb.assert_fact("father", vec![atom!("anakin"), atom!("luke")])
          .unwrap();
        let s = format_kb(&kb);
        assert!(s.contains("father/2"));
        assert!(s.contains("\tfather(anakin, luke).\n"));
    }

    #[test]
    fn test_watch() {

        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let kb = KnowledgeBase::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen2 = Arc::clone(&seen);

        kb.watch("counter", move |event| {
            if event.kind == ChangeKind::Assert {
                seen2.fetch_add(1, Ordering::SeqCst);
            }
        });

        kb.assert_fact("a", vec![atom!("b")]).unwrap();
        kb.assert_fact("a", vec![atom!("c")]).unwrap();

        // Delivery is asynchronous; give the thread a moment.
        for _ in 0..100 {
            if seen.load(Ordering::SeqCst) == 2 { break; }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert_eq!(2, seen.load(Ordering::SeqCst));

        kb.unwatch("counter").unwrap();
        assert!(kb.unwatch("counter").is_err());

    } // test_watch()

} // test
