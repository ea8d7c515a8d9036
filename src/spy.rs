//! Spy points: per-predicate debug triggers.
//!
//! A spied predicate logs every CALL, EXIT, FAIL and REDO it goes
//! through, independently of whether general tracing is active. The spy
//! log lives on the engine and accumulates across queries until it is
//! cleared. Spy points are keyed by functor name, so `spy("parent")`
//! watches `parent/1`, `parent/2` and so on.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use crate::term::Term;
use crate::trace::TraceEventKind;

/// One spy log entry.
#[derive(Debug, Clone)]
pub struct SpyEvent {
    pub event: TraceEventKind,
    pub goal: String,
    pub args: Vec<Term>,
    pub timestamp: DateTime<Utc>,
}

/// Per-event counts for the spy log.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SpyStats {
    pub calls: u64,
    pub exits: u64,
    pub fails: u64,
    pub redos: u64,
}

/// The engine-wide set of spy points and their log.
///
/// Shared between the knowledge base and every query context; queries
/// append while they run, concurrently if need be.
#[derive(Debug, Default)]
pub struct SpyRegistry {
    points: RwLock<HashSet<String>>,
    log: Mutex<Vec<SpyEvent>>,
    stats: Mutex<SpyStats>,
}

impl SpyRegistry {

    pub fn new() -> Self {
        SpyRegistry::default()
    }

    /// Sets a spy point on a predicate (by functor name).
    pub fn spy(&self, predicate: &str) {
        self.points.write().insert(predicate.to_string());
    }

    /// Removes a spy point.
    pub fn nospy(&self, predicate: &str) {
        self.points.write().remove(predicate);
    }

    /// Removes all spy points.
    pub fn nospy_all(&self) {
        self.points.write().clear();
    }

    /// The current spy points, sorted.
    pub fn spy_points(&self) -> Vec<String> {
        let mut points: Vec<String> =
            self.points.read().iter().cloned().collect();
        points.sort();
        points
    }

    /// Is the given functor spied? Called on the resolution path, so it
    /// takes the read lock only.
    pub fn is_spied(&self, functor: &str) -> bool {
        self.points.read().contains(functor)
    }

    /// Appends an event to the spy log and bumps its counter.
    pub fn record(&self, event: TraceEventKind, goal: &str,
                  args: Vec<Term>) {
        {
            let mut stats = self.stats.lock();
            match event {
                TraceEventKind::Call => { stats.calls += 1; },
                TraceEventKind::Exit => { stats.exits += 1; },
                TraceEventKind::Fail => { stats.fails += 1; },
                TraceEventKind::Redo => { stats.redos += 1; },
            }
        }
        self.log.lock().push(SpyEvent {
            event,
            goal: goal.to_string(),
            args,
            timestamp: Utc::now(),
        });
    } // record()

    /// A copy of the spy log.
    pub fn spy_log(&self) -> Vec<SpyEvent> {
        self.log.lock().clone()
    }

    pub fn spy_stats(&self) -> SpyStats {
        *self.stats.lock()
    }

    /// Empties the spy log and resets its counters. Spy points are
    /// kept.
    pub fn clear_log(&self) {
        self.log.lock().clear();
        *self.stats.lock() = SpyStats::default();
    }

} // impl SpyRegistry


#[cfg(test)]
mod test {

    use super::*;
    use crate::*;

    #[test]
    fn test_spy_points() {

        let registry = SpyRegistry::new();
        registry.spy("parent");
        registry.spy("ancestor");
        registry.spy("parent");  // idempotent

        assert!(registry.is_spied("parent"));
        assert!(!registry.is_spied("member"));
        assert_eq!(vec!["ancestor".to_string(), "parent".to_string()],
                   registry.spy_points());

        registry.nospy("parent");
        assert!(!registry.is_spied("parent"));

        registry.nospy_all();
        assert!(registry.spy_points().is_empty());

    } // test_spy_points()

    #[test]
    fn test_spy_log() {

        let registry = SpyRegistry::new();
        registry.record(TraceEventKind::Call, "parent/2",
                        vec![atom!("tom"), var!(1, "x")]);
        registry.record(TraceEventKind::Exit, "parent/2",
                        vec![atom!("tom"), atom!("mary")]);
        registry.record(TraceEventKind::Fail, "parent/2", vec![]);

        let log = registry.spy_log();
        assert_eq!(3, log.len());
        assert_eq!(TraceEventKind::Call, log[0].event);

        let stats = registry.spy_stats();
        assert_eq!(1, stats.calls);
        assert_eq!(1, stats.exits);
        assert_eq!(1, stats.fails);
        assert_eq!(0, stats.redos);

        registry.clear_log();
        assert!(registry.spy_log().is_empty());
        assert_eq!(0, registry.spy_stats().calls);

    } // test_spy_log()

} // test
