// Store semantics: idempotent assertion, rule order, history,
// snapshot isolation, cache invalidation, watchers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serial_test::serial;
use sherlog::*;

fn family_kb() -> KnowledgeBase {
    let kb = KnowledgeBase::new();
    load_str(&kb, "
        parent(tom, mary). parent(tom, bob). parent(mary, ann).
        parent(mary, pat). parent(bob, jim). parent(bob, liz).
    ").unwrap();
    kb
}

// Asserting the same fact twice leaves one entry, but history records
// both requests.
#[test]
fn test_idempotent_assertion() {

    let kb = KnowledgeBase::new();
    let args = vec![atom!("tom"), atom!("mary")];
    kb.assert_fact("parent", args.clone()).unwrap();
    kb.assert_fact("parent", args).unwrap();

    assert_eq!(1, kb.facts_of("parent/2").len());
    let history = kb.history(None);
    assert_eq!(2, history.len());
    assert!(history.iter().all(|e| e.kind == ChangeKind::Assert));

} // test_idempotent_assertion()

// If rules r1, r2, r3 are added in that order, the first three
// solutions of a query matching each exactly once appear in that
// order.
#[test]
fn test_rule_order_preserved() {

    let kb = KnowledgeBase::new();
    kb.add_rule("color", vec![var!("x")],
                vec![parse_term("=(?x, red)").unwrap()]).unwrap();
    kb.add_rule("color", vec![var!("x")],
                vec![parse_term("=(?x, green)").unwrap()]).unwrap();
    kb.add_rule("color", vec![var!("x")],
                vec![parse_term("=(?x, blue)").unwrap()]).unwrap();

    let colors: Vec<String> = kb
        .query_str("color(?x)", QueryOptions::default())
        .unwrap()
        .map(|s| s["x"].to_string())
        .collect();
    assert_eq!(vec!["red", "green", "blue"], colors);

} // test_rule_order_preserved()

// A query created before a mutation keeps streaming answers from the
// pre-mutation snapshot; a fresh query sees the new state.
#[test]
fn test_snapshot_isolation() {

    let kb = family_kb();
    let mut stream = kb
        .query_str("parent(?x, ?y)", QueryOptions::default())
        .unwrap();

    // Consume two of the six solutions.
    assert!(stream.next().is_some());
    assert!(stream.next().is_some());

    // A concurrent assertion commits.
    kb.assert_fact("parent", vec![atom!("new1"), atom!("new2")])
      .unwrap();

    // The in-flight stream still yields exactly the original six.
    let rest: Vec<_> = stream.collect();
    assert_eq!(4, rest.len());

    // A fresh query sees seven.
    let fresh: Vec<_> = kb
        .query_str("parent(?x, ?y)", QueryOptions::default())
        .unwrap()
        .collect();
    assert_eq!(7, fresh.len());

} // test_snapshot_isolation()

#[test]
fn test_retract_then_query() {

    let kb = family_kb();
    kb.retract_fact("parent", vec![atom!("tom"), atom!("mary")])
      .unwrap();

    let children: Vec<String> = kb
        .query_str("parent(tom, ?c)", QueryOptions::default())
        .unwrap()
        .map(|s| s["c"].to_string())
        .collect();
    assert_eq!(vec!["bob"], children);

    // Retracting it again changes nothing.
    kb.retract_fact("parent", vec![atom!("tom"), atom!("mary")])
      .unwrap();
    assert_eq!(5, kb.stats().total_facts);

} // test_retract_then_query()

#[test]
fn test_stats() {

    let kb = family_kb();
    load_str(&kb, "ancestor(?x, ?y) :- parent(?x, ?y).").unwrap();

    let _ = kb.query_str("parent(?x, ?y)", QueryOptions::default())
              .unwrap();
    let _ = kb.query_str("parent(tom, ?y)", QueryOptions::default())
              .unwrap();

    let stats = kb.stats();
    assert_eq!(6, stats.total_facts);
    assert_eq!(1, stats.total_rules);
    assert_eq!(2, stats.predicates);
    assert_eq!(2, stats.queries);
    assert_eq!(6, stats.facts_asserted);
    assert_eq!(1, stats.rules_added);

} // test_stats()

// The query cache is invalidated by every kind of mutation.
#[test]
fn test_cache_invalidation() {

    let kb = family_kb();
    let goals = parse_query("parent(tom, ?c)").unwrap();

    let first = kb.cached_query(&goals, None).unwrap();
    assert_eq!(2, first.len());
    let hit = kb.cached_query(&goals, None).unwrap();
    assert!(Arc::ptr_eq(&first, &hit));

    kb.retract_fact("parent", vec![atom!("tom"), atom!("bob")])
      .unwrap();
    let after = kb.cached_query(&goals, None).unwrap();
    assert_eq!(1, after.len());

} // test_cache_invalidation()

// Watchers observe committed changes, asynchronously, in order.
#[test]
#[serial]
fn test_watchers() {

    let kb = KnowledgeBase::new();
    let kinds = Arc::new(event_log());
    let sink = Arc::clone(&kinds);

    kb.watch("test", move |event| {
        sink.lock().unwrap().push(event.kind);
    });

    kb.assert_fact("a", vec![atom!("x")]).unwrap();
    kb.retract_fact("a", vec![atom!("x")]).unwrap();
    kb.clear();

    wait_for(|| kinds.lock().unwrap().len() == 3);
    let seen = kinds.lock().unwrap().clone();
    assert_eq!(vec![ChangeKind::Assert, ChangeKind::Retract,
                    ChangeKind::Clear],
               seen);

    kb.unwatch("test").unwrap();

} // test_watchers()

// A slow watcher does not block mutators.
#[test]
#[serial]
fn test_slow_watcher() {

    let kb = KnowledgeBase::new();
    let count = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&count);

    kb.watch("slow", move |_| {
        std::thread::sleep(std::time::Duration::from_millis(50));
        sink.fetch_add(1, Ordering::SeqCst);
    });

    let start = std::time::Instant::now();
    for i in 0..5 {
        kb.assert_fact("n", vec![Term::SInt(i)]).unwrap();
    }
    // Five mutations committed without waiting ~250ms of callbacks.
    assert!(start.elapsed() < std::time::Duration::from_millis(200));

    wait_for(|| count.load(Ordering::SeqCst) == 5);

} // test_slow_watcher()

fn wait_for<F>(done: F) where F: Fn() -> bool {
    for _ in 0..200 {
        if done() { return; }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
    panic!("Timed out waiting for watcher delivery.");
}

fn event_log() -> std::sync::Mutex<Vec<ChangeKind>> {
    std::sync::Mutex::new(vec![])
}
