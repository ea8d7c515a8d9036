// Control constructs: cut, negation as failure, once, repeat, if,
// between, conda and condu.

use sherlog::*;

fn solve(kb: &KnowledgeBase, text: &str) -> Vec<Bindings> {
    kb.query_str(text, QueryOptions::default())
      .unwrap()
      .collect()
}

// Rules:
//    value(?x) :- ?x = 1.
//    value(?x) :- ?x = 2.
//    pick1(?x) :- value(?x), ?x == 2.     % one solution
//    pick2(?x) :- value(?x), !, ?x == 2.  % no solutions: cut commits
#[test]
fn test_cut_commits_choice_points() {

    let kb = KnowledgeBase::new();
    load_str(&kb, "
        value(?x) :- ?x = 1.
        value(?x) :- ?x = 2.
        pick1(?x) :- value(?x), ?x == 2.
        pick2(?x) :- value(?x), !, ?x == 2.
    ").unwrap();

    let solutions = solve(&kb, "pick1(?x)");
    assert_eq!(1, solutions.len());
    assert_eq!("2", solutions[0]["x"].to_string());

    assert!(solve(&kb, "pick2(?x)").is_empty());

} // test_cut_commits_choice_points()

// Goals after the cut still backtrack; only the choice points before
// the cut, and the other clauses of the predicate, are pruned.
#[test]
fn test_cut_keeps_later_choice_points() {

    let kb = KnowledgeBase::new();
    load_str(&kb, "
        pair(?x, ?y) :- member(?x, [1, 2]), !, member(?y, [a, b]).
        pair(9, z).
    ").unwrap();

    let pairs: Vec<String> = solve(&kb, "pair(?x, ?y)")
        .iter()
        .map(|s| format!("{}{}", s["x"], s["y"]))
        .collect();
    assert_eq!(vec!["1a", "1b"], pairs);

} // test_cut_keeps_later_choice_points()

// A cut only commits the clause it appears in; the calling predicate
// keeps its alternatives.
#[test]
fn test_cut_is_clause_local() {

    let kb = KnowledgeBase::new();
    load_str(&kb, "
        inner(?x) :- member(?x, [1, 2]), !.
        outer(?x) :- inner(?x).
        outer(99).
    ").unwrap();

    // Facts stream before rules, so outer(99) arrives first; the cut
    // inside inner does not prune outer's remaining clauses.
    let values: Vec<String> = solve(&kb, "outer(?x)")
        .iter().map(|s| s["x"].to_string()).collect();
    assert_eq!(vec!["99", "1"], values);

} // test_cut_is_clause_local()

#[test]
fn test_negation_as_failure() {

    let kb = KnowledgeBase::new();
    load_str(&kb, "
        parent(tom, mary). parent(tom, bob). parent(mary, ann).
        leaf(?x) :- parent(?_, ?x), not(parent(?x, ?_)).
    ").unwrap();

    let leaves: Vec<String> = solve(&kb, "leaf(?x)")
        .iter().map(|s| s["x"].to_string()).collect();
    assert_eq!(vec!["bob", "ann"], leaves);

    // Negation binds nothing.
    let solutions = solve(&kb, "not(parent(bob, ?c))");
    assert_eq!(1, solutions.len());
    assert_eq!("_0", solutions[0]["c"].to_string());

} // test_negation_as_failure()

#[test]
fn test_once_and_repeat() {

    let kb = KnowledgeBase::new();

    // once keeps the first solution and its bindings.
    let solutions = solve(&kb, "once(member(?x, [a, b, c]))");
    assert_eq!(1, solutions.len());
    assert_eq!("a", solutions[0]["x"].to_string());

    // repeat is infinite; limit truncates.
    let solutions: Vec<_> = kb
        .query_str("repeat", QueryOptions { limit: Some(3),
                                            ..QueryOptions::default() })
        .unwrap()
        .collect();
    assert_eq!(3, solutions.len());

} // test_once_and_repeat()

#[test]
fn test_if_then_else() {

    let kb = KnowledgeBase::new();
    load_str(&kb, "weather(sunny).").unwrap();

    // The condition holds: the then-branch streams its solutions.
    let solutions = solve(
        &kb, "if(weather(sunny), member(?x, [beach, park]), =(?x, home))");
    let places: Vec<String> =
        solutions.iter().map(|s| s["x"].to_string()).collect();
    assert_eq!(vec!["beach", "park"], places);

    // The condition fails: the else-branch runs.
    let solutions = solve(
        &kb, "if(weather(rainy), =(?x, beach), =(?x, home))");
    assert_eq!(1, solutions.len());
    assert_eq!("home", solutions[0]["x"].to_string());

    // Bindings made by the condition are visible in the then-branch.
    let solutions = solve(
        &kb, "if(weather(?w), =(?x, ?w), =(?x, none))");
    assert_eq!(1, solutions.len());
    assert_eq!("sunny", solutions[0]["x"].to_string());

} // test_if_then_else()

#[test]
fn test_between() {

    let kb = KnowledgeBase::new();

    let values: Vec<String> = solve(&kb, "between(3, 6, ?x)")
        .iter().map(|s| s["x"].to_string()).collect();
    assert_eq!(vec!["3", "4", "5", "6"], values);

    // An empty range yields nothing.
    assert!(solve(&kb, "between(5, 3, ?x)").is_empty());

    // Ground third argument: a bounds check.
    assert_eq!(1, solve(&kb, "between(1, 10, 7)").len());
    assert!(solve(&kb, "between(1, 10, 17)").is_empty());

} // test_between()

// conda commits to the first clause whose test succeeds; condu also
// keeps only the first solution of that test.
#[test]
fn test_conda_condu() {

    let kb = KnowledgeBase::new();
    load_str(&kb, "flag(a). flag(b).").unwrap();

    // First clause test succeeds: the second clause never runs, and
    // the committed test backtracks through both flags.
    let solutions = solve(
        &kb, "conda(and(flag(?x), =(?y, hit)), and(true, =(?y, miss)))");
    let seen: Vec<String> = solutions.iter()
        .map(|s| format!("{}:{}", s["x"], s["y"]))
        .collect();
    assert_eq!(vec!["a:hit", "b:hit"], seen);

    // condu keeps only the first test solution.
    let solutions = solve(
        &kb, "condu(and(flag(?x), =(?y, hit)), and(true, =(?y, miss)))");
    let seen: Vec<String> = solutions.iter()
        .map(|s| format!("{}:{}", s["x"], s["y"]))
        .collect();
    assert_eq!(vec!["a:hit"], seen);

    // A failing test falls through to the next clause.
    let solutions = solve(
        &kb, "conda(and(flag(zzz), =(?y, hit)), and(true, =(?y, miss)))");
    let seen: Vec<String> = solutions.iter()
        .map(|s| s["y"].to_string())
        .collect();
    assert_eq!(vec!["miss"], seen);

} // test_conda_condu()
