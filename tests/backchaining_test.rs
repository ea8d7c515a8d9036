// Recursive resolution over a family tree.
//
// parent(tom, mary). parent(tom, bob). parent(mary, ann).
// parent(mary, pat). parent(bob, jim). parent(bob, liz).
//
// An ancestor is a parent or the parent of an ancestor:
//
// ancestor(?x, ?y) :- parent(?x, ?y).
// ancestor(?x, ?z) :- parent(?x, ?y), ancestor(?y, ?z).

use sherlog::*;

static FAMILY: &str = "
    parent(tom, mary). parent(tom, bob). parent(mary, ann).
    parent(mary, pat). parent(bob, jim). parent(bob, liz).
    ancestor(?x, ?y) :- parent(?x, ?y).
    ancestor(?x, ?z) :- parent(?x, ?y), ancestor(?y, ?z).
";

fn family_kb() -> KnowledgeBase {
    let kb = KnowledgeBase::new();
    load_str(&kb, FAMILY).unwrap();
    kb
}

// All descendants of tom, in the order resolution finds them: the
// direct children through the first rule, then the recursive ones.
#[test]
fn test_ancestor() {

    let kb = family_kb();
    let descendants: Vec<String> = kb
        .query_str("ancestor(tom, ?d)", QueryOptions::default())
        .unwrap()
        .map(|solution| solution["d"].to_string())
        .collect();

    assert_eq!(vec!["mary", "bob", "ann", "pat", "jim", "liz"],
               descendants);

} // test_ancestor()

#[test]
fn test_grandparent() {

    let kb = family_kb();
    kb.add_rule("grandparent", vec![var!("x"), var!("z")],
                vec![parse_term("parent(?x, ?y)").unwrap(),
                     parse_term("parent(?y, ?z)").unwrap()])
      .unwrap();

    let grandchildren: Vec<String> = kb
        .query_str("grandparent(tom, ?g)", QueryOptions::default())
        .unwrap()
        .map(|solution| solution["g"].to_string())
        .collect();

    assert_eq!(vec!["ann", "pat", "jim", "liz"], grandchildren);

} // test_grandparent()

// Ground queries succeed with an empty binding set.
#[test]
fn test_ground_query() {

    let kb = family_kb();
    let solutions: Vec<_> = kb
        .query_str("ancestor(tom, jim)", QueryOptions::default())
        .unwrap()
        .collect();
    assert_eq!(1, solutions.len());
    assert!(solutions[0].is_empty());

    let solutions: Vec<_> = kb
        .query_str("ancestor(jim, tom)", QueryOptions::default())
        .unwrap()
        .collect();
    assert!(solutions.is_empty());

} // test_ground_query()

// Disjunction in a rule body: both branches contribute, first branch
// exhausted before the second begins.
#[test]
fn test_disjunction() {

    let kb = family_kb();
    load_str(&kb, "
        relative(?x) :- parent(tom, ?x); parent(mary, ?x).
    ").unwrap();

    let relatives: Vec<String> = kb
        .query_str("relative(?r)", QueryOptions::default())
        .unwrap()
        .map(|solution| solution["r"].to_string())
        .collect();

    assert_eq!(vec!["mary", "bob", "ann", "pat"], relatives);

} // test_disjunction()
