//! Reification: turning substitutions into presentable results.
//!
//! A solution is presented as a map from query variable names to terms.
//! Each term is deeply walked; variables which remain unbound are given
//! the names `_0`, `_1`, ... in first-encounter order, so reifying the
//! same substitution twice gives identical output.

use std::collections::{BTreeMap, HashMap};

use crate::substitution_set::{walk_deep, SubstitutionSet};
use crate::term::Term;

/// One solution: query variable name -> reified term.
pub type Bindings = BTreeMap<String, Term>;

/// Reifies the named query variables against a final substitution.
///
/// `vars` lists (name, id) pairs in the order the variables first
/// appeared in the query; the numbering of leftover unbound variables
/// follows that order.
pub fn reify_bindings(vars: &[(String, usize)],
                      ss: &SubstitutionSet) -> Bindings {
    let mut seen: HashMap<usize, String> = HashMap::new();
    let mut counter = 0usize;
    let mut out = Bindings::new();
    for (name, id) in vars {
        let term = Term::Var { id: *id, name: name.clone() };
        let resolved = walk_deep(&term, ss);
        let named = name_unbound(resolved, &mut seen, &mut counter);
        out.insert(name.clone(), named);
    }
    out
} // reify_bindings()

/// Reifies one term: deep walk, then `_N` names for unbound variables.
pub fn reify_term(term: &Term, ss: &SubstitutionSet) -> Term {
    let mut seen: HashMap<usize, String> = HashMap::new();
    let mut counter = 0usize;
    name_unbound(walk_deep(term, ss), &mut seen, &mut counter)
} // reify_term()

// Replaces unbound variables with placeholder variables named _0, _1,
// ... in first-encounter order. The same variable keeps the same
// placeholder throughout one solution.
fn name_unbound(term: Term, seen: &mut HashMap<usize, String>,
                counter: &mut usize) -> Term {
    match term {
        Term::Var { id, name: _ } => {
            let name = seen.entry(id).or_insert_with(|| {
                let name = format!("_{}", *counter);
                *counter += 1;
                name
            });
            Term::Var { id: 0, name: name.clone() }
        },
        Term::Anonymous => {
            let name = format!("_{}", *counter);
            *counter += 1;
            Term::Var { id: 0, name }
        },
        Term::Compound(terms) => {
            Term::Compound(terms.into_iter()
                .map(|t| name_unbound(t, seen, counter)).collect())
        },
        Term::List { items, tail } => {
            Term::List {
                items: items.into_iter()
                    .map(|t| name_unbound(t, seen, counter)).collect(),
                tail: tail.map(|t| Box::new(name_unbound(*t, seen, counter))),
            }
        },
        Term::Map(entries) => {
            Term::Map(entries.into_iter()
                .map(|(k, v)| (k, name_unbound(v, seen, counter)))
                .collect())
        },
        _ => term,
    }
} // name_unbound()


#[cfg(test)]
mod test {

    use std::rc::Rc;
    use crate::*;

    #[test]
    fn test_reify_bindings() {

        let x = var!(1, "x");
        let y = var!(2, "y");

        let ss = empty_ss!();
        let ss = x.unify(&atom!("mary"), &ss).unwrap();

        let vars = vec![("x".to_string(), 1), ("y".to_string(), 2)];
        let bindings = reify_bindings(&vars, &ss);

        assert_eq!("mary", bindings["x"].to_string());
        assert_eq!("_0", bindings["y"].to_string());

        // Reification is deterministic.
        let again = reify_bindings(&vars, &ss);
        assert_eq!(bindings, again);

        let _ = y;  // y stays unbound on purpose

    } // test_reify_bindings()

    // The same unbound variable keeps one placeholder; distinct
    // variables get distinct placeholders.
    #[test]
    fn test_reify_shared_unbound() {

        let pair = compound!(atom!("pair"), var!(1, "a"),
                             var!(2, "b"), var!(1, "a"));
        let ss = empty_ss!();
        let out = reify_term(&pair, &ss);
        assert_eq!("pair(_0, _1, _0)", out.to_string());

    } // test_reify_shared_unbound()

} // test
