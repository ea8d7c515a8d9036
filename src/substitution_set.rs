//! A substitution set records bindings of logic variables.
//!
//! As the engine works on a goal, it generates substitution sets, which
//! record the bindings made so far. A substitution set can be thought of
//! as a partial solution for a goal. Extension creates a new set behind
//! a fresh Rc pointer; backtracking simply drops the extension and
//! continues from the parent set, so bindings can never leak backwards.

use std::rc::Rc;

use crate::term::Term;

/// Records bindings of logic variables to terms.
///
/// Variable ids are used to index into the substitution set. Ids are
/// allocated per query (see
/// [VarSupply](../logic_var/struct.VarSupply.html)), so the vector stays
/// as short as the number of variables the query has touched.
//
// Note:
// Copying the whole vector on each extension sounds expensive, but the
// entries are Rc pointers (8 bytes), not terms, and query-local ids keep
// the vector short.
pub type SubstitutionSet = Vec<Option<Rc<Term>>>;

/// Follows variable bindings until a non-variable term or an unbound
/// variable is reached.
///
/// This does not rebuild any terms: a compound term is returned as-is
/// even when its arguments contain bound variables. Use
/// [walk_deep()](fn.walk_deep.html) for a fully resolved term.
pub fn walk<'a>(term: &'a Term, ss: &'a SubstitutionSet) -> &'a Term {
    let mut current = term;
    loop {
        match current {
            Term::Var { id, name: _ } => {
                if *id < ss.len() {
                    if let Some(bound) = &ss[*id] {
                        current = &**bound;
                        continue;
                    }
                }
                return current;
            },
            _ => { return current; },
        }
    }
} // walk()

/// Rebuilds a term with every discoverable binding inlined.
///
/// Bound list tails are flattened, so `[a | ?t]` with `?t` bound to
/// `[b]` comes back as `[a, b]`. Variables which remain unbound are
/// left in place.
///
/// # Usage
/// ```
/// use std::rc::Rc;
/// use sherlog::*;
///
/// let x = var!(1, "x");
/// let ss = empty_ss!();
/// let ss = x.unify(&atom!("argon"), &ss).unwrap();
/// let c = compound!(atom!("element"), x);
/// assert_eq!("element(argon)", walk_deep(&c, &ss).to_string());
/// ```
pub fn walk_deep(term: &Term, ss: &SubstitutionSet) -> Term {
    let t = walk(term, ss);
    match t {
        Term::Compound(terms) => {
            Term::Compound(terms.iter().map(|x| walk_deep(x, ss)).collect())
        },
        Term::List { items, tail } => {
            let mut new_items: Vec<Term> =
                items.iter().map(|x| walk_deep(x, ss)).collect();
            let mut new_tail: Option<Box<Term>> = None;
            if let Some(t) = tail {
                match walk_deep(t, ss) {
                    Term::List { items: more, tail: rest } => {
                        new_items.extend(more);
                        new_tail = rest;
                    },
                    other => { new_tail = Some(Box::new(other)); },
                }
            }
            Term::List { items: new_items, tail: new_tail }
        },
        Term::Map(entries) => {
            Term::Map(entries.iter()
                .map(|(k, v)| (k.clone(), walk_deep(v, ss)))
                .collect())
        },
        _ => t.clone(),
    }
} // walk_deep()

/// Does the variable with the given id occur anywhere inside the term,
/// under the current substitution?
///
/// This is the occurs-check used by
/// [unify()](../term/enum.Term.html#method.unify). It follows bindings,
/// so an occurrence hidden behind another variable is still found.
pub fn occurs(id: usize, term: &Term, ss: &SubstitutionSet) -> bool {
    match term {
        Term::Var { id: other_id, name: _ } => {
            if *other_id == id { return true; }
            if *other_id < ss.len() {
                if let Some(bound) = &ss[*other_id] {
                    return occurs(id, bound, ss);
                }
            }
            false
        },
        Term::Compound(terms) => {
            terms.iter().any(|t| occurs(id, t, ss))
        },
        Term::List { items, tail } => {
            items.iter().any(|t| occurs(id, t, ss))
                || tail.as_ref().map_or(false, |t| occurs(id, t, ss))
        },
        Term::Map(entries) => {
            entries.iter().any(|(_, v)| occurs(id, v, ss))
        },
        _ => false,
    }
} // occurs()

/// Is the logic variable bound?
///
/// # Panics
/// * If `term` is not a logic variable.
pub fn is_bound(term: &Term, ss: &SubstitutionSet) -> bool {
    if let Term::Var { id, name: _ } = *term {
        if id >= ss.len() { return false; }
        ss[id] != None
    }
    else {
        panic!("is_bound() - First argument must be a logic variable.");
    }
} // is_bound()

/// Gets the term which a logic variable is directly bound to.
///
/// The bound term is not necessarily ground; it might be another
/// variable. Used for debugging and testing.
///
/// # Panics
/// * If `term` is not a logic variable.
pub fn get_binding<'a>(term: &Term, ss: &'a SubstitutionSet)
                       -> Option<&'a Term> {
    if let Term::Var { id, name: _ } = *term {
        if id >= ss.len() { return None; }
        match &ss[id] {
            None => None,
            Some(entry) => Some(entry),
        }
    }
    else {
        panic!("get_binding() - First argument must be a logic variable.");
    }
} // get_binding()

/// Is the term fully ground under the substitution? A term is ground
/// when walking it deeply leaves no variables behind.
pub fn is_ground(term: &Term, ss: &SubstitutionSet) -> bool {
    match walk(term, ss) {
        Term::Var { .. } | Term::Anonymous => false,
        Term::Compound(terms) => terms.iter().all(|t| is_ground(t, ss)),
        Term::List { items, tail } => {
            items.iter().all(|t| is_ground(t, ss))
                && tail.as_ref().map_or(true, |t| is_ground(t, ss))
        },
        Term::Map(entries) => entries.iter().all(|(_, v)| is_ground(v, ss)),
        _ => true,
    }
} // is_ground()

/// Formats a substitution set for display. Use for debugging.
pub fn format_ss(ss: &SubstitutionSet) -> String {
    let mut out = "----- Substitution Set -----\n".to_string();
    if ss.is_empty() { out += "\tEmpty\n"; }
    else {
        for (i, term) in ss.iter().enumerate() {
            match term {
                None => { out += &format!("{}\tNone\n", i); },
                Some(t) => { out += &format!("{}\t{}\n", i, t); },
            }
        }
    }
    out += "----------------------------";
    out
} // format_ss()

/// Prints a formatted substitution set. Use for debugging.
pub fn print_ss(ss: &SubstitutionSet) {
    println!("{}", format_ss(ss));
} // print_ss()


#[cfg(test)]
mod test {

    use std::rc::Rc;
    use crate::*;

    #[test]
    fn test_format_ss() {

        let mut ss = empty_ss!();

        let s = "----- Substitution Set -----\n\t\
                 Empty\n----------------------------";
        assert_eq!(s, format_ss(&ss));

        let ar = atom!("argon");
        let x = var!(1, "x");

        if let Some(ss2) = ar.unify(&x, &ss) { ss = ss2; }
        else { panic!("Cannot bind ?x = argon."); }

        let s = "----- Substitution Set -----\n\
                 0\tNone\n\
                 1\targon\n\
                 ----------------------------";
        assert_eq!(s, format_ss(&ss));

    } // test_format_ss()

    // Test walk(), is_bound(), get_binding() over a chain of bindings.
    #[test]
    fn test_walk_chain() {

        let a = atom!("alpha");
        let w = var!(1, "w");
        let x = var!(2, "x");
        let y = var!(3, "y");
        let z = var!(4, "z");

        let mut ss = empty_ss!();

        // ?x -> ?w (both unbound), ?y -> alpha, ?z -> ?y -> alpha.
        if let Some(ss2) = x.unify(&w, &ss) { ss = ss2; }
        else { panic!("Cannot unify ?x = ?w."); }
        if let Some(ss2) = a.unify(&y, &ss) { ss = ss2; }
        else { panic!("Cannot unify ?y = alpha."); }
        if let Some(ss2) = z.unify(&y, &ss) { ss = ss2; }
        else { panic!("Cannot unify ?z = ?y."); }

        assert!(!is_bound(&w, &ss));
        assert!(is_bound(&x, &ss));

        // Walking ?x ends at the unbound ?w.
        assert_eq!("?w_1", walk(&x, &ss).to_string());
        // Walking ?z ends at alpha.
        assert_eq!("alpha", walk(&z, &ss).to_string());

        let b = get_binding(&z, &ss);
        match b {
            None => { panic!("get_binding() - ?z should be bound to ?y."); },
            Some(entry) => { assert_eq!("?y_3", entry.to_string()); },
        }

    } // test_walk_chain()

    // walk_deep() flattens bound list tails.
    #[test]
    fn test_walk_deep_list() {

        let t = var!(1, "t");
        let list = Term::List {
            items: vec![atom!("a")],
            tail: Some(Box::new(t.clone())),
        };
        let rest = make_list(vec![atom!("b"), atom!("c")]);

        let ss = empty_ss!();
        let ss = t.unify(&rest, &ss).unwrap();

        assert_eq!("[a, b, c]", walk_deep(&list, &ss).to_string());

    } // test_walk_deep_list()

    #[test]
    fn test_is_ground() {

        let x = var!(1, "x");
        let c = compound!(atom!("f"), atom!("a"), x.clone());

        let ss = empty_ss!();
        assert!(!is_ground(&c, &ss));

        let ss = x.unify(&Term::SInt(9), &ss).unwrap();
        assert!(is_ground(&c, &ss));

    } // test_is_ground()

} // test
