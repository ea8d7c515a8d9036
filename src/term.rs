//! Unifiable terms: atoms, numbers, strings, logic variables, compound
//! terms, lists and maps.
//!
//! * Two terms can unify if they are identical, or if one of them is
//!   an unbound logic variable.
//! * Binding a variable is guarded by an occurs-check, so a variable can
//!   never be bound to a term which contains it. There is no unchecked
//!   fast path.
//! * A Term owns its data.

use std::fmt;
use std::rc::Rc;

use crate::logic_var::{VarMap, VarSupply};
use crate::substitution_set::{occurs, SubstitutionSet};

static VAR_ID_0_ERR: &str =
       "unify(): Logic variable has an id of 0. See: recreate_variables().";

/// Key type for map terms. Only atoms and integers can be map keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Int(i64),
    Atom(String),
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MapKey::Int(i) => { write!(f, "{}", i) },
            MapKey::Atom(s) => { write!(f, "{}", s) },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// The anonymous variable, ?_, unifies with anything.
    Anonymous,
    /// A symbolic constant, such as `parent` or `tom`.
    Atom(String),
    /// Arbitrary text. Strings are opaque: they unify only with an
    /// equal string or a variable.
    SStr(String),
    /// 64-bit integer.
    SInt(i64),
    /// 64-bit floating point number.
    SFloat(f64),
    /// Logic variables have an id, which is used as an index into a
    /// [substitution set](../substitution_set/index.html).
    /// The surface syntax for a variable named `x` is `?x`.
    Var { id: usize, name: String },
    /// Compound term, eg. `symptom(flu, ?s)`. Implemented as a vector
    /// whose first element is the functor (an Atom), followed by the
    /// arguments.
    Compound(Vec<Term>),
    /// A list of terms. `tail` is None for a proper list, or holds the
    /// term after the bar in `[a, b | ?t]`.
    List { items: Vec<Term>, tail: Option<Box<Term>> },
    /// An unordered set of key/value entries, kept sorted by key.
    /// Two maps unify only when they have the same key set and every
    /// value pair unifies.
    Map(Vec<(MapKey, Term)>),
}

impl Term {

    /// Creates a key (= predicate name) for indexing into a
    /// [knowledge base](../knowledge_base/index.html).
    ///
    /// The name of a predicate consists of its functor plus its arity,
    /// separated by a slash. For the fact `parent(tom, mary)`, the
    /// functor is `parent` and the arity is 2, so the predicate name
    /// is `parent/2`.
    ///
    /// # Panics
    /// * If self is not a compound term.
    /// # Usage
    /// ```
    /// use sherlog::*;
    ///
    /// let c = parse_term("parent(tom, mary)").unwrap();
    /// assert_eq!("parent/2", c.key());
    /// ```
    pub fn key(&self) -> String {
        match self {
            Term::Compound(terms) => {
                let functor = &terms[0];
                let arity = terms.len() - 1;
                format!("{}/{}", functor, arity)
            },
            _ => { panic!("key() - Argument must be a compound term."); },
        }
    } // key()

    /// The functor of a compound term, or None.
    pub fn functor(&self) -> Option<&str> {
        match self {
            Term::Compound(terms) => {
                match &terms[0] {
                    Term::Atom(s) => Some(s),
                    _ => None,
                }
            },
            _ => None,
        }
    }

    /// Tries to unify two terms.
    ///
    /// Two terms unify if they are identical, if one of them is an
    /// unbound variable, or if one of them is a bound variable whose
    /// value unifies with the other term. On success the method returns
    /// a substitution set which records any new binding; on failure it
    /// returns None, and the caller backtracks.
    ///
    /// Binding a variable performs an occurs-check first: `?x` will not
    /// unify with `[?x]`.
    ///
    /// # Usage
    /// ```
    /// use std::rc::Rc;
    /// use sherlog::*;
    ///
    /// let x = Term::Var { id: 1, name: "x".to_string() };
    /// let age = Term::SInt(37);
    /// let ss = empty_ss!();
    /// match x.unify(&age, &ss) {
    ///     Some(_) => { println!("?x = 37"); },
    ///     None => { println!("Cannot unify."); },
    /// }
    /// ```
    pub fn unify(&self, other: &Term,
                 ss: &Rc<SubstitutionSet>) -> Option<Rc<SubstitutionSet>> {

        if self == other {  // identical ground values, or the same variable
            return Some(Rc::clone(ss));
        }

        match self {

            // ?_ unifies with everything.
            Term::Anonymous => { Some(Rc::clone(ss)) },

            Term::Atom(self_str) => {
                match other {
                    Term::Atom(other_str) => {
                        if self_str.eq(other_str) { return Some(Rc::clone(ss)); }
                        None
                    },
                    Term::Var { .. } => { other.unify(self, ss) },
                    Term::Anonymous => { Some(Rc::clone(ss)) },
                    _ => None,
                }
            },
            Term::SStr(self_str) => {
                match other {
                    Term::SStr(other_str) => {
                        if self_str.eq(other_str) { return Some(Rc::clone(ss)); }
                        None
                    },
                    Term::Var { .. } => { other.unify(self, ss) },
                    Term::Anonymous => { Some(Rc::clone(ss)) },
                    _ => None,
                }
            },
            Term::SInt(self_int) => {
                match other {
                    Term::SInt(other_int) => {
                        if self_int == other_int { return Some(Rc::clone(ss)); }
                        None
                    },
                    Term::Var { .. } => { other.unify(self, ss) },
                    Term::Anonymous => { Some(Rc::clone(ss)) },
                    _ => None,
                }
            },
            Term::SFloat(self_float) => {
                match other {
                    Term::SFloat(other_float) => {
                        if self_float == other_float { return Some(Rc::clone(ss)); }
                        None
                    },
                    Term::Var { .. } => { other.unify(self, ss) },
                    Term::Anonymous => { Some(Rc::clone(ss)) },
                    _ => None,
                }
            },
            Term::Var { id, name: _ } => {

                let id = *id;

                // Variables stored in the knowledge base have an id of 0.
                // They must be recreated before unification; an id of 0
                // here means a clause was used without renaming.
                if id == 0 { panic!("{}", VAR_ID_0_ERR); }

                if let Term::Anonymous = other { return Some(Rc::clone(ss)); }

                // If the variable is bound, unify its value instead.
                if id < ss.len() {
                    if let Some(term) = &ss[id] {
                        return term.unify(other, ss);
                    }
                }

                // Occurs-check: never bind ?x to a term containing ?x.
                if occurs(id, other, ss) { return None; }

                let length_src = ss.len();
                let mut length_dst = length_src;
                if id >= length_dst { length_dst = id + 1; }

                let mut new_ss: SubstitutionSet = vec![None; length_dst];
                for (i, item) in ss.iter().enumerate() {
                    if let Some(item) = item {
                        new_ss[i] = Some(Rc::clone(item));
                    }
                }
                new_ss[id] = Some(Rc::new(other.clone()));
                Some(Rc::new(new_ss))
            },
            Term::Compound(self_terms) => {
                match other {
                    Term::Compound(other_terms) => {
                        if self_terms.len() != other_terms.len() { return None; }
                        let mut new_ss = Rc::clone(ss);
                        for (left, right) in self_terms.iter()
                                                       .zip(other_terms.iter()) {
                            match left.unify(right, &new_ss) {
                                Some(ss) => { new_ss = ss; },
                                None => { return None; },
                            }
                        }
                        Some(new_ss)
                    },
                    Term::Var { .. } => { other.unify(self, ss) },
                    Term::Anonymous => { Some(Rc::clone(ss)) },
                    _ => None,
                }
            },
            Term::List { .. } => {
                match other {
                    Term::List { .. } => { unify_lists(self, other, ss) },
                    Term::Var { .. } => { other.unify(self, ss) },
                    Term::Anonymous => { Some(Rc::clone(ss)) },
                    _ => None,
                }
            },
            Term::Map(self_entries) => {
                match other {
                    Term::Map(other_entries) => {
                        // Entries are sorted by key, so the key sets match
                        // exactly when the pairs line up.
                        if self_entries.len() != other_entries.len() {
                            return None;
                        }
                        let mut new_ss = Rc::clone(ss);
                        for ((k1, v1), (k2, v2)) in self_entries.iter()
                                                    .zip(other_entries.iter()) {
                            if k1 != k2 { return None; }
                            match v1.unify(v2, &new_ss) {
                                Some(ss) => { new_ss = ss; },
                                None => { return None; },
                            }
                        }
                        Some(new_ss)
                    },
                    Term::Var { .. } => { other.unify(self, ss) },
                    Term::Anonymous => { Some(Rc::clone(ss)) },
                    _ => None,
                }
            },

        } // match self

    } // unify()

    /// Recreates logic variables to give them unique ids.
    ///
    /// The scope of a logic variable is the clause or query in which it
    /// is defined. The two rules below both use a variable named `?x`,
    /// but the `?x` in `father` is different from the `?x` in `mother`:
    ///
    /// <blockquote>
    /// father(?x, ?y) :- parent(?x, ?y), male(?x).<br>
    /// mother(?x, ?y) :- parent(?x, ?y), female(?x).
    /// </blockquote>
    ///
    /// Clauses stored in the knowledge base keep their variables at
    /// id 0. Whenever a clause is used during resolution, this method
    /// replaces each variable with a fresh one drawn from the query's
    /// [VarSupply](../logic_var/struct.VarSupply.html). A variable which
    /// occurs several times in one clause must keep a single identity,
    /// so previously recreated names are remembered in `vars`.
    pub fn recreate_variables(self, vars: &mut VarMap,
                              supply: &VarSupply) -> Term {
        match self {
            Term::Var { id: _, name } => {
                if let Some(id) = vars.get(&name) {
                    Term::Var { id: *id, name }
                }
                else {
                    let id = supply.next_id();
                    vars.insert(name.clone(), id);
                    Term::Var { id, name }
                }
            },
            Term::Compound(terms) => {
                let new_terms = terms.into_iter()
                    .map(|t| t.recreate_variables(vars, supply)).collect();
                Term::Compound(new_terms)
            },
            Term::List { items, tail } => {
                let new_items = items.into_iter()
                    .map(|t| t.recreate_variables(vars, supply)).collect();
                let new_tail = tail.map(
                    |t| Box::new(t.recreate_variables(vars, supply)));
                Term::List { items: new_items, tail: new_tail }
            },
            Term::Map(entries) => {
                let new_entries = entries.into_iter()
                    .map(|(k, v)| (k, v.recreate_variables(vars, supply)))
                    .collect();
                Term::Map(new_entries)
            },
            _ => self,
        }
    } // recreate_variables()

    /// Renames every variable keyed by id, for copy_term/2.
    ///
    /// Unlike recreate_variables(), which merges variables by name,
    /// this keeps distinct variables distinct even when their names
    /// collide (which can happen after several clauses have been
    /// renamed into the same query).
    pub fn rename_by_id(&self, map: &mut std::collections::HashMap<usize, usize>,
                        supply: &VarSupply) -> Term {
        match self {
            Term::Var { id, name } => {
                let new_id = *map.entry(*id)
                                 .or_insert_with(|| supply.next_id());
                Term::Var { id: new_id, name: name.clone() }
            },
            Term::Compound(terms) => {
                Term::Compound(terms.iter()
                    .map(|t| t.rename_by_id(map, supply)).collect())
            },
            Term::List { items, tail } => {
                Term::List {
                    items: items.iter()
                        .map(|t| t.rename_by_id(map, supply)).collect(),
                    tail: tail.as_ref()
                        .map(|t| Box::new(t.rename_by_id(map, supply))),
                }
            },
            Term::Map(entries) => {
                Term::Map(entries.iter()
                    .map(|(k, v)| (k.clone(), v.rename_by_id(map, supply)))
                    .collect())
            },
            _ => self.clone(),
        }
    } // rename_by_id()

} // impl Term

// Unifies two list terms.
//
// The common prefix unifies pointwise. Whatever remains on the longer
// side must be absorbed by the shorter side's tail: unifying
// [a, b | ?t] with [a, b, c] binds ?t to [c].
fn unify_lists(left: &Term, right: &Term,
               ss: &Rc<SubstitutionSet>) -> Option<Rc<SubstitutionSet>> {

    let (l_items, l_tail) = match left {
        Term::List { items, tail } => (items, tail),
        _ => { return None; },
    };
    let (r_items, r_tail) = match right {
        Term::List { items, tail } => (items, tail),
        _ => { return None; },
    };

    let prefix = l_items.len().min(r_items.len());
    let mut new_ss = Rc::clone(ss);
    for i in 0..prefix {
        match l_items[i].unify(&r_items[i], &new_ss) {
            Some(ss) => { new_ss = ss; },
            None => { return None; },
        }
    }

    let l_rest = &l_items[prefix..];
    let r_rest = &r_items[prefix..];

    if l_rest.is_empty() && r_rest.is_empty() {
        return match (l_tail, r_tail) {
            (None, None) => Some(new_ss),
            (Some(t), None) => t.unify(&empty_list(), &new_ss),
            (None, Some(t)) => t.unify(&empty_list(), &new_ss),
            (Some(t1), Some(t2)) => t1.unify(t2, &new_ss),
        };
    }

    if l_rest.is_empty() {
        // The left side ran out of items; its tail takes the remainder.
        let remainder = Term::List { items: r_rest.to_vec(),
                                     tail: r_tail.clone() };
        return match l_tail {
            Some(t) => t.unify(&remainder, &new_ss),
            None => None,
        };
    }

    // Mirror image.
    let remainder = Term::List { items: l_rest.to_vec(),
                                 tail: l_tail.clone() };
    match r_tail {
        Some(t) => t.unify(&remainder, &new_ss),
        None => None,
    }

} // unify_lists()

/// The empty list, [].
pub fn empty_list() -> Term {
    Term::List { items: vec![], tail: None }
}

/// Builds a proper list from a vector of terms.
pub fn make_list(items: Vec<Term>) -> Term {
    Term::List { items, tail: None }
}

/// Builds a map term. Entries are sorted by key; a key given twice
/// keeps its last value.
pub fn make_map(entries: Vec<(MapKey, Term)>) -> Term {
    let mut map = std::collections::BTreeMap::new();
    for (k, v) in entries {
        map.insert(k, v);
    }
    Term::Map(map.into_iter().collect())
}

/// Recreates logic variables in a vector of terms.
pub fn recreate_vars_terms(terms: Vec<Term>, vars: &mut VarMap,
                           supply: &VarSupply) -> Vec<Term> {
    terms.into_iter()
         .map(|t| t.recreate_variables(vars, supply))
         .collect()
} // recreate_vars_terms()

// Display trait, to display terms.
impl fmt::Display for Term {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            Term::Anonymous => { write!(f, "?_") },
            Term::Atom(s) => { write!(f, "{}", s) },
            Term::SStr(s) => { write!(f, "\"{}\"", s) },
            Term::SInt(i) => { write!(f, "{}", i) },
            Term::SFloat(fl) => { write!(f, "{}", fl) },
            Term::Var { id, name } => {
                // Reification placeholders (_0, _1, ...) print bare.
                if name.starts_with('_') { write!(f, "{}", name) }
                else if *id == 0 { write!(f, "?{}", name) }
                else { write!(f, "?{}_{}", name, id) }
            },
            Term::Compound(terms) => {
                let mut out = format!("{}(", terms[0]);
                let mut comma = false;
                for term in &terms[1..] {
                    if comma { out += ", "; }
                    else { comma = true; }
                    out += &term.to_string();
                }
                write!(f, "{})", out)
            },
            Term::List { items, tail } => {
                let mut out = "[".to_string();
                let mut comma = false;
                for item in items {
                    if comma { out += ", "; }
                    else { comma = true; }
                    out += &item.to_string();
                }
                if let Some(t) = tail {
                    out += " | ";
                    out += &t.to_string();
                }
                write!(f, "{}]", out)
            },
            Term::Map(entries) => {
                let mut out = "{".to_string();
                let mut comma = false;
                for (k, v) in entries {
                    if comma { out += ", "; }
                    else { comma = true; }
                    out += &format!("{}: {}", k, v);
                }
                write!(f, "{}}}", out)
            },
        } // match
    } // fmt

} // fmt::Display


#[cfg(test)]
mod test {

    use std::rc::Rc;
    use crate::*;

    /// Tests that the Display trait prints terms correctly.
    #[test]
    fn test_display_term() {

        assert_eq!("?_", Term::Anonymous.to_string());
        assert_eq!("seawater", atom!("seawater").to_string());
        assert_eq!("\"some text\"", Term::SStr("some text".to_string()).to_string());
        assert_eq!("3.14159", Term::SFloat(3.14159).to_string());
        assert_eq!("67", Term::SInt(67).to_string());

        assert_eq!("?x", var!("x").to_string());
        assert_eq!("?x_10", var!(10, "x").to_string());
        assert_eq!("_0", var!("_0").to_string());

        let pronoun = compound!(atom!("pronoun"), atom!("i"),
                                atom!("subject"), atom!("first"));
        assert_eq!("pronoun(i, subject, first)", pronoun.to_string());

        let list1 = make_list(vec![Term::SInt(1), Term::SInt(2), Term::SInt(3)]);
        assert_eq!("[1, 2, 3]", list1.to_string());

        let list2 = Term::List {
            items: vec![Term::SInt(1), Term::SInt(2)],
            tail: Some(Box::new(var!(0, "x"))),
        };
        assert_eq!("[1, 2 | ?x]", list2.to_string());

        let map = make_map(vec![
            (MapKey::Atom("name".to_string()), atom!("ada")),
            (MapKey::Atom("age".to_string()), Term::SInt(36)),
        ]);
        assert_eq!("{age: 36, name: ada}", map.to_string());

    } // test_display_term()

    /// It's OK for a variable in the knowledge base to have an id of 0,
    /// but after a clause is fetched, variable ids must not be 0.
    /// Unify() should panic if it is called on a variable with id 0.
    #[test]
    #[should_panic]
    fn test_when_var_id_is_0() {
        let ss = empty_ss!();
        let a = atom!("a");
        let x = var!("x");  // default id is 0
        if let Some(_ss2) = x.unify(&a, &ss) {}
    }

    /// Terms should unify with themselves.
    #[test]
    fn test_unify_with_self() {
        let ss = empty_ss!();
        let pi = Term::SFloat(3.14159);
        let pi2 = Term::SFloat(3.14159);
        assert_ne!(None, pi.unify(&pi2, &ss));
    }

    /// Test unify() with an unbound variable: ?x = f(a, b)
    #[test]
    fn test_unify_with_unbound_var() {
        let ss = empty_ss!();
        let c = compound!(atom!("f"), atom!("a"), atom!("b"));
        let x = var!(1, "x");
        assert_ne!(None, c.unify(&x, &ss));
    }

    /// Test unify() with bound variables: ?y = a, ?x = ?y, ?x = a
    #[test]
    fn test_unify_with_bound_vars() {

        let ss = empty_ss!();
        let a = atom!("a");
        let x = var!(1, "x");
        let y = var!(2, "y");

        if let Some(ss) = y.unify(&a, &ss) {
            if let Some(ss) = x.unify(&y, &ss) {
                assert_ne!(None, a.unify(&x, &ss),
                           "Failed to unify: a with ?x -> ?y -> a");
            }
            else { panic!("Failed to unify: ?x = ?y"); }
        }
        else { panic!("Failed to unify: ?y = a"); }
    } // test_unify_with_bound_vars()

    /// The occurs-check must reject ?x = [?x].
    #[test]
    fn test_occurs_check() {
        let ss = empty_ss!();
        let x = var!(1, "x");
        let lst = make_list(vec![x.clone()]);
        assert_eq!(None, x.unify(&lst, &ss));

        // Also through an intermediate binding: ?y = ?x, ?x = f(?y).
        let y = var!(2, "y");
        let ss = y.unify(&x, &ss).unwrap();
        let c = compound!(atom!("f"), y.clone());
        assert_eq!(None, x.unify(&c, &ss));
    }

    /// Lists unify element-wise; a tail variable absorbs the remainder.
    #[test]
    fn test_unify_lists() {

        let ss = empty_ss!();

        let l1 = make_list(vec![atom!("a"), atom!("b"), atom!("c")]);
        let l2 = make_list(vec![atom!("a"), atom!("b"), atom!("c")]);
        assert_ne!(None, l1.unify(&l2, &ss));

        let l3 = make_list(vec![atom!("a"), atom!("b")]);
        assert_eq!(None, l1.unify(&l3, &ss));

        // [?h | ?t] = [a, b, c]
        let h = var!(1, "h");
        let t = var!(2, "t");
        let l4 = Term::List { items: vec![h.clone()],
                              tail: Some(Box::new(t.clone())) };
        let ss2 = l4.unify(&l1, &ss).unwrap();
        let head = walk_deep(&h, &ss2);
        assert_eq!("a", head.to_string());
        let tail = walk_deep(&t, &ss2);
        assert_eq!("[b, c]", tail.to_string());

        // [a | ?t] = [a] binds ?t to [].
        let t2 = var!(3, "t2");
        let l5 = Term::List { items: vec![atom!("a")],
                              tail: Some(Box::new(t2.clone())) };
        let l6 = make_list(vec![atom!("a")]);
        let ss3 = l5.unify(&l6, &ss).unwrap();
        assert_eq!("[]", walk_deep(&t2, &ss3).to_string());

    } // test_unify_lists()

    /// Maps unify only on identical key sets.
    #[test]
    fn test_unify_maps() {

        let ss = empty_ss!();
        let x = var!(1, "x");

        let m1 = make_map(vec![
            (MapKey::Atom("a".to_string()), Term::SInt(1)),
            (MapKey::Atom("b".to_string()), x.clone()),
        ]);
        let m2 = make_map(vec![
            (MapKey::Atom("a".to_string()), Term::SInt(1)),
            (MapKey::Atom("b".to_string()), Term::SInt(2)),
        ]);
        let ss2 = m1.unify(&m2, &ss).unwrap();
        assert_eq!("2", walk_deep(&x, &ss2).to_string());

        let m3 = make_map(vec![
            (MapKey::Atom("a".to_string()), Term::SInt(1)),
        ]);
        assert_eq!(None, m1.unify(&m3, &ss));

        let m4 = make_map(vec![
            (MapKey::Atom("a".to_string()), Term::SInt(1)),
            (MapKey::Atom("c".to_string()), Term::SInt(2)),
        ]);
        assert_eq!(None, m1.unify(&m4, &ss));

    } // test_unify_maps()

    /// Test recreate_variables(). When first created, variables have an
    /// id of 0. Recreation gives them unique ids (1, 2, 3, ...).
    #[test]
    fn test_recreate_variables() {

        let supply = VarSupply::new();

        let complex1 = compound!(atom!("func"), atom!("a"),
                                 var!("w"), var!("x"));
        let list1 = Term::List {
            items: vec![atom!("c"), var!("y")],
            tail: Some(Box::new(var!("z"))),
        };

        let mut recreated = VarMap::new();
        let complex2 = complex1.recreate_variables(&mut recreated, &supply);
        let list2 = list1.recreate_variables(&mut recreated, &supply);

        assert_eq!("func(a, ?w_1, ?x_2)", complex2.to_string());
        assert_eq!("[c, ?y_3 | ?z_4]", list2.to_string());

    } // test_recreate_variables()

    /// A variable which appears twice must keep one identity.
    #[test]
    fn test_recreate_variables_shared() {
        let supply = VarSupply::new();
        let c = compound!(atom!("f"), var!("x"), var!("x"));
        let c2 = c.recreate_variables(&mut VarMap::new(), &supply);
        assert_eq!("f(?x_1, ?x_1)", c2.to_string());
    }

    /// Test key().
    #[test]
    fn test_key() {
        let c = compound!(atom!("element"), atom!("yttrium"), Term::SInt(39));
        assert_eq!("element/2", c.key());
        let c = compound!(atom!("measure"));
        assert_eq!("measure/0", c.key());
    }

    #[test]
    #[should_panic]
    fn test_key_panic() {
        let tb = atom!("terbium");
        tb.key();
    }

    /// rename_by_id() keeps same-named variables distinct.
    #[test]
    fn test_rename_by_id() {
        let supply = VarSupply::new();
        supply.next_id(); supply.next_id(); // ids 1, 2 in use
        let c = compound!(atom!("f"), var!(1, "x"), var!(2, "x"), var!(1, "x"));
        let mut map = std::collections::HashMap::new();
        let c2 = c.rename_by_id(&mut map, &supply);
        assert_eq!("f(?x_3, ?x_4, ?x_3)", c2.to_string());
    }

} // test
