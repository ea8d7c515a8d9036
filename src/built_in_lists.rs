//! List relation built-ins: member, append, length, nth, reverse,
//! first, rest, cons, empty, non_empty.
//!
//! member, append and nth are relations: they can enumerate
//! alternatives on backtracking. Their cursor lives in the solution
//! node (`enum_index`) and is passed in by the dispatcher.

use std::rc::Rc;

use crate::logic_var::VarSupply;
use crate::substitution_set::{walk, SubstitutionSet};
use crate::term::{make_list, Term};

/// Resolves a term to list form under the substitution: the known
/// items, plus the unresolved tail if the list is partial.
///
/// Bound tails are followed and flattened, so `[a | ?t]` with `?t`
/// bound to `[b | ?u]` yields items `[a, b]` and tail `?u`. Returns
/// None when the term is not a list at all.
pub fn resolved_list(term: &Term,
                     ss: &SubstitutionSet) -> Option<(Vec<Term>, Option<Term>)> {
    let t = walk(term, ss);
    match t {
        Term::List { items, tail } => {
            let mut out = items.clone();
            let mut current = tail.clone();
            while let Some(boxed) = current {
                let walked = walk(&boxed, ss).clone();
                match walked {
                    Term::List { items: more, tail: rest } => {
                        out.extend(more);
                        current = rest;
                    },
                    other => { return Some((out, Some(other))); },
                }
            }
            Some((out, None))
        },
        _ => None,
    }
} // resolved_list()

/// member/2: enumerates the elements of a list. For a partial list,
/// only the known items are enumerated.
pub fn next_member(args: &[Term], ss: &Rc<SubstitutionSet>,
                   index: &mut usize) -> Option<Rc<SubstitutionSet>> {
    let (items, _tail) = resolved_list(&args[1], ss)?;
    loop {
        let i = *index;
        if i >= items.len() { return None; }
        *index += 1;
        if let Some(new_ss) = args[0].unify(&items[i], ss) {
            return Some(new_ss);
        }
    }
} // next_member()

/// append/3.
///
/// With a proper first list, the third argument is the concatenation
/// (one solution). Otherwise, with a proper third list, the splits of
/// it are enumerated. Anything else fails.
pub fn next_append(args: &[Term], ss: &Rc<SubstitutionSet>,
                   index: &mut usize) -> Option<Rc<SubstitutionSet>> {

    // Concatenation: the first list is proper.
    if let Some((l1_items, None)) = resolved_list(&args[0], ss) {
        if *index > 0 { return None; }
        *index = 1;
        let combined = match resolved_list(&args[1], ss) {
            Some((l2_items, l2_tail)) => {
                let mut items = l1_items;
                items.extend(l2_items);
                Term::List { items, tail: l2_tail.map(Box::new) }
            },
            None => {
                // The second argument is not (yet) a list; keep it as
                // the tail: append([a], ?x, ?y) gives ?y = [a | ?x].
                let second = walk(&args[1], ss).clone();
                match second {
                    Term::Var { .. } | Term::Anonymous => {
                        Term::List { items: l1_items,
                                     tail: Some(Box::new(second)) }
                    },
                    _ => { return None; },
                }
            },
        };
        return combined.unify(&args[2], ss);
    }

    // Splitting: the third list is proper.
    if let Some((items, None)) = resolved_list(&args[2], ss) {
        loop {
            let k = *index;
            if k > items.len() { return None; }
            *index += 1;
            let front = make_list(items[..k].to_vec());
            let back = make_list(items[k..].to_vec());
            if let Some(ss1) = args[0].unify(&front, ss) {
                if let Some(ss2) = args[1].unify(&back, &ss1) {
                    return Some(ss2);
                }
            }
        }
    }

    None
} // next_append()

/// length/2. With a proper list, unifies the length. With an unbound
/// or partial list and a ground length, builds the missing elements as
/// fresh variables; `length(?l, 0)` binds `?l` to `[]`.
pub fn bip_length(args: &[Term], ss: &Rc<SubstitutionSet>,
                  supply: &VarSupply) -> Option<Rc<SubstitutionSet>> {

    match resolved_list(&args[0], ss) {
        Some((items, None)) => {
            Term::SInt(items.len() as i64).unify(&args[1], ss)
        },
        Some((items, Some(tail))) => {
            match walk(&args[1], ss) {
                Term::SInt(n) => {
                    let n = *n;
                    if n < items.len() as i64 { return None; }
                    let extra = n as usize - items.len();
                    tail.unify(&fresh_list(extra, supply), ss)
                },
                _ => None,
            }
        },
        None => {
            match walk(&args[0], ss) {
                Term::Var { .. } => {
                    match walk(&args[1], ss) {
                        Term::SInt(n) if *n >= 0 => {
                            args[0].unify(&fresh_list(*n as usize, supply),
                                          ss)
                        },
                        _ => None,
                    }
                },
                _ => None,
            }
        },
    }
} // bip_length()

// A proper list of n fresh variables.
fn fresh_list(n: usize, supply: &VarSupply) -> Term {
    let items = (0..n).map(|_| {
        let id = supply.next_id();
        Term::Var { id, name: format!("_e{}", id) }
    }).collect();
    make_list(items)
} // fresh_list()

/// nth/3, zero-based. With a ground index, picks the element; with an
/// unbound index, enumerates (index, element) pairs.
pub fn next_nth(args: &[Term], ss: &Rc<SubstitutionSet>,
                index: &mut usize) -> Option<Rc<SubstitutionSet>> {

    let (items, _tail) = resolved_list(&args[1], ss)?;

    match walk(&args[0], ss) {
        Term::SInt(n) => {
            if *index > 0 { return None; }
            *index = 1;
            let n = *n;
            if n < 0 || n >= items.len() as i64 { return None; }
            args[2].unify(&items[n as usize], ss)
        },
        Term::Var { .. } => {
            loop {
                let i = *index;
                if i >= items.len() { return None; }
                *index += 1;
                if let Some(ss1) = args[0].unify(&Term::SInt(i as i64), ss) {
                    if let Some(ss2) = args[2].unify(&items[i], &ss1) {
                        return Some(ss2);
                    }
                }
            }
        },
        _ => None,
    }
} // next_nth()

/// reverse/2 over proper lists, in either direction.
pub fn bip_reverse(args: &[Term],
                   ss: &Rc<SubstitutionSet>) -> Option<Rc<SubstitutionSet>> {
    if let Some((items, None)) = resolved_list(&args[0], ss) {
        let rev: Vec<Term> = items.into_iter().rev().collect();
        return make_list(rev).unify(&args[1], ss);
    }
    if let Some((items, None)) = resolved_list(&args[1], ss) {
        let rev: Vec<Term> = items.into_iter().rev().collect();
        return make_list(rev).unify(&args[0], ss);
    }
    None
} // bip_reverse()

/// first/2: the head of a non-empty list.
pub fn bip_first(args: &[Term],
                 ss: &Rc<SubstitutionSet>) -> Option<Rc<SubstitutionSet>> {
    let (items, _tail) = resolved_list(&args[0], ss)?;
    if items.is_empty() { return None; }
    args[1].unify(&items[0], ss)
} // bip_first()

/// rest/2: the list without its head.
pub fn bip_rest(args: &[Term],
                ss: &Rc<SubstitutionSet>) -> Option<Rc<SubstitutionSet>> {
    let (items, tail) = resolved_list(&args[0], ss)?;
    if items.is_empty() { return None; }
    let rest = Term::List {
        items: items[1..].to_vec(),
        tail: tail.map(Box::new),
    };
    args[1].unify(&rest, ss)
} // bip_rest()

/// cons/3: `cons(x, l, l2)` holds when l2 = [x | l].
pub fn bip_cons(args: &[Term],
                ss: &Rc<SubstitutionSet>) -> Option<Rc<SubstitutionSet>> {
    let consed = match resolved_list(&args[1], ss) {
        Some((items, tail)) => {
            let mut new_items = vec![args[0].clone()];
            new_items.extend(items);
            Term::List { items: new_items, tail: tail.map(Box::new) }
        },
        None => {
            let second = walk(&args[1], ss).clone();
            match second {
                Term::Var { .. } | Term::Anonymous => {
                    Term::List { items: vec![args[0].clone()],
                                 tail: Some(Box::new(second)) }
                },
                _ => { return None; },
            }
        },
    };
    consed.unify(&args[2], ss)
} // bip_cons()

/// empty/1: the argument is the empty list.
pub fn bip_empty(args: &[Term],
                 ss: &Rc<SubstitutionSet>) -> Option<Rc<SubstitutionSet>> {
    match resolved_list(&args[0], ss) {
        Some((items, None)) if items.is_empty() => Some(Rc::clone(ss)),
        _ => None,
    }
} // bip_empty()

/// non_empty/1: the argument is a list with at least one element.
pub fn bip_non_empty(args: &[Term],
                     ss: &Rc<SubstitutionSet>)
                     -> Option<Rc<SubstitutionSet>> {
    match resolved_list(&args[0], ss) {
        Some((items, _)) if !items.is_empty() => Some(Rc::clone(ss)),
        _ => None,
    }
} // bip_non_empty()


#[cfg(test)]
mod test {

    use std::rc::Rc;
    use super::*;
    use crate::*;

    #[test]
    fn test_member() {

        let ss = empty_ss!();
        let x = var!(1, "x");
        let list = parse_term("[a, b, c]").unwrap();
        let args = vec![x.clone(), list];

        let mut index = 0;
        let s1 = next_member(&args, &ss, &mut index).unwrap();
        assert_eq!("a", walk_deep(&x, &s1).to_string());
        let s2 = next_member(&args, &ss, &mut index).unwrap();
        assert_eq!("b", walk_deep(&x, &s2).to_string());
        let s3 = next_member(&args, &ss, &mut index).unwrap();
        assert_eq!("c", walk_deep(&x, &s3).to_string());
        assert!(next_member(&args, &ss, &mut index).is_none());

        // Ground first argument: skips non-matching elements.
        let args = vec![atom!("b"), parse_term("[a, b, c]").unwrap()];
        let mut index = 0;
        assert!(next_member(&args, &ss, &mut index).is_some());
        assert!(next_member(&args, &ss, &mut index).is_none());

    } // test_member()

    #[test]
    fn test_append_concat() {

        let ss = empty_ss!();
        let out = var!(1, "out");
        let args = vec![parse_term("[a, b]").unwrap(),
                        parse_term("[c]").unwrap(),
                        out.clone()];
        let mut index = 0;
        let s1 = next_append(&args, &ss, &mut index).unwrap();
        assert_eq!("[a, b, c]", walk_deep(&out, &s1).to_string());
        assert!(next_append(&args, &ss, &mut index).is_none());

    } // test_append_concat()

    #[test]
    fn test_append_split() {

        let ss = empty_ss!();
        let front = var!(1, "f");
        let back = var!(2, "b");
        let args = vec![front.clone(), back.clone(),
                        parse_term("[a, b]").unwrap()];

        let mut index = 0;
        let mut splits = vec![];
        while let Some(s) = next_append(&args, &ss, &mut index) {
            splits.push(format!("{} ++ {}",
                                walk_deep(&front, &s),
                                walk_deep(&back, &s)));
        }
        assert_eq!(vec!["[] ++ [a, b]".to_string(),
                        "[a] ++ [b]".to_string(),
                        "[a, b] ++ []".to_string()],
                   splits);

    } // test_append_split()

    #[test]
    fn test_length() {

        let supply = VarSupply::new();
        supply.next_id();  // id 1 is the query variable below

        let ss = empty_ss!();
        let n = var!(1, "n");
        let args = vec![parse_term("[a, b, c]").unwrap(), n.clone()];
        let s1 = bip_length(&args, &ss, &supply).unwrap();
        assert_eq!("3", walk_deep(&n, &s1).to_string());

        // length(?l, 0) binds ?l to [].
        let l = var!(1, "l");
        let args = vec![l.clone(), Term::SInt(0)];
        let s2 = bip_length(&args, &ss, &supply).unwrap();
        assert_eq!("[]", walk_deep(&l, &s2).to_string());

        // length(?l, 2) builds two fresh variables.
        let args = vec![l.clone(), Term::SInt(2)];
        let s3 = bip_length(&args, &ss, &supply).unwrap();
        if let Term::List { items, tail } = walk_deep(&l, &s3) {
            assert_eq!(2, items.len());
            assert!(tail.is_none());
        }
        else { panic!("length(?l, 2) should bind a list."); }

    } // test_length()

    #[test]
    fn test_nth() {

        let ss = empty_ss!();
        let x = var!(1, "x");

        // Ground index, zero-based.
        let args = vec![Term::SInt(1),
                        parse_term("[a, b, c]").unwrap(), x.clone()];
        let mut index = 0;
        let s1 = next_nth(&args, &ss, &mut index).unwrap();
        assert_eq!("b", walk_deep(&x, &s1).to_string());
        assert!(next_nth(&args, &ss, &mut index).is_none());

        // Out of range.
        let args = vec![Term::SInt(9),
                        parse_term("[a, b, c]").unwrap(), x.clone()];
        let mut index = 0;
        assert!(next_nth(&args, &ss, &mut index).is_none());

        // Unbound index enumerates.
        let n = var!(2, "n");
        let args = vec![n.clone(), parse_term("[a, b]").unwrap(),
                        x.clone()];
        let mut index = 0;
        let mut seen = vec![];
        while let Some(s) = next_nth(&args, &ss, &mut index) {
            seen.push(format!("{}:{}", walk_deep(&n, &s),
                              walk_deep(&x, &s)));
        }
        assert_eq!(vec!["0:a".to_string(), "1:b".to_string()], seen);

    } // test_nth()

    #[test]
    fn test_small_relations() {

        let ss = empty_ss!();
        let x = var!(1, "x");

        let args = vec![parse_term("[a, b]").unwrap(), x.clone()];
        let s = bip_reverse(&args, &ss).unwrap();
        assert_eq!("[b, a]", walk_deep(&x, &s).to_string());

        let s = bip_first(&args, &ss).unwrap();
        assert_eq!("a", walk_deep(&x, &s).to_string());

        let s = bip_rest(&args, &ss).unwrap();
        assert_eq!("[b]", walk_deep(&x, &s).to_string());

        let args = vec![atom!("z"), parse_term("[a]").unwrap(), x.clone()];
        let s = bip_cons(&args, &ss).unwrap();
        assert_eq!("[z, a]", walk_deep(&x, &s).to_string());

        let args = vec![parse_term("[]").unwrap()];
        assert!(bip_empty(&args, &ss).is_some());
        assert!(bip_non_empty(&args, &ss).is_none());

        let args = vec![parse_term("[a]").unwrap()];
        assert!(bip_empty(&args, &ss).is_none());
        assert!(bip_non_empty(&args, &ss).is_some());

    } // test_small_relations()

} // test
