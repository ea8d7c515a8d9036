//! Type check built-ins: number, integer, atom, is_list, var, nonvar,
//! ground.
//!
//! Each check walks its argument first, so a variable bound to an atom
//! passes atom/1. The checks never bind anything; they succeed with
//! the substitution unchanged or fail.

use std::rc::Rc;

use crate::built_in_lists::resolved_list;
use crate::substitution_set::{is_ground, walk, SubstitutionSet};
use crate::term::Term;

fn check(ok: bool, ss: &Rc<SubstitutionSet>) -> Option<Rc<SubstitutionSet>> {
    if ok { Some(Rc::clone(ss)) } else { None }
}

/// number/1: an integer or a float.
pub fn bip_is_number(args: &[Term],
                     ss: &Rc<SubstitutionSet>)
                     -> Option<Rc<SubstitutionSet>> {
    let ok = matches!(walk(&args[0], ss), Term::SInt(_) | Term::SFloat(_));
    check(ok, ss)
}

/// integer/1.
pub fn bip_is_integer(args: &[Term],
                      ss: &Rc<SubstitutionSet>)
                      -> Option<Rc<SubstitutionSet>> {
    let ok = matches!(walk(&args[0], ss), Term::SInt(_));
    check(ok, ss)
}

/// atom/1.
pub fn bip_is_atom(args: &[Term],
                   ss: &Rc<SubstitutionSet>)
                   -> Option<Rc<SubstitutionSet>> {
    let ok = matches!(walk(&args[0], ss), Term::Atom(_));
    check(ok, ss)
}

/// is_list/1: a proper list (no unresolved tail).
pub fn bip_is_list(args: &[Term],
                   ss: &Rc<SubstitutionSet>)
                   -> Option<Rc<SubstitutionSet>> {
    let ok = matches!(resolved_list(&args[0], ss), Some((_, None)));
    check(ok, ss)
}

/// var/1: an unbound variable after walking.
pub fn bip_is_var(args: &[Term],
                  ss: &Rc<SubstitutionSet>)
                  -> Option<Rc<SubstitutionSet>> {
    let ok = matches!(walk(&args[0], ss),
                      Term::Var { .. } | Term::Anonymous);
    check(ok, ss)
}

/// nonvar/1.
pub fn bip_is_nonvar(args: &[Term],
                     ss: &Rc<SubstitutionSet>)
                     -> Option<Rc<SubstitutionSet>> {
    let ok = !matches!(walk(&args[0], ss),
                       Term::Var { .. } | Term::Anonymous);
    check(ok, ss)
}

/// ground/1: no variables anywhere inside, after walking.
pub fn bip_is_ground(args: &[Term],
                     ss: &Rc<SubstitutionSet>)
                     -> Option<Rc<SubstitutionSet>> {
    check(is_ground(&args[0], ss), ss)
}


#[cfg(test)]
mod test {

    use std::rc::Rc;
    use super::*;
    use crate::*;

    #[test]
    fn test_type_checks() {

        let ss = empty_ss!();
        let x = var!(1, "x");
        let ss = x.unify(&Term::SInt(7), &ss).unwrap();

        // Bound variables are checked through their binding.
        assert!(bip_is_number(&[x.clone()], &ss).is_some());
        assert!(bip_is_integer(&[x.clone()], &ss).is_some());
        assert!(bip_is_atom(&[x.clone()], &ss).is_none());
        assert!(bip_is_var(&[x.clone()], &ss).is_none());
        assert!(bip_is_nonvar(&[x.clone()], &ss).is_some());

        let y = var!(2, "y");
        assert!(bip_is_var(&[y.clone()], &ss).is_some());
        assert!(bip_is_nonvar(&[y.clone()], &ss).is_none());

        assert!(bip_is_number(&[Term::SFloat(1.5)], &ss).is_some());
        assert!(bip_is_integer(&[Term::SFloat(1.5)], &ss).is_none());
        assert!(bip_is_atom(&[atom!("a")], &ss).is_some());

    } // test_type_checks()

    #[test]
    fn test_is_list_and_ground() {

        let ss = empty_ss!();
        let t = var!(1, "t");

        let proper = parse_term("[a, b]").unwrap();
        assert!(bip_is_list(&[proper.clone()], &ss).is_some());

        // A partial list is not a (proper) list...
        let partial = Term::List {
            items: vec![atom!("a")],
            tail: Some(Box::new(t.clone())),
        };
        assert!(bip_is_list(&[partial.clone()], &ss).is_none());
        assert!(bip_is_ground(&[partial.clone()], &ss).is_none());

        // ...until its tail is bound.
        let ss = t.unify(&parse_term("[b]").unwrap(), &ss).unwrap();
        assert!(bip_is_list(&[partial.clone()], &ss).is_some());
        assert!(bip_is_ground(&[partial], &ss).is_some());

    } // test_is_list_and_ground()

} // test
