//! Comparison built-ins.
//!
//! The numeric comparisons `< > =< >= =:= =\=` evaluate both sides as
//! arithmetic expressions; both must come out as ground numbers, or
//! the goal fails. The structural comparisons `==` and `\==` compare
//! deeply walked terms without unifying anything.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::built_in_arithmetic::num_compare;
use crate::substitution_set::{walk_deep, SubstitutionSet};
use crate::term::Term;

/// ==/2: structural equality after walking, no unification.
pub fn bip_equal(args: &[Term],
                 ss: &Rc<SubstitutionSet>) -> Option<Rc<SubstitutionSet>> {
    let left = walk_deep(&args[0], ss);
    let right = walk_deep(&args[1], ss);
    if left == right { Some(Rc::clone(ss)) } else { None }
} // bip_equal()

/// \==/2: structural inequality after walking.
pub fn bip_not_equal(args: &[Term],
                     ss: &Rc<SubstitutionSet>)
                     -> Option<Rc<SubstitutionSet>> {
    let left = walk_deep(&args[0], ss);
    let right = walk_deep(&args[1], ss);
    if left != right { Some(Rc::clone(ss)) } else { None }
} // bip_not_equal()

/// </2
pub fn bip_less_than(args: &[Term],
                     ss: &Rc<SubstitutionSet>)
                     -> Option<Rc<SubstitutionSet>> {
    numeric(args, ss, |ord| ord == Ordering::Less)
}

/// >/2
pub fn bip_greater_than(args: &[Term],
                        ss: &Rc<SubstitutionSet>)
                        -> Option<Rc<SubstitutionSet>> {
    numeric(args, ss, |ord| ord == Ordering::Greater)
}

/// =</2
pub fn bip_less_or_equal(args: &[Term],
                         ss: &Rc<SubstitutionSet>)
                         -> Option<Rc<SubstitutionSet>> {
    numeric(args, ss, |ord| ord != Ordering::Greater)
}

/// >=/2
pub fn bip_greater_or_equal(args: &[Term],
                            ss: &Rc<SubstitutionSet>)
                            -> Option<Rc<SubstitutionSet>> {
    numeric(args, ss, |ord| ord != Ordering::Less)
}

/// =:=/2: numeric equality.
pub fn bip_num_equal(args: &[Term],
                     ss: &Rc<SubstitutionSet>)
                     -> Option<Rc<SubstitutionSet>> {
    numeric(args, ss, |ord| ord == Ordering::Equal)
}

/// =\=/2: numeric inequality.
pub fn bip_num_not_equal(args: &[Term],
                         ss: &Rc<SubstitutionSet>)
                         -> Option<Rc<SubstitutionSet>> {
    numeric(args, ss, |ord| ord != Ordering::Equal)
}

// Shared body of the numeric comparisons. An unevaluable side fails
// the goal silently.
fn numeric<F>(args: &[Term], ss: &Rc<SubstitutionSet>,
              accept: F) -> Option<Rc<SubstitutionSet>>
              where F: Fn(Ordering) -> bool {
    match num_compare(&args[0], &args[1], ss) {
        Some(ord) if accept(ord) => Some(Rc::clone(ss)),
        _ => None,
    }
} // numeric()


#[cfg(test)]
mod test {

    use std::rc::Rc;
    use super::*;
    use crate::*;

    #[test]
    fn test_structural_equality() {

        let ss = empty_ss!();
        let x = var!(1, "x");
        let ss = x.unify(&atom!("alpha"), &ss).unwrap();

        // ?x == alpha after walking.
        let args = vec![x.clone(), atom!("alpha")];
        assert!(bip_equal(&args, &ss).is_some());
        assert!(bip_not_equal(&args, &ss).is_none());

        // Distinct unbound variables are not structurally equal.
        let args = vec![var!(2, "y"), var!(3, "z")];
        assert!(bip_equal(&args, &ss).is_none());
        assert!(bip_not_equal(&args, &ss).is_some());

        // No unification happens: ?y stays unbound.
        let args = vec![var!(2, "y"), atom!("beta")];
        assert!(bip_equal(&args, &ss).is_none());

    } // test_structural_equality()

    #[test]
    fn test_numeric_comparisons() {

        let ss = empty_ss!();

        let args = vec![Term::SInt(3), Term::SInt(7)];
        assert!(bip_less_than(&args, &ss).is_some());
        assert!(bip_greater_than(&args, &ss).is_none());
        assert!(bip_less_or_equal(&args, &ss).is_some());
        assert!(bip_greater_or_equal(&args, &ss).is_none());
        assert!(bip_num_equal(&args, &ss).is_none());
        assert!(bip_num_not_equal(&args, &ss).is_some());

        // Mixed int/float comparison promotes.
        let args = vec![Term::SInt(5), Term::SFloat(5.0)];
        assert!(bip_num_equal(&args, &ss).is_some());

        // Expressions evaluate: +(2, 3) < 7.
        let args = vec![parse_term("+(2, 3)").unwrap(), Term::SInt(7)];
        assert!(bip_less_than(&args, &ss).is_some());

        // A non-numeric side fails the comparison.
        let args = vec![atom!("a"), Term::SInt(7)];
        assert!(bip_less_than(&args, &ss).is_none());

        // An unbound side fails the comparison.
        let args = vec![var!(9, "u"), Term::SInt(7)];
        assert!(bip_less_than(&args, &ss).is_none());

    } // test_numeric_comparisons()

} // test
