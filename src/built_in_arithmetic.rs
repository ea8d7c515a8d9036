//! Arithmetic evaluation for is/2 and the numeric comparisons.
//!
//! Expressions are compound terms over `+ - * / mod rem abs min max
//! pow sqrt floor ceil round`, with operands which must be ground
//! numbers after walking the substitution. Anything else - an unbound
//! operand, a non-number, division by zero, the square root of a
//! negative - makes the evaluation fail, which fails the current
//! branch and drives backtracking. Arithmetic never raises.

use std::rc::Rc;

use crate::substitution_set::{walk, SubstitutionSet};
use crate::term::Term;

/// A number is a 64-bit integer or float. Integer operations stay
/// integral; one float operand promotes the result to float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn to_term(&self) -> Term {
        match self {
            Number::Int(i) => Term::SInt(*i),
            Number::Float(f) => Term::SFloat(*f),
        }
    }

} // impl Number

/// Evaluates an arithmetic expression under a substitution.
///
/// Returns None when the expression cannot be evaluated; the caller
/// treats that as goal failure.
///
/// # Usage
/// ```
/// use std::rc::Rc;
/// use sherlog::*;
///
/// let ss = empty_ss!();
/// let expr = parse_term("+(2, *(3, 4))").unwrap();
/// assert_eq!(Some(Number::Int(14)), eval_arith(&expr, &ss));
/// ```
pub fn eval_arith(term: &Term, ss: &SubstitutionSet) -> Option<Number> {

    let t = walk(term, ss);
    match t {

        Term::SInt(i) => Some(Number::Int(*i)),
        Term::SFloat(f) => Some(Number::Float(*f)),

        Term::Compound(terms) => {

            let functor = match &terms[0] {
                Term::Atom(s) => s.as_str(),
                _ => { return None; },
            };
            let args = &terms[1..];

            match (functor, args.len()) {

                ("-", 1) => {
                    match eval_arith(&args[0], ss)? {
                        Number::Int(i) => i.checked_neg().map(Number::Int),
                        Number::Float(f) => Some(Number::Float(-f)),
                    }
                },
                ("+", 2) => eval_binary(args, ss,
                    |a, b| a.checked_add(b), |a, b| Some(a + b)),
                ("-", 2) => eval_binary(args, ss,
                    |a, b| a.checked_sub(b), |a, b| Some(a - b)),
                ("*", 2) => eval_binary(args, ss,
                    |a, b| a.checked_mul(b), |a, b| Some(a * b)),
                ("/", 2) => eval_binary(args, ss,
                    |a, b| a.checked_div(b),
                    |a, b| if b == 0.0 { None } else { Some(a / b) }),
                ("mod", 2) => eval_binary(args, ss,
                    |a, b| {
                        if b == 0 { return None; }
                        // The result takes the sign of the divisor.
                        Some(((a % b) + b) % b)
                    },
                    |_, _| None),
                ("rem", 2) => eval_binary(args, ss,
                    |a, b| a.checked_rem(b), |_, _| None),
                ("abs", 1) => {
                    match eval_arith(&args[0], ss)? {
                        Number::Int(i) => i.checked_abs().map(Number::Int),
                        Number::Float(f) => Some(Number::Float(f.abs())),
                    }
                },
                ("min", 2) => {
                    let a = eval_arith(&args[0], ss)?;
                    let b = eval_arith(&args[1], ss)?;
                    match (a, b) {
                        (Number::Int(x), Number::Int(y)) => {
                            Some(Number::Int(x.min(y)))
                        },
                        _ => Some(Number::Float(a.as_f64().min(b.as_f64()))),
                    }
                },
                ("max", 2) => {
                    let a = eval_arith(&args[0], ss)?;
                    let b = eval_arith(&args[1], ss)?;
                    match (a, b) {
                        (Number::Int(x), Number::Int(y)) => {
                            Some(Number::Int(x.max(y)))
                        },
                        _ => Some(Number::Float(a.as_f64().max(b.as_f64()))),
                    }
                },
                ("pow", 2) => {
                    let base = eval_arith(&args[0], ss)?;
                    let exp = eval_arith(&args[1], ss)?;
                    match (base, exp) {
                        (Number::Int(b), Number::Int(e)) if e >= 0 => {
                            let e = u32::try_from(e).ok()?;
                            b.checked_pow(e).map(Number::Int)
                        },
                        _ => {
                            Some(Number::Float(
                                base.as_f64().powf(exp.as_f64())))
                        },
                    }
                },
                ("sqrt", 1) => {
                    let x = eval_arith(&args[0], ss)?.as_f64();
                    if x < 0.0 { return None; }
                    Some(Number::Float(x.sqrt()))
                },
                ("floor", 1) => {
                    match eval_arith(&args[0], ss)? {
                        Number::Int(i) => Some(Number::Int(i)),
                        Number::Float(f) => Some(Number::Int(f.floor() as i64)),
                    }
                },
                ("ceil", 1) => {
                    match eval_arith(&args[0], ss)? {
                        Number::Int(i) => Some(Number::Int(i)),
                        Number::Float(f) => Some(Number::Int(f.ceil() as i64)),
                    }
                },
                ("round", 1) => {
                    match eval_arith(&args[0], ss)? {
                        Number::Int(i) => Some(Number::Int(i)),
                        Number::Float(f) => Some(Number::Int(f.round() as i64)),
                    }
                },
                _ => None,

            } // match functor
        },

        // Unbound variables and non-numbers cannot be evaluated.
        _ => None,

    } // match t

} // eval_arith()

// Evaluates a binary operation with int/float promotion. The int path
// returns None on overflow or a domain error; the float path decides
// its own domain failures.
fn eval_binary<FI, FF>(args: &[Term], ss: &SubstitutionSet,
                       int_op: FI, float_op: FF) -> Option<Number>
                       where FI: Fn(i64, i64) -> Option<i64>,
                             FF: Fn(f64, f64) -> Option<f64> {
    let a = eval_arith(&args[0], ss)?;
    let b = eval_arith(&args[1], ss)?;
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => {
            int_op(x, y).map(Number::Int)
        },
        _ => float_op(a.as_f64(), b.as_f64()).map(Number::Float),
    }
} // eval_binary()

/// Compares two evaluated numbers. Returns None when either side
/// cannot be evaluated or the comparison is undefined (NaN).
pub fn num_compare(left: &Term, right: &Term,
                   ss: &SubstitutionSet) -> Option<std::cmp::Ordering> {
    let a = eval_arith(left, ss)?;
    let b = eval_arith(right, ss)?;
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => Some(x.cmp(&y)),
        _ => a.as_f64().partial_cmp(&b.as_f64()),
    }
} // num_compare()

/// is/2: evaluates the right side and unifies the result with the
/// left side.
pub fn bip_is(args: &[Term],
              ss: &Rc<SubstitutionSet>) -> Option<Rc<SubstitutionSet>> {
    let value = eval_arith(&args[1], ss)?;
    args[0].unify(&value.to_term(), ss)
} // bip_is()


#[cfg(test)]
mod test {

    use std::rc::Rc;
    use super::*;
    use crate::*;

    fn eval(s: &str) -> Option<Number> {
        let ss = empty_ss!();
        let expr = parse_term(s).unwrap();
        eval_arith(&expr, &ss)
    }

    #[test]
    fn test_eval_basics() {
        assert_eq!(Some(Number::Int(9)), eval("+(2, 7)"));
        assert_eq!(Some(Number::Int(-11)), eval("-(-4, 7)"));
        assert_eq!(Some(Number::Int(12)), eval("*(3, 4)"));
        assert_eq!(Some(Number::Float(10.7)), eval("+(2, +(3, 5.7))"));
        // Integer division truncates.
        assert_eq!(Some(Number::Int(2)), eval("/(7, 3)"));
        assert_eq!(Some(Number::Float(3.5)), eval("/(7.0, 2)"));
    }

    #[test]
    fn test_eval_domain_failures() {
        // Division by zero fails; it does not raise.
        assert_eq!(None, eval("/(7, 0)"));
        assert_eq!(None, eval("/(7.0, 0)"));
        assert_eq!(None, eval("mod(5, 0)"));
        assert_eq!(None, eval("sqrt(-1)"));
        // Non-numbers fail.
        assert_eq!(None, eval("+(2, banana)"));
    }

    #[test]
    fn test_eval_unbound_fails() {
        let ss = empty_ss!();
        let expr = compound!(atom!("+"), Term::SInt(2), var!(1, "x"));
        assert_eq!(None, eval_arith(&expr, &ss));
    }

    #[test]
    fn test_eval_functions() {
        assert_eq!(Some(Number::Int(2)), eval("mod(-3, 5)"));
        assert_eq!(Some(Number::Int(-3)), eval("rem(-3, 5)"));
        assert_eq!(Some(Number::Int(3)), eval("abs(-3)"));
        assert_eq!(Some(Number::Int(2)), eval("min(7, 2)"));
        assert_eq!(Some(Number::Int(8)), eval("pow(2, 3)"));
        assert_eq!(Some(Number::Float(3.0)), eval("sqrt(9)"));
        assert_eq!(Some(Number::Int(2)), eval("floor(2.7)"));
        assert_eq!(Some(Number::Int(3)), eval("ceil(2.2)"));
        assert_eq!(Some(Number::Int(3)), eval("round(2.5)"));
    }

    #[test]
    fn test_bip_is() {
        let ss = empty_ss!();
        let x = var!(1, "x");
        let args = vec![x.clone(), parse_term("+(2, 3)").unwrap()];
        let ss2 = bip_is(&args, &ss).unwrap();
        assert_eq!("5", walk_deep(&x, &ss2).to_string());

        // A bound left side acts as a check.
        let args = vec![Term::SInt(5), parse_term("+(2, 3)").unwrap()];
        assert!(bip_is(&args, &ss).is_some());
        let args = vec![Term::SInt(6), parse_term("+(2, 3)").unwrap()];
        assert!(bip_is(&args, &ss).is_none());
    }

    #[test]
    fn test_num_compare() {
        use std::cmp::Ordering;
        let ss = empty_ss!();
        let a = parse_term("+(2, 3)").unwrap();
        let b = Term::SInt(7);
        assert_eq!(Some(Ordering::Less), num_compare(&a, &b, &ss));
        assert_eq!(Some(Ordering::Equal),
                   num_compare(&Term::SInt(5), &Term::SFloat(5.0), &ss));
    }

} // test
