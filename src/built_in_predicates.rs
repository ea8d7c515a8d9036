//! Built-in predicates: unification, arithmetic, list relations, type
//! checks, control and meta predicates.
//!
//! A built-in predicate is a kind of [goal](../goal/enum.Goal.html).
//! Built-ins shadow knowledge base entries: a stored predicate named
//! `member/2` can never be reached, because the built-in of the same
//! name takes precedence during goal resolution.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::built_in_arithmetic::bip_is;
use crate::built_in_comparison::*;
use crate::built_in_control::{next_between, next_if, solve_once};
use crate::built_in_lists::*;
use crate::built_in_meta::{bip_copy_term, solve_findall};
use crate::built_in_types::*;
use crate::logic_var::{VarMap, VarSupply};
use crate::solution_node::{prune_alternatives, SolutionNode};
use crate::substitution_set::SubstitutionSet;
use crate::term::{recreate_vars_terms, Term};

/// Identifies a built-in predicate. The surface name and arity of each
/// one is listed in [make_builtin()](fn.make_builtin.html).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltInName {
    // unification and structural comparison
    Unify,          // =/2
    Equal,          // ==/2
    NotEqual,       // \==/2
    // arithmetic
    Is,             // is/2
    LessThan,       // </2
    GreaterThan,    // >/2
    LessOrEqual,    // =</2
    GreaterOrEqual, // >=/2
    NumEqual,       // =:=/2
    NumNotEqual,    // =\=/2
    // list relations
    Member,         // member/2
    Append,         // append/3
    Length,         // length/2
    Nth,            // nth/3
    Reverse,        // reverse/2
    First,          // first/2
    Rest,           // rest/2
    Cons,           // cons/3
    Empty,          // empty/1
    NonEmpty,       // non_empty/1
    // type checks
    IsNumber,       // number/1
    IsInteger,      // integer/1
    IsAtom,         // atom/1
    IsList,         // is_list/1
    IsVar,          // var/1
    IsNonVar,       // nonvar/1
    IsGround,       // ground/1
    // control
    True,           // true/0
    Fail,           // fail/0
    Cut,            // !/0
    Once,           // once/1
    Repeat,         // repeat/0
    If,             // if/3
    Between,        // between/3
    // meta
    FindAll,        // findall/3
    CopyTerm,       // copy_term/2
}

impl BuiltInName {

    /// The surface name of the predicate, without arity.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltInName::Unify => "=",
            BuiltInName::Equal => "==",
            BuiltInName::NotEqual => "\\==",
            BuiltInName::Is => "is",
            BuiltInName::LessThan => "<",
            BuiltInName::GreaterThan => ">",
            BuiltInName::LessOrEqual => "=<",
            BuiltInName::GreaterOrEqual => ">=",
            BuiltInName::NumEqual => "=:=",
            BuiltInName::NumNotEqual => "=\\=",
            BuiltInName::Member => "member",
            BuiltInName::Append => "append",
            BuiltInName::Length => "length",
            BuiltInName::Nth => "nth",
            BuiltInName::Reverse => "reverse",
            BuiltInName::First => "first",
            BuiltInName::Rest => "rest",
            BuiltInName::Cons => "cons",
            BuiltInName::Empty => "empty",
            BuiltInName::NonEmpty => "non_empty",
            BuiltInName::IsNumber => "number",
            BuiltInName::IsInteger => "integer",
            BuiltInName::IsAtom => "atom",
            BuiltInName::IsList => "is_list",
            BuiltInName::IsVar => "var",
            BuiltInName::IsNonVar => "nonvar",
            BuiltInName::IsGround => "ground",
            BuiltInName::True => "true",
            BuiltInName::Fail => "fail",
            BuiltInName::Cut => "!",
            BuiltInName::Once => "once",
            BuiltInName::Repeat => "repeat",
            BuiltInName::If => "if",
            BuiltInName::Between => "between",
            BuiltInName::FindAll => "findall",
            BuiltInName::CopyTerm => "copy_term",
        }
    } // as_str()

    /// True for built-ins which can never produce more than one
    /// solution. Multi-solution built-ins (member, append, between,
    /// nth, repeat, if) manage their own enumeration state.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self,
                  BuiltInName::Member | BuiltInName::Append |
                  BuiltInName::Between | BuiltInName::Nth |
                  BuiltInName::Repeat | BuiltInName::If)
    }

} // impl BuiltInName

/// A built-in predicate with its argument terms.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltIn {
    pub name: BuiltInName,
    pub args: Vec<Term>,
}

impl BuiltIn {

    pub fn new(name: BuiltInName, args: Vec<Term>) -> Self {
        BuiltIn { name, args }
    }

    /// Recreates logic variables in the arguments, giving them unique
    /// ids. See
    /// [recreate_variables()](../term/enum.Term.html#method.recreate_variables).
    pub fn recreate_variables(self, vars: &mut VarMap,
                              supply: &VarSupply) -> BuiltIn {
        BuiltIn {
            name: self.name,
            args: recreate_vars_terms(self.args, vars, supply),
        }
    } // recreate_variables()

} // impl BuiltIn

/// Recognizes a built-in predicate by functor and arity.
///
/// Returns None when the functor/arity combination does not name a
/// built-in; the goal then resolves against the knowledge base.
pub fn make_builtin(functor: &str, args: &[Term]) -> Option<BuiltIn> {

    let name = match (functor, args.len()) {
        ("=", 2) => BuiltInName::Unify,
        ("==", 2) => BuiltInName::Equal,
        ("\\==", 2) => BuiltInName::NotEqual,
        ("is", 2) => BuiltInName::Is,
        ("<", 2) => BuiltInName::LessThan,
        (">", 2) => BuiltInName::GreaterThan,
        ("=<", 2) => BuiltInName::LessOrEqual,
        (">=", 2) => BuiltInName::GreaterOrEqual,
        ("=:=", 2) => BuiltInName::NumEqual,
        ("=\\=", 2) => BuiltInName::NumNotEqual,
        ("member", 2) => BuiltInName::Member,
        ("append", 3) => BuiltInName::Append,
        ("length", 2) => BuiltInName::Length,
        ("nth", 3) => BuiltInName::Nth,
        ("reverse", 2) => BuiltInName::Reverse,
        ("first", 2) => BuiltInName::First,
        ("rest", 2) => BuiltInName::Rest,
        ("cons", 3) => BuiltInName::Cons,
        ("empty", 1) => BuiltInName::Empty,
        ("non_empty", 1) => BuiltInName::NonEmpty,
        ("number", 1) => BuiltInName::IsNumber,
        ("integer", 1) => BuiltInName::IsInteger,
        ("atom", 1) => BuiltInName::IsAtom,
        ("is_list", 1) => BuiltInName::IsList,
        ("var", 1) => BuiltInName::IsVar,
        ("nonvar", 1) => BuiltInName::IsNonVar,
        ("ground", 1) => BuiltInName::IsGround,
        ("true", 0) => BuiltInName::True,
        ("fail", 0) => BuiltInName::Fail,
        ("!", 0) => BuiltInName::Cut,
        ("once", 1) => BuiltInName::Once,
        ("repeat", 0) => BuiltInName::Repeat,
        ("if", 3) => BuiltInName::If,
        ("between", 3) => BuiltInName::Between,
        ("findall", 3) => BuiltInName::FindAll,
        ("copy_term", 2) => BuiltInName::CopyTerm,
        _ => { return None; },
    };
    Some(BuiltIn::new(name, args.to_vec()))

} // make_builtin()

/// Finds solutions for built-in predicates.
///
/// Called by [next_solution()](../solution_node/fn.next_solution.html)
/// in solution_node.rs. Single-solution built-ins are gated by the
/// node's `more_solutions` flag; the enumerating ones (member, append,
/// nth, between, repeat, if) keep their cursor in the node and yield
/// another solution per call.
pub fn next_solution_builtin(sn: Rc<RefCell<SolutionNode>>,
                             bip: BuiltIn)
                             -> Option<Rc<SubstitutionSet>> {

    if bip.name.is_deterministic() {
        let mut node = sn.borrow_mut();
        if !node.more_solutions { return None; }
        node.more_solutions = false;
    }

    let (ss, ctx) = {
        let node = sn.borrow();
        (Rc::clone(&node.ss), Rc::clone(&node.ctx))
    };
    let args = &bip.args;

    match bip.name {

        BuiltInName::Unify => args[0].unify(&args[1], &ss),
        BuiltInName::Equal => bip_equal(args, &ss),
        BuiltInName::NotEqual => bip_not_equal(args, &ss),

        BuiltInName::Is => bip_is(args, &ss),
        BuiltInName::LessThan => bip_less_than(args, &ss),
        BuiltInName::GreaterThan => bip_greater_than(args, &ss),
        BuiltInName::LessOrEqual => bip_less_or_equal(args, &ss),
        BuiltInName::GreaterOrEqual => bip_greater_or_equal(args, &ss),
        BuiltInName::NumEqual => bip_num_equal(args, &ss),
        BuiltInName::NumNotEqual => bip_num_not_equal(args, &ss),

        BuiltInName::Member => {
            let mut node = sn.borrow_mut();
            let mut index = node.enum_index;
            let result = next_member(args, &ss, &mut index);
            node.enum_index = index;
            result
        },
        BuiltInName::Append => {
            let mut node = sn.borrow_mut();
            let mut index = node.enum_index;
            let result = next_append(args, &ss, &mut index);
            node.enum_index = index;
            result
        },
        BuiltInName::Nth => {
            let mut node = sn.borrow_mut();
            let mut index = node.enum_index;
            let result = next_nth(args, &ss, &mut index);
            node.enum_index = index;
            result
        },
        BuiltInName::Between => {
            let mut node = sn.borrow_mut();
            let mut index = node.enum_index;
            let result = next_between(args, &ss, &mut index);
            node.enum_index = index;
            result
        },
        BuiltInName::Length => bip_length(args, &ss, &ctx.supply),
        BuiltInName::Reverse => bip_reverse(args, &ss),
        BuiltInName::First => bip_first(args, &ss),
        BuiltInName::Rest => bip_rest(args, &ss),
        BuiltInName::Cons => bip_cons(args, &ss),
        BuiltInName::Empty => bip_empty(args, &ss),
        BuiltInName::NonEmpty => bip_non_empty(args, &ss),

        BuiltInName::IsNumber => bip_is_number(args, &ss),
        BuiltInName::IsInteger => bip_is_integer(args, &ss),
        BuiltInName::IsAtom => bip_is_atom(args, &ss),
        BuiltInName::IsList => bip_is_list(args, &ss),
        BuiltInName::IsVar => bip_is_var(args, &ss),
        BuiltInName::IsNonVar => bip_is_nonvar(args, &ss),
        BuiltInName::IsGround => bip_is_ground(args, &ss),

        BuiltInName::True => Some(Rc::clone(&ss)),
        BuiltInName::Fail => None,
        BuiltInName::Repeat => Some(Rc::clone(&ss)),
        BuiltInName::Cut => {
            prune_alternatives(&sn);
            Some(Rc::clone(&ss))
        },
        BuiltInName::Once => solve_once(&sn, args),
        BuiltInName::If => next_if(&sn, args),

        BuiltInName::FindAll => solve_findall(&sn, args),
        BuiltInName::CopyTerm => bip_copy_term(args, &ss, &ctx.supply),

    } // match

} // next_solution_builtin()

/// Formats a built-in predicate for Display:
/// `name(term1, term2, ...)`.
pub fn format_built_in(name: &str, terms: &[Term]) -> String {
    let mut out = format!("{}(", name);
    let mut comma = false;
    for term in terms {
        if comma { out += ", "; }
        else { comma = true; }
        out += &term.to_string();
    }
    out += ")";
    out
} // format_built_in()

// Display trait, to display built-in predicates. Binary operators are
// written infix, the rest in functional notation.
impl fmt::Display for BuiltIn {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let out = match self.name {
            BuiltInName::Unify | BuiltInName::Equal |
            BuiltInName::NotEqual | BuiltInName::LessThan |
            BuiltInName::GreaterThan | BuiltInName::LessOrEqual |
            BuiltInName::GreaterOrEqual | BuiltInName::NumEqual |
            BuiltInName::NumNotEqual | BuiltInName::Is => {
                format!("{} {} {}", self.args[0], self.name.as_str(),
                        self.args[1])
            },
            BuiltInName::True | BuiltInName::Fail |
            BuiltInName::Cut | BuiltInName::Repeat => {
                self.name.as_str().to_string()
            },
            _ => { format_built_in(self.name.as_str(), &self.args) },
        };
        write!(f, "{}", out)
    }
} // fmt::Display


// test
