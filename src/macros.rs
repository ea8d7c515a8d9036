//! Utilities for creating terms, goals and substitution sets.
//!
//! [atom!](../macro.atom.html) - Makes an atom from a string slice.<br>
//! [var!](../macro.var.html) - Creates a logic variable from a string
//! slice and an optional id.<br>
//! [anon!](../macro.anon.html) - Creates an anonymous variable.<br>
//! [compound!](../macro.compound.html) - Creates a compound term.<br>
//! [and_goal!](../macro.and_goal.html) - Creates an And goal from a
//! list of goals.<br>
//! [or_goal!](../macro.or_goal.html) - Creates an Or goal from a list
//! of goals.<br>
//! [empty_ss!](../macro.empty_ss.html) - Creates an empty substitution
//! set behind an Rc pointer.<br>
//! [rc_cell!](../macro.rc_cell.html) - Creates a smart pointer to
//! mutable data.

/// Makes an atom from a string slice.
///
/// Atoms are symbolic constants. In the fact `parent(tom, mary)`,
/// the terms `parent`, `tom` and `mary` are all atoms.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let functor = atom!("parent");
/// let term1 = atom!("tom");
/// ```
#[macro_export]
macro_rules! atom {
    ($the_str:expr) => {
        Term::Atom($the_str.to_string())
    };
}

/// Creates a logic variable from a string slice and an optional id.
///
/// The name is given without the `?` prefix used in surface syntax.
/// If the id argument is missing, it is 0 by default; variables with
/// id 0 must be recreated before they take part in unification.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let x = var!(next_id(), "x");
/// let y = var!("y"); // id is 0
/// ```
#[macro_export]
macro_rules! var {
    ($name:expr) => {
        Term::Var { id: 0, name: $name.to_string() }
    };
    ($id:expr, $name:expr) => {
        Term::Var { id: $id, name: $name.to_string() }
    };
}

/// Creates an anonymous variable, which unifies with any term.
/// The surface syntax is `?_`.
#[macro_export]
macro_rules! anon {
    () => { Term::Anonymous };
}

/// Creates a compound term.
///
/// A compound term consists of a functor followed by a sequence of
/// argument terms: `animal(horse, mammal)`.
///
/// # Note
/// * The first term must be an atom, but this macro does not check.
///   [make_compound()](../resolver/fn.make_compound.html) validates.
/// # Usage
/// ```
/// use sherlog::*;
///
/// let c = compound!(atom!("element"), atom!("argon"), Term::SInt(18));
/// assert_eq!("element(argon, 18)", c.to_string());
/// ```
#[macro_export]
macro_rules! compound {
    ($($term:expr),*) => (
        Term::Compound(vec!($($term),*))
    );
} // compound!

/// Creates an And goal from a list of goals.
///
/// Conjunction is written in surface syntax as a comma separated list
/// of goals: `parent(?x, ?z), parent(?z, ?y)`.
#[macro_export]
macro_rules! and_goal {
    ($($goal:expr),*) => (
        Goal::OperatorGoal(Operator::And(vec!($($goal),*)))
    );
} // and_goal!

/// Creates an Or goal from a list of goals.
///
/// Disjunction is written in surface syntax as a semicolon separated
/// list of goals: `mother(?x, ?y); father(?x, ?y)`.
#[macro_export]
macro_rules! or_goal {
    ($($goal:expr),*) => (
        Goal::OperatorGoal(Operator::Or(vec!($($goal),*)))
    );
} // or_goal!

/// Creates an empty substitution set behind an Rc pointer.
///
/// # Usage
/// ```
/// use std::rc::Rc;
/// use sherlog::*;
///
/// let ss = empty_ss!();
/// ```
#[macro_export]
macro_rules! empty_ss {
    () => { Rc::new(SubstitutionSet::new()) };
}

/// Creates a smart pointer to mutable data.
///
/// rc_cell!(data) is equivalent to Rc::new(RefCell::new(data)).
///
/// # Note
/// Rc and RefCell must be imported where the macro is used.
#[macro_export]
macro_rules! rc_cell {
    ($data:expr) => { Rc::new(RefCell::new($data)) };
}
