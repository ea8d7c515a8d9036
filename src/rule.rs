//! Defines a fact or rule.
//!
//! In surface syntax, rules have the form:
//! <blockquote>
//! head :- body.
//! </blockquote>
//! Facts are rules without a body:
//! <blockquote>
//! grandfather(?x, ?y) :- father(?x, ?z), father(?z, ?y).  % a rule<br>
//! father(john, kaitlyn).  % a fact
//! </blockquote>

use std::fmt;

use crate::error::EngineError;
use crate::goal::Goal;
use crate::logic_var::{VarMap, VarSupply};
use crate::parse_goals::parse_goal;
use crate::parse_terms::parse_term;
use crate::term::Term;

/// A fact or rule.
///
/// The head must be a compound term, and the body is a
/// [goal](../goal/enum.Goal.html). For facts, the body is Goal::Nil.
/// The clause id is assigned by the knowledge base when the clause is
/// added; clauses built by hand carry id 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub head: Term,  // Must be a Term::Compound.
    pub body: Goal,  // For facts, body is Goal::Nil.
    pub id: u64,
}

/// Makes a rule from a head term and a body goal.
///
/// # Note
/// The head must be a compound term, but this function does not check.
/// # Usage
/// ```
/// use sherlog::*;
///
/// let head = parse_term("father(?x, ?y)").unwrap();
/// let body = parse_goal("parent(?x, ?y), male(?x)").unwrap();
/// let rule = make_rule(head, body);
/// println!("{}", rule); // father(?x, ?y) :- parent(?x, ?y), male(?x).
/// ```
pub fn make_rule(head: Term, body: Goal) -> Rule {
    Rule { head, body, id: 0 }
}

/// Makes a fact. Facts and rules share the
/// [Rule](struct.Rule.html) structure; for facts the body is Nil.
pub fn make_fact(head: Term) -> Rule {
    Rule { head, body: Goal::Nil, id: 0 }
}

/// Finds the index of the neck operator (:-) in a slice of characters.
fn index_of_neck(chrs: &[char]) -> Option<usize> {
    let mut previous_colon = false;
    for (i, ch) in chrs.iter().enumerate() {
        if *ch == '-' && previous_colon { return Some(i - 1); }
        previous_colon = *ch == ':';
    }
    None
} // index_of_neck()

/// Creates a fact or rule from its text representation.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let fact = parse_rule("male(harold).").unwrap();
/// assert_eq!("male(harold).", fact.to_string());
///
/// let rule = parse_rule(
///     "father(?x, ?y) :- parent(?x, ?y), male(?x).").unwrap();
/// assert_eq!("father(?x, ?y) :- parent(?x, ?y), male(?x).",
///            rule.to_string());
/// ```
pub fn parse_rule(to_parse: &str) -> Result<Rule, EngineError> {

    let s = to_parse.trim();
    let mut chrs: Vec<char> = s.chars().collect();
    let mut length = chrs.len();

    if length < 4 {
        let err = pr_error("Invalid string.", s);
        return Err(EngineError::Parse(err));
    }

    // Remove the final period.
    if chrs[length - 1] == '.' {
        chrs.truncate(length - 1);
        length -= 1;
    }

    match index_of_neck(&chrs) {

        Some(index) => {

            let head_str: String = chrs[0..index].iter().collect();
            let body_str: String = chrs[index + 2..length].iter().collect();

            // There must not be a second ':-'.
            let body_chrs: Vec<char> = body_str.chars().collect();
            if index_of_neck(&body_chrs).is_some() {
                let err = pr_error("Invalid rule.", s);
                return Err(EngineError::Parse(err));
            }

            let head = parse_head(&head_str)?;
            let body = parse_goal(&body_str)?;
            Ok(Rule { head, body, id: 0 })
        },
        None => {  // Must be a fact, no body.
            let head = parse_head(s)?;
            Ok(Rule { head, body: Goal::Nil, id: 0 })
        },

    } // match index_of_neck()

} // parse_rule()

// Parses the head of a clause. A bare atom is accepted as a
// zero-arity head.
fn parse_head(s: &str) -> Result<Term, EngineError> {
    let term = parse_term(s)?;
    match term {
        Term::Compound(_) => Ok(term),
        Term::Atom(_) => Ok(Term::Compound(vec![term])),
        other => {
            let err = pr_error("Head of clause must be a compound term",
                               &other.to_string());
            Err(EngineError::MalformedClause(err))
        },
    }
} // parse_head()

impl Rule {

    /// Creates a key (predicate name) for indexing into the knowledge
    /// base: functor + arity, eg. `loves/2`.
    pub fn key(&self) -> String { self.head.key() }

    /// Returns the head of this rule.
    pub fn get_head(&self) -> Term { self.head.clone() }

    /// Returns the body of this rule, which is a goal.
    pub fn get_body(&self) -> Goal { self.body.clone() }

    /// Recreates the clause's logic variables with unique ids.
    ///
    /// The scope of a logic variable is the clause in which it is
    /// defined. When the resolver consults a clause, it calls this
    /// method so that concurrent or recursive uses of the same clause
    /// cannot collide.
    pub fn recreate_variables(self, vars: &mut VarMap,
                              supply: &VarSupply) -> Rule {
        let head = self.head.recreate_variables(vars, supply);
        let body = self.body.recreate_variables(vars, supply);
        Rule { head, body, id: self.id }
    } // recreate_variables()

} // impl Rule

// Creates an error message for the parse_rule() function.
fn pr_error(err: &str, bad: &str) -> String {
    format!("parse_rule() - {}: >{}<", err, bad)
}

// Display trait, to display facts and rules.
impl fmt::Display for Rule {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.body == Goal::Nil {
            write!(f, "{}.", self.head)
        }
        else {
            write!(f, "{} :- {}.", self.head, self.body)
        }
    } // fmt

} // fmt::Display


#[cfg(test)]
mod test {

    use crate::*;

    #[test]
    fn test_parse_rule() {

        let rule = parse_rule(
            "parent(?x, ?y) :- mother(?x, ?y); father(?x, ?y).").unwrap();
        assert_eq!("parent(?x, ?y) :- mother(?x, ?y); father(?x, ?y).",
                   rule.to_string());
        assert_eq!("parent/2", rule.key());

        let fact = parse_rule("music(moby, porcelain).").unwrap();
        assert_eq!(Goal::Nil, fact.body);
        assert_eq!("music/2", fact.key());

        // A second neck operator is invalid.
        assert!(parse_rule("a(?x) :- b(?x) :- c(?x).").is_err());
        assert!(parse_rule("x.").is_err());

    } // test_parse_rule()

    #[test]
    fn test_recreate_variables() {

        let supply = VarSupply::new();
        let rule = parse_rule("parent(?x, ?y) :- mother(?x, ?y).").unwrap();
        let rule = rule.recreate_variables(&mut VarMap::new(), &supply);
        assert_eq!("parent(?x_1, ?y_2) :- mother(?x_1, ?y_2).",
                   rule.to_string());

    } // test_recreate_variables()

} // test
