//! Parses the text representation of goals and queries.
//!
//! A goal is a comma separated conjunction of subgoals; semicolons
//! separate the branches of a disjunction (and bind more loosely than
//! commas). Subgoals are compound terms, the cut `!`, `not(...)`, or
//! infix comparisons:
//!
//! <blockquote>
//! parent(?x, ?y), not(male(?x)); ?x == unknown
//! </blockquote>
//!
//! The parser produces plain goal terms (`and`, `or` and `not`
//! compounds); [resolve_goal()](../resolver/fn.resolve_goal.html) maps
//! them onto operators and built-in predicates.

use crate::error::EngineError;
use crate::goal::Goal;
use crate::parse_terms::{parse_one_term, skip_whitespace};
use crate::resolver::resolve_goal;
use crate::term::Term;

// Infix goal operators, longest first so that =:= is not read as =.
static INFIX_OPS: [&str; 10] = ["=:=", "=\\=", "\\==", "==", "=<", ">=",
                                "=", "<", ">", "is"];

/// Parses a goal from its text representation.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let goal = parse_goal("parent(?x, ?z), parent(?z, ?y)").unwrap();
/// assert_eq!("parent(?x, ?z), parent(?z, ?y)", goal.to_string());
/// ```
pub fn parse_goal(s: &str) -> Result<Goal, EngineError> {
    let term = parse_goal_term(s)?;
    resolve_goal(&term)
} // parse_goal()

/// Parses goal text into a goal term (`and`/`or`/`not` compounds).
pub fn parse_goal_term(s: &str) -> Result<Term, EngineError> {
    let chrs: Vec<char> = s.chars().collect();
    let mut pos = 0;
    let term = parse_disjunction(&chrs, &mut pos)?;
    skip_whitespace(&chrs, &mut pos);
    if pos < chrs.len() {
        let rest: String = chrs[pos..].iter().collect();
        return Err(pg_error("Unexpected text after goal", &rest));
    }
    Ok(term)
} // parse_goal_term()

/// Parses query text into a list of goal terms.
///
/// A top-level conjunction becomes one term per subgoal, so
/// `parent(tom, ?x), male(?x)` yields two goals which share `?x`.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let goals = parse_query("parent(tom, ?x), male(?x)").unwrap();
/// assert_eq!(2, goals.len());
/// ```
pub fn parse_query(s: &str) -> Result<Vec<Term>, EngineError> {
    let term = parse_goal_term(s)?;
    match &term {
        Term::Compound(terms) => {
            if let Term::Atom(f) = &terms[0] {
                if f == "and" {
                    return Ok(terms[1..].to_vec());
                }
            }
            Ok(vec![term])
        },
        _ => Ok(vec![term]),
    }
} // parse_query()

// disjunction := conjunction (';' conjunction)*
fn parse_disjunction(chrs: &[char],
                     pos: &mut usize) -> Result<Term, EngineError> {
    let mut branches = vec![parse_conjunction(chrs, pos)?];
    loop {
        skip_whitespace(chrs, pos);
        if *pos < chrs.len() && chrs[*pos] == ';' {
            *pos += 1;
            branches.push(parse_conjunction(chrs, pos)?);
        }
        else { break; }
    }
    if branches.len() == 1 {
        return Ok(branches.remove(0));
    }
    let mut terms = vec![Term::Atom("or".to_string())];
    terms.extend(branches);
    Ok(Term::Compound(terms))
} // parse_disjunction()

// conjunction := primary (',' primary)*
fn parse_conjunction(chrs: &[char],
                     pos: &mut usize) -> Result<Term, EngineError> {
    let mut goals = vec![parse_primary(chrs, pos)?];
    loop {
        skip_whitespace(chrs, pos);
        if *pos < chrs.len() && chrs[*pos] == ',' {
            *pos += 1;
            goals.push(parse_primary(chrs, pos)?);
        }
        else { break; }
    }
    if goals.len() == 1 {
        return Ok(goals.remove(0));
    }
    let mut terms = vec![Term::Atom("and".to_string())];
    terms.extend(goals);
    Ok(Term::Compound(terms))
} // parse_conjunction()

// primary := '(' disjunction ')' | term (infix term)?
fn parse_primary(chrs: &[char],
                 pos: &mut usize) -> Result<Term, EngineError> {

    skip_whitespace(chrs, pos);
    if *pos < chrs.len() && chrs[*pos] == '(' {
        *pos += 1;
        let inner = parse_disjunction(chrs, pos)?;
        skip_whitespace(chrs, pos);
        if *pos >= chrs.len() || chrs[*pos] != ')' {
            return Err(pg_error("Unmatched parenthesis", ""));
        }
        *pos += 1;
        return Ok(inner);
    }

    // not(...) takes a whole goal as its argument, so its parentheses
    // may enclose commas, semicolons and infix comparisons.
    if at_keyword(chrs, *pos, "not") {
        let mut probe = *pos + 3;
        skip_whitespace(chrs, &mut probe);
        if probe < chrs.len() && chrs[probe] == '(' {
            probe += 1;
            let inner = parse_disjunction(chrs, &mut probe)?;
            skip_whitespace(chrs, &mut probe);
            if probe >= chrs.len() || chrs[probe] != ')' {
                return Err(pg_error("Unmatched parenthesis in not()", ""));
            }
            *pos = probe + 1;
            return Ok(Term::Compound(vec![Term::Atom("not".to_string()),
                                          inner]));
        }
    }

    let left = parse_one_term(chrs, pos)?;

    if let Some(op) = peek_infix(chrs, pos) {
        consume_infix(chrs, pos, op);
        let right = parse_one_term(chrs, pos)?;
        return Ok(Term::Compound(vec![Term::Atom(op.to_string()),
                                      left, right]));
    }

    Ok(left)

} // parse_primary()

// Looks for an infix goal operator after the left-hand term.
fn peek_infix(chrs: &[char], pos: &mut usize) -> Option<&'static str> {
    skip_whitespace(chrs, pos);
    for op in INFIX_OPS.iter() {
        let op_chars: Vec<char> = op.chars().collect();
        let end = *pos + op_chars.len();
        if end > chrs.len() { continue; }
        if chrs[*pos..end] != op_chars[..] { continue; }
        if *op == "is" {
            // `is` must stand alone, not start an identifier.
            if end < chrs.len() {
                let next = chrs[end];
                if next.is_alphanumeric() || next == '_' { continue; }
            }
        }
        return Some(op);
    }
    None
} // peek_infix()

fn consume_infix(chrs: &[char], pos: &mut usize, op: &str) {
    let _ = chrs;
    *pos += op.chars().count();
}

// Does a keyword start at `pos`, ending at a word boundary?
fn at_keyword(chrs: &[char], pos: usize, keyword: &str) -> bool {
    let kw: Vec<char> = keyword.chars().collect();
    let end = pos + kw.len();
    if end > chrs.len() { return false; }
    if chrs[pos..end] != kw[..] { return false; }
    if end < chrs.len() {
        let next = chrs[end];
        if next.is_alphanumeric() || next == '_' { return false; }
    }
    true
} // at_keyword()

// Creates an error message for the goal parser.
fn pg_error(err: &str, bad: &str) -> EngineError {
    EngineError::Parse(format!("parse_goal() - {}: >{}<", err, bad))
}


// test
