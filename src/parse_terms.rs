//! Parses the text representation of terms.
//!
//! The surface syntax:
//!
//! * atoms - bare words: `tom`, `parent`
//! * strings - double quoted: `"some text"`
//! * numbers - `42`, `-7`, `3.14`
//! * variables - `?x`, `?who`; the anonymous variable is `?_`
//! * compound terms - `parent(tom, ?x)`; the functor may be symbolic,
//!   as in `+(2, 3)`
//! * lists - `[a, b, c]`, `[?h | ?t]`
//! * maps - `{name: ada, age: 36}`; keys are atoms or integers

use crate::error::EngineError;
use crate::term::{make_map, MapKey, Term};

static SYMBOLIC: &str = "+-*/<>=\\:!";

/// Parses a term from a string slice.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let t = parse_term("element(argon, 18)").unwrap();
/// assert_eq!("element(argon, 18)", t.to_string());
///
/// let t = parse_term("[a, 3.5 | ?tail]").unwrap();
/// assert_eq!("[a, 3.5 | ?tail]", t.to_string());
/// ```
pub fn parse_term(s: &str) -> Result<Term, EngineError> {
    let chrs: Vec<char> = s.chars().collect();
    let mut pos = 0;
    let term = parse_one_term(&chrs, &mut pos)?;
    skip_whitespace(&chrs, &mut pos);
    if pos < chrs.len() {
        let rest: String = chrs[pos..].iter().collect();
        return Err(pt_error("Unexpected text after term", &rest));
    }
    Ok(term)
} // parse_term()

/// Skips spaces and tabs.
pub(crate) fn skip_whitespace(chrs: &[char], pos: &mut usize) {
    while *pos < chrs.len() && chrs[*pos].is_whitespace() {
        *pos += 1;
    }
}

/// Parses one term starting at `pos`, leaving `pos` just past it.
/// Shared with the goal parser.
pub(crate) fn parse_one_term(chrs: &[char],
                             pos: &mut usize) -> Result<Term, EngineError> {

    skip_whitespace(chrs, pos);
    if *pos >= chrs.len() {
        return Err(pt_error("Unexpected end of input", ""));
    }

    let ch = chrs[*pos];

    if ch == '"' { return parse_string(chrs, pos); }
    if ch == '?' { return parse_variable(chrs, pos); }
    if ch == '[' { return parse_list(chrs, pos); }
    if ch == '{' { return parse_map(chrs, pos); }

    if ch.is_ascii_digit() { return parse_number(chrs, pos); }
    if ch == '-' && *pos + 1 < chrs.len()
                 && chrs[*pos + 1].is_ascii_digit() {
        return parse_number(chrs, pos);
    }

    if ch.is_alphabetic() || ch == '_' {
        let name = read_ident(chrs, pos);
        if *pos < chrs.len() && chrs[*pos] == '(' {
            return parse_compound(name, chrs, pos);
        }
        return Ok(Term::Atom(name));
    }

    if SYMBOLIC.contains(ch) {
        let name = read_symbolic(chrs, pos);
        if *pos < chrs.len() && chrs[*pos] == '(' {
            return parse_compound(name, chrs, pos);
        }
        if name == "!" { return Ok(Term::Atom(name)); }
        return Err(pt_error("Unexpected operator", &name));
    }

    Err(pt_error("Unexpected character", &ch.to_string()))

} // parse_one_term()

// Reads an identifier: a letter or underscore followed by
// letters, digits and underscores.
fn read_ident(chrs: &[char], pos: &mut usize) -> String {
    let mut out = String::new();
    while *pos < chrs.len() {
        let ch = chrs[*pos];
        if ch.is_alphanumeric() || ch == '_' {
            out.push(ch);
            *pos += 1;
        }
        else { break; }
    }
    out
} // read_ident()

// Reads a run of symbolic characters.
fn read_symbolic(chrs: &[char], pos: &mut usize) -> String {
    let mut out = String::new();
    while *pos < chrs.len() && SYMBOLIC.contains(chrs[*pos]) {
        out.push(chrs[*pos]);
        *pos += 1;
    }
    out
} // read_symbolic()

// Parses a double quoted string. Supports \" and \\ escapes.
fn parse_string(chrs: &[char], pos: &mut usize) -> Result<Term, EngineError> {
    *pos += 1;  // opening quote
    let mut out = String::new();
    while *pos < chrs.len() {
        let ch = chrs[*pos];
        if ch == '\\' && *pos + 1 < chrs.len() {
            out.push(chrs[*pos + 1]);
            *pos += 2;
            continue;
        }
        if ch == '"' {
            *pos += 1;
            return Ok(Term::SStr(out));
        }
        out.push(ch);
        *pos += 1;
    }
    Err(pt_error("Unterminated string", &out))
} // parse_string()

// Parses a variable: ?name, or the anonymous variable ?_ .
fn parse_variable(chrs: &[char], pos: &mut usize) -> Result<Term, EngineError> {
    *pos += 1;  // question mark
    let name = read_ident(chrs, pos);
    if name.is_empty() {
        return Err(pt_error("Variable name missing after ?", ""));
    }
    if name == "_" { return Ok(Term::Anonymous); }
    Ok(Term::Var { id: 0, name })
} // parse_variable()

// Parses an integer or floating point number.
fn parse_number(chrs: &[char], pos: &mut usize) -> Result<Term, EngineError> {
    let mut out = String::new();
    if chrs[*pos] == '-' {
        out.push('-');
        *pos += 1;
    }
    let mut has_dot = false;
    while *pos < chrs.len() {
        let ch = chrs[*pos];
        if ch.is_ascii_digit() {
            out.push(ch);
            *pos += 1;
        }
        else if ch == '.' && !has_dot && *pos + 1 < chrs.len()
                          && chrs[*pos + 1].is_ascii_digit() {
            has_dot = true;
            out.push(ch);
            *pos += 1;
        }
        else { break; }
    }
    if has_dot {
        match out.parse::<f64>() {
            Ok(f) => Ok(Term::SFloat(f)),
            Err(_) => Err(pt_error("Invalid number", &out)),
        }
    }
    else {
        match out.parse::<i64>() {
            Ok(i) => Ok(Term::SInt(i)),
            Err(_) => Err(pt_error("Invalid number", &out)),
        }
    }
} // parse_number()

// Parses a compound term. The functor has been read and `pos` is at
// the opening parenthesis.
fn parse_compound(functor: String, chrs: &[char],
                  pos: &mut usize) -> Result<Term, EngineError> {

    *pos += 1;  // opening parenthesis
    let mut terms = vec![Term::Atom(functor)];

    skip_whitespace(chrs, pos);
    if *pos < chrs.len() && chrs[*pos] == ')' {
        *pos += 1;
        return Ok(Term::Compound(terms));
    }

    loop {
        let term = parse_one_term(chrs, pos)?;
        terms.push(term);
        skip_whitespace(chrs, pos);
        if *pos >= chrs.len() {
            return Err(pt_error("Unmatched parenthesis", ""));
        }
        match chrs[*pos] {
            ',' => { *pos += 1; },
            ')' => { *pos += 1; return Ok(Term::Compound(terms)); },
            other => {
                return Err(pt_error("Expected , or ) in compound term",
                                    &other.to_string()));
            },
        }
    }
} // parse_compound()

// Parses a list: [a, b, c] or [a, b | ?tail].
fn parse_list(chrs: &[char], pos: &mut usize) -> Result<Term, EngineError> {

    *pos += 1;  // opening bracket
    let mut items: Vec<Term> = vec![];
    let mut tail: Option<Box<Term>> = None;

    skip_whitespace(chrs, pos);
    if *pos < chrs.len() && chrs[*pos] == ']' {
        *pos += 1;
        return Ok(Term::List { items, tail });
    }

    loop {
        let term = parse_one_term(chrs, pos)?;
        items.push(term);
        skip_whitespace(chrs, pos);
        if *pos >= chrs.len() {
            return Err(pt_error("Unmatched bracket", ""));
        }
        match chrs[*pos] {
            ',' => { *pos += 1; },
            '|' => {
                *pos += 1;
                let tail_term = parse_one_term(chrs, pos)?;
                skip_whitespace(chrs, pos);
                if *pos >= chrs.len() || chrs[*pos] != ']' {
                    return Err(pt_error("Expected ] after list tail", ""));
                }
                *pos += 1;
                // A literal list after the bar folds into the items.
                match tail_term {
                    Term::List { items: more, tail: rest } => {
                        items.extend(more);
                        tail = rest;
                    },
                    other => { tail = Some(Box::new(other)); },
                }
                return Ok(Term::List { items, tail });
            },
            ']' => { *pos += 1; return Ok(Term::List { items, tail }); },
            other => {
                return Err(pt_error("Expected , | or ] in list",
                                    &other.to_string()));
            },
        }
    }
} // parse_list()

// Parses a map: {key: value, ...}. Keys are atoms or integers.
fn parse_map(chrs: &[char], pos: &mut usize) -> Result<Term, EngineError> {

    *pos += 1;  // opening brace
    let mut entries: Vec<(MapKey, Term)> = vec![];

    skip_whitespace(chrs, pos);
    if *pos < chrs.len() && chrs[*pos] == '}' {
        *pos += 1;
        return Ok(make_map(entries));
    }

    loop {
        let key_term = parse_one_term(chrs, pos)?;
        let key = match key_term {
            Term::Atom(s) => MapKey::Atom(s),
            Term::SInt(i) => MapKey::Int(i),
            other => {
                return Err(pt_error("Map keys must be atoms or integers",
                                    &other.to_string()));
            },
        };
        skip_whitespace(chrs, pos);
        if *pos >= chrs.len() || chrs[*pos] != ':' {
            return Err(pt_error("Expected : after map key", ""));
        }
        *pos += 1;
        let value = parse_one_term(chrs, pos)?;
        entries.push((key, value));
        skip_whitespace(chrs, pos);
        if *pos >= chrs.len() {
            return Err(pt_error("Unmatched brace", ""));
        }
        match chrs[*pos] {
            ',' => { *pos += 1; },
            '}' => { *pos += 1; return Ok(make_map(entries)); },
            other => {
                return Err(pt_error("Expected , or } in map",
                                    &other.to_string()));
            },
        }
    }
} // parse_map()

// Creates an error message for the term parser.
fn pt_error(err: &str, bad: &str) -> EngineError {
    EngineError::Parse(format!("parse_term() - {}: >{}<", err, bad))
}


// test
