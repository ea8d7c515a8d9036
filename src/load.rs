//! Loads facts and rules from program text or a file.
//!
//! Program text is a sequence of clauses, each ended by a period:
//!
//! <pre>
//! % The family.
//! parent(tom, mary).
//! parent(tom, bob).
//! ancestor(?x, ?y) :- parent(?x, ?y).
//! ancestor(?x, ?z) :- parent(?x, ?y), ancestor(?y, ?z).
//! </pre>
//!
//! Comments run from `%`, `#` or `//` to the end of the line.

use std::fs;

use log::debug;

use crate::error::EngineError;
use crate::knowledge_base::KnowledgeBase;
use crate::rule::parse_rule;

/// Loads clauses from program text into the knowledge base.
///
/// Clauses without a body are asserted as facts; clauses with a body
/// are added as rules. Returns the number of clauses loaded. On a
/// parse error, the message names the last clause read successfully,
/// to help locate the problem.
///
/// # Usage
/// ```
/// use sherlog::*;
///
/// let kb = KnowledgeBase::new();
/// let n = load_str(&kb, "parent(tom, mary). parent(tom, bob).").unwrap();
/// assert_eq!(2, n);
/// ```
pub fn load_str(kb: &KnowledgeBase,
                text: &str) -> Result<usize, EngineError> {

    let stripped = strip_comments(text);
    let clauses = split_clauses(&stripped)?;

    let mut count = 0;
    let mut previous = String::new();
    for clause_text in clauses {
        match parse_rule(&clause_text) {
            Ok(rule) => {
                kb.add_clause(rule)?;
                previous = clause_text;
                count += 1;
            },
            Err(err) => {
                let msg = if previous.is_empty() {
                    format!("{} Check start of program.", err)
                }
                else {
                    format!("{} Error occurs after: {}", err, previous)
                };
                return Err(EngineError::Parse(msg));
            },
        }
    }
    debug!("loaded {} clauses", count);
    Ok(count)

} // load_str()

/// Loads clauses from a file. See [load_str()](fn.load_str.html).
pub fn load_file(kb: &KnowledgeBase,
                 file_name: &str) -> Result<usize, EngineError> {
    let text = fs::read_to_string(file_name)?;
    load_str(kb, &text)
} // load_file()

// Removes comments: from %, # or // to the end of each line.
// Delimiters inside double quoted strings are left alone.
fn strip_comments(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        let mut in_string = false;
        let mut previous = ' ';
        let mut end = line.len();
        for (i, ch) in line.char_indices() {
            if ch == '"' && previous != '\\' { in_string = !in_string; }
            if !in_string {
                if ch == '%' || ch == '#' {
                    end = i;
                    break;
                }
                if ch == '/' && previous == '/' {
                    end = i - 1;
                    break;
                }
            }
            previous = ch;
        }
        out += &line[..end];
        out += "\n";
    }
    out
} // strip_comments()

// Splits program text into clause strings at the terminating periods.
// A period ends a clause only at nesting depth zero, outside strings,
// and not when it begins a decimal fraction.
fn split_clauses(text: &str) -> Result<Vec<String>, EngineError> {

    let mut clauses: Vec<String> = vec![];
    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut in_string = false;

    let chrs: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chrs.len() {
        let ch = chrs[i];
        if in_string {
            current.push(ch);
            if ch == '\\' && i + 1 < chrs.len() {
                current.push(chrs[i + 1]);
                i += 2;
                continue;
            }
            if ch == '"' { in_string = false; }
            i += 1;
            continue;
        }
        match ch {
            '"' => { in_string = true; current.push(ch); },
            '(' | '[' | '{' => { depth += 1; current.push(ch); },
            ')' | ']' | '}' => { depth -= 1; current.push(ch); },
            '.' => {
                let next_digit = i + 1 < chrs.len()
                                 && chrs[i + 1].is_ascii_digit();
                if depth == 0 && !next_digit {
                    current.push(ch);
                    let clause = current.trim().to_string();
                    if !clause.is_empty() { clauses.push(clause); }
                    current = String::new();
                }
                else {
                    current.push(ch);
                }
            },
            _ => { current.push(ch); },
        }
        i += 1;
    }

    if depth != 0 || in_string {
        return Err(EngineError::Parse(
            "load_str() - Unbalanced delimiters in program.".to_string()));
    }
    let rest = current.trim();
    if !rest.is_empty() {
        let msg = format!("load_str() - Clause without a final \
                           period: >{}<", rest);
        return Err(EngineError::Parse(msg));
    }
    Ok(clauses)

} // split_clauses()


#[cfg(test)]
mod test {

    use crate::*;

    static FAMILY: &str = "
        % The family.
        parent(tom, mary).   # facts
        parent(tom, bob).    // more facts
        ancestor(?x, ?y) :- parent(?x, ?y).
        ancestor(?x, ?z) :- parent(?x, ?y), ancestor(?y, ?z).
    ";

    #[test]
    fn test_load_str() {

        let kb = KnowledgeBase::new();
        let n = load_str(&kb, FAMILY).unwrap();
        assert_eq!(4, n);
        assert_eq!(2, kb.facts_of("parent/2").len());
        assert_eq!(2, kb.rules_of("ancestor/2").len());

    } // test_load_str()

    #[test]
    fn test_load_decimal_and_missing_period() {

        let kb = KnowledgeBase::new();
        // The decimal point must not end the clause.
        let n = load_str(&kb, "measurement(pi, 3.14).").unwrap();
        assert_eq!(1, n);

        let kb = KnowledgeBase::new();
        assert!(load_str(&kb, "parent(tom, mary)").is_err());

    } // test_load_decimal_and_missing_period()

    #[test]
    fn test_load_reports_position() {
        let kb = KnowledgeBase::new();
        let err = load_str(&kb, "parent(tom, mary). ???.").unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("parent(tom, mary)."), "got: {}", msg);
    }

} // test
