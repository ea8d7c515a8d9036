//! The tagged wire format for interchange with a UI.
//!
//! Terms serialize to tagged variants: `{"t":"atom","v":...}`,
//! `{"t":"num","v":...}`, `{"t":"str","v":...}`, `{"t":"var","name":...}`,
//! `{"t":"list","items":[...]}`, `{"t":"compound","head":...,"args":[...]}`
//! and `{"t":"map","entries":[...]}`. Round-trips are value-preserving.
//!
//! The same module implements knowledge base export and import. Rule
//! bodies are flattened to lists of goal terms using the goal/term
//! encoding, so `export` followed by `import` reproduces the same
//! facts and rules.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::goal::Goal;
use crate::knowledge_base::{ChangeEvent, ChangeKind, KbState,
                            KnowledgeBase};
use crate::operator::Operator;
use crate::resolver::resolve_goal;
use crate::rule::Rule;
use crate::term::{make_map, MapKey, Term};

/// A number on the wire: integer or float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireNum {
    Int(i64),
    Float(f64),
}

/// A term on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum WireTerm {
    #[serde(rename = "atom")]
    Atom { v: String },
    #[serde(rename = "num")]
    Num { v: WireNum },
    #[serde(rename = "str")]
    Str { v: String },
    #[serde(rename = "var")]
    Var { name: String },
    #[serde(rename = "list")]
    List {
        items: Vec<WireTerm>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tail: Option<Box<WireTerm>>,
    },
    #[serde(rename = "compound")]
    Compound { head: String, args: Vec<WireTerm> },
    #[serde(rename = "map")]
    Map { entries: Vec<(WireTerm, WireTerm)> },
}

/// Converts a term to its wire form. Variable ids are dropped: on the
/// wire a variable is just its name, which is what a UI displays and
/// what import re-activates.
pub fn term_to_wire(term: &Term) -> WireTerm {
    match term {
        Term::Anonymous => WireTerm::Var { name: "_".to_string() },
        Term::Atom(s) => WireTerm::Atom { v: s.clone() },
        Term::SStr(s) => WireTerm::Str { v: s.clone() },
        Term::SInt(i) => WireTerm::Num { v: WireNum::Int(*i) },
        Term::SFloat(f) => WireTerm::Num { v: WireNum::Float(*f) },
        Term::Var { id: _, name } => WireTerm::Var { name: name.clone() },
        Term::Compound(terms) => {
            let head = match &terms[0] {
                Term::Atom(s) => s.clone(),
                other => other.to_string(),
            };
            WireTerm::Compound {
                head,
                args: terms[1..].iter().map(term_to_wire).collect(),
            }
        },
        Term::List { items, tail } => {
            WireTerm::List {
                items: items.iter().map(term_to_wire).collect(),
                tail: tail.as_ref().map(|t| Box::new(term_to_wire(t))),
            }
        },
        Term::Map(entries) => {
            WireTerm::Map {
                entries: entries.iter().map(|(k, v)| {
                    let key = match k {
                        MapKey::Atom(s) => WireTerm::Atom { v: s.clone() },
                        MapKey::Int(i) => {
                            WireTerm::Num { v: WireNum::Int(*i) }
                        },
                    };
                    (key, term_to_wire(v))
                }).collect(),
            }
        },
    }
} // term_to_wire()

/// Converts a wire term back to a term. Variables come back with id 0;
/// they are re-activated when the surrounding clause or query is used.
pub fn wire_to_term(wire: &WireTerm) -> Result<Term, EngineError> {
    match wire {
        WireTerm::Atom { v } => Ok(Term::Atom(v.clone())),
        WireTerm::Str { v } => Ok(Term::SStr(v.clone())),
        WireTerm::Num { v } => {
            match v {
                WireNum::Int(i) => Ok(Term::SInt(*i)),
                WireNum::Float(f) => Ok(Term::SFloat(*f)),
            }
        },
        WireTerm::Var { name } => {
            if name == "_" { Ok(Term::Anonymous) }
            else { Ok(Term::Var { id: 0, name: name.clone() }) }
        },
        WireTerm::Compound { head, args } => {
            let mut terms = vec![Term::Atom(head.clone())];
            for arg in args {
                terms.push(wire_to_term(arg)?);
            }
            Ok(Term::Compound(terms))
        },
        WireTerm::List { items, tail } => {
            let mut out_items = Vec::with_capacity(items.len());
            for item in items {
                out_items.push(wire_to_term(item)?);
            }
            let out_tail = match tail {
                Some(t) => Some(Box::new(wire_to_term(t)?)),
                None => None,
            };
            Ok(Term::List { items: out_items, tail: out_tail })
        },
        WireTerm::Map { entries } => {
            let mut out = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                let key = match key {
                    WireTerm::Atom { v } => MapKey::Atom(v.clone()),
                    WireTerm::Num { v: WireNum::Int(i) } => MapKey::Int(*i),
                    other => {
                        let err = format!("wire_to_term() - Map keys \
                            must be atoms or integers: {:?}", other);
                        return Err(EngineError::Import(err));
                    },
                };
                out.push((key, wire_to_term(value)?));
            }
            Ok(make_map(out))
        },
    }
} // wire_to_term()

/// A rule on the wire: a head term plus the body flattened to a list
/// of goal terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRule {
    pub head: WireTerm,
    pub body: Vec<WireTerm>,
}

/// A whole knowledge base on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbExport {
    pub facts: BTreeMap<String, Vec<Vec<WireTerm>>>,
    pub rules: BTreeMap<String, Vec<WireRule>>,
    pub exported_at: DateTime<Utc>,
}

impl KnowledgeBase {

    /// Exports the current snapshot.
    pub fn export(&self) -> KbExport {
        let state = self.snapshot();
        let facts = state.facts.iter()
            .map(|(key, tuples)| {
                let tuples = tuples.iter()
                    .map(|tuple| tuple.iter().map(term_to_wire).collect())
                    .collect();
                (key.clone(), tuples)
            })
            .collect();
        let rules = state.rules.iter()
            .map(|(key, rules)| {
                let rules = rules.iter()
                    .map(|rule| WireRule {
                        head: term_to_wire(&rule.head),
                        body: rule.body.body_terms().iter()
                                  .map(term_to_wire).collect(),
                    })
                    .collect();
                (key.clone(), rules)
            })
            .collect();
        KbExport {
            facts,
            rules,
            exported_at: Utc::now(),
        }
    } // export()

    /// Replaces the whole store with imported data, atomically. On any
    /// conversion error the store is left untouched.
    pub fn import(&self, data: &KbExport) -> Result<(), EngineError> {

        let mut state = KbState::default();

        for (key, tuples) in &data.facts {
            let mut list: Vec<Vec<Term>> = Vec::with_capacity(tuples.len());
            for tuple in tuples {
                let mut terms = Vec::with_capacity(tuple.len());
                for wire in tuple {
                    terms.push(wire_to_term(wire)?);
                }
                if !list.contains(&terms) { list.push(terms); }
            }
            state.facts.insert(key.clone(), Arc::new(list));
        }

        for (key, rules) in &data.rules {
            let mut list: Vec<Rule> = Vec::with_capacity(rules.len());
            for wire_rule in rules {
                let head = wire_to_term(&wire_rule.head)?;
                if !matches!(head, Term::Compound(_)) {
                    let err = format!("import() - Rule head must be a \
                        compound term: {}", head);
                    return Err(EngineError::Import(err));
                }
                let mut goals: Vec<Goal> =
                    Vec::with_capacity(wire_rule.body.len());
                for wire in &wire_rule.body {
                    let term = wire_to_term(wire)?;
                    let goal = resolve_goal(&term).map_err(|e| {
                        EngineError::Import(format!("import() - {}", e))
                    })?;
                    goals.push(goal);
                }
                let body = match goals.len() {
                    0 => Goal::Nil,
                    1 => goals.remove(0),
                    _ => Goal::OperatorGoal(Operator::And(goals)),
                };
                list.push(Rule {
                    head,
                    body,
                    id: self.stamp_clause_id(),
                });
            }
            state.rules.insert(key.clone(), Arc::new(list));
        }

        debug!("import: {} fact predicates, {} rule predicates",
               state.facts.len(), state.rules.len());
        let event = ChangeEvent {
            kind: ChangeKind::Import,
            predicate: String::new(),
            args: None,
            timestamp: Utc::now(),
        };
        self.replace_state(state, event);
        Ok(())

    } // import()

} // impl KnowledgeBase


#[cfg(test)]
mod test {

    use crate::*;

    // Parse a term, convert to wire form and back: bit-identical.
    #[test]
    fn test_wire_roundtrip() {

        let texts = [
            "tom",
            "\"some text\"",
            "42",
            "3.5",
            "?x",
            "?_",
            "[a, b | ?t]",
            "parent(tom, ?x)",
            "{age: 36, name: ada}",
            "f([1, 2], {k: g(?v)})",
        ];
        for text in texts {
            let term = parse_term(text).unwrap();
            let wire = term_to_wire(&term);
            let back = wire_to_term(&wire).unwrap();
            assert_eq!(term, back, "round-trip of {}", text);

            // And through JSON.
            let json = serde_json::to_string(&wire).unwrap();
            let wire2: WireTerm = serde_json::from_str(&json).unwrap();
            assert_eq!(wire, wire2, "json round-trip of {}", text);
        }

    } // test_wire_roundtrip()

    #[test]
    fn test_wire_tags() {
        let wire = term_to_wire(&atom!("tom"));
        let json = serde_json::to_string(&wire).unwrap();
        assert_eq!("{\"t\":\"atom\",\"v\":\"tom\"}", json);

        let wire = term_to_wire(&Term::SInt(42));
        let json = serde_json::to_string(&wire).unwrap();
        assert_eq!("{\"t\":\"num\",\"v\":42}", json);

        let wire = term_to_wire(&var!("x"));
        let json = serde_json::to_string(&wire).unwrap();
        assert_eq!("{\"t\":\"var\",\"name\":\"x\"}", json);
    }

    // export then import into an empty store: identical facts and
    // rules.
    #[test]
    fn test_export_import_roundtrip() {

        let kb = test_kb();
        let data = kb.export();

        let kb2 = KnowledgeBase::new();
        kb2.import(&data).unwrap();

        assert_eq!(kb.facts(None), kb2.facts(None));
        let rules1: Vec<String> = kb.rules_of("grandfather/2")
            .iter().map(|r| r.to_string()).collect();
        let rules2: Vec<String> = kb2.rules_of("grandfather/2")
            .iter().map(|r| r.to_string()).collect();
        assert_eq!(rules1, rules2);

        // The imported store answers queries.
        let solutions: Vec<_> = kb2.query_str(
            "grandfather(?who, ?whom)",
            QueryOptions::default()).unwrap().collect();
        assert_eq!(1, solutions.len());

        // And import appends a history entry.
        let history = kb2.history(None);
        assert_eq!(ChangeKind::Import,
                   history[history.len() - 1].kind);

    } // test_export_import_roundtrip()

} // test
