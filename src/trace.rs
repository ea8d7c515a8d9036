//! Structured tracing of the resolution search.
//!
//! When tracing is active, every predicate call the resolver makes is
//! recorded twice over: as an event in an append-only log (CALL, EXIT,
//! FAIL, REDO) and as a node in a parent-linked inference tree. The
//! trace lives in the query context, so concurrent traced queries
//! cannot cross-contaminate.
//!
//! Result counts on tree nodes are best-effort: they are bumped on each
//! yielded solution, capped at [RESULT_CAP](constant.RESULT_CAP.html),
//! and final status is stamped when the call is exhausted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::term::Term;

/// Tree nodes beyond this depth are not recorded; the deeper goals run
/// untraced.
pub const DEFAULT_TRACE_DEPTH: usize = 50;

/// Result counts on trace nodes stop growing here.
pub const RESULT_CAP: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceEventKind {
    Call,
    Exit,
    Fail,
    Redo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceStatus {
    Pending,
    Success,
    Fail,
}

/// One node of the inference tree.
#[derive(Debug, Clone)]
pub struct TraceNode {
    pub id: usize,
    pub predicate: String,
    /// The call's arguments, deeply walked at CALL time.
    pub args: Vec<Term>,
    pub parent: Option<usize>,
    pub depth: usize,
    pub status: TraceStatus,
    /// Solutions seen so far, capped at RESULT_CAP.
    pub results: usize,
}

/// One entry of the trace log.
#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub kind: TraceEventKind,
    pub goal: String,
    pub args: Vec<Term>,
    pub depth: usize,
    pub node: usize,
    pub timestamp: DateTime<Utc>,
}

/// Counts of trace events, reported alongside the log and tree.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TraceStats {
    pub calls: u64,
    pub exits: u64,
    pub fails: u64,
    pub redos: u64,
    pub nodes: usize,
}

/// Records the trace of one query.
#[derive(Debug)]
pub struct Tracer {
    active: bool,
    max_depth: usize,
    nodes: Vec<TraceNode>,
    log: Vec<TraceEvent>,
    stats: TraceStats,
}

impl Tracer {

    pub fn new(active: bool, max_depth: usize) -> Self {
        Tracer {
            active,
            max_depth,
            nodes: vec![],
            log: vec![],
            stats: TraceStats::default(),
        }
    }

    pub fn is_active(&self) -> bool { self.active }

    pub fn max_depth(&self) -> usize { self.max_depth }

    /// Records a CALL: creates a pending tree node and logs the event.
    /// Returns the new node's id.
    pub fn start_node(&mut self, predicate: &str, args: Vec<Term>,
                      parent: Option<usize>, depth: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(TraceNode {
            id,
            predicate: predicate.to_string(),
            args: args.clone(),
            parent,
            depth,
            status: TraceStatus::Pending,
            results: 0,
        });
        self.stats.calls += 1;
        self.stats.nodes = self.nodes.len();
        self.log.push(TraceEvent {
            kind: TraceEventKind::Call,
            goal: predicate.to_string(),
            args,
            depth,
            node: id,
            timestamp: Utc::now(),
        });
        id
    } // start_node()

    /// Records a REDO: the call is re-entered for another solution.
    pub fn redo(&mut self, id: usize) {
        if let Some(node) = self.nodes.get(id) {
            self.stats.redos += 1;
            self.log.push(TraceEvent {
                kind: TraceEventKind::Redo,
                goal: node.predicate.clone(),
                args: node.args.clone(),
                depth: node.depth,
                node: id,
                timestamp: Utc::now(),
            });
        }
    } // redo()

    /// Bumps a node's result count, capped at RESULT_CAP.
    pub fn note_result(&mut self, id: usize) {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.results < RESULT_CAP { node.results += 1; }
        }
    } // note_result()

    /// Stamps a node at exhaustion: EXIT when it produced at least one
    /// solution, FAIL otherwise. A node is stamped only once.
    pub fn finish(&mut self, id: usize) {
        let (kind, goal, args, depth) = match self.nodes.get_mut(id) {
            Some(node) => {
                if node.status != TraceStatus::Pending { return; }
                if node.results > 0 {
                    node.status = TraceStatus::Success;
                    self.stats.exits += 1;
                    (TraceEventKind::Exit, node.predicate.clone(),
                     node.args.clone(), node.depth)
                }
                else {
                    node.status = TraceStatus::Fail;
                    self.stats.fails += 1;
                    (TraceEventKind::Fail, node.predicate.clone(),
                     node.args.clone(), node.depth)
                }
            },
            None => { return; },
        };
        self.log.push(TraceEvent {
            kind, goal, args, depth,
            node: id,
            timestamp: Utc::now(),
        });
    } // finish()

    /// Discards all recorded nodes and events.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.log.clear();
        self.stats = TraceStats::default();
    }

    pub fn log(&self) -> &[TraceEvent] { &self.log }

    pub fn nodes(&self) -> &[TraceNode] { &self.nodes }

    pub fn stats(&self) -> TraceStats { self.stats }

    /// Exports the inference tree in the node/link form consumed by
    /// the visualizer.
    pub fn export_tree(&self) -> TraceTreeExport {
        let nodes = self.nodes.iter().map(|n| ExportedNode {
            id: n.id,
            label: n.predicate.clone(),
            args: n.args.iter().map(|a| a.to_string()).collect(),
            status: n.status,
            depth: n.depth,
            parent: n.parent,
            results: n.results,
        }).collect();
        let links = self.nodes.iter()
            .filter_map(|n| n.parent.map(|p| ExportedLink {
                source: p,
                target: n.id,
                label: n.predicate.clone(),
            }))
            .collect();
        TraceTreeExport { nodes, links }
    } // export_tree()

} // impl Tracer

/// The inference tree in a shape a browser UI can render directly.
#[derive(Debug, Clone, Serialize)]
pub struct TraceTreeExport {
    pub nodes: Vec<ExportedNode>,
    pub links: Vec<ExportedLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedNode {
    pub id: usize,
    pub label: String,
    pub args: Vec<String>,
    pub status: TraceStatus,
    pub depth: usize,
    pub parent: Option<usize>,
    pub results: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedLink {
    pub source: usize,
    pub target: usize,
    pub label: String,
}


#[cfg(test)]
mod test {

    use super::*;
    use crate::*;

    #[test]
    fn test_tracer_lifecycle() {

        let mut tracer = Tracer::new(true, DEFAULT_TRACE_DEPTH);

        let id = tracer.start_node("parent/2",
                                   vec![atom!("tom"), var!(1, "x")],
                                   None, 0);
        tracer.note_result(id);
        tracer.redo(id);
        tracer.note_result(id);
        tracer.finish(id);
        tracer.finish(id);  // second stamp is ignored

        let nodes = tracer.nodes();
        assert_eq!(1, nodes.len());
        assert_eq!(TraceStatus::Success, nodes[0].status);
        assert_eq!(2, nodes[0].results);

        let stats = tracer.stats();
        assert_eq!(1, stats.calls);
        assert_eq!(1, stats.exits);
        assert_eq!(1, stats.redos);
        assert_eq!(0, stats.fails);

        // CALL, REDO, EXIT
        assert_eq!(3, tracer.log().len());

    } // test_tracer_lifecycle()

    #[test]
    fn test_export_tree() {

        let mut tracer = Tracer::new(true, DEFAULT_TRACE_DEPTH);
        let root = tracer.start_node("a/0", vec![], None, 0);
        let child = tracer.start_node("b/1", vec![atom!("x")],
                                      Some(root), 1);
        tracer.finish(child);
        tracer.note_result(root);
        tracer.finish(root);

        let tree = tracer.export_tree();
        assert_eq!(2, tree.nodes.len());
        assert_eq!(1, tree.links.len());
        assert_eq!(root, tree.links[0].source);
        assert_eq!(child, tree.links[0].target);

        // The export serializes cleanly.
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.contains("\"links\""));

    } // test_export_tree()

} // test
