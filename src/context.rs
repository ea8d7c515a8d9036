//! Per-query state: the knowledge base snapshot, the variable id
//! supply, the tracer and the spy registry.
//!
//! Everything the resolver needs while solving one query travels in
//! this structure. Nothing here is process-global, so concurrent
//! queries cannot interfere with each other's variables or traces.

use std::cell::RefCell;
use std::sync::Arc;

use crate::knowledge_base::KbState;
use crate::logic_var::VarSupply;
use crate::spy::SpyRegistry;
use crate::trace::{Tracer, DEFAULT_TRACE_DEPTH};

pub struct QueryContext {
    /// The snapshot the query resolves against. Taken once, at query
    /// creation; later mutations of the knowledge base are invisible.
    pub kb: Arc<KbState>,
    /// Source of variable ids for this query. Clause variables are
    /// renamed from this supply on every use.
    pub supply: VarSupply,
    /// The query's trace recorder. Inactive unless tracing was
    /// requested.
    pub tracer: RefCell<Tracer>,
    /// Engine-wide spy points, shared with the knowledge base.
    pub spies: Arc<SpyRegistry>,
}

impl QueryContext {

    pub fn new(kb: Arc<KbState>, supply: VarSupply,
               spies: Arc<SpyRegistry>) -> Self {
        QueryContext {
            kb,
            supply,
            tracer: RefCell::new(Tracer::new(false, DEFAULT_TRACE_DEPTH)),
            spies,
        }
    }

    pub fn with_tracer(kb: Arc<KbState>, supply: VarSupply,
                       spies: Arc<SpyRegistry>, tracer: Tracer) -> Self {
        QueryContext {
            kb,
            supply,
            tracer: RefCell::new(tracer),
            spies,
        }
    }

} // impl QueryContext
