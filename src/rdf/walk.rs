//! The memoized, cycle-tolerant node walker shared by every builder.
//!
//! Each node identity moves White -> Grey exactly once (visit start) and
//! Grey -> Black exactly once (visit completion). What a Grey re-entry
//! means is the caller's policy: entity walks share the partial value,
//! the license walk treats it as an illegal cycle.

use crate::error::{ParseError, Result};
use std::collections::HashMap;

/// What to do when a walk re-enters a node still under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Hand back the partial value stored at visit start. Self- and
    /// mutually-referential packages/files/relationships are valid
    /// documents, so entity walks share.
    ShareExisting,
    /// A license expression must be a DAG; fail the parse.
    Fail,
}

/// Visit state for one node identity. Absent from the map = White.
#[derive(Debug, Clone)]
enum VisitState<V> {
    /// Under construction, carrying the value shared on re-entry.
    Grey(Option<V>),
    /// Finished; the cached value is handed out on every later visit.
    Black(V),
}

/// One walk's visit states, keyed by node string identity. Owned by a
/// single parse invocation and never shared across parses.
#[derive(Debug)]
pub struct VisitMap<V> {
    states: HashMap<String, VisitState<V>>,
}

impl<V: Clone> VisitMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Consult the state before building a node. `Ok(None)` means the node
    /// is White and the caller must `begin` and build it; `Ok(Some(v))` is
    /// the shared or memoized value and the caller must not build again.
    pub fn check(&self, key: &str, policy: CyclePolicy) -> Result<Option<V>> {
        match self.states.get(key) {
            None => Ok(None),
            Some(VisitState::Black(value)) => Ok(Some(value.clone())),
            Some(VisitState::Grey(partial)) => match policy {
                CyclePolicy::Fail => Err(ParseError::cyclic_license(key)),
                CyclePolicy::ShareExisting => partial.clone().map(Some).ok_or_else(|| {
                    ParseError::ambiguous(format!(
                        "node {key} re-entered before a shareable value was recorded"
                    ))
                }),
            },
        }
    }

    /// Mark a White node Grey. `partial` is the value handed out to
    /// share-on-cycle re-entries while the node is under construction.
    pub fn begin(&mut self, key: impl Into<String>, partial: Option<V>) {
        let prior = self.states.insert(key.into(), VisitState::Grey(partial));
        debug_assert!(prior.is_none(), "node visited twice");
    }

    /// Mark a Grey node Black with its finished value.
    pub fn complete(&mut self, key: &str, value: V) {
        debug_assert!(
            matches!(self.states.get(key), Some(VisitState::Grey(_))),
            "completing a node that was never begun"
        );
        self.states.insert(key.to_string(), VisitState::Black(value));
    }

    /// True once the node has been begun (Grey or Black).
    #[must_use]
    pub fn visited(&self, key: &str) -> bool {
        self.states.contains_key(key)
    }
}

impl<V: Clone> Default for VisitMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
