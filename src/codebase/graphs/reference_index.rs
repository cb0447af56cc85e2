//! Bidirectional index of method → class member references.
//!
//! Stores which functions/methods reference which class members. Enables both:
//! - "Find References": given a member, find all methods that reference it
//! - "Dependencies": given a method, find all members it references
//!
//! Calling method ids are lower-cased on the way in, so `Foo::bar` and
//! `foo::bar` record the same edge. Member ids are stored as given; callers
//! build them with the class half already lower-cased (`foo::$name`).

use std::cell::RefCell;

use indexmap::IndexSet;
use parking_lot::RwLock;
use rustc_hash::{FxBuildHasher, FxHashMap};
use smol_str::SmolStr;
use tracing::{debug, trace};

type EdgeSet = IndexSet<SmolStr, FxBuildHasher>;

/// Receiver for coarse "method M references member P" edges.
///
/// Implementations take `&self` so a resolver can record through a shared
/// reference; the member id arrives in `lower(class)::$name` key form.
pub trait ReferenceRecorder {
    fn add_reference_to_class_member(&self, calling_method_id: &str, member_id: &str);
}

impl<T: ReferenceRecorder + ?Sized> ReferenceRecorder for &T {
    fn add_reference_to_class_member(&self, calling_method_id: &str, member_id: &str) {
        (**self).add_reference_to_class_member(calling_method_id, member_id)
    }
}

#[derive(Debug, Clone, Default)]
struct Edges {
    /// Reverse index: member → methods referencing it
    reverse: FxHashMap<SmolStr, EdgeSet>,

    /// Forward index: method → members it references
    forward: FxHashMap<SmolStr, EdgeSet>,
}

impl Edges {
    fn insert(&mut self, calling_method_id: SmolStr, member_id: SmolStr) -> bool {
        let added = self
            .reverse
            .entry(member_id.clone())
            .or_default()
            .insert(calling_method_id.clone());

        self.forward
            .entry(calling_method_id)
            .or_default()
            .insert(member_id);

        added
    }
}

/// Shared, deduplicating reference index.
///
/// Writers are serialized by an internal lock, so one index can be fed by
/// several resolvers.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    edges: RwLock<Edges>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edge from `calling_method_id` to `member_id`.
    ///
    /// Returns `false` if the edge was already present.
    pub fn add_reference(&self, calling_method_id: &str, member_id: &str) -> bool {
        trace!(
            "[REF_INDEX] add_reference: source='{}' target='{}'",
            calling_method_id, member_id
        );
        self.edges
            .write()
            .insert(normalize(calling_method_id), SmolStr::new(member_id))
    }

    /// All methods that reference a member.
    pub fn referencing_methods(&self, member_id: &str) -> Vec<SmolStr> {
        self.edges
            .read()
            .reverse
            .get(member_id)
            .map(|sources| sources.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All members a method references (forward lookup).
    pub fn referenced_members(&self, calling_method_id: &str) -> Vec<SmolStr> {
        self.edges
            .read()
            .forward
            .get(normalize(calling_method_id).as_str())
            .map(|targets| targets.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Check if a member has any references.
    pub fn has_references(&self, member_id: &str) -> bool {
        self.edges
            .read()
            .reverse
            .get(member_id)
            .is_some_and(|sources| !sources.is_empty())
    }

    /// Get all members that have references.
    ///
    /// Useful for debugging and testing.
    pub fn targets(&self) -> Vec<SmolStr> {
        self.edges.read().reverse.keys().cloned().collect()
    }

    /// Number of distinct edges.
    pub fn len(&self) -> usize {
        self.edges.read().forward.values().map(EdgeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every edge originating from a method.
    ///
    /// Called when a function body is re-analyzed so stale edges do not linger.
    pub fn remove_references_from_method(&self, calling_method_id: &str) {
        let source = normalize(calling_method_id);
        let mut edges = self.edges.write();

        let Some(targets) = edges.forward.remove(&source) else {
            return;
        };
        for target in &targets {
            if let Some(sources) = edges.reverse.get_mut(target) {
                sources.shift_remove(&source);
            }
        }

        // Clean up empty entries
        edges.reverse.retain(|_, sources| !sources.is_empty());
    }

    /// Merge the edges collected by a thread-confined buffer.
    pub fn absorb(&self, buffer: ReferenceBuffer) {
        let pending = buffer.into_edges();
        let count = pending.len();
        let mut edges = self.edges.write();
        for (calling_method_id, member_id) in pending {
            edges.insert(calling_method_id, member_id);
        }
        debug!("[REF_INDEX] absorbed {} buffered edges", count);
    }

    /// Clear all references.
    pub fn clear(&self) {
        let mut edges = self.edges.write();
        edges.reverse.clear();
        edges.forward.clear();
    }
}

impl ReferenceRecorder for ReferenceIndex {
    fn add_reference_to_class_member(&self, calling_method_id: &str, member_id: &str) {
        self.add_reference(calling_method_id, member_id);
    }
}

/// Append-only edge buffer for a single worker thread.
///
/// Not `Sync`; each worker owns one and hands it to
/// [`ReferenceIndex::absorb`] when its units are done. Edges are kept in
/// recording order without deduplication.
#[derive(Debug, Default)]
pub struct ReferenceBuffer {
    edges: RefCell<Vec<(SmolStr, SmolStr)>>,
}

impl ReferenceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.borrow().is_empty()
    }

    /// Snapshot of the recorded edges, in recording order.
    pub fn edges(&self) -> Vec<(SmolStr, SmolStr)> {
        self.edges.borrow().clone()
    }

    pub fn into_edges(self) -> Vec<(SmolStr, SmolStr)> {
        self.edges.into_inner()
    }
}

impl ReferenceRecorder for ReferenceBuffer {
    fn add_reference_to_class_member(&self, calling_method_id: &str, member_id: &str) {
        self.edges
            .borrow_mut()
            .push((normalize(calling_method_id), SmolStr::new(member_id)));
    }
}

fn normalize(id: &str) -> SmolStr {
    if id.bytes().any(|b| b.is_ascii_uppercase()) {
        SmolStr::new(id.to_ascii_lowercase())
    } else {
        SmolStr::new(id)
    }
}
