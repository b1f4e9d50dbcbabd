//! vertex
//!
//! A single node in a dependency graph.
//!
//! # Architecture
//!
//! A [`Vertex`] wraps an opaque payload with a validated name and an
//! insertion-ordered list of dependency edges. Edges are stored by
//! [`VertexName`], not by reference, so a batch of vertices is a plain
//! `Vec<Vertex<T>>` and referential completeness is checked by the
//! verifier against the batch it is handed.
//!
//! # Invariants
//!
//! - The dependency list never contains duplicates
//! - `order` and `seen` are transient traversal state, owned by the
//!   verifier; they are only meaningful after a successful verification
//!   pass and are cleared by [`Vertex::reset`]

use crate::types::VertexName;

/// A named node in a dependency graph, wrapping an opaque payload.
///
/// The payload type `T` is entirely the caller's: a component descriptor,
/// an `Arc` to a live service, a borrowed reference, or `()` when only the
/// ordering matters. The graph never interprets it.
///
/// # Example
///
/// ```
/// use strata::types::VertexName;
/// use strata::vertex::Vertex;
///
/// let store = VertexName::new("store").unwrap();
/// let mut engine = Vertex::new(VertexName::new("engine").unwrap(), ());
///
/// engine.add_dependency(store.clone());
/// engine.add_dependency(store.clone()); // duplicate, suppressed
/// assert_eq!(engine.dependencies(), &[store]);
/// ```
#[derive(Debug, Clone)]
pub struct Vertex<T> {
    name: VertexName,
    node: T,
    dependencies: Vec<VertexName>,
    pub(crate) order: usize,
    pub(crate) seen: bool,
}

impl<T> Vertex<T> {
    /// Create a vertex with no dependencies.
    pub fn new(name: VertexName, node: T) -> Self {
        Self {
            name,
            node,
            dependencies: Vec::new(),
            order: 0,
            seen: false,
        }
    }

    /// The vertex name.
    pub fn name(&self) -> &VertexName {
        &self.name
    }

    /// Shared access to the wrapped payload.
    pub fn node(&self) -> &T {
        &self.node
    }

    /// Mutable access to the wrapped payload.
    pub fn node_mut(&mut self) -> &mut T {
        &mut self.node
    }

    /// Consume the vertex, returning the payload.
    pub fn into_node(self) -> T {
        self.node
    }

    /// Add a dependency edge: this vertex requires `dependency` to be
    /// ready first. Idempotent; insertion order is preserved.
    ///
    /// A vertex may name itself as a dependency; verification reports
    /// that as a cycle, not here.
    pub fn add_dependency(&mut self, dependency: VertexName) {
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
    }

    /// Remove a dependency edge. Returns whether the edge existed.
    pub fn remove_dependency(&mut self, dependency: &VertexName) -> bool {
        match self.dependencies.iter().position(|d| d == dependency) {
            Some(at) => {
                self.dependencies.remove(at);
                true
            }
            None => false,
        }
    }

    /// Whether this vertex has a direct edge to `dependency`.
    pub fn depends_on(&self, dependency: &VertexName) -> bool {
        self.dependencies.contains(dependency)
    }

    /// The dependency edges, in insertion order.
    pub fn dependencies(&self) -> &[VertexName] {
        &self.dependencies
    }

    /// The resolved topological order: one greater than the maximum order
    /// of any dependency, 0 for a vertex with none.
    ///
    /// Only meaningful after a successful [`verify`](crate::verify::verify)
    /// pass over a batch containing this vertex.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Clear transient traversal state (`order` and the active-path mark).
    ///
    /// Idempotent. The verifier calls this at the start of every pass, so
    /// vertices may be reused across verification calls.
    pub fn reset(&mut self) {
        self.order = 0;
        self.seen = false;
    }
}
