//! Strata - dependency graph verification and topological ordering
//!
//! Strata verifies directed acyclic graphs of named vertices and produces
//! a stable topological ordering, for callers that sequence component
//! startup (and, by reversing the order, shutdown).
//!
//! # Architecture
//!
//! The crate is a small layered library:
//!
//! - [`types`] - Strong types: validated [`types::VertexName`]
//! - [`vertex`] - One graph node: name, opaque payload, dependency edges
//! - [`verify`] - Batch verification, cycle detection, topological sort
//! - [`manifest`] - Declarative TOML/JSON component manifests
//!
//! # Correctness Invariants
//!
//! 1. A vertex with no dependencies always resolves to order 0
//! 2. For every edge `v -> d`, `d.order() < v.order()` after verification
//! 3. Every cycle reachable from the batch is reported, with its full path
//! 4. A dependency edge pointing outside the batch is rejected, never
//!    silently dropped
//!
//! # Example
//!
//! ```
//! use strata::types::VertexName;
//! use strata::verify::topological_sort;
//! use strata::vertex::Vertex;
//!
//! let store = VertexName::new("store").unwrap();
//! let engine = VertexName::new("engine").unwrap();
//!
//! let mut batch = vec![
//!     Vertex::new(engine.clone(), ()),
//!     Vertex::new(store.clone(), ()),
//! ];
//! batch[0].add_dependency(store.clone());
//!
//! topological_sort(&mut batch).unwrap();
//! assert_eq!(batch[0].name(), &store);
//! assert_eq!(batch[1].name(), &engine);
//! ```

pub mod manifest;
pub mod types;
pub mod verify;
pub mod vertex;
