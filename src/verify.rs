//! verify
//!
//! Batch verification and topological ordering of dependency graphs.
//!
//! # Overview
//!
//! A verification batch is a `&mut [Vertex<T>]`. [`verify`] checks the
//! batch for duplicate names, dangling edges, and cycles, and resolves
//! every vertex's topological order. [`topological_sort`] additionally
//! sorts the batch in place so dependencies precede dependents; the
//! reverse of the sorted batch is a valid shutdown order.
//!
//! [`verify_from`] is the single-root entry point: it verifies only the
//! transitive dependency closure of one vertex and leaves the rest of the
//! batch untouched.
//!
//! # Invariants
//!
//! - Never mutates dependency edges or payloads, only `order`/`seen`
//! - Must be deterministic
//! - A vertex's active-path mark (`seen`) is set exactly while the vertex
//!   is on the current resolution stack, and is cleared on every exit
//!   path, success or error
//!
//! # Failure semantics
//!
//! All errors abort the whole call; after an error no vertex in the batch
//! has a meaningful `order`. Nothing is retried or recovered internally,
//! and every diagnostic rides in the [`GraphError`] value. Shared
//! sub-graphs (diamonds) are re-resolved on each visit rather than
//! memoized; component graphs are small enough that this does not matter.

use std::collections::{HashMap, HashSet, VecDeque};

use thiserror::Error;
use tracing::{debug, trace};

use crate::types::VertexName;
use crate::vertex::Vertex;

/// Errors from graph verification.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A dependency chain returned to a vertex already on the active
    /// resolution path. The path reads start-to-offender, e.g.
    /// `"A -> B -> C -> A"`.
    #[error("cyclic dependency detected: {path}")]
    CyclicDependency { path: String },

    /// A vertex names a dependency that is not a member of the batch
    /// being verified. This is a graph-construction bug on the caller's
    /// side, distinct from a cycle.
    #[error("vertex '{vertex}' depends on '{dependency}', which is not in the verification batch")]
    DanglingDependency {
        vertex: VertexName,
        dependency: VertexName,
    },

    /// Two vertices in the batch share a name. Names are batch identity,
    /// so edges would be ambiguous.
    #[error("duplicate vertex name in batch: {0}")]
    DuplicateName(VertexName),

    /// The root passed to [`verify_from`] is not in the batch.
    #[error("root vertex not found in batch: {0}")]
    UnknownRoot(VertexName),
}

/// Clear transient traversal state on every vertex in the batch.
///
/// [`verify`] does this itself; this is exposed for callers that want to
/// drop stale orders without re-verifying, e.g. before rebuilding edges.
pub fn reset_vertices<T>(vertices: &mut [Vertex<T>]) {
    for vertex in vertices.iter_mut() {
        vertex.reset();
    }
}

/// Verify an entire batch and resolve every vertex's topological order.
///
/// Steps, in order:
/// 1. Reject duplicate names
/// 2. Reset all transient state
/// 3. Reject dangling edges (every dependency must be a batch member)
/// 4. Resolve every vertex's order, rejecting cycles
///
/// On success, for every edge `v -> d` it holds that
/// `d.order() < v.order()`, and a vertex with no dependencies has order 0.
/// On error the batch's orders are unspecified.
///
/// # Errors
///
/// [`GraphError::DuplicateName`], [`GraphError::DanglingDependency`], or
/// [`GraphError::CyclicDependency`].
pub fn verify<T>(vertices: &mut [Vertex<T>]) -> Result<(), GraphError> {
    debug!(vertices = vertices.len(), "verifying dependency batch");

    let index = index_by_name(vertices)?;
    reset_vertices(vertices);
    check_completeness(vertices, &index)?;

    let mut path = Vec::new();
    for at in 0..vertices.len() {
        resolve_order(vertices, &index, at, &mut path)?;
    }

    debug!("dependency batch verified");
    Ok(())
}

/// Verify only the transitive dependency closure of `root`.
///
/// Collects every vertex reachable from `root` via dependency edges
/// (visiting each once), then resets and order-resolves exactly those
/// members. Batch members outside the closure are untouched, and cycles
/// confined to them go unreported.
///
/// # Errors
///
/// [`GraphError::UnknownRoot`] if `root` is not in the batch, plus
/// everything [`verify`] can return for the closure itself.
pub fn verify_from<T>(vertices: &mut [Vertex<T>], root: &VertexName) -> Result<(), GraphError> {
    let index = index_by_name(vertices)?;
    let root_at = *index
        .get(root)
        .ok_or_else(|| GraphError::UnknownRoot(root.clone()))?;

    // Breadth-first closure walk, each vertex visited once.
    let mut members = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([root_at]);
    while let Some(at) = queue.pop_front() {
        if !visited.insert(at) {
            continue;
        }
        members.push(at);
        for dependency in vertices[at].dependencies() {
            match index.get(dependency) {
                Some(&dep_at) => queue.push_back(dep_at),
                None => {
                    return Err(GraphError::DanglingDependency {
                        vertex: vertices[at].name().clone(),
                        dependency: dependency.clone(),
                    })
                }
            }
        }
    }

    debug!(
        root = %root,
        closure = members.len(),
        batch = vertices.len(),
        "verifying dependency closure"
    );

    for &at in &members {
        vertices[at].reset();
    }
    let mut path = Vec::new();
    for &at in &members {
        resolve_order(vertices, &index, at, &mut path)?;
    }
    Ok(())
}

/// Verify the batch, then sort it in place into dependency order.
///
/// After a successful return, `vertices[i]` never depends, directly or
/// transitively, on `vertices[j]` for `j > i`. The sort is stable, so
/// vertices of equal order keep their relative positions. Reversing the
/// result gives a valid shutdown order.
///
/// # Errors
///
/// Same as [`verify`]; on error the batch order is unspecified.
pub fn topological_sort<T>(vertices: &mut [Vertex<T>]) -> Result<(), GraphError> {
    verify(vertices)?;
    vertices.sort_by_key(|v| v.order());
    Ok(())
}

/// Build the name -> batch index map, rejecting duplicates.
fn index_by_name<T>(vertices: &[Vertex<T>]) -> Result<HashMap<VertexName, usize>, GraphError> {
    let mut index = HashMap::with_capacity(vertices.len());
    for (at, vertex) in vertices.iter().enumerate() {
        if index.insert(vertex.name().clone(), at).is_some() {
            return Err(GraphError::DuplicateName(vertex.name().clone()));
        }
    }
    Ok(index)
}

/// Assert every dependency edge lands inside the batch.
fn check_completeness<T>(
    vertices: &[Vertex<T>],
    index: &HashMap<VertexName, usize>,
) -> Result<(), GraphError> {
    for vertex in vertices {
        for dependency in vertex.dependencies() {
            if !index.contains_key(dependency) {
                return Err(GraphError::DanglingDependency {
                    vertex: vertex.name().clone(),
                    dependency: dependency.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Resolve one vertex's order by depth-first walk of its dependencies.
///
/// `path` is the active resolution stack, used for the cycle diagnostic.
/// The vertex's `seen` mark is set for exactly the duration of this call.
fn resolve_order<T>(
    vertices: &mut [Vertex<T>],
    index: &HashMap<VertexName, usize>,
    at: usize,
    path: &mut Vec<VertexName>,
) -> Result<usize, GraphError> {
    path.push(vertices[at].name().clone());
    vertices[at].seen = true;

    let resolved = resolve_dependencies(vertices, index, at, path);

    // Cleared unconditionally so a vertex visited via one path does not
    // look active to a sibling branch after this call returns.
    vertices[at].seen = false;
    path.pop();

    let order = resolved?;
    vertices[at].order = order;
    trace!(vertex = %vertices[at].name(), order, "order resolved");
    Ok(order)
}

fn resolve_dependencies<T>(
    vertices: &mut [Vertex<T>],
    index: &HashMap<VertexName, usize>,
    at: usize,
    path: &mut Vec<VertexName>,
) -> Result<usize, GraphError> {
    let vertex_name = vertices[at].name().clone();
    let dependencies: Vec<usize> = vertices[at]
        .dependencies()
        .iter()
        .map(|dependency| {
            index
                .get(dependency)
                .copied()
                .ok_or_else(|| GraphError::DanglingDependency {
                    vertex: vertex_name.clone(),
                    dependency: dependency.clone(),
                })
        })
        .collect::<Result<_, _>>()?;

    let mut max: Option<usize> = None;
    for dep_at in dependencies {
        if vertices[dep_at].seen {
            return Err(GraphError::CyclicDependency {
                path: cycle_path(path, vertices[dep_at].name()),
            });
        }
        let dep_order = resolve_order(vertices, index, dep_at, path)?;
        max = Some(max.map_or(dep_order, |m| m.max(dep_order)));
    }

    Ok(max.map_or(0, |m| m + 1))
}

/// Render the active path plus the offending vertex as
/// `"A -> B -> C -> A"`.
fn cycle_path(path: &[VertexName], offender: &VertexName) -> String {
    let mut rendered = path
        .iter()
        .map(VertexName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ");
    rendered.push_str(" -> ");
    rendered.push_str(offender.as_str());
    rendered
}
