//! Property-based tests for graph verification.
//!
//! These tests use proptest to verify ordering invariants hold across
//! randomly generated dependency graphs.

use proptest::prelude::*;

use strata::types::VertexName;
use strata::verify::{topological_sort, verify, GraphError};
use strata::vertex::Vertex;

fn name(i: usize) -> VertexName {
    VertexName::new(format!("v{}", i)).unwrap()
}

/// Strategy for generating acyclic batches.
///
/// Vertex `i` may only depend on vertices with smaller indices, so every
/// generated batch is a DAG by construction. The raw edge targets are
/// arbitrary and reduced modulo the index, which keeps shrinking simple.
fn acyclic_batch() -> impl Strategy<Value = Vec<Vertex<()>>> {
    prop::collection::vec(prop::collection::vec(any::<usize>(), 0..4), 1..16).prop_map(
        |raw_edges| {
            raw_edges
                .into_iter()
                .enumerate()
                .map(|(i, targets)| {
                    let mut vertex = Vertex::new(name(i), ());
                    if i > 0 {
                        for target in targets {
                            vertex.add_dependency(name(target % i));
                        }
                    }
                    vertex
                })
                .collect()
        },
    )
}

/// Strategy for generating batches containing a dependency ring, plus
/// some acyclic chaff hanging off it.
fn cyclic_batch() -> impl Strategy<Value = Vec<Vertex<()>>> {
    (1usize..8, 0usize..5).prop_map(|(ring_len, chaff)| {
        let mut batch = Vec::new();
        for i in 0..ring_len {
            let mut vertex = Vertex::new(name(i), ());
            vertex.add_dependency(name((i + 1) % ring_len));
            batch.push(vertex);
        }
        for i in 0..chaff {
            let mut vertex = Vertex::new(name(ring_len + i), ());
            vertex.add_dependency(name(i % ring_len));
            batch.push(vertex);
        }
        batch
    })
}

fn position(batch: &[Vertex<()>], name: &VertexName) -> usize {
    batch.iter().position(|v| v.name() == name).unwrap()
}

proptest! {
    #[test]
    fn acyclic_batches_always_verify(mut batch in acyclic_batch()) {
        prop_assert!(verify(&mut batch).is_ok());
    }

    #[test]
    fn orders_are_monotone_along_edges(mut batch in acyclic_batch()) {
        verify(&mut batch).unwrap();
        for at in 0..batch.len() {
            for dependency in batch[at].dependencies() {
                let dep_order = batch[position(&batch, dependency)].order();
                prop_assert!(
                    dep_order < batch[at].order(),
                    "order({}) = {} not below order({}) = {}",
                    dependency,
                    dep_order,
                    batch[at].name(),
                    batch[at].order()
                );
            }
        }
    }

    #[test]
    fn leaves_resolve_to_order_zero(mut batch in acyclic_batch()) {
        verify(&mut batch).unwrap();
        for vertex in &batch {
            if vertex.dependencies().is_empty() {
                prop_assert_eq!(vertex.order(), 0);
            }
        }
    }

    #[test]
    fn sorted_batches_put_dependencies_first(mut batch in acyclic_batch()) {
        topological_sort(&mut batch).unwrap();
        for at in 0..batch.len() {
            for dependency in batch[at].dependencies().to_vec() {
                prop_assert!(
                    position(&batch, &dependency) < at,
                    "dependency {} appears after its dependent {}",
                    dependency,
                    batch[at].name()
                );
            }
        }
    }

    #[test]
    fn repeated_verification_is_idempotent(mut batch in acyclic_batch()) {
        verify(&mut batch).unwrap();
        let first: Vec<usize> = batch.iter().map(Vertex::order).collect();
        verify(&mut batch).unwrap();
        let second: Vec<usize> = batch.iter().map(Vertex::order).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rings_are_always_reported_as_cycles(mut batch in cyclic_batch()) {
        let result = verify(&mut batch);
        prop_assert!(
            matches!(result, Err(GraphError::CyclicDependency { .. })),
            "expected CyclicDependency error, got {:?}",
            result
        );
    }

    #[test]
    fn ghost_edges_are_always_reported_as_dangling(
        mut batch in acyclic_batch(),
        target in any::<prop::sample::Index>(),
    ) {
        let at = target.index(batch.len());
        batch[at].add_dependency(VertexName::new("ghost").unwrap());
        let result = verify(&mut batch);
        prop_assert!(
            matches!(result, Err(GraphError::DanglingDependency { .. })),
            "expected DanglingDependency error, got {:?}",
            result
        );
    }
}
