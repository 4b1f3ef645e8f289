use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rustc_hash::FxHashMap;

use super::*;

#[test]
fn empty_graph_yields_empty_order() {
    let order = topological_order::<&str>(Vec::new()).unwrap();
    assert_eq!(order, Vec::<&str>::new());
}

#[test]
fn independent_nodes_keep_input_order() {
    let order =
        topological_order(vec![("a", vec![]), ("b", vec![]), ("c", vec![])]).unwrap();
    assert_eq!(order, vec!["a", "b", "c"]);
}

#[test]
fn dependencies_come_first() {
    let order = topological_order(vec![
        ("list", vec!["bool"]),
        ("bool", vec![]),
        ("pair", vec!["bool", "list"]),
    ])
    .unwrap();
    assert_eq!(order, vec!["bool", "list", "pair"]);
}

#[test]
fn self_edges_are_ignored() {
    let order = topological_order(vec![("tree", vec!["tree"])]).unwrap();
    assert_eq!(order, vec!["tree"]);
}

#[test]
fn duplicate_edges_are_counted_once() {
    let order = topological_order(vec![
        ("f", vec!["g", "g", "g"]),
        ("g", vec![]),
    ])
    .unwrap();
    assert_eq!(order, vec!["g", "f"]);
}

#[test]
fn edges_to_unknown_nodes_are_ignored() {
    let order = topological_order(vec![("f", vec!["builtin"]), ("g", vec!["f"])]).unwrap();
    assert_eq!(order, vec!["f", "g"]);
}

#[test]
fn two_cycle_is_reported() {
    let err = topological_order(vec![
        ("a", vec!["b"]),
        ("b", vec!["a"]),
        ("c", vec![]),
    ])
    .unwrap_err();
    assert_eq!(err.remaining, vec!["a", "b"]);
}

#[test]
fn downstream_of_a_cycle_is_also_unscheduled() {
    let err = topological_order(vec![
        ("a", vec!["b"]),
        ("b", vec!["a"]),
        ("c", vec!["a"]),
    ])
    .unwrap_err();
    assert_eq!(err.remaining, vec!["a", "b", "c"]);
}

#[test]
fn schedule_is_deterministic() {
    let input = vec![
        ("e", vec!["b", "d"]),
        ("d", vec!["a"]),
        ("c", vec!["a"]),
        ("b", vec!["a", "c"]),
        ("a", vec![]),
    ];
    let first = topological_order(input.clone()).unwrap();
    let second = topological_order(input).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, vec!["a", "d", "c", "b", "e"]);
}

/// Edges only from higher to lower indices, so the graph is a DAG by
/// construction.
fn arbitrary_dag() -> impl Strategy<Value = Vec<(usize, Vec<usize>)>> {
    (1usize..24).prop_flat_map(|n| {
        (0..n)
            .map(|i| {
                let deps = if i == 0 {
                    Just(Vec::new()).boxed()
                } else {
                    proptest::collection::vec(0..i, 0..=i.min(4)).boxed()
                };
                (Just(i), deps)
            })
            .collect::<Vec<_>>()
    })
}

proptest! {
    #[test]
    fn every_dag_schedules_with_dependencies_first(graph in arbitrary_dag()) {
        let order = topological_order(graph.clone()).unwrap();
        prop_assert_eq!(order.len(), graph.len());

        let position: FxHashMap<usize, usize> =
            order.iter().enumerate().map(|(pos, &node)| (node, pos)).collect();
        for (node, deps) in &graph {
            for dep in deps {
                if dep != node {
                    prop_assert!(position[dep] < position[node]);
                }
            }
        }
    }
}
