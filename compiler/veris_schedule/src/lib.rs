//! Dependency scheduling.
//!
//! Declarations handed to a solver must come strictly after everything they
//! mention, so emission runs over a topological order of the dependency
//! graph. The ordering is deterministic: nodes become ready in the order
//! they were listed, independent of hashing.
//!
//! # Algorithm
//!
//! Kahn's algorithm over an adjacency list. Self-edges and edges to nodes
//! outside the input are ignored rather than treated as cycles; anything
//! still unscheduled when the ready queue drains is reported as the cycle
//! remainder, in input order.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

/// The dependency graph contains a cycle; `remaining` holds every node that
/// could not be scheduled (the cycle members plus everything downstream of
/// them), in input order.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("cyclic dependencies among {remaining:?}")]
pub struct DependencyCycle<T: Debug> {
    pub remaining: Vec<T>,
}

/// Order `dependencies` so every node appears after all of its
/// dependencies.
///
/// Each entry is `(node, depends_on)`. Duplicate edges are counted once;
/// self-edges and edges naming nodes not present as keys are ignored.
pub fn topological_order<T>(
    dependencies: Vec<(T, Vec<T>)>,
) -> Result<Vec<T>, DependencyCycle<T>>
where
    T: Clone + Eq + Hash + Debug,
{
    let positions: FxHashMap<&T, usize> = dependencies
        .iter()
        .enumerate()
        .map(|(i, (node, _))| (node, i))
        .collect();

    // indegree[i] counts distinct in-graph dependencies of node i;
    // dependents[j] lists the nodes waiting on node j.
    let mut indegree = vec![0usize; dependencies.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); dependencies.len()];
    for (i, (node, deps)) in dependencies.iter().enumerate() {
        let mut seen = FxHashSet::default();
        for dep in deps {
            if dep == node || !seen.insert(dep) {
                continue;
            }
            if let Some(&j) = positions.get(dep) {
                indegree[i] += 1;
                dependents[j].push(i);
            }
        }
    }

    let mut ready: VecDeque<usize> = (0..dependencies.len())
        .filter(|&i| indegree[i] == 0)
        .collect();
    let mut order = Vec::with_capacity(dependencies.len());
    let mut scheduled = vec![false; dependencies.len()];

    while let Some(i) = ready.pop_front() {
        scheduled[i] = true;
        order.push(dependencies[i].0.clone());
        for &dependent in &dependents[i] {
            indegree[dependent] -= 1;
            if indegree[dependent] == 0 {
                ready.push_back(dependent);
            }
        }
    }

    if order.len() == dependencies.len() {
        Ok(order)
    } else {
        let remaining = dependencies
            .into_iter()
            .enumerate()
            .filter(|&(i, _)| !scheduled[i])
            .map(|(_, (node, _))| node)
            .collect();
        Err(DependencyCycle { remaining })
    }
}

#[cfg(test)]
mod tests;
