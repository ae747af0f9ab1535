//! Cycle detection over the dependency graph.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::config::CircularDependency;
use crate::graph::dependency_graph::DependencyGraph;

/// Find groups of files participating in an import cycle.
///
/// Iterative depth-first traversal with an explicit path stack: reaching a
/// neighbor already on the active path closes a cycle, recorded as its
/// sorted member set so rotations of the same loop deduplicate. Nodes are
/// marked globally visited once explored, so each starts at most one
/// traversal.
///
/// Known limitation, kept on purpose: one cycle is reported per discovered
/// vertex set. When a strongly-connected component contains several
/// overlapping elementary cycles, they may merge or be under-reported
/// depending on traversal order.
pub fn find_circular_dependencies(graph: &DependencyGraph) -> Vec<CircularDependency> {
    let adjacency: HashMap<String, Vec<String>> = graph
        .source_paths()
        .into_iter()
        .map(|path| {
            let deps = graph.dependencies_of(&path);
            (path, deps)
        })
        .collect();

    let mut visited: HashSet<String> = HashSet::new();
    let mut cycles: BTreeSet<Vec<String>> = BTreeSet::new();

    let mut roots: Vec<&String> = adjacency.keys().collect();
    roots.sort();

    for root in roots {
        if !visited.contains(root.as_str()) {
            visit(root, &adjacency, &mut visited, &mut cycles);
        }
    }

    cycles
        .into_iter()
        .map(|files| CircularDependency { files })
        .collect()
}

/// Explicit frame stack instead of recursion, so deep import chains cannot
/// overflow the call stack.
fn visit(
    root: &str,
    adjacency: &HashMap<String, Vec<String>>,
    visited: &mut HashSet<String>,
    cycles: &mut BTreeSet<Vec<String>>,
) {
    let mut path: Vec<String> = vec![root.to_string()];
    let mut on_path: HashMap<String, usize> = HashMap::from([(root.to_string(), 0)]);
    let mut frames: Vec<(String, usize)> = vec![(root.to_string(), 0)];
    visited.insert(root.to_string());

    while let Some((node, next)) = frames.last().cloned() {
        let neighbors = adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[]);
        if next < neighbors.len() {
            if let Some(frame) = frames.last_mut() {
                frame.1 += 1;
            }
            let neighbor = &neighbors[next];
            if !visited.contains(neighbor) {
                visited.insert(neighbor.clone());
                on_path.insert(neighbor.clone(), path.len());
                path.push(neighbor.clone());
                frames.push((neighbor.clone(), 0));
            } else if let Some(&start) = on_path.get(neighbor) {
                let mut members: Vec<String> = path[start..].to_vec();
                members.sort();
                cycles.insert(members);
            }
        } else {
            frames.pop();
            if let Some(done) = path.pop() {
                on_path.remove(&done);
            }
        }
    }
}
