//! Topological levelization and cycle detection.

use crate::error::{BuildError, BuildResult};
use crate::node::{Node, NodeId};

/// Group nodes into levels with Kahn's algorithm.
///
/// Level 0 holds every node without fan-in; each later level holds the
/// nodes whose last fan-in became available in the level before. Nodes
/// inside a level are sorted by ID so the result is deterministic.
///
/// Fails with [`BuildError::Cycle`] listing every node that sits on or
/// behind a feedback path.
pub(crate) fn topological_levels(nodes: &[Node]) -> BuildResult<Vec<Vec<NodeId>>> {
    let mut in_degree: Vec<usize> = nodes.iter().map(|n| n.inputs.len()).collect();

    let mut levels = Vec::new();
    let mut current: Vec<NodeId> = nodes
        .iter()
        .filter(|n| n.inputs.is_empty())
        .map(|n| n.id)
        .collect();
    let mut processed = 0;

    while !current.is_empty() {
        current.sort();
        processed += current.len();

        let mut next = Vec::new();
        for id in &current {
            // A producer wired twice into one consumer appears twice in
            // its fan-out, matching the consumer's two fan-in entries.
            for out in &nodes[id.index()].outputs {
                let degree = &mut in_degree[out.index()];
                *degree -= 1;
                if *degree == 0 {
                    next.push(*out);
                }
            }
        }

        levels.push(current);
        current = next;
    }

    if processed != nodes.len() {
        let involved = nodes
            .iter()
            .filter(|n| in_degree[n.id.index()] > 0)
            .map(|n| n.id)
            .collect();
        return Err(BuildError::Cycle { involved });
    }

    Ok(levels)
}
