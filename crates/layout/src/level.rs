//! Topological leveling of workflow nodes.
//!
//! Each node gets a level equal to the length of its longest predecessor
//! chain; level 0 holds every node with no incoming dependency. Levels map
//! to rendering columns (horizontal flow) or rows (vertical flow).

use std::collections::HashMap;

use flowmap_model::{WorkflowEdge, WorkflowNode};
use petgraph::Graph;
use petgraph::algo::is_cyclic_directed;

/// Group node indices by topological level.
///
/// Runs the longest-chain relaxation to a fixpoint, bounded at `N + 2`
/// passes so malformed or cyclic edge sets still terminate. Cycle members
/// end up with whatever levels the final pass left them; that assignment is
/// reproducible for a fixed node and edge order but is an approximation,
/// not a topological guarantee. Edges naming an unknown node id are
/// ignored.
///
/// Returned groups are ordered by increasing level, each non-empty, with
/// nodes keeping their input order within a group.
pub fn compute_levels(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> Vec<Vec<usize>> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let resolved: Vec<(usize, usize)> = edges
        .iter()
        .filter_map(|e| {
            match (index.get(e.from.as_str()), index.get(e.to.as_str())) {
                (Some(&f), Some(&t)) => Some((f, t)),
                _ => {
                    tracing::debug!(from = %e.from, to = %e.to, "edge references unknown node, ignored for leveling");
                    None
                }
            }
        })
        .collect();

    let mut levels = vec![0usize; nodes.len()];
    let mut fixpoint = false;
    for _ in 0..nodes.len() + 2 {
        let mut changed = false;
        for &(from, to) in &resolved {
            if levels[from] + 1 > levels[to] {
                levels[to] = levels[from] + 1;
                changed = true;
            }
        }
        if !changed {
            fixpoint = true;
            break;
        }
    }

    if !fixpoint {
        // Budget exhausted without convergence; confirm the cause.
        let mut graph: Graph<(), ()> = Graph::new();
        let pg_nodes: Vec<_> = nodes.iter().map(|_| graph.add_node(())).collect();
        for &(from, to) in &resolved {
            graph.add_edge(pg_nodes[from], pg_nodes[to], ());
        }
        tracing::warn!(
            cyclic = is_cyclic_directed(&graph),
            nodes = nodes.len(),
            "leveling stopped at pass budget; level assignment is best-effort"
        );
    }

    let max_level = levels.iter().copied().max().unwrap_or(0);
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); max_level + 1];
    for (i, &lvl) in levels.iter().enumerate() {
        groups[lvl].push(i);
    }
    groups.retain(|g| !g.is_empty());
    groups
}
