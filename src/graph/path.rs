//! Breadth-first and Dijkstra path searches.
//!
//! Both searches record predecessor vertices and rebuild the edge path by
//! walking those links back from the target, looking up the edge between
//! each consecutive pair with [`Graph::edge_between`].

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use super::model::{EdgeId, Graph, VertexId};
use crate::error::{PostmanError, Result};

/// Path searches over a borrowed graph.
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'g> {
    graph: &'g Graph,
}

impl<'g> PathFinder<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Finds the vertex closest to `from` by hop count that still has an
    /// incident edge outside `used`, and the edge path leading to it.
    ///
    /// `from` itself qualifies, in which case the path is empty.
    pub fn nearest_with_unused_edge(
        &self,
        from: VertexId,
        used: &HashSet<EdgeId>,
    ) -> Result<(VertexId, Vec<EdgeId>)> {
        let graph = self.graph;
        self.bfs(from, |v| {
            graph
                .vertex(v)
                .is_some_and(|vertex| vertex.edges().iter().any(|e| !used.contains(e)))
        })
    }

    /// Fewest-hop path from `from` to `to`, ignoring edge lengths.
    pub fn hop_path(&self, from: VertexId, to: VertexId) -> Result<Vec<EdgeId>> {
        self.graph.position(to)?;
        self.bfs(from, |v| v == to).map(|(_, path)| path)
    }

    /// Shortest path by total edge length (Dijkstra).
    ///
    /// Among vertices with equal tentative distance the one discovered
    /// first is settled first. Returns an empty path when `from == to`.
    pub fn shortest_path(&self, from: VertexId, to: VertexId) -> Result<Vec<EdgeId>> {
        let graph = self.graph;
        let source = graph.position(from)?;
        let target = graph.position(to)?;
        if source == target {
            return Ok(Vec::new());
        }

        let n = graph.vertex_count();
        let mut distance = vec![f64::INFINITY; n];
        let mut predecessor: Vec<Option<VertexId>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut heap = BinaryHeap::new();
        let mut discovered = 0usize;

        distance[source] = 0.0;
        heap.push(QueueEntry {
            distance: 0.0,
            order: discovered,
            position: source,
        });

        while let Some(QueueEntry { position, .. }) = heap.pop() {
            if settled[position] {
                continue;
            }
            settled[position] = true;
            if position == target {
                break;
            }

            let vertex = &graph.vertices()[position];
            for &e in vertex.edges() {
                let edge = graph.edge(e);
                let next = edge.other_endpoint(vertex.id())?;
                let next_pos = graph.position(next)?;
                let candidate = distance[position] + edge.length();
                if candidate < distance[next_pos] {
                    distance[next_pos] = candidate;
                    predecessor[next_pos] = Some(vertex.id());
                    discovered += 1;
                    heap.push(QueueEntry {
                        distance: candidate,
                        order: discovered,
                        position: next_pos,
                    });
                }
            }
        }

        if !settled[target] {
            return Err(PostmanError::Unreachable { from });
        }
        self.reconstruct(from, to, &predecessor)
    }

    /// Plain FIFO search; the first dequeued vertex matching `goal` wins.
    fn bfs<F>(&self, from: VertexId, goal: F) -> Result<(VertexId, Vec<EdgeId>)>
    where
        F: Fn(VertexId) -> bool,
    {
        let graph = self.graph;
        let source = graph.position(from)?;
        let n = graph.vertex_count();
        let mut seen = vec![false; n];
        let mut parent: Vec<Option<VertexId>> = vec![None; n];
        let mut queue = VecDeque::new();

        seen[source] = true;
        queue.push_back(source);

        while let Some(position) = queue.pop_front() {
            let vertex = &graph.vertices()[position];
            if goal(vertex.id()) {
                let path = self.reconstruct(from, vertex.id(), &parent)?;
                return Ok((vertex.id(), path));
            }
            for &e in vertex.edges() {
                let next = graph.other_endpoint(e, vertex.id())?;
                let next_pos = graph.position(next)?;
                if !seen[next_pos] {
                    seen[next_pos] = true;
                    parent[next_pos] = Some(vertex.id());
                    queue.push_back(next_pos);
                }
            }
        }

        Err(PostmanError::Unreachable { from })
    }

    /// Walks predecessor links from `to` back to `from` and reverses.
    fn reconstruct(
        &self,
        from: VertexId,
        to: VertexId,
        predecessor: &[Option<VertexId>],
    ) -> Result<Vec<EdgeId>> {
        let mut path = Vec::new();
        let mut current = to;
        while current != from {
            let pos = self.graph.position(current)?;
            let previous = predecessor[pos].ok_or(PostmanError::Unreachable { from })?;
            path.push(self.graph.edge_between(current, previous)?);
            current = previous;
        }
        path.reverse();
        Ok(path)
    }
}

/// Min-heap entry ordered by distance, then by discovery order.
#[derive(Debug)]
struct QueueEntry {
    distance: f64,
    order: usize,
    position: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Sum of edge lengths along `path`, in order.
pub fn path_length(graph: &Graph, path: &[EdgeId]) -> f64 {
    path.iter().map(|&e| graph.edge(e).length()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0 -1- 1 -1- 2
    /// |           |
    /// +----5------+  plus a pendant 3 hanging off 2
    fn sample() -> (Graph, Vec<VertexId>) {
        let mut g = Graph::new();
        let v: Vec<VertexId> = (0..4).map(|i| g.add_vertex(i).unwrap()).collect();
        g.add_edge(1.0, v[0], v[1]).unwrap();
        g.add_edge(1.0, v[1], v[2]).unwrap();
        g.add_edge(5.0, v[0], v[2]).unwrap();
        g.add_edge(2.0, v[2], v[3]).unwrap();
        (g, v)
    }

    #[test]
    fn test_shortest_path_prefers_light_edges() {
        let (g, v) = sample();
        let finder = PathFinder::new(&g);
        let path = finder.shortest_path(v[0], v[2]).unwrap();
        assert_eq!(path.len(), 2);
        assert!((path_length(&g, &path) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_hop_path_ignores_weights() {
        let (g, v) = sample();
        let finder = PathFinder::new(&g);
        let path = finder.hop_path(v[0], v[2]).unwrap();
        assert_eq!(path, vec![g.edge_between(v[0], v[2]).unwrap()]);
    }

    #[test]
    fn test_shortest_path_to_self_is_empty() {
        let (g, v) = sample();
        let finder = PathFinder::new(&g);
        for &x in &v {
            assert!(finder.shortest_path(x, x).unwrap().is_empty());
            assert!(finder.hop_path(x, x).unwrap().is_empty());
        }
    }

    #[test]
    fn test_shortest_path_symmetric_cost() {
        let (g, v) = sample();
        let finder = PathFinder::new(&g);
        let there = finder.shortest_path(v[0], v[3]).unwrap();
        let back = finder.shortest_path(v[3], v[0]).unwrap();
        assert!((path_length(&g, &there) - path_length(&g, &back)).abs() < 1e-9);
        assert!((path_length(&g, &there) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_with_unused_edge() {
        let (g, v) = sample();
        let finder = PathFinder::new(&g);

        // nothing used yet: the start vertex itself qualifies
        let (found, path) = finder.nearest_with_unused_edge(v[0], &HashSet::new()).unwrap();
        assert_eq!(found, v[0]);
        assert!(path.is_empty());

        // everything but the pendant edge used: must walk to vertex 2
        let pendant = g.edge_between(v[2], v[3]).unwrap();
        let used: HashSet<EdgeId> = g
            .edges()
            .iter()
            .map(|e| e.id())
            .filter(|&e| e != pendant)
            .collect();
        let (found, path) = finder.nearest_with_unused_edge(v[0], &used).unwrap();
        assert_eq!(found, v[2]);
        assert_eq!(path, vec![g.edge_between(v[0], v[2]).unwrap()]);
    }

    #[test]
    fn test_nearest_with_unused_edge_all_used() {
        let (g, v) = sample();
        let used: HashSet<EdgeId> = g.edges().iter().map(|e| e.id()).collect();
        let result = PathFinder::new(&g).nearest_with_unused_edge(v[1], &used);
        assert_eq!(result, Err(PostmanError::Unreachable { from: v[1] }));
    }

    #[test]
    fn test_unreachable_target() {
        let (mut g, v) = sample();
        let island = g.add_vertex(10).unwrap();
        let finder = PathFinder::new(&g);
        assert_eq!(
            finder.shortest_path(v[0], island),
            Err(PostmanError::Unreachable { from: v[0] })
        );
        assert_eq!(
            finder.hop_path(v[0], island),
            Err(PostmanError::Unreachable { from: v[0] })
        );
    }

    #[test]
    fn test_parallel_edge_is_ambiguous() {
        let (mut g, v) = sample();
        g.add_edge(0.5, v[2], v[3]).unwrap();
        let finder = PathFinder::new(&g);
        assert_eq!(
            finder.shortest_path(v[0], v[3]),
            Err(PostmanError::AmbiguousEdge(v[3], v[2]))
        );
    }

    #[test]
    fn test_ties_settle_in_discovery_order() {
        // two equal-length routes 0-1-3 and 0-2-3; vertex 1 is discovered first
        let mut g = Graph::new();
        let v: Vec<VertexId> = (0..4).map(|i| g.add_vertex(i).unwrap()).collect();
        let a = g.add_edge(1.0, v[0], v[1]).unwrap();
        g.add_edge(1.0, v[0], v[2]).unwrap();
        let c = g.add_edge(1.0, v[1], v[3]).unwrap();
        g.add_edge(1.0, v[2], v[3]).unwrap();
        let path = PathFinder::new(&g).shortest_path(v[0], v[3]).unwrap();
        assert_eq!(path, vec![a, c]);
    }
}
