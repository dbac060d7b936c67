//!
//! Adjacency-map representation. Each vertex owns a hash map from its neighbours to the
//! connecting edge, so looking up or removing the edge between two vertices takes $O(1)$
//! expected time. The neighbour maps exist twice, as `outgoing` and `incoming`. For an
//! undirected graph both always hold the same content and are mutated together.
//!
//! This is the only representation which checks that the endpoints of a new edge
//! belong to the graph:
//!
//! ```rust
//! use graphreps::graph::*;
//! use graphreps::error::GraphError;
//! use graphreps::mapgraph::MapGraph;
//!
//! let mut graph = MapGraph::new();
//! let a = graph.insert_vertex("A").unwrap();
//! let b = graph.insert_vertex("B").unwrap();
//! let e = graph.insert_edge(&a, &b, 1).unwrap();
//! assert_eq!(graph.get_edge(&b, &a), Some(e));
//!
//! graph.remove_vertex(&b);
//! assert_eq!(graph.insert_edge(&a, &b, 2), Err(GraphError::VertexNotFound(b)));
//! assert_eq!(graph.to_string(), "A -> []\n");
//! ```
//!
//! A second edge between the same pair of vertices replaces the first one in the
//! neighbour maps. The first edge stays live, is still reachable through
//! [edges](crate::graph::Graph::edges) and becomes visible again in the neighbour
//! maps once the newer edge is removed.
//! [remove_vertex](crate::graph::MutableGraph::remove_vertex) deletes both.

use std::fmt;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::error::{GraphError, GraphResult};
use crate::graph::*;

#[derive(Debug, Clone)]
struct MapEdge<E> {
    element: E,
    origin: VertexHandle,
    destination: VertexHandle
}

impl<E> MapEdge<E> {
    fn touches(&self, u:&VertexHandle) -> bool {
        self.origin == *u || self.destination == *u
    }

    fn joins(&self, u:&VertexHandle, v:&VertexHandle) -> bool {
        (self.origin == *u && self.destination == *v) || (self.origin == *v && self.destination == *u)
    }
}

/// An undirected graph stored as nested hash maps. Implements [MutableGraph].
#[derive(Debug, Clone)]
pub struct MapGraph<V, E> {
    vertices: VertexMap<V>,
    outgoing: VertexMap<VertexMap<EdgeHandle>>,
    incoming: VertexMap<VertexMap<EdgeHandle>>,
    edges: EdgeMap<MapEdge<E>>,
    edge_order: Vec<EdgeHandle>,
    handles: HandleCounter
}

impl<V, E> Default for MapGraph<V, E> {
    fn default() -> Self {
        MapGraph::new()
    }
}

impl<V, E> MapGraph<V, E> {
    pub fn new() -> Self {
        MapGraph {
            vertices: VertexMap::default(),
            outgoing: VertexMap::default(),
            incoming: VertexMap::default(),
            edges: EdgeMap::default(),
            edge_order: Vec::new(),
            handles: HandleCounter::default()
        }
    }

    pub fn with_capacity(n_guess:usize) -> Self {
        MapGraph {
            vertices: VertexMap::with_capacity_and_hasher(n_guess, Default::default()),
            outgoing: VertexMap::with_capacity_and_hasher(n_guess, Default::default()),
            incoming: VertexMap::with_capacity_and_hasher(n_guess, Default::default()),
            edges: EdgeMap::default(),
            edge_order: Vec::new(),
            handles: HandleCounter::default()
        }
    }

    /// Returns the neighbour map of `u`, or `None` if `u` is not live.
    pub fn neighbour_map(&self, u:&VertexHandle) -> Option<&VertexMap<EdgeHandle>> {
        self.outgoing.get(u)
    }
}

impl<V, E> Graph<V, E> for MapGraph<V, E> {
    fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    fn num_edges(&self) -> usize {
        self.edge_order.len()
    }

    fn contains(&self, u:&VertexHandle) -> bool {
        self.outgoing.contains_key(u)
    }

    fn contains_edge(&self, e:&EdgeHandle) -> bool {
        self.edges.contains_key(e)
    }

    fn vertex(&self, u:&VertexHandle) -> Option<&V> {
        self.vertices.get(u)
    }

    fn edge(&self, e:&EdgeHandle) -> Option<&E> {
        self.edges.get(e).map(|edge| &edge.element)
    }

    fn endpoints(&self, e:&EdgeHandle) -> Option<(VertexHandle, VertexHandle)> {
        self.edges.get(e).map(|edge| (edge.origin, edge.destination))
    }

    /// Enumerates the vertices in insertion order.
    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item=VertexHandle> + 'a> {
        Box::new(self.vertices.keys().copied().sorted())
    }

    fn edges<'a>(&'a self) -> Box<dyn Iterator<Item=EdgeHandle> + 'a> {
        Box::new(self.edge_order.iter().copied())
    }

    fn neighbours<'a>(&'a self, u:&VertexHandle) -> Box<dyn Iterator<Item=VertexHandle> + 'a> {
        match self.outgoing.get(u) {
            Some(N) => Box::new(N.keys().copied()),
            None => Box::new(std::iter::empty())
        }
    }

    fn get_edge(&self, u:&VertexHandle, v:&VertexHandle) -> Option<EdgeHandle> {
        self.outgoing.get(u)?.get(v).copied()
    }
}

impl<V, E> MutableGraph<V, E> for MapGraph<V, E> {
    fn insert_vertex(&mut self, element:V) -> GraphResult<VertexHandle> {
        let u = self.handles.vertex();
        self.vertices.insert(u, element);
        self.outgoing.insert(u, VertexMap::default());
        self.incoming.insert(u, VertexMap::default());
        trace!(vertex = %u, "inserted vertex");

        Ok(u)
    }

    /// Inserts an edge between `u` and `v`.
    ///
    /// Fails with [GraphError::VertexNotFound] if either endpoint is not a live vertex.
    fn insert_edge(&mut self, u:&VertexHandle, v:&VertexHandle, element:E) -> GraphResult<EdgeHandle> {
        for w in [u, v] {
            if !self.contains(w) {
                debug!(vertex = %w, "refusing edge with unknown endpoint");
                return Err(GraphError::VertexNotFound(*w));
            }
        }

        let e = self.handles.edge();
        self.edges.insert(e, MapEdge { element, origin: *u, destination: *v });
        self.edge_order.push(e);
        for map in [&mut self.outgoing, &mut self.incoming] {
            for (a, b) in [(u, v), (v, u)] {
                if let Some(N) = map.get_mut(a) {
                    N.insert(*b, e);
                }
            }
        }
        trace!(edge = %e, origin = %u, destination = %v, "inserted edge");

        Ok(e)
    }

    fn remove_edge(&mut self, e:&EdgeHandle) -> Option<E> {
        let Some(edge) = self.edges.remove(e) else {
            debug!(edge = %e, "edge not present, nothing to remove");
            return None;
        };

        if let Some(i) = self.edge_order.iter().position(|f| f == e) {
            self.edge_order.remove(i);
        }

        // The most recent surviving parallel edge takes over the entries of `e`.
        let (u, v) = (edge.origin, edge.destination);
        let successor = self.edge_order.iter().rev().copied()
                .find(|f| self.edges.get(f).map_or(false, |other| other.joins(&u, &v)));
        for map in [&mut self.outgoing, &mut self.incoming] {
            for (a, b) in [(u, v), (v, u)] {
                if let Some(N) = map.get_mut(&a) {
                    // Leave the entry alone if a parallel edge has replaced it.
                    if N.get(&b) == Some(e) {
                        match successor {
                            Some(f) => N.insert(b, f),
                            None => N.remove(&b)
                        };
                    }
                }
            }
        }
        trace!(edge = %e, "removed edge");

        Some(edge.element)
    }

    fn remove_vertex(&mut self, u:&VertexHandle) -> Option<V> {
        let Some(N) = self.outgoing.get(u) else {
            debug!(vertex = %u, "vertex not present, nothing to remove");
            return None;
        };

        let mut incident:Vec<EdgeHandle> = N.values().copied().collect();
        let shadowed:Vec<EdgeHandle> = self.edge_order.iter().copied()
                .filter(|e| !incident.contains(e))
                .filter(|e| self.edges.get(e).map_or(false, |edge| edge.touches(u)))
                .collect();
        incident.extend(shadowed);

        for e in &incident {
            self.remove_edge(e);
        }

        self.outgoing.remove(u);
        self.incoming.remove(u);
        trace!(vertex = %u, cascaded = incident.len(), "removed vertex");

        self.vertices.remove(u)
    }
}

impl<V, E> fmt::Display for MapGraph<V, E> where V: fmt::Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for u in self.vertices() {
            let label = |w:&VertexHandle| self.vertices.get(w).map(|x| x.to_string()).unwrap_or_default();
            let N = self.outgoing.get(&u).into_iter()
                        .flat_map(|N| N.keys().sorted())
                        .map(|w| label(w))
                        .join(", ");
            writeln!(f, "{} -> [{}]", label(&u), N)?;
        }
        Ok(())
    }
}



//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####


#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::testing::*;

    fn assert_symmetric<V, E>(G:&MapGraph<V, E>) {
        assert_eq!(G.outgoing.len(), G.incoming.len());
        for u in G.vertices() {
            assert_eq!(G.outgoing[&u], G.incoming[&u]);
            for (v, e) in &G.outgoing[&u] {
                assert!(G.contains_edge(e));
                assert_eq!(G.get_edge(&u, v), G.get_edge(v, &u));
                assert_eq!(G.outgoing[v].get(&u), Some(e));
            }
        }
    }

    #[test]
    fn basic_operations() {
        let mut G = MapGraph::new();
        let a = G.insert_vertex("A").unwrap();
        let b = G.insert_vertex("B").unwrap();
        let c = G.insert_vertex("C").unwrap();

        let e1 = G.insert_edge(&a, &b, "e1").unwrap();
        let e2 = G.insert_edge(&b, &c, "e2").unwrap();
        assert_eq!(G.num_vertices(), 3);
        assert_eq!(G.num_edges(), 2);
        assert_eq!(G.get_edge(&a, &b), Some(e1));
        assert_eq!(G.get_edge(&b, &a), Some(e1));
        assert_eq!(G.get_edge(&a, &c), None);
        assert_symmetric(&G);

        assert_eq!(G.remove_edge(&e1), Some("e1"));
        assert_eq!(G.edges().collect::<Vec<_>>(), vec![e2]);
        assert_eq!(G.get_edge(&a, &b), None);
        assert!(G.neighbour_map(&a).unwrap().is_empty());
        assert_symmetric(&G);

        assert_eq!(G.remove_vertex(&b), Some("B"));
        assert_eq!(G.num_edges(), 0);
        assert!(!G.contains_edge(&e2));
        assert_eq!(G.vertices().collect::<Vec<_>>(), vec![a, c]);
        assert!(G.neighbour_map(&c).unwrap().is_empty());
        assert_eq!(G.neighbour_map(&b), None);
        assert_symmetric(&G);
    }

    #[test]
    fn identity_not_value() {
        let mut G = MapGraph::new();
        let a = G.insert_vertex("same").unwrap();
        let b = G.insert_vertex("same").unwrap();
        assert_ne!(a, b);

        let e = G.insert_edge(&a, &b, ()).unwrap();
        assert_eq!(G.get_edge(&a, &b), Some(e));
        assert_eq!(G.get_edge(&a, &a), None);
        assert_eq!(G.neighbours(&a).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn unknown_endpoint() {
        let mut G = MapGraph::new();
        let a = G.insert_vertex(0).unwrap();
        let b = G.insert_vertex(1).unwrap();
        G.remove_vertex(&b);

        assert_eq!(G.insert_edge(&a, &b, ()), Err(GraphError::VertexNotFound(b)));
        assert_eq!(G.insert_edge(&b, &a, ()), Err(GraphError::VertexNotFound(b)));
        assert_eq!(G.num_edges(), 0);
        assert!(G.neighbour_map(&a).unwrap().is_empty());
    }

    #[test]
    fn idempotent_removal() {
        let mut G = MapGraph::new();
        let a = G.insert_vertex(0).unwrap();
        let b = G.insert_vertex(1).unwrap();
        let e = G.insert_edge(&a, &b, ()).unwrap();

        assert!(G.remove_edge(&e).is_some());
        assert!(G.remove_edge(&e).is_none());
        assert!(G.remove_vertex(&a).is_some());
        assert!(G.remove_vertex(&a).is_none());
        assert_eq!(G.num_vertices(), 1);
        assert_symmetric(&G);
    }

    #[test]
    fn parallel_edges() {
        let mut G = MapGraph::new();
        let a = G.insert_vertex(0).unwrap();
        let b = G.insert_vertex(1).unwrap();
        let c = G.insert_vertex(2).unwrap();
        let first = G.insert_edge(&a, &b, "first").unwrap();
        let second = G.insert_edge(&b, &a, "second").unwrap();
        assert_eq!(G.num_edges(), 2);
        assert_eq!(G.get_edge(&a, &b), Some(second));

        // Removing the shadowed edge keeps the visible one in place.
        G.remove_edge(&first);
        assert_eq!(G.get_edge(&a, &b), Some(second));
        assert_symmetric(&G);

        let third = G.insert_edge(&a, &c, "third").unwrap();
        G.insert_edge(&c, &a, "fourth").unwrap();
        G.remove_vertex(&c);
        assert!(!G.contains_edge(&third));
        assert_eq!(G.edges().collect::<Vec<_>>(), vec![second]);
        assert_consistent(&G);
        assert_symmetric(&G);
    }

    #[test]
    fn parallel_edge_resurfaces() {
        let mut G = MapGraph::new();
        let a = G.insert_vertex(0).unwrap();
        let b = G.insert_vertex(1).unwrap();
        let first = G.insert_edge(&a, &b, "first").unwrap();
        let second = G.insert_edge(&a, &b, "second").unwrap();
        let third = G.insert_edge(&b, &a, "third").unwrap();

        G.remove_edge(&third);
        assert_eq!(G.get_edge(&a, &b), Some(second));
        assert_eq!(G.get_edge(&b, &a), Some(second));
        assert_symmetric(&G);

        G.remove_edge(&second);
        assert_eq!(G.get_edge(&a, &b), Some(first));
        assert!(G.adjacent(&b, &a));
        assert_eq!(G.neighbours(&a).collect::<Vec<_>>(), vec![b]);
        assert_eq!(G.degree(&a), 1);
        assert_symmetric(&G);

        G.remove_edge(&first);
        assert_eq!(G.get_edge(&a, &b), None);
        assert!(G.neighbour_map(&a).unwrap().is_empty());
        assert_symmetric(&G);
    }

    #[test]
    fn display() {
        let mut G = MapGraph::new();
        let a = G.insert_vertex("A").unwrap();
        let b = G.insert_vertex("B").unwrap();
        let c = G.insert_vertex("C").unwrap();
        let d = G.insert_vertex("D").unwrap();
        G.insert_edge(&a, &b, "e1").unwrap();
        G.insert_edge(&a, &c, "e2").unwrap();
        G.insert_edge(&b, &d, "e3").unwrap();

        assert_eq!(G.to_string(), "A -> [B, C]\nB -> [A, D]\nC -> [A]\nD -> [B]\n");
    }

    #[test]
    fn random_edits_keep_invariants() {
        for seed in 0..8 {
            let mut G = MapGraph::new();
            random_edits(&mut G, seed, 300, |G| {
                assert_consistent(G);
                assert_symmetric(G);
            });
        }
    }
}
