//!
//! Edge-list representation: the simplest of the four. The graph is a flat sequence of
//! vertices and a flat sequence of edges without any per-vertex index. Both vertices and
//! edges know their current position in their sequence.
//!
//! Insertions are plain appends. Any removal renumbers the surviving edges (and vertices),
//! which makes removal the dominant $O(n + m)$ cost of this representation, and finding
//! the edge between two vertices requires a scan of all edges.
//!
//! ```rust
//! use graphreps::graph::*;
//! use graphreps::edgelistgraph::EdgeListGraph;
//!
//! let mut graph = EdgeListGraph::new();
//! let a = graph.insert_vertex('a').unwrap();
//! let b = graph.insert_vertex('b').unwrap();
//! let e1 = graph.insert_edge(&a, &b, 1).unwrap();
//! let e2 = graph.insert_edge(&b, &b, 2).unwrap();
//! assert_eq!(graph.edge_position(&e2), Some(1));
//!
//! graph.remove_edge(&e1);
//! assert_eq!(graph.edge_position(&e2), Some(0));
//! assert_eq!(graph.edge_at(0), Some(e2));
//! ```
//!
//! Endpoints are not checked on insertion. An edge may reference a handle which is
//! not a vertex of this graph. Such an edge is still removed by
//! [remove_vertex](crate::graph::MutableGraph::remove_vertex) on that handle.

use tracing::{debug, trace};

use crate::error::GraphResult;
use crate::graph::*;

#[derive(Debug, Clone)]
struct EdgeListVertex<V> {
    element: V,
    position: usize
}

#[derive(Debug, Clone)]
struct EdgeListEdge<E> {
    element: E,
    origin: VertexHandle,
    destination: VertexHandle,
    position: usize
}

impl<E> EdgeListEdge<E> {
    fn touches(&self, u:&VertexHandle) -> bool {
        self.origin == *u || self.destination == *u
    }
}

/// An undirected graph stored as a plain list of edges. Implements [MutableGraph] and [PositionedGraph].
#[derive(Debug, Clone)]
pub struct EdgeListGraph<V, E> {
    vertices: VertexMap<EdgeListVertex<V>>,
    order: Vec<VertexHandle>,
    edges: EdgeMap<EdgeListEdge<E>>,
    edge_order: Vec<EdgeHandle>,
    handles: HandleCounter
}

impl<V, E> Default for EdgeListGraph<V, E> {
    fn default() -> Self {
        EdgeListGraph::new()
    }
}

impl<V, E> EdgeListGraph<V, E> {
    pub fn new() -> Self {
        EdgeListGraph {
            vertices: VertexMap::default(),
            order: Vec::new(),
            edges: EdgeMap::default(),
            edge_order: Vec::new(),
            handles: HandleCounter::default()
        }
    }

    pub fn with_capacity(n_guess:usize) -> Self {
        EdgeListGraph {
            vertices: VertexMap::with_capacity_and_hasher(n_guess, Default::default()),
            order: Vec::with_capacity(n_guess),
            edges: EdgeMap::default(),
            edge_order: Vec::new(),
            handles: HandleCounter::default()
        }
    }

    /// Returns the index of `e` in the edge sequence.
    pub fn edge_position(&self, e:&EdgeHandle) -> Option<usize> {
        self.edges.get(e).map(|edge| edge.position)
    }

    pub fn edge_at(&self, position:usize) -> Option<EdgeHandle> {
        self.edge_order.get(position).copied()
    }

    fn renumber_vertices(&mut self, from:usize) {
        for (pos, u) in self.order.iter().enumerate().skip(from) {
            if let Some(node) = self.vertices.get_mut(u) {
                node.position = pos;
            }
        }
    }

    fn renumber_edges(&mut self, from:usize) {
        for (pos, e) in self.edge_order.iter().enumerate().skip(from) {
            if let Some(edge) = self.edges.get_mut(e) {
                edge.position = pos;
            }
        }
    }
}

impl<V, E> Graph<V, E> for EdgeListGraph<V, E> {
    fn num_vertices(&self) -> usize {
        self.order.len()
    }

    fn num_edges(&self) -> usize {
        self.edge_order.len()
    }

    fn contains(&self, u:&VertexHandle) -> bool {
        self.vertices.contains_key(u)
    }

    fn contains_edge(&self, e:&EdgeHandle) -> bool {
        self.edges.contains_key(e)
    }

    fn vertex(&self, u:&VertexHandle) -> Option<&V> {
        self.vertices.get(u).map(|node| &node.element)
    }

    fn edge(&self, e:&EdgeHandle) -> Option<&E> {
        self.edges.get(e).map(|edge| &edge.element)
    }

    fn endpoints(&self, e:&EdgeHandle) -> Option<(VertexHandle, VertexHandle)> {
        self.edges.get(e).map(|edge| (edge.origin, edge.destination))
    }

    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item=VertexHandle> + 'a> {
        Box::new(self.order.iter().copied())
    }

    fn edges<'a>(&'a self) -> Box<dyn Iterator<Item=EdgeHandle> + 'a> {
        Box::new(self.edge_order.iter().copied())
    }
}

impl<V, E> PositionedGraph<V, E> for EdgeListGraph<V, E> {
    fn position(&self, u:&VertexHandle) -> Option<usize> {
        self.vertices.get(u).map(|node| node.position)
    }

    fn vertex_at(&self, position:usize) -> Option<VertexHandle> {
        self.order.get(position).copied()
    }
}

impl<V, E> MutableGraph<V, E> for EdgeListGraph<V, E> {
    fn insert_vertex(&mut self, element:V) -> GraphResult<VertexHandle> {
        let u = self.handles.vertex();
        let position = self.order.len();
        self.vertices.insert(u, EdgeListVertex { element, position });
        self.order.push(u);
        trace!(vertex = %u, position, "inserted vertex");

        Ok(u)
    }

    /// Appends an edge between `u` and `v`. Never fails and does not check the endpoints.
    fn insert_edge(&mut self, u:&VertexHandle, v:&VertexHandle, element:E) -> GraphResult<EdgeHandle> {
        let e = self.handles.edge();
        let position = self.edge_order.len();
        self.edges.insert(e, EdgeListEdge { element, origin: *u, destination: *v, position });
        self.edge_order.push(e);
        trace!(edge = %e, origin = %u, destination = %v, position, "inserted edge");

        Ok(e)
    }

    fn remove_edge(&mut self, e:&EdgeHandle) -> Option<E> {
        let Some(edge) = self.edges.remove(e) else {
            debug!(edge = %e, "edge not present, nothing to remove");
            return None;
        };

        self.edge_order.remove(edge.position);
        self.renumber_edges(edge.position);
        trace!(edge = %e, position = edge.position, "removed edge");

        Some(edge.element)
    }

    fn remove_vertex(&mut self, u:&VertexHandle) -> Option<V> {
        let edges = &mut self.edges;
        let before = self.edge_order.len();
        self.edge_order.retain(|e| {
            let incident = edges.get(e).map_or(false, |edge| edge.touches(u));
            if incident {
                edges.remove(e);
            }
            !incident
        });
        let cascaded = before - self.edge_order.len();
        if cascaded > 0 {
            self.renumber_edges(0);
        }

        let Some(node) = self.vertices.remove(u) else {
            debug!(vertex = %u, cascaded, "vertex not present, nothing to remove");
            return None;
        };
        self.order.remove(node.position);
        self.renumber_vertices(node.position);
        trace!(vertex = %u, position = node.position, cascaded, "removed vertex");

        Some(node.element)
    }
}



//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
