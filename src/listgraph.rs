//!
//! Adjacency-list representation. Every vertex keeps the list of its incident edges
//! together with a degree counter, and the graph keeps a global sequence of edges.
//! Inserting a vertex or an edge takes amortized $O(1)$ time; removing an edge costs
//! $O(m)$ for the edge sequence plus $O(\deg)$ for the incidence lists of its endpoints.
//!
//! ```rust
//! use graphreps::graph::*;
//! use graphreps::listgraph::ListGraph;
//!
//! let mut graph = ListGraph::new();
//! let a = graph.insert_vertex("A").unwrap();
//! let b = graph.insert_vertex("B").unwrap();
//! let c = graph.insert_vertex("C").unwrap();
//! let e1 = graph.insert_edge(&a, &b, "e1").unwrap();
//! graph.insert_edge(&b, &c, "e2").unwrap();
//! assert_eq!(graph.degree(&b), 2);
//!
//! assert_eq!(graph.remove_edge(&e1), Some("e1"));
//! assert_eq!(graph.remove_edge(&e1), None);
//!
//! graph.remove_vertex(&b);
//! assert_eq!(graph.num_edges(), 0);
//! assert_eq!(graph.position(&c), Some(1));
//! ```
//!
//! The endpoints passed to [ListGraph::insert_edge](crate::graph::MutableGraph::insert_edge)
//! are not validated into an error: they must be live vertices of the same graph.
//! Unlike an unchecked append, which would leave an edge pointing at a vertex without
//! an incidence list, a foreign or stale endpoint makes the call panic before the
//! graph is modified.

use tracing::{debug, trace};

use crate::error::GraphResult;
use crate::graph::*;

#[derive(Debug, Clone)]
struct ListVertex<V> {
    element: V,
    position: usize,
    incident: Vec<EdgeHandle>,
    degree: usize
}

#[derive(Debug, Clone)]
struct ListEdge<E> {
    element: E,
    origin: VertexHandle,
    dest: VertexHandle
}

/// An undirected graph stored as adjacency lists. Implements [MutableGraph] and [PositionedGraph].
#[derive(Debug, Clone)]
pub struct ListGraph<V, E> {
    vertices: VertexMap<ListVertex<V>>,
    order: Vec<VertexHandle>,
    edges: EdgeMap<ListEdge<E>>,
    edge_order: Vec<EdgeHandle>,
    handles: HandleCounter
}

impl<V, E> Default for ListGraph<V, E> {
    fn default() -> Self {
        ListGraph::new()
    }
}

impl<V, E> ListGraph<V, E> {
    pub fn new() -> Self {
        ListGraph {
            vertices: VertexMap::default(),
            order: Vec::new(),
            edges: EdgeMap::default(),
            edge_order: Vec::new(),
            handles: HandleCounter::default()
        }
    }

    pub fn with_capacity(n_guess:usize) -> Self {
        ListGraph {
            vertices: VertexMap::with_capacity_and_hasher(n_guess, Default::default()),
            order: Vec::with_capacity(n_guess),
            edges: EdgeMap::default(),
            edge_order: Vec::new(),
            handles: HandleCounter::default()
        }
    }

    /// Refreshes the positions of all vertices from index `from` onwards.
    fn renumber(&mut self, from:usize) {
        for (pos, u) in self.order.iter().enumerate().skip(from) {
            if let Some(node) = self.vertices.get_mut(u) {
                node.position = pos;
            }
        }
    }
}

impl<V, E> Graph<V, E> for ListGraph<V, E> {
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
        self.edges.get(e).map(|edge| (edge.origin, edge.dest))
    }

    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item=VertexHandle> + 'a> {
        Box::new(self.order.iter().copied())
    }

    fn edges<'a>(&'a self) -> Box<dyn Iterator<Item=EdgeHandle> + 'a> {
        Box::new(self.edge_order.iter().copied())
    }

    fn incident_edges<'a>(&'a self, u:&VertexHandle) -> Box<dyn Iterator<Item=EdgeHandle> + 'a> {
        match self.vertices.get(u) {
            Some(node) => Box::new(node.incident.iter().copied()),
            None => Box::new(std::iter::empty())
        }
    }

    /// Returns the value of the degree counter of `u`. A loop counts twice.
    fn degree(&self, u:&VertexHandle) -> usize {
        self.vertices.get(u).map_or(0, |node| node.degree)
    }
}

impl<V, E> PositionedGraph<V, E> for ListGraph<V, E> {
    fn position(&self, u:&VertexHandle) -> Option<usize> {
        self.vertices.get(u).map(|node| node.position)
    }

    fn vertex_at(&self, position:usize) -> Option<VertexHandle> {
        self.order.get(position).copied()
    }
}

impl<V, E> MutableGraph<V, E> for ListGraph<V, E> {
    fn insert_vertex(&mut self, element:V) -> GraphResult<VertexHandle> {
        let u = self.handles.vertex();
        let position = self.order.len();
        self.vertices.insert(u, ListVertex { element, position, incident: Vec::new(), degree: 0 });
        self.order.push(u);
        trace!(vertex = %u, position, "inserted vertex");

        Ok(u)
    }

    /// Inserts an edge between `u` and `v`. Never fails.
    ///
    /// # Panics
    /// Panics if `u` or `v` is not a live vertex of this graph. The graph is
    /// left untouched in that case.
    fn insert_edge(&mut self, u:&VertexHandle, v:&VertexHandle, element:E) -> GraphResult<EdgeHandle> {
        if !self.contains(u) || !self.contains(v) {
            panic!("Endpoints {u},{v} not contained in ListGraph");
        }

        let e = self.handles.edge();
        self.edges.insert(e, ListEdge { element, origin: *u, dest: *v });
        self.edge_order.push(e);
        for w in [u, v] {
            if let Some(node) = self.vertices.get_mut(w) {
                node.incident.push(e);
                node.degree += 1;
            }
        }
        trace!(edge = %e, origin = %u, dest = %v, "inserted edge");

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

        // For a loop both iterations hit the same vertex and drop both entries.
        for w in [edge.origin, edge.dest] {
            if let Some(node) = self.vertices.get_mut(&w) {
                if let Some(i) = node.incident.iter().position(|f| f == e) {
                    node.incident.swap_remove(i);
                    node.degree = node.degree.saturating_sub(1);
                }
            }
        }
        trace!(edge = %e, "removed edge");

        Some(edge.element)
    }

    fn remove_vertex(&mut self, u:&VertexHandle) -> Option<V> {
        let incident = match self.vertices.get(u) {
            Some(node) => node.incident.clone(),
            None => {
                debug!(vertex = %u, "vertex not present, nothing to remove");
                return None;
            }
        };

        for e in &incident {
            self.remove_edge(e);
        }

        let node = self.vertices.remove(u)?;
        self.order.remove(node.position);
        self.renumber(node.position);
        trace!(vertex = %u, position = node.position, cascaded = incident.len(), "removed vertex");

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
