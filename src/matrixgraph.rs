//!
//! Adjacency-matrix representation with a fixed capacity chosen at construction.
//!
//! The graph keeps a `max_vertices × max_vertices` grid indexed by vertex positions.
//! A cell either holds the edge between the two vertices at those positions or
//! the "no edge" sentinel `None`. Asking whether two vertices are adjacent therefore
//! takes $O(1)$ time, while removing a vertex costs $O(\text{max\_vertices}^2)$ because
//! the grid has to follow the renumbering of the surviving vertices. The grid is
//! allocated once and is never grown or shrunk.
//!
//! ```rust
//! use graphreps::graph::*;
//! use graphreps::error::GraphError;
//! use graphreps::matrixgraph::MatrixGraph;
//!
//! let mut graph = MatrixGraph::new(2);
//! let a = graph.insert_vertex("A").unwrap();
//! let b = graph.insert_vertex("B").unwrap();
//! assert_eq!(graph.insert_vertex("C"), Err(GraphError::CapacityExceeded(2)));
//!
//! let e = graph.insert_edge(&a, &b, "x").unwrap();
//! assert_eq!(graph.cell(0, 1), Ok(Some(&"x")));
//! assert_eq!(graph.cell(1, 0), Ok(Some(&"x")));
//!
//! graph.remove_edge(&e);
//! assert_eq!(graph.cell(0, 1), Ok(None));
//! assert!(graph.cell(2, 0).is_err());
//! ```
//!
//! Vertex handles are resolved to their current position before the grid is touched,
//! so a handle which is not live is reported as [GraphError::VertexNotFound] instead
//! of addressing a stale cell.

use std::fmt;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::error::{GraphError, GraphResult};
use crate::graph::*;

#[derive(Debug, Clone)]
struct MatrixVertex<V> {
    element: V,
    position: usize
}

#[derive(Debug, Clone)]
struct MatrixEdge<E> {
    element: E,
    origin: VertexHandle,
    dest: VertexHandle
}

impl<E> MatrixEdge<E> {
    fn touches(&self, u:&VertexHandle) -> bool {
        self.origin == *u || self.dest == *u
    }

    fn joins(&self, u:&VertexHandle, v:&VertexHandle) -> bool {
        (self.origin == *u && self.dest == *v) || (self.origin == *v && self.dest == *u)
    }
}

/// An undirected graph of bounded size stored as an adjacency matrix.
/// Implements [MutableGraph] and [PositionedGraph].
#[derive(Debug, Clone)]
pub struct MatrixGraph<V, E> {
    max_vertices: usize,
    grid: Vec<Option<EdgeHandle>>,
    vertices: VertexMap<MatrixVertex<V>>,
    order: Vec<VertexHandle>,
    edges: EdgeMap<MatrixEdge<E>>,
    edge_order: Vec<EdgeHandle>,
    handles: HandleCounter
}

impl<V, E> MatrixGraph<V, E> {
    /// Creates an empty graph which can hold at most `max_vertices` vertices.
    ///
    /// # Panics
    /// Panics if the `max_vertices × max_vertices` grid does not fit into `usize`.
    pub fn new(max_vertices:usize) -> Self {
        let cells = max_vertices.checked_mul(max_vertices)
                .unwrap_or_else(|| panic!("Capacity {max_vertices} is too large for an adjacency matrix"));
        MatrixGraph {
            max_vertices,
            grid: vec![None; cells],
            vertices: VertexMap::with_capacity_and_hasher(max_vertices, Default::default()),
            order: Vec::with_capacity(max_vertices),
            edges: EdgeMap::default(),
            edge_order: Vec::new(),
            handles: HandleCounter::default()
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_vertices
    }

    fn check_bounds(&self, position:usize) -> GraphResult<()> {
        if position < self.max_vertices {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfBounds { position, capacity: self.max_vertices })
        }
    }

    fn slot(&self, i:usize, j:usize) -> usize {
        i * self.max_vertices + j
    }

    /// Returns the edge stored in grid cell `(i, j)`.
    pub fn cell_edge(&self, i:usize, j:usize) -> GraphResult<Option<EdgeHandle>> {
        self.check_bounds(i)?;
        self.check_bounds(j)?;
        Ok(self.grid[self.slot(i, j)])
    }

    /// Returns the payload of the edge stored in grid cell `(i, j)`, or `None`
    /// if the cell holds no edge.
    pub fn cell(&self, i:usize, j:usize) -> GraphResult<Option<&E>> {
        Ok(self.cell_edge(i, j)?.and_then(|e| self.edge(&e)))
    }

    fn write_cells(&mut self, i:usize, j:usize, value:Option<EdgeHandle>) {
        let (ij, ji) = (self.slot(i, j), self.slot(j, i));
        self.grid[ij] = value;
        self.grid[ji] = value;
    }

    /// Moves the grid content after vertex `index` of the `n` previously live
    /// vertices one row up and one column left. Row and column `n-1` end up empty.
    fn compact(&mut self, index:usize, n:usize) {
        let cap = self.max_vertices;
        for i in 0..n {
            let row = &mut self.grid[i * cap..i * cap + n];
            row.copy_within(index + 1.., index);
            row[n - 1] = None;
        }
        self.grid.copy_within((index + 1) * cap..n * cap, index * cap);
        self.grid[(n - 1) * cap..n * cap].fill(None);
    }

    fn renumber(&mut self, from:usize) {
        for (pos, u) in self.order.iter().enumerate().skip(from) {
            if let Some(node) = self.vertices.get_mut(u) {
                node.position = pos;
            }
        }
    }
}

impl<V, E> Graph<V, E> for MatrixGraph<V, E> {
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

    /// Looks the edge up in the grid. Between parallel edges only the most
    /// recently inserted surviving one is visible here.
    fn get_edge(&self, u:&VertexHandle, v:&VertexHandle) -> Option<EdgeHandle> {
        let i = self.position(u)?;
        let j = self.position(v)?;
        self.grid[self.slot(i, j)]
    }
}

impl<V, E> PositionedGraph<V, E> for MatrixGraph<V, E> {
    fn position(&self, u:&VertexHandle) -> Option<usize> {
        self.vertices.get(u).map(|node| node.position)
    }

    fn vertex_at(&self, position:usize) -> Option<VertexHandle> {
        self.order.get(position).copied()
    }
}

impl<V, E> MutableGraph<V, E> for MatrixGraph<V, E> {
    /// Inserts a vertex at the next free position.
    ///
    /// Fails with [GraphError::CapacityExceeded] once the graph holds `max_vertices` vertices.
    fn insert_vertex(&mut self, element:V) -> GraphResult<VertexHandle> {
        if self.order.len() >= self.max_vertices {
            debug!(capacity = self.max_vertices, "refusing vertex, matrix is full");
            return Err(GraphError::CapacityExceeded(self.max_vertices));
        }

        let u = self.handles.vertex();
        let position = self.order.len();
        self.vertices.insert(u, MatrixVertex { element, position });
        self.order.push(u);
        trace!(vertex = %u, position, "inserted vertex");

        Ok(u)
    }

    /// Inserts an edge between `u` and `v` and records it in both grid cells.
    ///
    /// Fails with [GraphError::VertexNotFound] if an endpoint has no position and with
    /// [GraphError::IndexOutOfBounds] if a position lies outside the grid.
    fn insert_edge(&mut self, u:&VertexHandle, v:&VertexHandle, element:E) -> GraphResult<EdgeHandle> {
        let i = self.position(u).ok_or(GraphError::VertexNotFound(*u))?;
        let j = self.position(v).ok_or(GraphError::VertexNotFound(*v))?;
        self.check_bounds(i)?;
        self.check_bounds(j)?;

        let e = self.handles.edge();
        self.edges.insert(e, MatrixEdge { element, origin: *u, dest: *v });
        self.edge_order.push(e);
        self.write_cells(i, j, Some(e));
        trace!(edge = %e, origin = %u, dest = %v, i, j, "inserted edge");

        Ok(e)
    }

    fn remove_edge(&mut self, e:&EdgeHandle) -> Option<E> {
        let Some(edge) = self.edges.remove(e) else {
            debug!(edge = %e, "edge not present, nothing to remove");
            return None;
        };

        if let Some(k) = self.edge_order.iter().position(|f| f == e) {
            self.edge_order.remove(k);
        }

        let positions = (self.position(&edge.origin), self.position(&edge.dest));
        if let (Some(i), Some(j)) = positions {
            if i < self.max_vertices && j < self.max_vertices && self.grid[self.slot(i, j)] == Some(*e) {
                // The most recent surviving parallel edge takes over the cells.
                let successor = self.edge_order.iter().rev().copied()
                        .find(|f| self.edges.get(f).map_or(false, |other| other.joins(&edge.origin, &edge.dest)));
                self.write_cells(i, j, successor);
            }
        }
        trace!(edge = %e, "removed edge");

        Some(edge.element)
    }

    fn remove_vertex(&mut self, u:&VertexHandle) -> Option<V> {
        let Some(index) = self.position(u) else {
            debug!(vertex = %u, "vertex not present, nothing to remove");
            return None;
        };

        let incident:Vec<EdgeHandle> = self.edge_order.iter().copied()
                .filter(|e| self.edges.get(e).map_or(false, |edge| edge.touches(u)))
                .collect();
        for e in &incident {
            self.remove_edge(e);
        }

        let n = self.order.len();
        if index < self.max_vertices {
            for k in 0..self.max_vertices {
                let (row, col) = (self.slot(index, k), self.slot(k, index));
                self.grid[row] = None;
                self.grid[col] = None;
            }
        }

        let node = self.vertices.remove(u)?;
        self.order.remove(index);
        self.compact(index, n);
        self.renumber(index);
        trace!(vertex = %u, position = index, cascaded = incident.len(), "removed vertex");

        Some(node.element)
    }
}

impl<V, E> fmt::Display for MatrixGraph<V, E> where V: fmt::Display, E: fmt::Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.order.len();
        writeln!(f, "Adjacency Matrix:")?;
        for i in 0..n {
            let row = (0..n).map(|j| match self.grid[self.slot(i, j)].and_then(|e| self.edge(&e)) {
                Some(x) => x.to_string(),
                None => "0".to_string()
            }).join(", ");
            writeln!(f, "[{}]", row)?;
        }

        writeln!(f, "Vertices:")?;
        for (pos, u) in self.order.iter().enumerate() {
            if let Some(node) = self.vertices.get(u) {
                writeln!(f, "Vertex({},pos={})", node.element, pos)?;
            }
        }

        writeln!(f, "Edges:")?;
        for e in &self.edge_order {
            if let Some(edge) = self.edges.get(e) {
                let label = |w:&VertexHandle| self.vertices.get(w).map(|x| x.element.to_string()).unwrap_or_default();
                writeln!(f, "Edge({},{}-{})", edge.element, label(&edge.origin), label(&edge.dest))?;
            }
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

    /// Every non-empty cell must hold a live edge whose endpoints sit at the
    /// cell's coordinates, and cells outside the live corner must be empty.
    fn assert_grid<V, E>(G:&MatrixGraph<V, E>) {
        let n = G.num_vertices();
        for i in 0..G.capacity() {
            for j in 0..G.capacity() {
                let cell = G.cell_edge(i, j).unwrap();
                assert_eq!(cell, G.cell_edge(j, i).unwrap());
                let Some(e) = cell else { continue };
                assert!(i < n && j < n, "stale cell ({i},{j}) beyond {n} vertices");

                let (u, v) = G.endpoints(&e).unwrap();
                let (pu, pv) = (G.position(&u).unwrap(), G.position(&v).unwrap());
                assert!((pu, pv) == (i, j) || (pu, pv) == (j, i));
            }
        }
    }

    #[test]
    fn basic_operations() {
        let mut G = MatrixGraph::new(10);
        let a = G.insert_vertex("A").unwrap();
        let b = G.insert_vertex("B").unwrap();
        let c = G.insert_vertex("C").unwrap();

        let e1 = G.insert_edge(&a, &b, "e1").unwrap();
        let e2 = G.insert_edge(&b, &c, "e2").unwrap();
        assert_eq!(G.num_vertices(), 3);
        assert_eq!(G.num_edges(), 2);
        assert_eq!(G.get_edge(&b, &a), Some(e1));
        assert_grid(&G);

        G.remove_edge(&e1);
        assert_eq!(G.edges().collect::<Vec<_>>(), vec![e2]);
        assert_eq!(G.cell(0, 1), Ok(None));
        assert_eq!(G.cell(2, 1), Ok(Some(&"e2")));

        assert_eq!(G.remove_vertex(&b), Some("B"));
        assert_eq!(G.num_edges(), 0);
        assert_eq!(G.vertices().collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(G.position(&a), Some(0));
        assert_eq!(G.position(&c), Some(1));
        assert_positions(&G);
        assert_grid(&G);
    }

    #[test]
    fn symmetric_cells() {
        let mut G = MatrixGraph::new(4);
        let a = G.insert_vertex("A").unwrap();
        let b = G.insert_vertex("B").unwrap();
        let e = G.insert_edge(&a, &b, "x").unwrap();

        assert_eq!(G.cell(0, 1), Ok(Some(&"x")));
        assert_eq!(G.cell(1, 0), Ok(Some(&"x")));
        assert_eq!(G.cell(0, 0), Ok(None));

        G.remove_edge(&e);
        assert_eq!(G.cell(0, 1), Ok(None));
        assert_eq!(G.cell(1, 0), Ok(None));
    }

    #[test]
    fn capacity_bound() {
        let mut G = MatrixGraph::<u32, ()>::new(3);
        G.insert_vertices(0..3).unwrap();
        assert_eq!(G.insert_vertex(3), Err(GraphError::CapacityExceeded(3)));
        assert_eq!(G.num_vertices(), 3);

        let first = G.vertex_at(0).unwrap();
        G.remove_vertex(&first);
        assert!(G.insert_vertex(4).is_ok());
        assert_eq!(G.capacity(), 3);
        assert_positions(&G);

        let mut H = MatrixGraph::<u32, ()>::new(0);
        assert_eq!(H.insert_vertex(0), Err(GraphError::CapacityExceeded(0)));
    }

    #[test]
    fn out_of_bounds() {
        let mut G = MatrixGraph::<u32, u32>::new(2);
        let a = G.insert_vertex(0).unwrap();
        let b = G.insert_vertex(1).unwrap();

        assert_eq!(G.cell(2, 0), Err(GraphError::IndexOutOfBounds { position: 2, capacity: 2 }));
        assert_eq!(G.cell_edge(0, 5), Err(GraphError::IndexOutOfBounds { position: 5, capacity: 2 }));

        G.remove_vertex(&b);
        assert_eq!(G.insert_edge(&a, &b, 7), Err(GraphError::VertexNotFound(b)));
        assert_eq!(G.num_edges(), 0);
    }

    #[test]
    fn grid_follows_positions() {
        let mut G = MatrixGraph::new(10);
        let a = G.insert_vertex("A").unwrap();
        let b = G.insert_vertex("B").unwrap();
        let c = G.insert_vertex("C").unwrap();
        let d = G.insert_vertex("D").unwrap();
        G.insert_edge(&a, &b, "e1").unwrap();
        G.insert_edge(&b, &c, "e2").unwrap();
        let e3 = G.insert_edge(&a, &c, "e3").unwrap();
        let e4 = G.insert_edge(&c, &d, "e4").unwrap();

        G.remove_vertex(&b);
        assert_eq!(G.position(&c), Some(1));
        assert_eq!(G.position(&d), Some(2));
        assert_eq!(G.cell(0, 1), Ok(Some(&"e3")));
        assert_eq!(G.cell(1, 2), Ok(Some(&"e4")));
        assert_eq!(G.cell(0, 2), Ok(None));
        assert_eq!(G.get_edge(&a, &c), Some(e3));
        assert_eq!(G.get_edge(&d, &c), Some(e4));
        assert_grid(&G);
    }

    #[test]
    fn idempotent_removal() {
        let mut G = MatrixGraph::new(4);
        let a = G.insert_vertex(0).unwrap();
        let b = G.insert_vertex(1).unwrap();
        let e = G.insert_edge(&a, &b, 5).unwrap();

        assert_eq!(G.remove_edge(&e), Some(5));
        assert_eq!(G.remove_edge(&e), None);
        assert_eq!(G.remove_vertex(&a), Some(0));
        assert_eq!(G.remove_vertex(&a), None);
        assert_eq!(G.position(&b), Some(0));
        assert_grid(&G);
    }

    #[test]
    fn parallel_edges() {
        let mut G = MatrixGraph::new(4);
        let a = G.insert_vertex(0).unwrap();
        let b = G.insert_vertex(1).unwrap();
        let first = G.insert_edge(&a, &b, "first").unwrap();
        let second = G.insert_edge(&a, &b, "second").unwrap();
        assert_eq!(G.get_edge(&a, &b), Some(second));

        G.remove_edge(&first);
        assert_eq!(G.cell(0, 1), Ok(Some(&"second")));
        G.remove_edge(&second);
        assert_eq!(G.cell(0, 1), Ok(None));
    }

    #[test]
    fn parallel_edge_resurfaces() {
        let mut G = MatrixGraph::new(4);
        let a = G.insert_vertex(0).unwrap();
        let b = G.insert_vertex(1).unwrap();
        let first = G.insert_edge(&a, &b, "first").unwrap();
        let second = G.insert_edge(&b, &a, "second").unwrap();

        G.remove_edge(&second);
        assert_eq!(G.get_edge(&a, &b), Some(first));
        assert!(G.adjacent(&b, &a));
        assert_eq!(G.cell(0, 1), Ok(Some(&"first")));
        assert_eq!(G.cell(1, 0), Ok(Some(&"first")));
        assert_grid(&G);

        G.remove_edge(&first);
        assert_eq!(G.get_edge(&a, &b), None);
        assert_eq!(G.cell(1, 0), Ok(None));
    }

    #[test]
    #[should_panic(expected = "too large for an adjacency matrix")]
    fn oversized_capacity() {
        let _ = MatrixGraph::<u32, ()>::new(usize::MAX);
    }

    #[test]
    fn display() {
        let mut G = MatrixGraph::new(10);
        let a = G.insert_vertex("A").unwrap();
        let b = G.insert_vertex("B").unwrap();
        G.insert_edge(&a, &b, "e1").unwrap();

        let expected = "Adjacency Matrix:\n[0, e1]\n[e1, 0]\n\
                        Vertices:\nVertex(A,pos=0)\nVertex(B,pos=1)\n\
                        Edges:\nEdge(e1,A-B)\n";
        assert_eq!(G.to_string(), expected);
    }

    #[test]
    fn random_edits_keep_invariants() {
        for seed in 0..8 {
            let mut G = MatrixGraph::new(12);
            random_edits(&mut G, seed, 300, |G| {
                assert!(G.num_vertices() <= G.capacity());
                assert_consistent(G);
                assert_positions(G);
                assert_grid(G);
            });
        }
    }
}
