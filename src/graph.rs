//! Handle types and the traits shared by all graph representations.
//!
//! Every representation in this crate owns its vertices and edges outright. Callers
//! only ever hold a [VertexHandle] or [EdgeHandle], which are cheap `Copy` identifiers
//! handed out by the insertion methods of [MutableGraph]. Handles are compared by identity:
//! two vertices carrying equal payloads still have distinct handles. A handle becomes
//! stale once its entity has been removed and is never handed out again by the same graph.

use std::fmt;

use fxhash::{FxHashMap, FxHashSet};

use crate::error::GraphResult;
use crate::iterators::{EdgeIterator, NIterator};

/// Opaque identifier of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexHandle(u32);

/// Opaque identifier of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeHandle(u32);

impl VertexHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl EdgeHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for VertexHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for EdgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

pub type VertexMap<T> = FxHashMap<VertexHandle, T>;
pub type EdgeMap<T> = FxHashMap<EdgeHandle, T>;
pub type VertexSet = FxHashSet<VertexHandle>;
pub type EdgeSet = FxHashSet<EdgeHandle>;

/// Issues fresh handles for one graph. Counters only ever move forward.
#[derive(Debug, Clone, Default)]
pub(crate) struct HandleCounter {
    next_vertex: u32,
    next_edge: u32
}

/// Returns the current value of `counter` and advances it.
///
/// Panics once the counter is exhausted, since wrapping around would hand out
/// handles which are still in use.
fn advance(counter:&mut u32, kind:&str) -> u32 {
    let id = *counter;
    *counter = id.checked_add(1)
            .unwrap_or_else(|| panic!("Ran out of {kind} handles after {id} insertions"));
    id
}

impl HandleCounter {
    pub(crate) fn vertex(&mut self) -> VertexHandle {
        VertexHandle(advance(&mut self.next_vertex, "vertex"))
    }

    pub(crate) fn edge(&mut self) -> EdgeHandle {
        EdgeHandle(advance(&mut self.next_edge, "edge"))
    }
}

/// Read-only queries supported by every representation.
///
/// `V` is the vertex payload and `E` the edge payload. Edges are undirected: the
/// pair returned by [Graph::endpoints] is ordered only because it is stored that way.
pub trait Graph<V, E> {
    fn num_vertices(&self) -> usize;
    fn num_edges(&self) -> usize;

    fn len(&self) -> usize {
        self.num_vertices()
    }

    fn is_empty(&self) -> bool {
        self.num_vertices() == 0
    }

    fn contains(&self, u:&VertexHandle) -> bool;
    fn contains_edge(&self, e:&EdgeHandle) -> bool;

    /// Returns the payload of `u`, or `None` if `u` is not live.
    fn vertex(&self, u:&VertexHandle) -> Option<&V>;

    /// Returns the payload of `e`, or `None` if `e` is not live.
    fn edge(&self, e:&EdgeHandle) -> Option<&E>;

    fn endpoints(&self, e:&EdgeHandle) -> Option<(VertexHandle, VertexHandle)>;

    /// Enumerates all live vertices.
    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item=VertexHandle> + 'a>;

    /// Enumerates all live edges in the order of the edge sequence.
    fn edges<'a>(&'a self) -> Box<dyn Iterator<Item=EdgeHandle> + 'a>;

    /// Enumerates the edges incident to `u`. The default scans the whole edge sequence.
    fn incident_edges<'a>(&'a self, u:&VertexHandle) -> Box<dyn Iterator<Item=EdgeHandle> + 'a> {
        let u = *u;
        Box::new(self.edges().filter(move |e| match self.endpoints(e) {
            Some((a, b)) => a == u || b == u,
            None => false
        }))
    }

    fn degree(&self, u:&VertexHandle) -> usize {
        self.incident_edges(u).count()
    }

    /// Returns the endpoint of `e` which is not `u`. For a loop this is `u` itself.
    fn opposite(&self, u:&VertexHandle, e:&EdgeHandle) -> Option<VertexHandle> {
        let (a, b) = self.endpoints(e)?;
        if a == *u {
            Some(b)
        } else if b == *u {
            Some(a)
        } else {
            None
        }
    }

    fn neighbours<'a>(&'a self, u:&VertexHandle) -> Box<dyn Iterator<Item=VertexHandle> + 'a> {
        let u = *u;
        Box::new(self.incident_edges(&u).filter_map(move |e| self.opposite(&u, &e)))
    }

    /// Returns an edge connecting `u` and `v`, if there is one.
    fn get_edge(&self, u:&VertexHandle, v:&VertexHandle) -> Option<EdgeHandle> {
        self.incident_edges(u).find(|e| self.opposite(u, e) == Some(*v))
    }

    fn adjacent(&self, u:&VertexHandle, v:&VertexHandle) -> bool {
        self.get_edge(u, v).is_some()
    }

    /// Iterates over all vertices together with their incident edges.
    fn incidences(&self) -> NIterator<'_, V, E, Self> where Self: Sized {
        NIterator::new(self)
    }

    /// Iterates over all edges together with their endpoints.
    fn edge_endpoints(&self) -> EdgeIterator<'_, V, E, Self> where Self: Sized {
        EdgeIterator::new(self)
    }
}

/// Insertion and removal.
///
/// Every call either completes fully or fails before touching any state. Removing a
/// vertex first removes every edge incident to it.
pub trait MutableGraph<V, E>: Graph<V, E> {
    fn insert_vertex(&mut self, element:V) -> GraphResult<VertexHandle>;
    fn insert_edge(&mut self, u:&VertexHandle, v:&VertexHandle, element:E) -> GraphResult<EdgeHandle>;

    /// Removes `e` and returns its payload. Returns `None` if `e` is not live.
    fn remove_edge(&mut self, e:&EdgeHandle) -> Option<E>;

    /// Removes `u` along with all its incident edges and returns its payload.
    /// Returns `None` if `u` is not live.
    fn remove_vertex(&mut self, u:&VertexHandle) -> Option<V>;

    /// Inserts a vertex for every element of `elements`, stopping at the first failure.
    /// Vertices inserted before a failure remain in the graph.
    fn insert_vertices<I>(&mut self, elements:I) -> GraphResult<Vec<VertexHandle>>
        where I: IntoIterator<Item=V>, Self: Sized
    {
        elements.into_iter().map(|x| self.insert_vertex(x)).collect()
    }

    /// Removes all loops and returns how many were removed.
    fn remove_loops(&mut self) -> usize {
        let loops:Vec<_> = self.edges()
                .filter(|e| matches!(self.endpoints(e), Some((u, v)) if u == v))
                .collect();
        loops.iter().filter(|e| self.remove_edge(e).is_some()).count()
    }

    /// Removes all vertices of degree zero and returns how many were removed.
    fn remove_isolates(&mut self) -> usize {
        let isolates:Vec<_> = self.vertices().filter(|u| self.degree(u) == 0).collect();
        isolates.iter().filter(|u| self.remove_vertex(u).is_some()).count()
    }
}

/// A representation which keeps its vertices in a dense ordered sequence.
///
/// For every live vertex `u` we have `vertex_at(position(u)) == Some(u)`, and
/// positions always range over `0..num_vertices()`.
pub trait PositionedGraph<V, E>: Graph<V, E> {
    fn position(&self, u:&VertexHandle) -> Option<usize>;
    fn vertex_at(&self, position:usize) -> Option<VertexHandle>;
}
