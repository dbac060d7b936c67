use std::marker::PhantomData;

use crate::graph::{EdgeHandle, Graph, VertexHandle};

/*
    Incidence iterator. At each step, the iterator returns a pair
    (v, edges incident to v).
*/
pub struct NIterator<'a, V, E, G> where G: Graph<V, E> {
    G: &'a G,
    v_it: Box<dyn Iterator<Item=VertexHandle> + 'a>,
    _payloads: PhantomData<fn() -> (V, E)>
}

impl<'a, V, E, G> NIterator<'a, V, E, G> where G: Graph<V, E> {
    pub fn new(G: &'a G) -> NIterator<'a, V, E, G> {
        NIterator {
            G,
            v_it: G.vertices(),
            _payloads: PhantomData
        }
    }
}

impl<'a, V, E, G> Iterator for NIterator<'a, V, E, G> where G: Graph<V, E> {
    type Item = (VertexHandle, Box<dyn Iterator<Item=EdgeHandle> + 'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.v_it.next()?;
        let G: &'a G = self.G;

        Some((v, G.incident_edges(&v)))
    }
}

/*
    Edge iterator. Returns every live edge once, together with
    its two endpoints in storage order.
*/
pub struct EdgeIterator<'a, V, E, G> where G: Graph<V, E> {
    G: &'a G,
    e_it: Box<dyn Iterator<Item=EdgeHandle> + 'a>,
    _payloads: PhantomData<fn() -> (V, E)>
}

impl<'a, V, E, G> EdgeIterator<'a, V, E, G> where G: Graph<V, E> {
    pub fn new(G: &'a G) -> EdgeIterator<'a, V, E, G> {
        EdgeIterator {
            G,
            e_it: G.edges(),
            _payloads: PhantomData
        }
    }
}

impl<'a, V, E, G> Iterator for EdgeIterator<'a, V, E, G> where G: Graph<V, E> {
    type Item = (EdgeHandle, VertexHandle, VertexHandle);

    fn next(&mut self) -> Option<Self::Item> {
        let G: &'a G = self.G;
        self.e_it.find_map(|e| G.endpoints(&e).map(|(u, v)| (e, u, v)))
    }
}
