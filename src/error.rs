use thiserror::Error;

use crate::graph::VertexHandle;

/// Errors raised by the insertion operations of the graph representations.
///
/// Removals never fail: removing an entity that is not (or no longer) part of
/// a graph is absorbed silently and reported as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex {0} is not contained in the graph")]
    VertexNotFound(VertexHandle),
    #[error("maximum number of vertices ({0}) reached")]
    CapacityExceeded(usize),
    #[error("vertex position {position} out of matrix bounds (capacity {capacity})")]
    IndexOutOfBounds { position: usize, capacity: usize },
}

pub type GraphResult<T> = Result<T, GraphError>;
