#![allow(non_snake_case)]

//! An undirected graph ADT with four interchangeable storage engines.
//!
//! All representations implement the same [graph::Graph] and [graph::MutableGraph]
//! traits, so code written against the traits runs on any of them:
//!
//! - [listgraph::ListGraph]: every vertex keeps its incident edges in a list.
//! - [mapgraph::MapGraph]: every vertex maps its neighbours to the connecting edge.
//! - [matrixgraph::MatrixGraph]: a fixed-capacity adjacency matrix indexed by vertex position.
//! - [edgelistgraph::EdgeListGraph]: a flat list of edges without any per-vertex index.
//!
//! ```rust
//! use graphreps::graph::*;
//! use graphreps::listgraph::ListGraph;
//! use graphreps::mapgraph::MapGraph;
//! use graphreps::matrixgraph::MatrixGraph;
//! use graphreps::edgelistgraph::EdgeListGraph;
//!
//! fn triangle<G: MutableGraph<&'static str, u32>>(graph: &mut G) {
//!     let vs = graph.insert_vertices(["A", "B", "C"]).unwrap();
//!     graph.insert_edge(&vs[0], &vs[1], 1).unwrap();
//!     graph.insert_edge(&vs[1], &vs[2], 2).unwrap();
//!     graph.insert_edge(&vs[2], &vs[0], 3).unwrap();
//!
//!     graph.remove_vertex(&vs[1]);
//!     assert_eq!(graph.num_vertices(), 2);
//!     assert_eq!(graph.num_edges(), 1);
//!     assert!(graph.adjacent(&vs[0], &vs[2]));
//! }
//!
//! triangle(&mut ListGraph::new());
//! triangle(&mut MapGraph::new());
//! triangle(&mut MatrixGraph::new(3));
//! triangle(&mut EdgeListGraph::new());
//! ```
//!
//! Graphs own all their vertices and edges; callers hold [graph::VertexHandle] and
//! [graph::EdgeHandle] values. Removing a vertex removes its incident edges as well,
//! and removing something twice is a silent no-op. None of the graphs are synchronized:
//! concurrent use requires an external lock around each graph.

pub mod error;
pub mod graph;
pub mod iterators;

pub mod listgraph;
pub mod mapgraph;
pub mod matrixgraph;
pub mod edgelistgraph;
