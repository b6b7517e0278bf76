//! Static transport map: numbered stations joined by undirected, typed edges.
//!
//! The map is parsed once from its text description (see
//! [`TransportGraph::parse`]) and then shared read-only by the game state and
//! every belief engine.

mod parse;

pub use parse::{FormatError, FormatErrorKind, LoadError};

use crate::model::mode::EdgeKind;
use crate::model::node::Node;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Undirected edge with endpoints stored smaller-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub a: Node,
    pub b: Node,
    pub kind: EdgeKind,
    /// Intermediate points for drawing the edge; never consulted by the rules.
    pub waypoints: Vec<Node>,
}

impl Edge {
    pub fn new(start: Node, end: Node, kind: EdgeKind, waypoints: Vec<Node>) -> Self {
        let (a, b) = if start <= end { (start, end) } else { (end, start) };
        Self {
            a,
            b,
            kind,
            waypoints,
        }
    }
}

/// Edge seen from one of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub to: Node,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone)]
pub struct TransportGraph {
    node_count: usize,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Link>>,
    stations: BTreeMap<Node, BTreeSet<EdgeKind>>,
}

impl TransportGraph {
    /// Parses a map description: a node-count header followed by one
    /// `MODE; start : waypoints : end` record per line.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        parse::parse_layout(text)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        Self::parse(&text).map_err(|source| LoadError::Format {
            source,
            path: path.to_path_buf(),
        })
    }

    pub(crate) fn with_capacity(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); node_count],
            stations: BTreeMap::new(),
        }
    }

    pub(crate) fn contains_edge(&self, a: Node, b: Node, kind: EdgeKind) -> bool {
        self.adjacency
            .get(a.index())
            .is_some_and(|links| links.iter().any(|l| l.to == b && l.kind == kind))
    }

    /// Caller guarantees endpoints are in range, distinct and not yet joined by `kind`.
    pub(crate) fn push_edge(&mut self, edge: Edge) {
        self.adjacency[edge.a.index()].push(Link {
            to: edge.b,
            kind: edge.kind,
        });
        self.adjacency[edge.b.index()].push(Link {
            to: edge.a,
            kind: edge.kind,
        });
        self.stations.entry(edge.a).or_default().insert(edge.kind);
        self.stations.entry(edge.b).or_default().insert(edge.kind);
        self.edges.push(edge);
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Edges in the order they were read.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges incident to `node`, oriented so `node` is the origin.
    pub fn edges_from(&self, node: Node) -> &[Link] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct nodes one edge away from `node`, regardless of mode.
    pub fn neighbors(&self, node: Node) -> BTreeSet<Node> {
        self.edges_from(node).iter().map(|link| link.to).collect()
    }

    /// Stations served by `kind`.
    pub fn nodes_with_mode(&self, kind: EdgeKind) -> BTreeSet<Node> {
        self.stations
            .iter()
            .filter(|(_, kinds)| kinds.contains(&kind))
            .map(|(node, _)| *node)
            .collect()
    }

    /// Every node with at least one edge, with the modes serving it.
    pub fn stations(&self) -> &BTreeMap<Node, BTreeSet<EdgeKind>> {
        &self.stations
    }

    pub fn is_station(&self, node: Node) -> bool {
        self.stations.contains_key(&node)
    }

    /// Edge modes present anywhere on the map.
    pub fn edge_kinds(&self) -> BTreeSet<EdgeKind> {
        self.edges.iter().map(|edge| edge.kind).collect()
    }
}
