use super::{Edge, TransportGraph};
use crate::model::mode::EdgeKind;
use crate::model::node::Node;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed map description. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct FormatError {
    pub line: usize,
    pub kind: FormatErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatErrorKind {
    #[error("missing node count header")]
    MissingHeader,
    #[error("invalid node count `{0}`")]
    InvalidHeader(String),
    #[error("missing `;` between mode and edge description")]
    MissingDelimiter,
    #[error("unknown edge mode `{0}`")]
    UnknownMode(String),
    #[error("expected `start : waypoints : end`")]
    MalformedEdge,
    #[error("invalid node `{0}`")]
    InvalidNode(String),
    #[error("node {node} is outside 1..={max}")]
    NodeOutOfRange { node: Node, max: usize },
    #[error("endpoint {0} appears in its own waypoint path")]
    EndpointInPath(Node),
    #[error("self-loop on node {0}")]
    SelfLoop(Node),
    #[error("duplicate {kind} edge {a} - {b}")]
    DuplicateEdge { a: Node, b: Node, kind: EdgeKind },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read layout {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("invalid layout {path:?}: {source}")]
    Format {
        #[source]
        source: FormatError,
        path: PathBuf,
    },
}

pub(super) fn parse_layout(text: &str) -> Result<TransportGraph, FormatError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(FormatError {
        line: 1,
        kind: FormatErrorKind::MissingHeader,
    })?;
    let node_count = parse_header(header).map_err(|kind| FormatError {
        line: header_line,
        kind,
    })?;

    let mut graph = TransportGraph::with_capacity(node_count);
    for (line, record) in lines {
        let edge = parse_edge(record, node_count).map_err(|kind| FormatError { line, kind })?;
        if graph.contains_edge(edge.a, edge.b, edge.kind) {
            return Err(FormatError {
                line,
                kind: FormatErrorKind::DuplicateEdge {
                    a: edge.a,
                    b: edge.b,
                    kind: edge.kind,
                },
            });
        }
        graph.push_edge(edge);
    }
    Ok(graph)
}

fn parse_header(header: &str) -> Result<usize, FormatErrorKind> {
    match header.parse::<usize>() {
        Ok(count) if count > 0 && count < u16::MAX as usize => Ok(count),
        _ => Err(FormatErrorKind::InvalidHeader(header.to_string())),
    }
}

fn parse_edge(record: &str, node_count: usize) -> Result<Edge, FormatErrorKind> {
    let (mode, description) = record
        .split_once(';')
        .ok_or(FormatErrorKind::MissingDelimiter)?;
    let kind = EdgeKind::from_token(mode)
        .ok_or_else(|| FormatErrorKind::UnknownMode(mode.trim().to_string()))?;

    let parts: Vec<&str> = description.split(':').collect();
    let [start, path, end] = parts.as_slice() else {
        return Err(FormatErrorKind::MalformedEdge);
    };

    let start = parse_node(start, node_count)?;
    let end = parse_node(end, node_count)?;
    let waypoints = path
        .split_whitespace()
        .map(|token| parse_node(token, node_count))
        .collect::<Result<Vec<_>, _>>()?;

    if start == end {
        return Err(FormatErrorKind::SelfLoop(start));
    }
    if let Some(endpoint) = [start, end].into_iter().find(|n| waypoints.contains(n)) {
        return Err(FormatErrorKind::EndpointInPath(endpoint));
    }

    Ok(Edge::new(start, end, kind, waypoints))
}

fn parse_node(token: &str, node_count: usize) -> Result<Node, FormatErrorKind> {
    let token = token.trim();
    let node = token
        .parse::<u16>()
        .ok()
        .and_then(Node::new)
        .ok_or_else(|| FormatErrorKind::InvalidNode(token.to_string()))?;
    if node.get() as usize > node_count {
        return Err(FormatErrorKind::NodeOutOfRange {
            node,
            max: node_count,
        });
    }
    Ok(node)
}
