use super::mode::TravelMode;
use super::node::Node;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One step along an edge paid with one ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Node,
    pub to: Node,
    pub mode: TravelMode,
}

impl Move {
    pub const fn new(from: Node, to: Node, mode: TravelMode) -> Self {
        Self { from, to, mode }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} {}", self.from, self.to, self.mode)
    }
}
