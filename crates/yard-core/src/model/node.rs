use core::fmt;
use serde::{Deserialize, Serialize};

/// Station identifier on the transport map. Valid identifiers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(u16);

impl Node {
    pub const fn new(id: u16) -> Option<Self> {
        if id == 0 { None } else { Some(Node(id)) }
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    /// Zero-based index for dense per-node tables.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Node;

    #[test]
    fn zero_is_not_a_node() {
        assert_eq!(Node::new(0), None);
        assert_eq!(Node::new(7).map(Node::get), Some(7));
    }

    #[test]
    fn index_is_zero_based() {
        assert_eq!(Node::new(1).map(Node::index), Some(0));
        assert_eq!(Node::new(199).map(Node::index), Some(198));
    }
}
