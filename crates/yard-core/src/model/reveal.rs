use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Evader move numbers (1-based) after which the evader's node is made public.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevealSchedule(BTreeSet<u32>);

impl RevealSchedule {
    pub fn new(moves: impl IntoIterator<Item = u32>) -> Self {
        Self(moves.into_iter().collect())
    }

    pub fn contains(&self, move_number: u32) -> bool {
        self.0.contains(&move_number)
    }
}
