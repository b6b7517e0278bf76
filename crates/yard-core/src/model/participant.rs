use super::mode::TravelMode;
use super::movement::Move;
use super::node::Node;
use super::ticket::{TicketBook, TicketError};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Evader,
    Seeker,
}

impl Role {
    /// Participant 0 is the evader, every other index is a seeker.
    pub const fn of_index(index: usize) -> Role {
        if index == 0 { Role::Evader } else { Role::Seeker }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Evader => "Mr. X",
            Role::Seeker => "seeker",
        };
        f.write_str(label)
    }
}

/// Position, tickets and move history of one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantState {
    role: Role,
    index: usize,
    position: Node,
    tickets: TicketBook,
    history: Vec<Move>,
    revealed: BTreeMap<u32, Node>,
}

impl ParticipantState {
    pub fn evader(position: Node, tickets: TicketBook) -> Self {
        Self::new(0, position, tickets)
    }

    pub fn seeker(index: usize, position: Node, tickets: TicketBook) -> Self {
        Self::new(index, position, tickets)
    }

    fn new(index: usize, position: Node, tickets: TicketBook) -> Self {
        Self {
            role: Role::of_index(index),
            index,
            position,
            tickets,
            history: Vec::new(),
            revealed: BTreeMap::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> Node {
        self.position
    }

    pub fn tickets(&self) -> &TicketBook {
        &self.tickets
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn move_count(&self) -> u32 {
        self.history.len() as u32
    }

    /// Node the participant occupied before its first move.
    pub fn start_position(&self) -> Node {
        self.history
            .first()
            .map(|mv| mv.from)
            .unwrap_or(self.position)
    }

    /// Ticket types spent so far; this is the public evidence about the evader.
    pub fn ticket_history(&self) -> impl Iterator<Item = TravelMode> + '_ {
        self.history.iter().map(|mv| mv.mode)
    }

    /// Revealed node per move number. Only populated for the evader.
    pub fn revealed(&self) -> &BTreeMap<u32, Node> {
        &self.revealed
    }

    pub fn revealed_at(&self, move_number: u32) -> Option<Node> {
        self.revealed.get(&move_number).copied()
    }

    pub(crate) fn perform(&mut self, mv: Move, reveal: bool) -> Result<(), TicketError> {
        debug_assert_eq!(mv.from, self.position);
        self.tickets.consume(mv.mode)?;
        self.history.push(mv);
        self.position = mv.to;
        if reveal {
            self.revealed.insert(self.move_count(), mv.to);
        }
        Ok(())
    }
}
