use crate::model::participant::Role;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    SeekersWin(SeekerVictory),
    EvaderWins(EvaderVictory),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeekerVictory {
    Captured { seeker: usize },
    EvaderImmobilized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaderVictory {
    MoveLimitReached { moves: u32 },
    SeekersImmobilized,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    pub const fn winner(self) -> Option<Role> {
        match self {
            Outcome::Ongoing => None,
            Outcome::SeekersWin(_) => Some(Role::Seeker),
            Outcome::EvaderWins(_) => Some(Role::Evader),
        }
    }

    /// Short machine-friendly label for tallies and logs.
    pub const fn label(self) -> &'static str {
        match self {
            Outcome::Ongoing => "ongoing",
            Outcome::SeekersWin(SeekerVictory::Captured { .. }) => "captured",
            Outcome::SeekersWin(SeekerVictory::EvaderImmobilized) => "evader_immobilized",
            Outcome::EvaderWins(EvaderVictory::MoveLimitReached { .. }) => "move_limit_reached",
            Outcome::EvaderWins(EvaderVictory::SeekersImmobilized) => "seekers_immobilized",
        }
    }
}

impl fmt::Display for SeekerVictory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeekerVictory::Captured { seeker } => write!(f, "captured by seeker {seeker}"),
            SeekerVictory::EvaderImmobilized => f.write_str("evader immobilized"),
        }
    }
}

impl fmt::Display for EvaderVictory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaderVictory::MoveLimitReached { moves } => {
                write!(f, "move limit reached ({moves})")
            }
            EvaderVictory::SeekersImmobilized => f.write_str("seekers immobilized"),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => f.write_str("ongoing"),
            Outcome::SeekersWin(reason) => write!(f, "seekers win: {reason}"),
            Outcome::EvaderWins(reason) => write!(f, "Mr. X wins: {reason}"),
        }
    }
}
