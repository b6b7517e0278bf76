use core::fmt;
use serde::{Deserialize, Serialize};

/// Intrinsic transport mode painted on an edge of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum EdgeKind {
    Taxi = 0,
    Bus = 1,
    Underground = 2,
    /// Restricted mode: only a concealed ticket travels it.
    Ferry = 3,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 4] = [
        EdgeKind::Taxi,
        EdgeKind::Bus,
        EdgeKind::Underground,
        EdgeKind::Ferry,
    ];

    /// Ticket that matches this edge directly, if any.
    pub const fn ticket(self) -> Option<TravelMode> {
        match self {
            EdgeKind::Taxi => Some(TravelMode::Taxi),
            EdgeKind::Bus => Some(TravelMode::Bus),
            EdgeKind::Underground => Some(TravelMode::Underground),
            EdgeKind::Ferry => None,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "TAXI" => Some(EdgeKind::Taxi),
            "BUS" => Some(EdgeKind::Bus),
            "UNDERGROUND" => Some(EdgeKind::Underground),
            "FERRY" => Some(EdgeKind::Ferry),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Taxi => "TAXI",
            EdgeKind::Bus => "BUS",
            EdgeKind::Underground => "UNDERGROUND",
            EdgeKind::Ferry => "FERRY",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket type spent on a move.
///
/// `Black` is the concealed ticket: it travels any edge, including ferries,
/// and tells observers nothing about the edge that was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum TravelMode {
    Taxi = 0,
    Bus = 1,
    Underground = 2,
    Black = 3,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Taxi,
        TravelMode::Bus,
        TravelMode::Underground,
        TravelMode::Black,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether a ticket of this mode may be spent on an edge of `kind`.
    pub const fn travels(self, kind: EdgeKind) -> bool {
        matches!(
            (self, kind),
            (TravelMode::Black, _)
                | (TravelMode::Taxi, EdgeKind::Taxi)
                | (TravelMode::Bus, EdgeKind::Bus)
                | (TravelMode::Underground, EdgeKind::Underground)
        )
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "TAXI" => Some(TravelMode::Taxi),
            "BUS" => Some(TravelMode::Bus),
            "UNDERGROUND" => Some(TravelMode::Underground),
            "BLACK" => Some(TravelMode::Black),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TravelMode::Taxi => "TAXI",
            TravelMode::Bus => "BUS",
            TravelMode::Underground => "UNDERGROUND",
            TravelMode::Black => "BLACK",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
