use super::mode::TravelMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Remaining tickets per travel mode for one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<TravelMode, u32>", into = "BTreeMap<TravelMode, u32>")]
pub struct TicketBook {
    counts: [u32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error("no {0} tickets left")]
    Exhausted(TravelMode),
}

impl TicketBook {
    pub const EMPTY: Self = Self { counts: [0; 4] };

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn with(mut self, mode: TravelMode, count: u32) -> Self {
        self.counts[mode.index()] = count;
        self
    }

    pub fn count(&self, mode: TravelMode) -> u32 {
        self.counts[mode.index()]
    }

    pub fn has(&self, mode: TravelMode) -> bool {
        self.count(mode) > 0
    }

    /// Spends one ticket of `mode`.
    pub fn consume(&mut self, mode: TravelMode) -> Result<(), TicketError> {
        let slot = &mut self.counts[mode.index()];
        if *slot == 0 {
            return Err(TicketError::Exhausted(mode));
        }
        *slot -= 1;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (TravelMode, u32)> + '_ {
        TravelMode::ALL
            .into_iter()
            .map(|mode| (mode, self.counts[mode.index()]))
    }
}

impl From<BTreeMap<TravelMode, u32>> for TicketBook {
    fn from(map: BTreeMap<TravelMode, u32>) -> Self {
        map.into_iter()
            .fold(TicketBook::EMPTY, |book, (mode, count)| book.with(mode, count))
    }
}

impl From<TicketBook> for BTreeMap<TravelMode, u32> {
    fn from(book: TicketBook) -> Self {
        book.iter().filter(|(_, count)| *count > 0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{TicketBook, TicketError};
    use crate::model::mode::TravelMode;

    #[test]
    fn consume_decrements_one_mode_only() {
        let mut book = TicketBook::new()
            .with(TravelMode::Taxi, 2)
            .with(TravelMode::Bus, 1);
        book.consume(TravelMode::Taxi).unwrap();
        assert_eq!(book.count(TravelMode::Taxi), 1);
        assert_eq!(book.count(TravelMode::Bus), 1);
    }

    #[test]
    fn consume_never_goes_negative() {
        let mut book = TicketBook::new().with(TravelMode::Black, 1);
        book.consume(TravelMode::Black).unwrap();
        assert_eq!(
            book.consume(TravelMode::Black),
            Err(TicketError::Exhausted(TravelMode::Black))
        );
        assert_eq!(book.count(TravelMode::Black), 0);
    }

    #[test]
    fn deserializes_from_mode_map() {
        let book: TicketBook =
            serde_json::from_str(r#"{"TAXI": 10, "BUS": 8, "UNDERGROUND": 4}"#).unwrap();
        assert_eq!(book.count(TravelMode::Taxi), 10);
        assert_eq!(book.count(TravelMode::Underground), 4);
        assert!(!book.has(TravelMode::Black));
    }

    #[test]
    fn serializes_only_held_modes() {
        let book = TicketBook::new().with(TravelMode::Black, 5);
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(json, r#"{"BLACK":5}"#);
    }
}
