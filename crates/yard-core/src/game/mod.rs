pub mod config;
pub mod outcome;
pub mod snapshot;
pub mod state;

pub use config::{GameConfig, SetupError, StartPosition};
pub use outcome::{EvaderVictory, Outcome, SeekerVictory};
pub use snapshot::{GameSnapshot, ParticipantSnapshot, Perspective};
pub use state::{GameState, MoveError};
