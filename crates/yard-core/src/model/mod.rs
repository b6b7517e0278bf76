pub mod mode;
pub mod movement;
pub mod node;
pub mod participant;
pub mod reveal;
pub mod ticket;
