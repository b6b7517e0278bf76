pub mod belief;
pub mod game;
pub mod graph;
pub mod model;
pub mod rules;
