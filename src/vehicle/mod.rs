pub mod command;
pub mod control;
pub mod core;
pub mod state;
