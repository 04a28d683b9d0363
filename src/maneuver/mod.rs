pub mod coordinator;
pub mod formation;
pub mod messages;
