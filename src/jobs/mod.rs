pub mod bus;
pub mod scheduler;
pub mod types;
