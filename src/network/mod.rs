pub mod adapter;
pub mod error;
pub mod frame;
pub mod in_memory;
