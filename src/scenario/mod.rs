pub mod convoy;
