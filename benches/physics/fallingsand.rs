pub mod data;
pub mod simulator;
