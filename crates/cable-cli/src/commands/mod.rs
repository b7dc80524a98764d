pub mod completions;
pub mod config;
pub mod rate;
pub mod sizes;
pub mod tables;
