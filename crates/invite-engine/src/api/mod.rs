pub mod config;
pub mod invitation;
pub mod types;
