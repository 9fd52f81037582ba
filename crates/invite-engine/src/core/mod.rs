pub mod guest;
pub mod rng;
pub mod time;
