pub mod audio;
pub mod burst;
pub mod reveal;
