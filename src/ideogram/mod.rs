pub mod layout;
pub mod render;
pub mod segment;
pub mod tracks;
pub mod workflow;
