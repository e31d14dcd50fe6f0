pub mod cli;
pub mod commands;
pub mod ideogram;
pub mod utils;
