pub mod cli;
pub mod command;
pub mod launcher;
pub mod render;
