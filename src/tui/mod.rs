//! Terminal UI for the console

pub mod components;
pub mod console;
pub mod theme;
