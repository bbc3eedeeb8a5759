//! Terminal UI: rendering, input handling, and styles.

pub mod input;
pub mod render;
pub mod screens;
pub mod styles;
