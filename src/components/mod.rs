//! UI components.

pub mod neural_network;
pub mod reveal;
