//! Reusable painting helpers shared by the screens.

pub mod panel;
