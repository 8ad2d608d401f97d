//! Grove - a keyboard-driven tree navigator
//!
//! This crate provides:
//! - Selection management over a node hierarchy (single, multi, toggle, range)
//! - Arrow-key navigation with a key repeat throttle
//! - An arena node tree and a directory loader to feed it
//! - An interactive terminal browser built on the navigator

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod geometry;
pub mod hierarchy;
pub mod input;
pub mod navigator;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, NavigatorConfig};
pub use error::{GroveError, NavError, Result};
pub use hierarchy::{Geometry, Hierarchy, NodeId, NodeTree};
pub use input::{FrameInput, InputState, Key, Modifiers};
pub use navigator::TreeNavigator;
