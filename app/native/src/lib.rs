//! Ribbon - a per-display status bar compositor.
//!
//! One [`bar::Bar`] is created per display. All bars share the style, the
//! ordered item registry and the item-to-bar associations held by a
//! [`manager::BarManager`], and talk to the window server only through the
//! traits in [`platform`].

pub mod association;
pub mod bar;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod items;
pub mod logging;
pub mod manager;
pub mod platform;
pub mod schema;

pub use bar::Bar;
pub use error::RibbonError;
pub use manager::BarManager;
