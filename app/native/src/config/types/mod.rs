//! Configuration types for Ribbon.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod bar;
pub mod color;
pub mod items;
pub mod root;

// Bar types
pub use bar::{BackgroundStyle, BarPlacement, BarStyle};
// Color types
pub use color::{ColorParseError, Rgba, parse_color, parse_hex_color};
// Item types
pub use items::{ItemConfig, mask_from_indices};
// Root config types
pub use root::{
    ConfigError, RibbonConfig, config_paths, load_config, load_config_from_path, parse_config,
};
