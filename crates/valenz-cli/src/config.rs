//! Layered run configuration: built-in defaults, an optional TOML file,
//! command-line flags and `--set KEY=VALUE` overrides, in increasing priority.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::build_config;
pub use models::AppConfig;
