//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and validation in [`loader`]
//!
//! # Example
//!
//! ```
//! use teardownm::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".teardownm");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "sledge:\n  instances: [sledge1]\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.sledge.instances, vec!["sledge1"]);
//! ```
//!
//! # Configuration File Location
//!
//! `<install root>/.teardownm/config.yml`, or the file given with
//! `--config`. Without either, the built-in defaults apply.

pub mod loader;
pub mod schema;

pub use loader::{
    default_config_path, load_config, load_config_file, parse_config, validate, CONFIG_DIR,
    CONFIG_FILE,
};
pub use schema::{CompanionConfig, GameConfig, SetupConfig, SledgeConfig};
