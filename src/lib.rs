//! teardownm - development environment bootstrap for teardownM.
//!
//! teardownm checks that the tools needed to build teardownM are installed
//! (cmake, OpenSSL, the .NET 6.0 SDK, Steam and Teardown), then clones two
//! copies of sledge, runs their build script and prepares the client folder.
//!
//! # Modules
//!
//! - [`bootstrap`] - Working directories, cloning and building
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`prerequisites`] - Prerequisite checks and aggregation
//! - [`shell`] - Shell command execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use teardownm::prerequisites::CheckSpec;
//!
//! let ids: Vec<_> = CheckSpec::default_list().iter().map(|c| c.id()).collect();
//! assert_eq!(ids, ["cmake", "openssl", "dotnet", "steam", "teardown"]);
//! ```
//!
//! For end-to-end runs with fake components, see the integration tests.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod prerequisites;
pub mod shell;
pub mod ui;

pub use error::{Result, SetupError};
