//! Prerequisite verification.
//!
//! - [`check`] - the fixed check list, outcomes and messages
//! - [`probe`] - commands, registry and filesystem queries
//! - [`game`] - locating the game folder, with a prompt fallback
//! - [`verifier`] - running the list and aggregating the results

pub mod check;
pub mod game;
pub mod probe;
pub mod verifier;

pub use check::{CheckOutcome, CheckSpec};
pub use game::locate_game;
pub use probe::{HostProbe, SystemProbe};
pub use verifier::{AggregateResult, CheckRunner, SystemCheckRunner, Verifier};
