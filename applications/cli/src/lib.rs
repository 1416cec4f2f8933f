//! Songbox CLI library
//!
//! Exposes configuration, the headless transport and command execution so
//! the `songbox` binary stays thin and the commands can be tested directly.

pub mod commands;
pub mod config;
pub mod error;
pub mod transport;

pub use commands::{execute, open_player, resolve_song, CliPlayer, Command, Report};
pub use config::Settings;
pub use error::{CliError, Result};
pub use transport::HeadlessTransport;
