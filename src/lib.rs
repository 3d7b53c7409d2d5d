//! # Chordlink
//!
//! Command-line companion to `chordlink-core`: decode, inspect and upgrade
//! chord-session share links from a terminal.
//!
//! ## Modules
//!
//! - `config`: Lookup tables and the link parameter, loaded from JSON or
//!   taken from the built-in set.
//! - `commands`: The command registry and the token commands.
//! - `repl`: The interactive loop and the one-shot runner.

pub mod commands;
pub mod config;
pub mod repl;

pub use crate::config::Config;
pub use chordlink_core::{decode_state, encode_state, LookupContext, SessionState};
