//! # Chordlink Core
//!
//! WASM-compatible share-link codec for chord sessions.
//! Packs a whole editing session (key, mode, rhythm pattern, timing,
//! instrument profile and the composed chord list) into one compact token
//! that fits in a URL query parameter, and reads it back, including tokens
//! written by the five earlier schema revisions.
//!
//! ## Features
//!
//! - **serde**: Enable JSON serialization of the session and lookup tables
//! - **wasm**: Enable WASM bindings via wasm-bindgen
//!
//! ## Example
//!
//! ```ignore
//! use chordlink_core::{decode_state, encode_state, LookupContext, SessionState};
//!
//! let ctx = LookupContext::builtin();
//! let token = encode_state(&SessionState::default(), &ctx);
//! let restored = decode_state(&token, &ctx).expect("valid token");
//! ```

pub mod codec;
pub mod link;
pub mod types;
pub mod wasm;

// Re-export commonly used types
pub use codec::{
    decode_state, encode_state, inspect_token, try_decode_state, try_encode_state,
    upgrade_token, CodecError, SchemaVersion,
};
pub use link::{decode_from_link, encode_to_link, state_param, with_state_param, LinkConfig};
pub use types::{
    ChordEntry, InstrumentProfile, LibraryChord, LookupContext, Pattern, Provenance,
    SessionState, StepToken, Subdivision, Timing,
};
