//! WASM bindings for chordlink-core
//!
//! Provides JavaScript-accessible functions for writing and reading share
//! links. Lookup tables and sessions cross the boundary as plain JS objects.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::codec::try_decode_state;
use crate::types::{LookupContext, SessionState};

/// Outcome of a decode, shaped for the page: `state` is set on success,
/// `error` carries the reason otherwise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeResultJS {
    pub success: bool,
    pub state: Option<SessionState>,
    pub error: Option<String>,
}

/// Decode into a [`DecodeResultJS`] without touching any JS types
pub fn decode_report(token: &str, ctx: &LookupContext) -> DecodeResultJS {
    match try_decode_state(token, ctx) {
        Ok(state) => DecodeResultJS {
            success: true,
            state: Some(state),
            error: None,
        },
        Err(e) => DecodeResultJS {
            success: false,
            state: None,
            error: Some(e.to_string()),
        },
    }
}

/// Initialize the wasm module. Call this once before using any other functions.
/// Sets up panic hooks and console logging.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn chordlink_init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
}

#[cfg(feature = "wasm")]
fn lookup_from_js(ctx: JsValue) -> LookupContext {
    serde_wasm_bindgen::from_value(ctx).unwrap_or_else(|e| {
        log::warn!("Unreadable lookup tables: {}", e);
        LookupContext::default()
    })
}

/// Encode a session object. Returns "" when the session or the tables are
/// unusable, so the page keeps its current link.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn encode_session(state: JsValue, ctx: JsValue) -> String {
    let state: SessionState = match serde_wasm_bindgen::from_value(state) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Unreadable session: {}", e);
            return String::new();
        }
    };
    crate::codec::encode_state(&state, &lookup_from_js(ctx))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn decode_session(token: &str, ctx: JsValue) -> JsValue {
    let report = decode_report(token, &lookup_from_js(ctx));
    serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
}

/// Re-encode any readable token in the current schema, or "" if unreadable
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn upgrade_session(token: &str, ctx: JsValue) -> String {
    crate::codec::upgrade_token(token, &lookup_from_js(ctx)).unwrap_or_default()
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn share_link(url: &str, token: &str, param: &str) -> String {
    crate::link::with_state_param(url, param, token)
}

/// The raw token under `param`, or `undefined`
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn read_link(url: &str, param: &str) -> Option<String> {
    crate::link::state_param(url, param)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_state;

    #[test]
    fn test_decode_report_success() {
        let ctx = LookupContext::builtin();
        let token = encode_state(&SessionState::new(2, 1), &ctx);
        let report = decode_report(&token, &ctx);
        assert!(report.success);
        assert_eq!(report.state, Some(SessionState::new(2, 1)));
        assert_eq!(report.error, None);
    }

    #[test]
    fn test_decode_report_carries_reason() {
        let report = decode_report("v1_0_0", &LookupContext::builtin());
        assert!(!report.success);
        assert!(report.state.is_none());
        assert!(report.error.unwrap().contains("v1"));

        let report = decode_report("v7_0_0_1_1o_0_", &LookupContext::default());
        assert!(report.error.unwrap().contains("keys"));
    }
}
