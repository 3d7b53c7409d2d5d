//! Share links: putting a state token into a URL query parameter and
//! reading it back.
//!
//! Writing follows `application/x-www-form-urlencoded` rules, the same
//! escaping a browser's `URLSearchParams` applies, so links built here and
//! links built in the page are interchangeable. An empty token (the
//! encoder's "tables not loaded" sentinel) never replaces an existing link.

use crate::codec::{decode_state, encode_state};
use crate::types::{LookupContext, SessionState};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Query parameter used when none is configured
pub const DEFAULT_PARAM: &str = "s";

const FORM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Where a link keeps its state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkConfig {
    pub param: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            param: DEFAULT_PARAM.to_string(),
        }
    }
}

/// Raw token stored under `param`, if any. Accepts a full URL or a bare
/// query string.
pub fn state_param(url: &str, param: &str) -> Option<String> {
    let (_, query, _) = split_url(url);
    query?
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| form_decode(key) == param)
        .map(|(_, value)| form_decode(value))
}

/// Set `param` to `token`, replacing any previous value. An empty token
/// leaves the URL untouched.
pub fn with_state_param(url: &str, param: &str, token: &str) -> String {
    if token.is_empty() {
        return url.to_string();
    }

    let (base, query, fragment) = split_url(url);
    let entry = format!("{}={}", form_encode(param), form_encode(token));

    let mut pairs: Vec<String> = Vec::new();
    let mut replaced = false;
    for pair in query.unwrap_or("").split('&').filter(|p| !p.is_empty()) {
        let key = pair.split_once('=').map_or(pair, |(k, _)| k);
        if form_decode(key) == param {
            if !replaced {
                pairs.push(entry.clone());
                replaced = true;
            }
        } else {
            pairs.push(pair.to_string());
        }
    }
    if !replaced {
        pairs.push(entry);
    }

    let mut out = format!("{}?{}", base, pairs.join("&"));
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Encode a session into `url`. `None` when the encoder refused (tables
/// not loaded), in which case the caller keeps its current link.
pub fn encode_to_link(
    url: &str,
    state: &SessionState,
    ctx: &LookupContext,
    config: &LinkConfig,
) -> Option<String> {
    let token = encode_state(state, ctx);
    if token.is_empty() {
        return None;
    }
    Some(with_state_param(url, &config.param, &token))
}

/// Decode the session stored in `url`, if there is a readable one
pub fn decode_from_link(
    url: &str,
    ctx: &LookupContext,
    config: &LinkConfig,
) -> Option<SessionState> {
    let token = state_param(url, &config.param)?;
    decode_state(&token, ctx)
}

/// (before `?`, query, fragment)
fn split_url(url: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url, None),
    };
    match rest.split_once('?') {
        Some((base, query)) => (base, Some(query), fragment),
        None if !rest.contains('/') && rest.contains('=') => ("", Some(rest), fragment),
        None => (rest, None, fragment),
    }
}

fn form_encode(value: &str) -> String {
    utf8_percent_encode(value, FORM_VALUE)
        .to_string()
        .replace("%20", "+")
}

fn form_decode(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
