//! Token commands (decode, inspect, upgrade, encode, link, tables)

use crate::commands::{CommandContext, CommandResult};
use chordlink_core::{
    inspect_token, state_param, try_decode_state, try_encode_state, upgrade_token,
    LookupContext, SessionState,
};
use colored::*;
use tracing::debug;

/// Handle `decode [--json] <token>`
pub fn cmd_decode(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let (json, token) = match args.strip_prefix("--json") {
        Some(rest) => (true, rest.trim()),
        None => (false, args),
    };
    if token.is_empty() {
        return CommandResult::Error("Usage: decode [--json] <token>".to_string());
    }
    decode_into(token, json, ctx)
}

/// Handle `link <url>`: decode the token stored in a share link
pub fn cmd_link(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: link <url>".to_string());
    }
    let param = &ctx.config.link.param;
    match state_param(args, param) {
        Some(token) => {
            debug!(%param, "Found state parameter");
            decode_into(&token, false, ctx)
        }
        None => CommandResult::Error(format!("No '{}' parameter in {}", param, args)),
    }
}

/// Handle `inspect <token>`: show the raw segments without decoding
pub fn cmd_inspect(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: inspect <token>".to_string());
    }

    let report = inspect_token(args);
    let mut out = match report.version {
        Some(v) if v.is_legacy() => {
            format!("Schema {} {}\n", v.to_string().cyan(), "(legacy)".yellow())
        }
        Some(v) => format!("Schema {}\n", v.to_string().cyan()),
        None => format!("{}\n", "Unknown schema tag".red()),
    };
    for (label, value) in &report.segments {
        out.push_str(&format!("  {:<8} {}\n", label.green(), value));
    }
    for (i, entry) in report.chord_entries.iter().enumerate() {
        out.push_str(&format!("  chord {:<2} {}\n", i + 1, entry));
    }
    CommandResult::Message(out.trim_end().to_string())
}

/// Handle `upgrade <token>`
pub fn cmd_upgrade(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: upgrade <token>".to_string());
    }
    match upgrade_token(args, &ctx.config.tables) {
        Some(token) => CommandResult::Message(token),
        None => CommandResult::Error("Token could not be decoded".to_string()),
    }
}

/// Handle `encode`: re-encode the last decoded session
pub fn cmd_encode(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(state) = &ctx.last_state else {
        return CommandResult::Error(
            "Nothing decoded yet. Use 'decode' or 'link' first".to_string(),
        );
    };
    match try_encode_state(state, &ctx.config.tables) {
        Ok(token) => CommandResult::Message(token),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `tables`: list the active lookup tables
pub fn cmd_tables(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let tables = &ctx.config.tables;
    let indexed = |names: &[String]| {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| format!("{}:{}", i, n))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "Keys:".green(), indexed(&tables.keys)));
    out.push_str(&format!("{} {}\n", "Modes:".green(), indexed(&tables.modes)));
    out.push_str(&format!(
        "{} {}\n",
        "Instruments:".green(),
        indexed(&tables.instruments)
    ));
    out.push_str(&format!("{}\n", "Chords:".green()));
    for (i, chord) in tables.chords.iter().enumerate() {
        out.push_str(&format!("  {:<2} {:<8} {}\n", i, chord.name.cyan(), chord.notes));
    }
    out.push_str(&format!("{} {}", "Link parameter:".green(), ctx.config.link.param));
    CommandResult::Message(out)
}

fn decode_into(token: &str, json: bool, ctx: &mut CommandContext) -> CommandResult {
    let state = match try_decode_state(token, &ctx.config.tables) {
        Ok(state) => state,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let message = if json {
        match serde_json::to_string_pretty(&state) {
            Ok(text) => text,
            Err(e) => return CommandResult::Error(e.to_string()),
        }
    } else {
        describe_state(&state, &ctx.config.tables)
    };
    ctx.last_state = Some(state);
    CommandResult::Message(message)
}

/// Human-readable summary of a session
pub fn describe_state(state: &SessionState, tables: &LookupContext) -> String {
    let name = |n: Option<&str>| n.unwrap_or("?").to_string();
    let key = name(tables.key_name(state.key_index));
    let mode = name(tables.mode_name(state.mode_index));

    let timing = &state.timing;
    let inst = &state.instrument;
    let mut out = format!("{} {} {}\n", "Key:".green(), key.cyan().bold(), mode.cyan());
    out.push_str(&format!("{} {}\n", "Pattern:".green(), state.pattern));
    out.push_str(&format!(
        "{} {} BPM, {} notes, swing {}%{}{}\n",
        "Timing:".green(),
        timing.bpm,
        timing.subdivision.name(),
        timing.swing,
        if timing.live_mode { ", live" } else { "" },
        if timing.show_pattern { ", pattern shown" } else { "" },
    ));
    out.push_str(&format!(
        "{} {} (octave {:+}, duration {:.1}, volume {:.2}{})\n",
        "Instrument:".green(),
        name(tables.instrument_name(inst.instrument_index)),
        inst.octave_offset,
        inst.note_duration,
        inst.volume_level,
        if inst.cut_off_previous_notes { ", cut-off" } else { "" },
    ));
    out.push_str(&format!(
        "{} bass {:+} mid {:+} treble {:+} dB, reverb {:.2} chorus {:.2} delay {:.2}\n",
        "Effects:".green(),
        inst.eq.bass,
        inst.eq.mid,
        inst.eq.treble,
        inst.reverb_level,
        inst.chorus_level,
        inst.delay_level,
    ));

    out.push_str(&format!("{} {}", "Chords:".green(), state.chords.len()));
    for (i, chord) in state.chords.iter().enumerate() {
        out.push_str(&format!("\n  {:<2} {:<10} {}", i + 1, chord.name.cyan(), chord.notes));
        if let Some(origin) = chord.provenance {
            if (origin.original_key_index, origin.original_mode_index)
                != (state.key_index, state.mode_index)
            {
                out.push_str(&format!(
                    " [from {} {}]",
                    name(tables.key_name(origin.original_key_index)),
                    name(tables.mode_name(origin.original_mode_index)),
                ));
            }
        }
        if let Some(pattern) = &chord.pattern_override {
            out.push_str(&format!(" ({})", pattern));
        }
    }
    out
}
