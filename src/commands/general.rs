//! General REPL commands (help, quit)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Print help information
fn print_help() {
    println!("{}", "🔗 Chordlink Help".bold());
    println!("{}", "=================".bold());
    println!();
    println!("{}", "Reading links:".green());
    println!("  {}   - Decode a state token", "decode <token>".cyan());
    println!(
        "  {} - Decode and print the session as JSON",
        "decode --json <token>".cyan()
    );
    println!(
        "  {}       - Decode the token stored in a share link",
        "link <url>".cyan()
    );
    println!(
        "  {}  - Show the raw segments of a token",
        "inspect <token>".cyan()
    );
    println!();
    println!("{}", "Writing links:".green());
    println!(
        "  {}  - Rewrite any supported token in the current schema",
        "upgrade <token>".cyan()
    );
    println!(
        "  {}           - Re-encode the last decoded session",
        "encode".cyan()
    );
    println!();
    println!("{}", "Examples:".green());
    println!(
        "  chordlink> {}",
        "decode v7_0_0_1.2.3.4_1o|1|0|0_0|1|o|o|o|3|0|7|s|0|0_".cyan()
    );
    println!("  Key: C Ionian");
    println!();
    println!(
        "  chordlink> {}",
        "upgrade v4_0_0_1.2_1o|1|0|0_0|1|o|o|o|3|0|7_1".cyan()
    );
    println!("  v7_0_0_1.2_1o|1|0|0_0|1|o|o|o|3|0|7|s|0|0_Dm~D%2C%20F%2C%20A@00");
    println!();
    println!("{}", "Other Commands:".green());
    println!(
        "  {}           - Show the active lookup tables",
        "tables".bright_green()
    );
    println!("  {}             - Show this help", "help".bright_green());
    println!("  {}             - Exit the REPL", "quit".bright_red());
}
